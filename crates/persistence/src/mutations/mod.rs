// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! Mutations use Diesel DSL throughout; the only backend-specific helper is
//! `get_last_insert_rowid()` from the `backend` module.
//!
//! - `clients`, `staff`, `sites`, `sales` — record create/update/delete
//! - `availability` — per-staff bulk replace
//! - `ledger` — the full-day assignment replace

pub mod availability;
pub mod clients;
pub mod ledger;
pub mod sales;
pub mod sites;
pub mod staff;
