// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! Every query is generated in backend-specific monomorphic versions
//! (`_sqlite`, and `_mysql` with the `mysql` feature). The `Persistence`
//! adapter in `lib.rs` dispatches to the version matching its connection.
//!
//! - `clients`, `staff`, `sites`, `sales`: record lookups and paged lists
//! - `availability`: availability declarations per staff or per date
//! - `ledger`: the assignment rows recorded for a date

pub mod availability;
pub mod clients;
pub mod ledger;
pub mod sales;
pub mod sites;
pub mod staff;

/// Escape character paired with [`contains_pattern`].
pub const LIKE_ESCAPE: char = '\\';

/// Builds a `LIKE` pattern matching `fragment` anywhere, with `%` and `_`
/// in the fragment taken literally.
#[must_use]
pub fn contains_pattern(fragment: &str) -> String {
    let mut pattern: String = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
