// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod registrar;
mod state;

#[cfg(test)]
mod tests;

pub use apply::{CommandOutcome, apply};
pub use command::SessionCommand;
pub use error::CoreError;
pub use registrar::{SUPPORT_ID_PREFIX, SupportRegistrar};
pub use state::{AssignmentSession, SessionPhase};
