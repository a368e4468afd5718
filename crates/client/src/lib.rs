// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client-side driver for the daily assignment screen.
//!
//! `SessionController` owns an [`AssignmentSession`](sitecrew::AssignmentSession)
//! and talks to the server through an [`AssignmentGateway`]. The HTTP
//! implementation is [`HttpGateway`].

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
#![allow(clippy::multiple_crate_versions)]

mod config;
mod controller;
mod error;
mod gateway;

#[cfg(test)]
mod tests;

pub use config::{ClientConfig, DEFAULT_CONFIRM_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
pub use controller::SessionController;
pub use error::{ControllerError, ErrorClass, GatewayError};
pub use gateway::{AssignmentGateway, HttpGateway};
