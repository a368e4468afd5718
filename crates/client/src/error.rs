// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sitecrew::CoreError;
use std::time::Duration;
use thiserror::Error;

/// Coarse classification of a failure, used to decide what the operator
/// can do about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The request itself was wrong; retrying unchanged will fail again.
    Validation,
    /// The request referenced records that are missing or inactive.
    Integrity,
    /// Network, server or timing trouble; a retry may succeed.
    Transient,
}

/// Errors raised while talking to the server.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Server rejected the request ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// The server's error message.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("Could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GatewayError {
    /// Classifies this error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Transport(_) => ErrorClass::Transient,
            Self::Rejected { status, .. } => match *status {
                404 | 409 => ErrorClass::Integrity,
                408 | 429 | 500..=599 => ErrorClass::Transient,
                _ => ErrorClass::Validation,
            },
            Self::Decode(_) => ErrorClass::Validation,
        }
    }

    /// Returns whether retrying the same request may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self.class(), ErrorClass::Transient)
    }
}

/// Errors raised by [`SessionController`](crate::SessionController).
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The session refused the operation.
    #[error(transparent)]
    Session(#[from] CoreError),

    /// Fetching the day's data failed; no date is loaded.
    #[error("Failed to load assignments: {0}")]
    Load(#[source] GatewayError),

    /// The replace request failed; edits are kept.
    #[error("Failed to save assignments: {0}")]
    Confirm(#[source] GatewayError),

    /// The replace request did not finish in time; edits are kept.
    #[error("Saving assignments timed out after {}ms", after.as_millis())]
    TimedOut {
        /// The timeout that elapsed.
        after: Duration,
    },

    /// The replace succeeded but re-reading the day failed; edits are kept.
    #[error("Assignments were saved but could not be re-read: {0}")]
    ReadBack(#[source] GatewayError),
}

impl ControllerError {
    /// Classifies this error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Session(_) => ErrorClass::Validation,
            Self::Load(err) | Self::Confirm(err) | Self::ReadBack(err) => err.class(),
            Self::TimedOut { .. } => ErrorClass::Transient,
        }
    }

    /// Returns whether retrying the same operation may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self.class(), ErrorClass::Transient)
    }
}
