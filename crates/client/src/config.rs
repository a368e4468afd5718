// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::time::Duration;

/// Upper bound on a confirm round trip before it is reported as timed out.
pub const DEFAULT_CONFIRM_TIMEOUT: Duration = Duration::from_secs(8);

/// Per-request timeout applied by the HTTP client.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for talking to a SiteCrew server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server base URL, e.g. `http://127.0.0.1:3000`.
    pub base_url: String,
    /// Timeout for each HTTP request.
    pub request_timeout: Duration,
    /// Timeout for the replace request issued by a confirm.
    pub confirm_timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration for `base_url` with default timeouts.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            confirm_timeout: DEFAULT_CONFIRM_TIMEOUT,
        }
    }

    /// Overrides the confirm timeout.
    #[must_use]
    pub const fn with_confirm_timeout(mut self, timeout: Duration) -> Self {
        self.confirm_timeout = timeout;
        self
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Joins `path` onto the base URL.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://127.0.0.1:3000")
    }
}
