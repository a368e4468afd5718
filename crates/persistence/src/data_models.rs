// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use sitecrew_domain::ClientId;
use time::Date;

/// Default page size for list queries.
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Largest page size a list query will return.
pub const MAX_PAGE_LIMIT: u32 = 200;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page: u32,
    pub limit: u32,
}

impl Page {
    /// Builds a page request, clamping `limit` into `1..=MAX_PAGE_LIMIT` and
    /// treating page `0` as the first page.
    #[must_use]
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit
                .unwrap_or(DEFAULT_PAGE_LIMIT)
                .clamp(1, MAX_PAGE_LIMIT),
        }
    }

    /// Row offset of the first item on this page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }

    /// The limit as a SQL parameter.
    #[must_use]
    pub fn sql_limit(&self) -> i64 {
        i64::from(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of a list query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    /// Total matching rows across all pages.
    pub total: i64,
    pub page: u32,
    pub limit: u32,
}

/// Filters for the site list.
///
/// `date` selects a single day; otherwise `from`/`to` bound an inclusive
/// range, either end optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteFilter {
    pub date: Option<Date>,
    pub from: Option<Date>,
    pub to: Option<Date>,
}

/// Filters for the sales list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaleFilter {
    pub client_id: Option<ClientId>,
    /// Normalized `YYYY-MM`.
    pub month: Option<String>,
}
