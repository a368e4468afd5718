// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Query types keep every field as raw text so that absent and malformed
//! values are reported through `ApiError` rather than by the HTTP framework.

use serde::{Deserialize, Serialize};
use sitecrew_domain::{
    AvailabilityEntry, EligibleStaff, Site, SiteListing, StaffId, iso_date,
};
use sitecrew_persistence::Paged;
use time::Date;

/// Query carrying the date of a daily assignment read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DateQuery {
    /// The work date, `YYYY-MM-DD`.
    pub date: Option<String>,
}

/// Paging and name filter for client and staff lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListQuery {
    /// 1-based page number.
    pub page: Option<String>,
    /// Page size.
    pub limit: Option<String>,
    /// Substring of the name.
    pub q: Option<String>,
}

/// Paging and date filters for the site list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SiteListQuery {
    /// 1-based page number.
    pub page: Option<String>,
    /// Page size.
    pub limit: Option<String>,
    /// Exact work date. Takes precedence over the range.
    pub date: Option<String>,
    /// Inclusive range start.
    pub from: Option<String>,
    /// Inclusive range end.
    pub to: Option<String>,
}

/// Paging and filters for the sales list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SaleListQuery {
    /// 1-based page number.
    pub page: Option<String>,
    /// Page size.
    pub limit: Option<String>,
    /// Only sales of this client.
    pub client_id: Option<String>,
    /// Only sales of this month, `YYYY-MM`.
    pub month: Option<String>,
}

/// Range filter for one staff member's availability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AvailabilityQuery {
    /// Inclusive range start.
    pub from: Option<String>,
    /// Inclusive range end.
    pub to: Option<String>,
}

/// A page of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// The records on this page.
    pub items: Vec<T>,
    /// Total matching records across all pages.
    pub total: i64,
    /// The page returned.
    pub page: u32,
    /// The page size used.
    pub limit: u32,
}

impl<T> ListResponse<T> {
    /// Converts a persistence page, mapping each item.
    pub fn from_paged<U>(paged: Paged<U>, f: impl FnMut(U) -> T) -> Self {
        Self {
            items: paged.items.into_iter().map(f).collect(),
            total: paged.total,
            page: paged.page,
            limit: paged.limit,
        }
    }
}

/// Response for a created record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    /// The new record's identifier.
    pub id: i64,
    /// A success message.
    pub message: String,
}

/// Response for an update or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// A success message.
    pub message: String,
}

/// A site with its client's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteInfo {
    /// The site record.
    #[serde(flatten)]
    pub site: Site,
    /// The owning client's name.
    pub client_name: String,
}

impl From<SiteListing> for SiteInfo {
    fn from(listing: SiteListing) -> Self {
        Self {
            site: listing.site,
            client_name: listing.client_name,
        }
    }
}

/// Response listing the staff eligible on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibleStaffResponse {
    /// The work date.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Eligible staff ordered by name.
    pub staff: Vec<EligibleStaff>,
}

/// Response for a full-day assignment replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceAssignmentsResponse {
    /// The replaced date.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Roster rows persisted.
    pub assignment_count: usize,
    /// Support rows persisted.
    pub support_assignment_count: usize,
    /// A success message.
    pub message: String,
}

/// Request body replacing one staff member's availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceAvailabilityRequest {
    /// The complete set of declarations.
    #[serde(default)]
    pub entries: Vec<AvailabilityEntry>,
}

/// Response listing or replacing availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    /// The staff member.
    pub staff_id: StaffId,
    /// The declarations, ordered by date.
    pub entries: Vec<AvailabilityEntry>,
}
