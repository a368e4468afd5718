// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The API boundary of SiteCrew.
//!
//! Request validation, handler functions over the persistence adapter and
//! the translation of domain and persistence failures into [`ApiError`].
//! Transport concerns live in the server crate.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    create_client, create_sale, create_site, create_staff, delete_client, delete_sale,
    delete_site, delete_staff, get_assignments, get_client, get_coverage, get_eligible_staff,
    get_site, get_staff, list_availability, list_clients, list_sales, list_sites, list_staff,
    parse_page, parse_required_date, replace_assignments, replace_availability, update_client,
    update_sale, update_site, update_staff,
};
pub use request_response::{
    AvailabilityQuery, AvailabilityResponse, CreatedResponse, DateQuery, EligibleStaffResponse,
    ListQuery, ListResponse, MessageResponse, ReplaceAssignmentsResponse,
    ReplaceAvailabilityRequest, SaleListQuery, SiteInfo, SiteListQuery,
};
