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

mod assignment;
mod coverage;
mod dates;
mod eligibility;
mod error;
mod records;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use assignment::{
    AssignedStaff, Assignee, DayAssignments, DayPlan, ReplaceDayOutcome, StaffAssignment,
    SupportAssignment, SupportEntry, SupportId,
};
pub use coverage::{Coverage, SiteListing, SiteSummary, resolve_coverage};
pub use dates::{
    format_date, format_start_time, hh_mm, iso_date, parse_date, parse_month, parse_start_time,
};
pub use eligibility::{EligibleStaff, resolve_eligible_staff};
pub use error::DomainError;
pub use records::{
    Availability, AvailabilityEntry, Client, ClientDraft, Sale, SaleDraft, Site, SiteDraft, Staff,
    StaffDraft,
};
pub use types::{
    AvailabilityType, ClientId, EmploymentCategory, SiteId, SiteType, StaffId, TimeSlot,
};
pub use validation::validate_support_registration;
