// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A person or client name is empty or invalid.
    InvalidName(String),
    /// Employment category string is not recognised.
    InvalidEmploymentCategory(String),
    /// Availability type string is not recognised.
    InvalidAvailabilityType(String),
    /// Site type string is not recognised.
    InvalidSiteType(String),
    /// Time slot string is not recognised.
    InvalidTimeSlot(String),
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to parse a site start time.
    InvalidStartTime {
        /// The invalid time string.
        value: String,
        /// The parsing error message.
        error: String,
    },
    /// Sales month is not a valid `YYYY-MM` value.
    InvalidMonth(String),
    /// Sales amount is negative.
    InvalidAmount(i64),
    /// Support company name is blank.
    BlankCompanyName,
    /// Support headcount is below one.
    InvalidHeadcount(i64),
    /// The same assignee appears twice in one `(site, slot)` of a day plan.
    DuplicateAssignment {
        /// The site identifier.
        site_id: i64,
        /// The slot, as text.
        time_slot: String,
        /// The duplicated assignee, as text.
        assignee: String,
    },
    /// Rows sharing one support id disagree on company or headcount.
    InconsistentSupportEntry(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidEmploymentCategory(value) => {
                write!(
                    f,
                    "Invalid employment category '{value}'. Must be REGULAR or SPOT"
                )
            }
            Self::InvalidAvailabilityType(value) => {
                write!(f, "Invalid availability type '{value}'")
            }
            Self::InvalidSiteType(value) => {
                write!(f, "Invalid site type '{value}'. Must be AM, PM or FULL")
            }
            Self::InvalidTimeSlot(value) => {
                write!(f, "Invalid time slot '{value}'. Must be AM or PM")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidStartTime { value, error } => {
                write!(f, "Failed to parse start time '{value}': {error}")
            }
            Self::InvalidMonth(value) => {
                write!(f, "Invalid month '{value}'. Expected YYYY-MM")
            }
            Self::InvalidAmount(amount) => {
                write!(f, "Invalid amount {amount}. Must not be negative")
            }
            Self::BlankCompanyName => write!(f, "Support company name cannot be blank"),
            Self::InvalidHeadcount(count) => {
                write!(f, "Invalid support headcount {count}. Must be at least 1")
            }
            Self::DuplicateAssignment {
                site_id,
                time_slot,
                assignee,
            } => {
                write!(
                    f,
                    "Assignee {assignee} appears more than once for site {site_id} in slot {time_slot}"
                )
            }
            Self::InconsistentSupportEntry(support_id) => {
                write!(
                    f,
                    "Support entry {support_id} has conflicting company names or headcounts"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
