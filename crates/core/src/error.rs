// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sitecrew_domain::{DomainError, SiteId, StaffId, SupportId, TimeSlot};

/// Errors that can occur while editing an assignment session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The operation needs a loaded date.
    NoDateSelected,
    /// A confirm is already in flight.
    ConfirmInFlight,
    /// `complete_confirm` or `fail_confirm` was called without a pending confirm.
    NoConfirmInFlight,
    /// Confirm was requested with no assignments in the session.
    NothingToConfirm,
    /// The site does not need coverage in the requested slot on this date.
    SiteNotCovered {
        /// The site.
        site_id: SiteId,
        /// The slot.
        time_slot: TimeSlot,
    },
    /// The staff member is not eligible on the loaded date.
    StaffNotEligible(StaffId),
    /// The support identifier was never registered in this session.
    UnknownSupportEntry(SupportId),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::NoDateSelected => write!(f, "No date has been selected"),
            Self::ConfirmInFlight => write!(f, "A confirm is already in progress"),
            Self::NoConfirmInFlight => write!(f, "No confirm is in progress"),
            Self::NothingToConfirm => write!(f, "There are no assignments to confirm"),
            Self::SiteNotCovered { site_id, time_slot } => {
                write!(
                    f,
                    "Site {site_id} does not need coverage in the {time_slot} slot"
                )
            }
            Self::StaffNotEligible(staff_id) => {
                write!(f, "Staff {staff_id} is not eligible on the selected date")
            }
            Self::UnknownSupportEntry(support_id) => {
                write!(f, "Support entry '{support_id}' is not registered")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
