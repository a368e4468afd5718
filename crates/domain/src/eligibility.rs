// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Daily staff eligibility.
//!
//! A staff member's eligibility on a date is a pure function of their
//! employment category and the availability declarations recorded for that
//! date:
//!
//! - `REGULAR` staff are eligible unless any holiday (full, AM or PM) is
//!   recorded.
//! - `SPOT` staff are eligible only if some availability (full, AM or PM)
//!   is recorded.
//!
//! Eligibility is decided per day, not per slot. The slots implied by the
//! records are reported as a hint in [`EligibleStaff::available_slots`] but
//! are not enforced anywhere.

use crate::records::{Availability, Staff};
use crate::types::{EmploymentCategory, StaffId, TimeSlot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::Date;

/// A staff member offered for assignment on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibleStaff {
    /// The staff identifier.
    pub staff_id: StaffId,
    /// Display name.
    pub name: String,
    /// Employment category.
    pub employment_category: EmploymentCategory,
    /// Slots the availability records point at, in day order.
    pub available_slots: Vec<TimeSlot>,
}

/// Resolves the staff eligible to be offered on `date`.
///
/// Hidden and soft-deleted staff are never eligible. Availability records
/// for other dates are ignored, so callers may pass a wider window.
///
/// # Arguments
///
/// * `date` - The work date
/// * `staff` - The roster to consider
/// * `availability` - Availability declarations
///
/// # Returns
///
/// The eligible staff ordered by name, then by identifier.
#[must_use]
pub fn resolve_eligible_staff(
    date: Date,
    staff: &[Staff],
    availability: &[Availability],
) -> Vec<EligibleStaff> {
    let mut eligible: Vec<EligibleStaff> = staff
        .iter()
        .filter(|member| member.is_active())
        .filter_map(|member| {
            let records: Vec<&Availability> = availability
                .iter()
                .filter(|a| a.staff_id == member.staff_id && a.date == date)
                .collect();
            let slots: Option<BTreeSet<TimeSlot>> =
                eligible_slots(member.employment_category, &records);
            slots.map(|slots| EligibleStaff {
                staff_id: member.staff_id,
                name: member.name.clone(),
                employment_category: member.employment_category,
                available_slots: slots.into_iter().collect(),
            })
        })
        .collect();

    eligible.sort_by(|a, b| a.name.cmp(&b.name).then(a.staff_id.cmp(&b.staff_id)));
    eligible
}

/// Applies the category rule to one staff member's records for the day.
///
/// Returns `None` when the staff member is not eligible, otherwise the slot
/// hint.
fn eligible_slots(
    category: EmploymentCategory,
    records: &[&Availability],
) -> Option<BTreeSet<TimeSlot>> {
    match category {
        EmploymentCategory::Regular => {
            if records.iter().any(|a| a.availability_type.is_holiday()) {
                None
            } else {
                Some(TimeSlot::ALL.into_iter().collect())
            }
        }
        EmploymentCategory::Spot => {
            let slots: BTreeSet<TimeSlot> = records
                .iter()
                .filter(|a| a.availability_type.is_available())
                .flat_map(|a| a.availability_type.slots().iter().copied())
                .collect();
            if slots.is_empty() { None } else { Some(slots) }
        }
    }
}
