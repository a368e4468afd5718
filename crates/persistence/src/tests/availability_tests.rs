// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_date, create_test_persistence, seed_staff};
use crate::{Persistence, PersistenceError};
use sitecrew_domain::{AvailabilityEntry, AvailabilityType, EmploymentCategory};
use time::Duration;

fn entry(offset_days: i64, availability_type: AvailabilityType) -> AvailabilityEntry {
    AvailabilityEntry {
        date: create_test_date() + Duration::days(offset_days),
        availability_type,
    }
}

#[test]
fn test_replace_availability_overwrites_previous_entries() {
    let mut persistence: Persistence = create_test_persistence();
    let staff_id = seed_staff(&mut persistence, "Dan", EmploymentCategory::Spot);

    persistence
        .replace_availability(
            staff_id.value(),
            &[
                entry(0, AvailabilityType::AvailableFull),
                entry(1, AvailabilityType::AvailableAm),
            ],
        )
        .unwrap();
    let written: usize = persistence
        .replace_availability(staff_id.value(), &[entry(2, AvailabilityType::AvailablePm)])
        .unwrap();

    assert_eq!(written, 1);
    let entries: Vec<AvailabilityEntry> = persistence
        .list_availability(staff_id.value(), None, None)
        .unwrap();
    assert_eq!(entries, vec![entry(2, AvailabilityType::AvailablePm)]);
}

#[test]
fn test_replace_availability_collapses_duplicates() {
    let mut persistence: Persistence = create_test_persistence();
    let staff_id = seed_staff(&mut persistence, "Dan", EmploymentCategory::Spot);

    let written: usize = persistence
        .replace_availability(
            staff_id.value(),
            &[
                entry(0, AvailabilityType::AvailableAm),
                entry(0, AvailabilityType::AvailableAm),
            ],
        )
        .unwrap();

    assert_eq!(written, 1);
}

#[test]
fn test_list_availability_respects_range() {
    let mut persistence: Persistence = create_test_persistence();
    let staff_id = seed_staff(&mut persistence, "Alice", EmploymentCategory::Regular);
    persistence
        .replace_availability(
            staff_id.value(),
            &[
                entry(0, AvailabilityType::HolidayFull),
                entry(3, AvailabilityType::HolidayAm),
                entry(10, AvailabilityType::HolidayPm),
            ],
        )
        .unwrap();

    let entries: Vec<AvailabilityEntry> = persistence
        .list_availability(
            staff_id.value(),
            Some(create_test_date() + Duration::days(1)),
            Some(create_test_date() + Duration::days(10)),
        )
        .unwrap();

    assert_eq!(
        entries,
        vec![
            entry(3, AvailabilityType::HolidayAm),
            entry(10, AvailabilityType::HolidayPm),
        ]
    );
}

#[test]
fn test_replace_availability_for_unknown_staff_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    let result = persistence.replace_availability(77, &[entry(0, AvailabilityType::AvailableFull)]);

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_replace_availability_for_deleted_staff_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let staff_id = seed_staff(&mut persistence, "Dan", EmploymentCategory::Spot);
    persistence.delete_staff(staff_id.value()).unwrap();

    let result = persistence.replace_availability(
        staff_id.value(),
        &[entry(0, AvailabilityType::AvailableFull)],
    );

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}
