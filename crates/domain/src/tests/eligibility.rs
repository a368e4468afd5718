// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_availability, create_test_staff, test_date};
use crate::{
    AvailabilityType, EligibleStaff, EmploymentCategory, StaffId, TimeSlot,
    resolve_eligible_staff,
};
use time::Duration;

#[test]
fn test_regular_staff_without_records_is_eligible() {
    let staff = vec![create_test_staff(1, "Regular One", EmploymentCategory::Regular)];

    let eligible: Vec<EligibleStaff> = resolve_eligible_staff(test_date(), &staff, &[]);

    assert_eq!(eligible.len(), 1);
    assert_eq!(eligible[0].staff_id, StaffId::new(1));
    assert_eq!(eligible[0].available_slots, vec![TimeSlot::Am, TimeSlot::Pm]);
}

#[test]
fn test_regular_staff_on_full_holiday_is_excluded() {
    let staff = vec![create_test_staff(1, "Regular One", EmploymentCategory::Regular)];
    let availability = vec![create_test_availability(
        1,
        test_date(),
        AvailabilityType::HolidayFull,
    )];

    assert!(resolve_eligible_staff(test_date(), &staff, &availability).is_empty());
}

#[test]
fn test_regular_staff_on_half_day_holiday_is_excluded() {
    let staff = vec![
        create_test_staff(1, "Morning Off", EmploymentCategory::Regular),
        create_test_staff(2, "Afternoon Off", EmploymentCategory::Regular),
    ];
    let availability = vec![
        create_test_availability(1, test_date(), AvailabilityType::HolidayAm),
        create_test_availability(2, test_date(), AvailabilityType::HolidayPm),
    ];

    assert!(resolve_eligible_staff(test_date(), &staff, &availability).is_empty());
}

#[test]
fn test_regular_holiday_on_other_date_does_not_exclude() {
    let staff = vec![create_test_staff(1, "Regular One", EmploymentCategory::Regular)];
    let tomorrow = test_date() + Duration::days(1);
    let availability = vec![create_test_availability(1, tomorrow, AvailabilityType::HolidayFull)];

    assert_eq!(resolve_eligible_staff(test_date(), &staff, &availability).len(), 1);
}

#[test]
fn test_spot_staff_without_records_is_excluded() {
    let staff = vec![create_test_staff(2, "Spot One", EmploymentCategory::Spot)];

    assert!(resolve_eligible_staff(test_date(), &staff, &[]).is_empty());
}

#[test]
fn test_spot_staff_available_am_is_included_with_slot_hint() {
    let staff = vec![create_test_staff(2, "Spot One", EmploymentCategory::Spot)];
    let availability = vec![create_test_availability(
        2,
        test_date(),
        AvailabilityType::AvailableAm,
    )];

    let eligible: Vec<EligibleStaff> = resolve_eligible_staff(test_date(), &staff, &availability);

    assert_eq!(eligible.len(), 1);
    assert_eq!(eligible[0].employment_category, EmploymentCategory::Spot);
    assert_eq!(eligible[0].available_slots, vec![TimeSlot::Am]);
}

#[test]
fn test_spot_staff_with_only_holiday_record_is_excluded() {
    let staff = vec![create_test_staff(2, "Spot One", EmploymentCategory::Spot)];
    let availability = vec![create_test_availability(
        2,
        test_date(),
        AvailabilityType::HolidayFull,
    )];

    assert!(resolve_eligible_staff(test_date(), &staff, &availability).is_empty());
}

#[test]
fn test_spot_staff_split_availability_merges_slots() {
    let staff = vec![create_test_staff(2, "Spot One", EmploymentCategory::Spot)];
    let availability = vec![
        create_test_availability(2, test_date(), AvailabilityType::AvailablePm),
        create_test_availability(2, test_date(), AvailabilityType::AvailableAm),
    ];

    let eligible: Vec<EligibleStaff> = resolve_eligible_staff(test_date(), &staff, &availability);

    assert_eq!(eligible[0].available_slots, vec![TimeSlot::Am, TimeSlot::Pm]);
}

#[test]
fn test_hidden_and_deleted_staff_are_never_eligible() {
    let mut hidden = create_test_staff(1, "Hidden", EmploymentCategory::Regular);
    hidden.hidden = true;
    let mut deleted = create_test_staff(2, "Deleted", EmploymentCategory::Regular);
    deleted.deleted_at = Some(String::from("2024-06-01 09:00:00"));

    assert!(resolve_eligible_staff(test_date(), &[hidden, deleted], &[]).is_empty());
}

#[test]
fn test_eligible_staff_ordered_by_name() {
    let staff = vec![
        create_test_staff(3, "Chiba", EmploymentCategory::Regular),
        create_test_staff(1, "Aoki", EmploymentCategory::Regular),
        create_test_staff(2, "Baba", EmploymentCategory::Spot),
    ];
    let availability = vec![create_test_availability(
        2,
        test_date(),
        AvailabilityType::AvailableFull,
    )];

    let names: Vec<String> = resolve_eligible_staff(test_date(), &staff, &availability)
        .into_iter()
        .map(|s| s.name)
        .collect();

    assert_eq!(names, vec!["Aoki", "Baba", "Chiba"]);
}
