// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Assignee, AvailabilityType, DomainError, EmploymentCategory, SiteType, StaffId, SupportId,
    TimeSlot,
};
use std::str::FromStr;

#[test]
fn test_category_strings_round_trip() {
    for category in [EmploymentCategory::Regular, EmploymentCategory::Spot] {
        assert_eq!(
            EmploymentCategory::from_str(category.as_str()).unwrap(),
            category
        );
    }
    assert_eq!(
        EmploymentCategory::from_str("PART_TIME"),
        Err(DomainError::InvalidEmploymentCategory(String::from(
            "PART_TIME"
        )))
    );
}

#[test]
fn test_availability_type_classification() {
    assert!(AvailabilityType::HolidayAm.is_holiday());
    assert!(!AvailabilityType::HolidayAm.is_available());
    assert!(AvailabilityType::AvailablePm.is_available());
    assert_eq!(AvailabilityType::AvailableFull.slots(), &TimeSlot::ALL);
    assert_eq!(AvailabilityType::HolidayPm.slots(), &[TimeSlot::Pm]);
    assert_eq!(
        AvailabilityType::from_str("AVAILABLE_AM").unwrap(),
        AvailabilityType::AvailableAm
    );
}

#[test]
fn test_site_type_requires() {
    assert!(SiteType::Full.requires(TimeSlot::Am));
    assert!(SiteType::Full.requires(TimeSlot::Pm));
    assert!(SiteType::Am.requires(TimeSlot::Am));
    assert!(!SiteType::Am.requires(TimeSlot::Pm));
    assert!(!SiteType::Pm.requires(TimeSlot::Am));
    assert!(SiteType::from_str("NIGHT").is_err());
}

#[test]
fn test_wire_names_match_database_names() {
    assert_eq!(
        serde_json::to_string(&AvailabilityType::HolidayFull).unwrap(),
        "\"HOLIDAY_FULL\""
    );
    assert_eq!(serde_json::to_string(&SiteType::Full).unwrap(), "\"FULL\"");
    assert_eq!(serde_json::to_string(&TimeSlot::Pm).unwrap(), "\"PM\"");
    assert_eq!(
        serde_json::to_string(&EmploymentCategory::Spot).unwrap(),
        "\"SPOT\""
    );
}

#[test]
fn test_assignee_is_tagged_by_kind() {
    let staff: Assignee = Assignee::staff(StaffId::new(7));
    let support: Assignee = Assignee::support(SupportId::new(String::from("support_1_0")));

    assert_eq!(
        serde_json::to_value(&staff).unwrap(),
        serde_json::json!({"kind": "staff", "id": 7})
    );
    assert_eq!(
        serde_json::to_value(&support).unwrap(),
        serde_json::json!({"kind": "support", "id": "support_1_0"})
    );
    assert_ne!(staff, support);
}
