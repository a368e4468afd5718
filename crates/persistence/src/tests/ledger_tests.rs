// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Full-day replace and read-back of the assignment ledger.

use super::{
    create_site_draft, create_staff_draft, create_test_date, create_test_persistence, seed_client,
    seed_site, seed_staff,
};
use crate::{Persistence, PersistenceError};
use sitecrew_domain::{
    DayAssignments, DayPlan, EmploymentCategory, ReplaceDayOutcome, SiteId, SiteType,
    StaffAssignment, StaffId, SupportAssignment, SupportId, TimeSlot,
};
use time::Duration;
use time::macros::time;

struct Fixture {
    persistence: Persistence,
    full_site: SiteId,
    am_site: SiteId,
    alice: StaffId,
    bob: StaffId,
}

fn create_fixture() -> Fixture {
    let mut persistence: Persistence = create_test_persistence();
    let client_id = seed_client(&mut persistence, "Acme");
    let full_site: SiteId = seed_site(&mut persistence, client_id, SiteType::Full);
    let am_site: SiteId = seed_site(&mut persistence, client_id, SiteType::Am);
    let alice: StaffId = seed_staff(&mut persistence, "Alice", EmploymentCategory::Regular);
    let bob: StaffId = seed_staff(&mut persistence, "Bob", EmploymentCategory::Spot);
    Fixture {
        persistence,
        full_site,
        am_site,
        alice,
        bob,
    }
}

fn staff_row(site_id: SiteId, time_slot: TimeSlot, staff_id: StaffId) -> StaffAssignment {
    StaffAssignment {
        site_id,
        time_slot,
        staff_id,
        position: 0,
    }
}

fn support_row(site_id: SiteId, key: &str, headcount: u32) -> SupportAssignment {
    SupportAssignment {
        site_id,
        time_slot: TimeSlot::Am,
        support_id: SupportId::new(key.to_string()),
        company_name: String::from("Beta Corp"),
        headcount,
        position: 0,
    }
}

fn create_plan(fixture: &Fixture) -> DayPlan {
    DayPlan {
        date: create_test_date(),
        assignments: vec![
            staff_row(fixture.full_site, TimeSlot::Am, fixture.alice),
            staff_row(fixture.full_site, TimeSlot::Pm, fixture.alice),
            staff_row(fixture.am_site, TimeSlot::Am, fixture.bob),
        ],
        support_assignments: vec![support_row(fixture.full_site, "support_1700000000000_0", 3)],
    }
}

#[test]
fn test_replace_day_round_trips() {
    let mut fixture = create_fixture();
    let plan: DayPlan = create_plan(&fixture);

    let outcome: ReplaceDayOutcome = fixture.persistence.replace_day(&plan).unwrap();
    assert_eq!(outcome.assignment_count, 3);
    assert_eq!(outcome.support_assignment_count, 1);

    let day: DayAssignments = fixture
        .persistence
        .read_assignments(create_test_date())
        .unwrap();
    assert_eq!(day.assignments.len(), 3);
    assert!(day.assignments.iter().all(|a| a.client_name == "Acme"));
    assert_eq!(
        day.assignments
            .iter()
            .filter(|a| a.staff_id == fixture.alice)
            .count(),
        2
    );
    assert_eq!(day.support_assignments, plan.support_assignments);
}

#[test]
fn test_replace_day_is_idempotent() {
    let mut fixture = create_fixture();
    let plan: DayPlan = create_plan(&fixture);

    fixture.persistence.replace_day(&plan).unwrap();
    let first: DayAssignments = fixture
        .persistence
        .read_assignments(create_test_date())
        .unwrap();
    fixture.persistence.replace_day(&plan).unwrap();
    let second: DayAssignments = fixture
        .persistence
        .read_assignments(create_test_date())
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_replace_day_removes_rows_missing_from_plan() {
    let mut fixture = create_fixture();
    fixture
        .persistence
        .replace_day(&create_plan(&fixture))
        .unwrap();

    let smaller = DayPlan {
        date: create_test_date(),
        assignments: vec![staff_row(fixture.am_site, TimeSlot::Am, fixture.bob)],
        support_assignments: Vec::new(),
    };
    fixture.persistence.replace_day(&smaller).unwrap();

    let day: DayAssignments = fixture
        .persistence
        .read_assignments(create_test_date())
        .unwrap();
    assert_eq!(day.assignments.len(), 1);
    assert_eq!(day.assignments[0].staff_id, fixture.bob);
    assert!(day.support_assignments.is_empty());
}

#[test]
fn test_empty_plan_clears_the_day() {
    let mut fixture = create_fixture();
    fixture
        .persistence
        .replace_day(&create_plan(&fixture))
        .unwrap();

    fixture
        .persistence
        .replace_day(&DayPlan {
            date: create_test_date(),
            assignments: Vec::new(),
            support_assignments: Vec::new(),
        })
        .unwrap();

    let day = fixture
        .persistence
        .read_assignments(create_test_date())
        .unwrap();
    assert_eq!(day, DayAssignments::empty(create_test_date()));
}

#[test]
fn test_replace_day_leaves_other_dates_untouched() {
    let mut fixture = create_fixture();
    let plan: DayPlan = create_plan(&fixture);
    fixture.persistence.replace_day(&plan).unwrap();

    let next_day = create_test_date() + Duration::days(1);
    let client_id = seed_client(&mut fixture.persistence, "Tomorrow Ltd");
    let tomorrow_site = SiteId::new(
        fixture
            .persistence
            .create_site(&create_site_draft(
                client_id,
                next_day,
                SiteType::Full,
                time!(8:00),
            ))
            .unwrap(),
    );
    fixture
        .persistence
        .replace_day(&DayPlan {
            date: next_day,
            assignments: vec![staff_row(tomorrow_site, TimeSlot::Am, fixture.bob)],
            support_assignments: Vec::new(),
        })
        .unwrap();

    let today = fixture
        .persistence
        .read_assignments(create_test_date())
        .unwrap();
    assert_eq!(today.assignments.len(), 3);
    assert_eq!(
        fixture
            .persistence
            .read_assignments(next_day)
            .unwrap()
            .assignments
            .len(),
        1
    );
}

#[test]
fn test_unknown_site_rejects_whole_plan() {
    let mut fixture = create_fixture();
    fixture
        .persistence
        .replace_day(&create_plan(&fixture))
        .unwrap();

    let bad = DayPlan {
        date: create_test_date(),
        assignments: vec![staff_row(SiteId::new(999), TimeSlot::Am, fixture.alice)],
        support_assignments: Vec::new(),
    };
    let result = fixture.persistence.replace_day(&bad);

    assert!(matches!(
        result,
        Err(PersistenceError::ReferentialIntegrity(_))
    ));
    let day = fixture
        .persistence
        .read_assignments(create_test_date())
        .unwrap();
    assert_eq!(day.assignments.len(), 3);
    assert_eq!(day.support_assignments.len(), 1);
}

#[test]
fn test_off_date_and_cancelled_sites_reject_whole_plan() {
    let mut fixture = create_fixture();
    fixture
        .persistence
        .replace_day(&create_plan(&fixture))
        .unwrap();

    let client_id = seed_client(&mut fixture.persistence, "Gamma Ltd");
    let mut draft = create_site_draft(
        client_id,
        create_test_date() + Duration::days(1),
        SiteType::Full,
        time!(9:00),
    );
    let off_date = SiteId::new(fixture.persistence.create_site(&draft).unwrap());
    draft.date = create_test_date();
    draft.cancelled = true;
    let cancelled = SiteId::new(fixture.persistence.create_site(&draft).unwrap());

    for site_id in [off_date, cancelled] {
        let staffed = DayPlan {
            date: create_test_date(),
            assignments: vec![staff_row(site_id, TimeSlot::Am, fixture.alice)],
            support_assignments: Vec::new(),
        };
        assert!(matches!(
            fixture.persistence.replace_day(&staffed),
            Err(PersistenceError::ReferentialIntegrity(_))
        ));

        let supported = DayPlan {
            date: create_test_date(),
            assignments: Vec::new(),
            support_assignments: vec![support_row(site_id, "support_1700000000000_1", 2)],
        };
        assert!(matches!(
            fixture.persistence.replace_day(&supported),
            Err(PersistenceError::ReferentialIntegrity(_))
        ));
    }

    let day = fixture
        .persistence
        .read_assignments(create_test_date())
        .unwrap();
    assert_eq!(day.assignments.len(), 3);
    assert_eq!(day.support_assignments.len(), 1);
}

#[test]
fn test_read_day_orders_each_slot_by_position() {
    let mut fixture = create_fixture();
    let mut support = support_row(fixture.full_site, "support_1700000000000_0", 2);
    support.time_slot = TimeSlot::Pm;
    support.position = 0;
    let mut alice = staff_row(fixture.full_site, TimeSlot::Pm, fixture.alice);
    alice.position = 2;
    let mut bob = staff_row(fixture.full_site, TimeSlot::Pm, fixture.bob);
    bob.position = 1;

    fixture
        .persistence
        .replace_day(&DayPlan {
            date: create_test_date(),
            assignments: vec![alice, bob],
            support_assignments: vec![support.clone()],
        })
        .unwrap();

    let day = fixture
        .persistence
        .read_assignments(create_test_date())
        .unwrap();
    let staff: Vec<(StaffId, u32)> = day
        .assignments
        .iter()
        .map(|row| (row.staff_id, row.position))
        .collect();
    assert_eq!(staff, vec![(fixture.bob, 1), (fixture.alice, 2)]);
    assert_eq!(day.support_assignments, vec![support]);
}

#[test]
fn test_inactive_staff_rejects_whole_plan() {
    let mut fixture = create_fixture();
    fixture
        .persistence
        .replace_day(&create_plan(&fixture))
        .unwrap();

    let mut hidden = create_staff_draft("Hank", EmploymentCategory::Regular);
    hidden.hidden = true;
    let hank = StaffId::new(fixture.persistence.create_staff(&hidden).unwrap());
    fixture.persistence.delete_staff(fixture.bob.value()).unwrap();

    for staff_id in [hank, fixture.bob, StaffId::new(999)] {
        let bad = DayPlan {
            date: create_test_date(),
            assignments: vec![staff_row(fixture.am_site, TimeSlot::Am, staff_id)],
            support_assignments: Vec::new(),
        };
        assert!(matches!(
            fixture.persistence.replace_day(&bad),
            Err(PersistenceError::ReferentialIntegrity(_))
        ));
    }

    let day = fixture
        .persistence
        .read_assignments(create_test_date())
        .unwrap();
    assert_eq!(day.assignments.len(), 3);
}

#[test]
fn test_deleting_a_site_removes_its_assignments() {
    let mut fixture = create_fixture();
    fixture
        .persistence
        .replace_day(&create_plan(&fixture))
        .unwrap();

    fixture
        .persistence
        .delete_site(fixture.full_site.value())
        .unwrap();

    let day = fixture
        .persistence
        .read_assignments(create_test_date())
        .unwrap();
    assert_eq!(day.assignments.len(), 1);
    assert_eq!(day.assignments[0].site_id, fixture.am_site);
    assert!(day.support_assignments.is_empty());
}
