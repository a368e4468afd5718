// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    ALICE, AM_SITE, BOB, CAROL, FULL_SITE, PM_SITE, create_assigned, create_loaded_session,
    create_test_coverage, create_test_date, create_test_eligible,
};
use crate::{AssignmentSession, CoreError, SessionPhase};
use sitecrew_domain::{
    Assignee, DayAssignments, DomainError, SupportAssignment, SupportId, TimeSlot,
};

#[test]
fn test_new_session_is_empty() {
    let session: AssignmentSession = AssignmentSession::new();

    assert_eq!(session.phase(), SessionPhase::Empty);
    assert_eq!(session.date(), None);
    assert_eq!(session.assignment_count(), 0);
}

#[test]
fn test_edits_require_a_loaded_date() {
    let mut session: AssignmentSession = AssignmentSession::new();

    assert_eq!(
        session.assign(FULL_SITE, TimeSlot::Am, Assignee::staff(ALICE)),
        Err(CoreError::NoDateSelected)
    );
    assert_eq!(
        session.unassign(FULL_SITE, TimeSlot::Am, &Assignee::staff(ALICE)),
        Err(CoreError::NoDateSelected)
    );
    assert_eq!(
        session.register_support_staff("BuildCo", 2),
        Err(CoreError::NoDateSelected)
    );
}

#[test]
fn test_load_enters_loaded_phase() {
    let session: AssignmentSession = create_loaded_session();

    assert_eq!(session.phase(), SessionPhase::Loaded);
    assert_eq!(session.date(), Some(create_test_date()));
    assert_eq!(session.eligible().len(), 2);
    assert!(session.coverage().is_some());
}

#[test]
fn test_assign_is_idempotent() {
    let mut session: AssignmentSession = create_loaded_session();

    assert!(session
        .assign(FULL_SITE, TimeSlot::Am, Assignee::staff(ALICE))
        .unwrap());
    assert!(!session
        .assign(FULL_SITE, TimeSlot::Am, Assignee::staff(ALICE))
        .unwrap());

    assert_eq!(
        session.assignees(FULL_SITE, TimeSlot::Am),
        &[Assignee::staff(ALICE)]
    );
    assert_eq!(session.phase(), SessionPhase::Dirty);
}

#[test]
fn test_assign_then_unassign_leaves_no_key() {
    let mut session: AssignmentSession = create_loaded_session();

    session
        .assign(AM_SITE, TimeSlot::Am, Assignee::staff(BOB))
        .unwrap();
    assert!(session
        .unassign(AM_SITE, TimeSlot::Am, &Assignee::staff(BOB))
        .unwrap());

    assert!(session.assignees(AM_SITE, TimeSlot::Am).is_empty());
    assert_eq!(session.entries().count(), 0);
}

#[test]
fn test_unassign_unknown_is_noop() {
    let mut session: AssignmentSession = create_loaded_session();
    session
        .assign(FULL_SITE, TimeSlot::Pm, Assignee::staff(ALICE))
        .unwrap();

    assert!(!session
        .unassign(PM_SITE, TimeSlot::Pm, &Assignee::staff(ALICE))
        .unwrap());
    assert!(!session
        .unassign(FULL_SITE, TimeSlot::Pm, &Assignee::staff(BOB))
        .unwrap());
    assert_eq!(session.assignment_count(), 1);
}

#[test]
fn test_unassign_noop_keeps_loaded_phase() {
    let mut session: AssignmentSession = create_loaded_session();

    session
        .unassign(FULL_SITE, TimeSlot::Am, &Assignee::staff(ALICE))
        .unwrap();

    assert_eq!(session.phase(), SessionPhase::Loaded);
}

#[test]
fn test_assignees_keep_insertion_order() {
    let mut session: AssignmentSession = create_loaded_session();

    session
        .assign(FULL_SITE, TimeSlot::Am, Assignee::staff(BOB))
        .unwrap();
    session
        .assign(FULL_SITE, TimeSlot::Am, Assignee::staff(ALICE))
        .unwrap();

    assert_eq!(
        session.assignees(FULL_SITE, TimeSlot::Am),
        &[Assignee::staff(BOB), Assignee::staff(ALICE)]
    );
}

#[test]
fn test_same_staff_on_two_sites_in_one_slot() {
    let mut session: AssignmentSession = create_loaded_session();

    session
        .assign(FULL_SITE, TimeSlot::Am, Assignee::staff(ALICE))
        .unwrap();
    session
        .assign(AM_SITE, TimeSlot::Am, Assignee::staff(ALICE))
        .unwrap();

    assert_eq!(session.assignment_count(), 2);
}

#[test]
fn test_assign_rejects_uncovered_slot() {
    let mut session: AssignmentSession = create_loaded_session();

    assert_eq!(
        session.assign(AM_SITE, TimeSlot::Pm, Assignee::staff(ALICE)),
        Err(CoreError::SiteNotCovered {
            site_id: AM_SITE,
            time_slot: TimeSlot::Pm,
        })
    );
}

#[test]
fn test_assign_rejects_ineligible_staff() {
    let mut session: AssignmentSession = create_loaded_session();

    assert_eq!(
        session.assign(FULL_SITE, TimeSlot::Am, Assignee::staff(CAROL)),
        Err(CoreError::StaffNotEligible(CAROL))
    );
    assert_eq!(session.phase(), SessionPhase::Loaded);
}

#[test]
fn test_assign_rejects_unregistered_support() {
    let mut session: AssignmentSession = create_loaded_session();
    let id: SupportId = SupportId::new(String::from("support_1_0"));

    assert_eq!(
        session.assign(FULL_SITE, TimeSlot::Am, Assignee::support(id.clone())),
        Err(CoreError::UnknownSupportEntry(id))
    );
}

#[test]
fn test_register_support_creates_no_assignment() {
    let mut session: AssignmentSession = create_loaded_session();

    let entry = session.register_support_staff("  BuildCo ", 3).unwrap();

    assert_eq!(entry.company_name, "BuildCo");
    assert_eq!(entry.count, 3);
    assert_eq!(session.support_entries(), &[entry]);
    assert_eq!(session.assignment_count(), 0);
    assert_eq!(session.phase(), SessionPhase::Loaded);
}

#[test]
fn test_register_support_validates_input() {
    let mut session: AssignmentSession = create_loaded_session();

    assert_eq!(
        session.register_support_staff("", 3),
        Err(CoreError::DomainViolation(DomainError::BlankCompanyName))
    );
    assert_eq!(
        session.register_support_staff("BuildCo", 0),
        Err(CoreError::DomainViolation(DomainError::InvalidHeadcount(0)))
    );
    assert!(session.support_entries().is_empty());
}

#[test]
fn test_registered_support_can_be_assigned() {
    let mut session: AssignmentSession = create_loaded_session();
    let entry = session.register_support_staff("BuildCo", 2).unwrap();

    assert!(session
        .assign(PM_SITE, TimeSlot::Pm, Assignee::support(entry.id.clone()))
        .unwrap());
    assert_eq!(
        session.assignees(PM_SITE, TimeSlot::Pm),
        &[Assignee::support(entry.id)]
    );
}

#[test]
fn test_load_hydrates_without_checks() {
    let mut session: AssignmentSession = AssignmentSession::new();
    let existing: DayAssignments = DayAssignments {
        date: create_test_date(),
        // CAROL is not eligible today; the ledger row is kept anyway.
        assignments: vec![create_assigned(FULL_SITE, TimeSlot::Am, CAROL)],
        support_assignments: vec![SupportAssignment {
            site_id: PM_SITE,
            time_slot: TimeSlot::Pm,
            support_id: SupportId::new(String::from("support_1700000000000_0")),
            company_name: String::from("BuildCo"),
            headcount: 4,
            position: 0,
        }],
    };

    session
        .load(
            create_test_date(),
            create_test_eligible(),
            create_test_coverage(),
            &existing,
        )
        .unwrap();

    assert_eq!(session.phase(), SessionPhase::Loaded);
    assert_eq!(
        session.assignees(FULL_SITE, TimeSlot::Am),
        &[Assignee::staff(CAROL)]
    );
    let support = session
        .support_entry(&SupportId::new(String::from("support_1700000000000_0")))
        .unwrap();
    assert_eq!(support.company_name, "BuildCo");
    assert_eq!(support.count, 4);
}

#[test]
fn test_load_replaces_previous_day() {
    let mut session: AssignmentSession = create_loaded_session();
    session
        .assign(FULL_SITE, TimeSlot::Am, Assignee::staff(ALICE))
        .unwrap();
    session.register_support_staff("BuildCo", 1).unwrap();

    session
        .load(
            create_test_date(),
            create_test_eligible(),
            create_test_coverage(),
            &DayAssignments::empty(create_test_date()),
        )
        .unwrap();

    assert_eq!(session.assignment_count(), 0);
    assert!(session.support_entries().is_empty());
    assert_eq!(session.phase(), SessionPhase::Loaded);
}

#[test]
fn test_discard_returns_to_empty() {
    let mut session: AssignmentSession = create_loaded_session();
    session
        .assign(FULL_SITE, TimeSlot::Am, Assignee::staff(ALICE))
        .unwrap();

    session.discard();

    assert_eq!(session, AssignmentSession::new());
}
