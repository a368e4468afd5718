// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::test_date;
use crate::{
    ClientDraft, DayPlan, DomainError, SaleDraft, ClientId, SiteId, StaffAssignment, StaffId,
    SupportAssignment, SupportId, TimeSlot, validate_support_registration,
};

fn support_row(company: &str, headcount: u32) -> SupportAssignment {
    SupportAssignment {
        site_id: SiteId::new(1),
        time_slot: TimeSlot::Pm,
        support_id: SupportId::new(String::from("support_1_0")),
        company_name: company.to_string(),
        headcount,
        position: 0,
    }
}

#[test]
fn test_support_registration_trims_company_name() {
    let (company, count) = validate_support_registration("  BuildCo ", 2).unwrap();
    assert_eq!(company, "BuildCo");
    assert_eq!(count, 2);
}

#[test]
fn test_support_registration_rejects_blank_name() {
    assert_eq!(
        validate_support_registration("   ", 2),
        Err(DomainError::BlankCompanyName)
    );
}

#[test]
fn test_support_registration_rejects_zero_and_negative_counts() {
    assert_eq!(
        validate_support_registration("BuildCo", 0),
        Err(DomainError::InvalidHeadcount(0))
    );
    assert_eq!(
        validate_support_registration("BuildCo", -3),
        Err(DomainError::InvalidHeadcount(-3))
    );
}

#[test]
fn test_day_plan_accepts_same_staff_on_two_sites() {
    let plan = DayPlan {
        date: test_date(),
        assignments: vec![
            StaffAssignment {
                site_id: SiteId::new(1),
                time_slot: TimeSlot::Am,
                staff_id: StaffId::new(1),
                position: 0,
            },
            StaffAssignment {
                site_id: SiteId::new(2),
                time_slot: TimeSlot::Am,
                staff_id: StaffId::new(1),
                position: 0,
            },
        ],
        support_assignments: vec![],
    };

    assert!(plan.validate().is_ok());
    assert_eq!(plan.row_count(), 2);
}

#[test]
fn test_day_plan_rejects_duplicate_row() {
    let row = StaffAssignment {
        site_id: SiteId::new(1),
        time_slot: TimeSlot::Am,
        staff_id: StaffId::new(1),
        position: 0,
    };
    let plan = DayPlan {
        date: test_date(),
        assignments: vec![row, row],
        support_assignments: vec![],
    };

    assert!(matches!(
        plan.validate(),
        Err(DomainError::DuplicateAssignment { site_id: 1, .. })
    ));
}

#[test]
fn test_day_plan_rejects_invalid_support_rows() {
    let plan = DayPlan {
        date: test_date(),
        assignments: vec![],
        support_assignments: vec![support_row("BuildCo", 0)],
    };
    assert_eq!(plan.validate(), Err(DomainError::InvalidHeadcount(0)));

    let plan = DayPlan {
        date: test_date(),
        assignments: vec![],
        support_assignments: vec![support_row("", 2)],
    };
    assert_eq!(plan.validate(), Err(DomainError::BlankCompanyName));
}

#[test]
fn test_day_plan_rejects_conflicting_rows_for_one_support_entry() {
    let mut other_site = support_row("BuildCo", 2);
    other_site.site_id = SiteId::new(2);

    let consistent = DayPlan {
        date: test_date(),
        assignments: vec![],
        support_assignments: vec![support_row("BuildCo", 2), other_site.clone()],
    };
    assert!(consistent.validate().is_ok());

    other_site.headcount = 5;
    let conflicting = DayPlan {
        date: test_date(),
        assignments: vec![],
        support_assignments: vec![support_row("BuildCo", 2), other_site],
    };
    assert_eq!(
        conflicting.validate(),
        Err(DomainError::InconsistentSupportEntry(String::from(
            "support_1_0"
        )))
    );
}

#[test]
fn test_drafts_validate_names_and_months() {
    let client = ClientDraft {
        name: String::from(" "),
        contact_name: None,
        phone: None,
        address: None,
        notes: None,
    };
    assert!(matches!(client.validate(), Err(DomainError::InvalidName(_))));

    let sale = SaleDraft {
        client_id: ClientId::new(1),
        month: String::from("2024-06"),
        amount: -1,
        notes: None,
    };
    assert_eq!(sale.normalized(), Err(DomainError::InvalidAmount(-1)));
}
