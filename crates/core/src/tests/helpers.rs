// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::AssignmentSession;
use sitecrew_domain::{
    AssignedStaff, ClientId, Coverage, DayAssignments, EligibleStaff, EmploymentCategory, Site,
    SiteId, SiteListing, SiteType, StaffId, TimeSlot, resolve_coverage,
};
use time::Date;
use time::macros::{date, time};

pub const FULL_SITE: SiteId = SiteId::new(10);
pub const AM_SITE: SiteId = SiteId::new(11);
pub const PM_SITE: SiteId = SiteId::new(12);

pub const ALICE: StaffId = StaffId::new(1);
pub const BOB: StaffId = StaffId::new(2);
pub const CAROL: StaffId = StaffId::new(3);

pub fn create_test_date() -> Date {
    date!(2024 - 06 - 10)
}

pub fn create_test_eligible() -> Vec<EligibleStaff> {
    vec![
        EligibleStaff {
            staff_id: ALICE,
            name: String::from("Alice"),
            employment_category: EmploymentCategory::Regular,
            available_slots: TimeSlot::ALL.to_vec(),
        },
        EligibleStaff {
            staff_id: BOB,
            name: String::from("Bob"),
            employment_category: EmploymentCategory::Spot,
            available_slots: vec![TimeSlot::Am],
        },
    ]
}

fn create_test_site(site_id: SiteId, site_type: SiteType) -> SiteListing {
    SiteListing {
        site: Site {
            site_id,
            client_id: ClientId::new(1),
            date: create_test_date(),
            start_time: time!(8:00),
            site_type,
            cancelled: false,
            address: None,
            manager_name: None,
            manager_phone: None,
            work_content: None,
            notes: None,
        },
        client_name: String::from("Acme"),
    }
}

pub fn create_test_coverage() -> Coverage {
    resolve_coverage(
        create_test_date(),
        &[
            create_test_site(FULL_SITE, SiteType::Full),
            create_test_site(AM_SITE, SiteType::Am),
            create_test_site(PM_SITE, SiteType::Pm),
        ],
    )
}

pub fn create_assigned(site_id: SiteId, time_slot: TimeSlot, staff_id: StaffId) -> AssignedStaff {
    AssignedStaff {
        site_id,
        time_slot,
        staff_id,
        staff_name: format!("Staff {staff_id}"),
        client_name: String::from("Acme"),
        position: 0,
    }
}

pub fn create_loaded_session() -> AssignmentSession {
    let mut session: AssignmentSession = AssignmentSession::new();
    session
        .load(
            create_test_date(),
            create_test_eligible(),
            create_test_coverage(),
            &DayAssignments::empty(create_test_date()),
        )
        .unwrap();
    session
}
