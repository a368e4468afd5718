// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod availability_tests;
mod initialization_tests;
mod ledger_tests;

use crate::Persistence;
use sitecrew_domain::{
    ClientDraft, ClientId, EmploymentCategory, SiteDraft, SiteId, SiteType, StaffDraft, StaffId,
};
use time::macros::{date, time};
use time::{Date, Time};

pub fn create_test_date() -> Date {
    date!(2024 - 06 - 10)
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_client_draft(name: &str) -> ClientDraft {
    ClientDraft {
        name: name.to_string(),
        contact_name: None,
        phone: None,
        address: None,
        notes: None,
    }
}

pub fn create_staff_draft(name: &str, category: EmploymentCategory) -> StaffDraft {
    StaffDraft {
        name: name.to_string(),
        employment_category: category,
        phone: None,
        hidden: false,
    }
}

pub fn create_site_draft(
    client_id: ClientId,
    date: Date,
    site_type: SiteType,
    start_time: Time,
) -> SiteDraft {
    SiteDraft {
        client_id,
        date,
        start_time,
        site_type,
        cancelled: false,
        address: Some(String::from("1 Main St")),
        manager_name: None,
        manager_phone: None,
        work_content: Some(String::from("Scaffolding")),
        notes: None,
    }
}

pub fn seed_client(persistence: &mut Persistence, name: &str) -> ClientId {
    ClientId::new(persistence.create_client(&create_client_draft(name)).unwrap())
}

pub fn seed_staff(
    persistence: &mut Persistence,
    name: &str,
    category: EmploymentCategory,
) -> StaffId {
    StaffId::new(
        persistence
            .create_staff(&create_staff_draft(name, category))
            .unwrap(),
    )
}

pub fn seed_site(persistence: &mut Persistence, client_id: ClientId, site_type: SiteType) -> SiteId {
    SiteId::new(
        persistence
            .create_site(&create_site_draft(
                client_id,
                create_test_date(),
                site_type,
                time!(8:00),
            ))
            .unwrap(),
    )
}
