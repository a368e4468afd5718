// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use sitecrew_domain::{
    AvailabilityEntry, AvailabilityType, ClientDraft, ClientId, EmploymentCategory, SiteDraft,
    SiteType, StaffDraft,
};
use sitecrew_persistence::Persistence;
use time::Date;
use time::macros::{date, time};

use crate::{
    DateQuery, ReplaceAvailabilityRequest, create_client, create_site, create_staff,
    replace_availability,
};

pub fn create_test_date() -> Date {
    date!(2024 - 06 - 10)
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_date_query() -> DateQuery {
    DateQuery {
        date: Some(String::from("2024-06-10")),
    }
}

pub fn create_client_draft(name: &str) -> ClientDraft {
    ClientDraft {
        name: name.to_string(),
        contact_name: Some(String::from("Pat")),
        phone: None,
        address: None,
        notes: None,
    }
}

pub fn create_staff_draft(name: &str, employment_category: EmploymentCategory) -> StaffDraft {
    StaffDraft {
        name: name.to_string(),
        employment_category,
        phone: None,
        hidden: false,
    }
}

pub fn create_site_draft(client_id: i64, site_type: SiteType) -> SiteDraft {
    SiteDraft {
        client_id: ClientId::new(client_id),
        date: create_test_date(),
        start_time: time!(8:00),
        site_type,
        cancelled: false,
        address: Some(String::from("2 Harbour Rd")),
        manager_name: Some(String::from("Sam")),
        manager_phone: None,
        work_content: Some(String::from("Formwork")),
        notes: None,
    }
}

pub fn seed_client(persistence: &mut Persistence, name: &str) -> i64 {
    create_client(persistence, &create_client_draft(name))
        .unwrap()
        .id
}

pub fn seed_staff(
    persistence: &mut Persistence,
    name: &str,
    employment_category: EmploymentCategory,
) -> i64 {
    create_staff(persistence, &create_staff_draft(name, employment_category))
        .unwrap()
        .id
}

pub fn seed_site(persistence: &mut Persistence, client_id: i64, site_type: SiteType) -> i64 {
    create_site(persistence, &create_site_draft(client_id, site_type))
        .unwrap()
        .id
}

pub fn declare(
    persistence: &mut Persistence,
    staff_id: i64,
    availability_type: AvailabilityType,
) {
    replace_availability(
        persistence,
        staff_id,
        &ReplaceAvailabilityRequest {
            entries: vec![AvailabilityEntry {
                date: create_test_date(),
                availability_type,
            }],
        },
    )
    .unwrap();
}
