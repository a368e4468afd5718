// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod coverage;
mod eligibility;
mod types;
mod validation;

use crate::{
    Availability, AvailabilityType, ClientId, EmploymentCategory, Site, SiteId, SiteListing,
    SiteType, Staff, StaffId, parse_date, parse_start_time,
};
use time::Date;

pub fn test_date() -> Date {
    parse_date("2024-06-10").expect("Valid test date")
}

pub fn create_test_staff(id: i64, name: &str, category: EmploymentCategory) -> Staff {
    Staff {
        staff_id: StaffId::new(id),
        name: name.to_string(),
        employment_category: category,
        phone: None,
        hidden: false,
        deleted_at: None,
    }
}

pub fn create_test_availability(id: i64, date: Date, kind: AvailabilityType) -> Availability {
    Availability {
        staff_id: StaffId::new(id),
        date,
        availability_type: kind,
    }
}

pub fn create_test_listing(id: i64, site_type: SiteType, start: &str) -> SiteListing {
    SiteListing {
        site: Site {
            site_id: SiteId::new(id),
            client_id: ClientId::new(1),
            date: test_date(),
            start_time: parse_start_time(start).expect("Valid test time"),
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
