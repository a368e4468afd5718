// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::prelude::*;
use sitecrew_domain::{
    Availability, AvailabilityEntry, AvailabilityType, StaffId, format_date, parse_date,
};
use std::str::FromStr;
use time::Date;
use tracing::debug;

use crate::diesel_schema::availabilities;
use crate::error::PersistenceError;

/// Diesel Queryable struct for availability rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = availabilities)]
struct AvailabilityRow {
    staff_id: i64,
    work_date: String,
    availability_type: String,
}

impl TryFrom<AvailabilityRow> for Availability {
    type Error = PersistenceError;

    fn try_from(row: AvailabilityRow) -> Result<Self, Self::Error> {
        Ok(Self {
            staff_id: StaffId::new(row.staff_id),
            date: parse_date(&row.work_date)?,
            availability_type: AvailabilityType::from_str(&row.availability_type)?,
        })
    }
}

backend_fn! {
/// Lists one staff member's availability, optionally bounded by date.
///
/// Both bounds are inclusive. Entries are ordered by date.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be decoded.
pub fn list_availability(
    conn: &mut _,
    staff_id: i64,
    from: Option<Date>,
    to: Option<Date>,
) -> Result<Vec<AvailabilityEntry>, PersistenceError> {
    debug!(staff_id, ?from, ?to, "Listing availability");

    let mut query = availabilities::table
        .filter(availabilities::staff_id.eq(staff_id))
        .into_boxed();
    if let Some(from) = from {
        query = query.filter(availabilities::work_date.ge(format_date(from)));
    }
    if let Some(to) = to {
        query = query.filter(availabilities::work_date.le(format_date(to)));
    }

    let rows: Vec<AvailabilityRow> = query
        .select(AvailabilityRow::as_select())
        .order((
            availabilities::work_date.asc(),
            availabilities::availability_id.asc(),
        ))
        .load(conn)?;

    rows.into_iter()
        .map(|row| {
            Availability::try_from(row).map(|a| AvailabilityEntry {
                date: a.date,
                availability_type: a.availability_type,
            })
        })
        .collect()
}
}

backend_fn! {
/// Lists every availability declaration recorded for `date`.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be decoded.
pub fn availability_on(conn: &mut _, date: Date) -> Result<Vec<Availability>, PersistenceError> {
    let rows: Vec<AvailabilityRow> = availabilities::table
        .filter(availabilities::work_date.eq(format_date(date)))
        .select(AvailabilityRow::as_select())
        .load(conn)?;

    rows.into_iter().map(Availability::try_from).collect()
}
}
