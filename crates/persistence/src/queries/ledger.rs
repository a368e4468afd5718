// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment ledger reads.

use diesel::SqliteConnection;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::prelude::*;
use sitecrew_domain::{
    AssignedStaff, DayAssignments, SiteId, StaffId, SupportAssignment, SupportId, TimeSlot,
    format_date,
};
use std::str::FromStr;
use time::Date;
use tracing::debug;

use crate::diesel_schema::{assignments, clients, external_assignments, sites, staff};
use crate::error::PersistenceError;

/// Diesel Queryable struct for external assignment rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = external_assignments)]
struct ExternalAssignmentRow {
    site_id: i64,
    time_slot: String,
    support_key: String,
    company_name: String,
    headcount: i32,
    slot_position: i32,
}

impl TryFrom<ExternalAssignmentRow> for SupportAssignment {
    type Error = PersistenceError;

    fn try_from(row: ExternalAssignmentRow) -> Result<Self, Self::Error> {
        let headcount: u32 = u32::try_from(row.headcount).map_err(|_| {
            PersistenceError::InvalidData(format!("Negative headcount {}", row.headcount))
        })?;

        Ok(Self {
            site_id: SiteId::new(row.site_id),
            time_slot: TimeSlot::from_str(&row.time_slot)?,
            support_id: SupportId::new(row.support_key),
            company_name: row.company_name,
            headcount,
            position: stored_position(row.slot_position)?,
        })
    }
}

fn stored_position(value: i32) -> Result<u32, PersistenceError> {
    u32::try_from(value)
        .map_err(|_| PersistenceError::InvalidData(format!("Negative slot position {value}")))
}

type AssignedRow = (i64, String, i64, String, String, i32);

fn into_assigned(
    (site_id, time_slot, staff_id, staff_name, client_name, slot_position): AssignedRow,
) -> Result<AssignedStaff, PersistenceError> {
    Ok(AssignedStaff {
        site_id: SiteId::new(site_id),
        time_slot: TimeSlot::from_str(&time_slot)?,
        staff_id: StaffId::new(staff_id),
        staff_name,
        client_name,
        position: stored_position(slot_position)?,
    })
}

backend_fn! {
/// Reads every assignment recorded for `date`.
///
/// Roster rows carry the staff and client names and are ordered by site
/// start time. Within one `(site, slot)` both kinds are ordered by their
/// stored position.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be decoded.
pub fn read_day(conn: &mut _, date: Date) -> Result<DayAssignments, PersistenceError> {
    let work_date: String = format_date(date);
    debug!(%work_date, "Reading assignment ledger");

    let rows: Vec<AssignedRow> = assignments::table
        .inner_join(staff::table)
        .inner_join(sites::table.inner_join(clients::table))
        .filter(assignments::work_date.eq(work_date.as_str()))
        .select((
            assignments::site_id,
            assignments::time_slot,
            assignments::staff_id,
            staff::name,
            clients::name,
            assignments::slot_position,
        ))
        .order((
            sites::start_time.asc(),
            assignments::site_id.asc(),
            assignments::time_slot.asc(),
            assignments::slot_position.asc(),
            assignments::assignment_id.asc(),
        ))
        .load(conn)?;

    let support_rows: Vec<ExternalAssignmentRow> = external_assignments::table
        .filter(external_assignments::work_date.eq(work_date.as_str()))
        .select(ExternalAssignmentRow::as_select())
        .order((
            external_assignments::site_id.asc(),
            external_assignments::time_slot.asc(),
            external_assignments::slot_position.asc(),
            external_assignments::external_assignment_id.asc(),
        ))
        .load(conn)?;

    Ok(DayAssignments {
        date,
        assignments: rows
            .into_iter()
            .map(into_assigned)
            .collect::<Result<_, _>>()?,
        support_assignments: support_rows
            .into_iter()
            .map(SupportAssignment::try_from)
            .collect::<Result<_, _>>()?,
    })
}
}
