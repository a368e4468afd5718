// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::prelude::*;
use sitecrew_domain::{EmploymentCategory, Staff, StaffId};
use std::str::FromStr;
use tracing::debug;

use crate::data_models::{Page, Paged};
use crate::diesel_schema::staff;
use crate::error::PersistenceError;
use crate::queries::{LIKE_ESCAPE, contains_pattern};

/// Diesel Queryable struct for staff rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = staff)]
struct StaffRow {
    staff_id: i64,
    name: String,
    employment_category: String,
    phone: Option<String>,
    is_hidden: i32,
    deleted_at: Option<String>,
}

impl TryFrom<StaffRow> for Staff {
    type Error = PersistenceError;

    fn try_from(row: StaffRow) -> Result<Self, Self::Error> {
        Ok(Self {
            staff_id: StaffId::new(row.staff_id),
            name: row.name,
            employment_category: EmploymentCategory::from_str(&row.employment_category)?,
            phone: row.phone,
            hidden: row.is_hidden != 0,
            deleted_at: row.deleted_at,
        })
    }
}

fn into_staff(rows: Vec<StaffRow>) -> Result<Vec<Staff>, PersistenceError> {
    rows.into_iter().map(Staff::try_from).collect()
}

backend_fn! {
/// Lists staff that have not been deleted, hidden staff included.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be decoded.
pub fn list_staff(
    conn: &mut _,
    name_filter: Option<&str>,
    page: Page,
) -> Result<Paged<Staff>, PersistenceError> {
    debug!(?name_filter, page = page.page, limit = page.limit, "Listing staff");

    let mut count_query = staff::table.filter(staff::deleted_at.is_null()).into_boxed();
    let mut rows_query = staff::table.filter(staff::deleted_at.is_null()).into_boxed();
    if let Some(fragment) = name_filter {
        let pattern: String = contains_pattern(fragment);
        count_query = count_query.filter(staff::name.like(pattern.clone()).escape(LIKE_ESCAPE));
        rows_query = rows_query.filter(staff::name.like(pattern).escape(LIKE_ESCAPE));
    }

    let total: i64 = count_query.count().get_result(conn)?;
    let rows: Vec<StaffRow> = rows_query
        .select(StaffRow::as_select())
        .order((staff::name.asc(), staff::staff_id.asc()))
        .limit(page.sql_limit())
        .offset(page.offset())
        .load(conn)?;

    Ok(Paged {
        items: into_staff(rows)?,
        total,
        page: page.page,
        limit: page.limit,
    })
}
}

backend_fn! {
/// Retrieves a staff member that has not been deleted.
///
/// # Errors
///
/// Returns an error if the database query fails or the row cannot be decoded.
/// Returns `Ok(None)` if no such staff member exists.
pub fn get_staff(conn: &mut _, staff_id: i64) -> Result<Option<Staff>, PersistenceError> {
    debug!(staff_id, "Looking up staff");

    let row: Option<StaffRow> = staff::table
        .filter(staff::staff_id.eq(staff_id))
        .filter(staff::deleted_at.is_null())
        .select(StaffRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Staff::try_from).transpose()
}
}

backend_fn! {
/// Lists every staff member that may be offered for assignment.
///
/// Hidden and deleted staff are left out.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be decoded.
pub fn list_assignable_staff(conn: &mut _) -> Result<Vec<Staff>, PersistenceError> {
    let rows: Vec<StaffRow> = staff::table
        .filter(staff::deleted_at.is_null())
        .filter(staff::is_hidden.eq(0))
        .select(StaffRow::as_select())
        .order(staff::staff_id.asc())
        .load(conn)?;

    into_staff(rows)
}
}
