// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::prelude::*;
use sitecrew_domain::{AvailabilityEntry, format_date};
use std::collections::BTreeSet;
use tracing::info;

use crate::diesel_schema::{availabilities, staff};
use crate::error::PersistenceError;

backend_fn! {
/// Replaces every availability row of a staff member with `entries`.
///
/// Runs in one transaction: the staff member's rows are deleted and the
/// given entries inserted. Duplicate entries are written once.
///
/// # Returns
///
/// The number of rows written.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the staff member does not exist
/// or has been deleted; nothing is changed in that case.
pub fn replace_availability(
    conn: &mut _,
    staff_id: i64,
    entries: &[AvailabilityEntry],
) -> Result<usize, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let found: i64 = staff::table
            .filter(staff::staff_id.eq(staff_id))
            .filter(staff::deleted_at.is_null())
            .count()
            .get_result(conn)?;
        if found == 0 {
            return Err(PersistenceError::NotFound(format!("Staff {staff_id}")));
        }

        let removed: usize = diesel::delete(availabilities::table)
            .filter(availabilities::staff_id.eq(staff_id))
            .execute(conn)?;

        let unique: BTreeSet<(String, &'static str)> = entries
            .iter()
            .map(|e| (format_date(e.date), e.availability_type.as_str()))
            .collect();
        for (work_date, availability_type) in &unique {
            diesel::insert_into(availabilities::table)
                .values((
                    availabilities::staff_id.eq(staff_id),
                    availabilities::work_date.eq(work_date.as_str()),
                    availabilities::availability_type.eq(*availability_type),
                ))
                .execute(conn)?;
        }

        info!(staff_id, removed, written = unique.len(), "Availability replaced");
        Ok(unique.len())
    })
}
}
