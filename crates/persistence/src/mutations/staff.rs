// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::prelude::*;
use sitecrew_domain::StaffDraft;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::staff;
use crate::error::PersistenceError;

backend_fn! {
/// Creates a staff member and returns the ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_staff(conn: &mut _, draft: &StaffDraft) -> Result<i64, PersistenceError> {
    diesel::insert_into(staff::table)
        .values((
            staff::name.eq(draft.name.trim()),
            staff::employment_category.eq(draft.employment_category.as_str()),
            staff::phone.eq(draft.phone.as_deref()),
            staff::is_hidden.eq(i32::from(draft.hidden)),
        ))
        .execute(conn)?;

    let staff_id: i64 = conn.get_last_insert_rowid()?;
    info!(staff_id, category = %draft.employment_category, "Staff created");
    Ok(staff_id)
}
}

backend_fn! {
/// Overwrites a staff member's fields.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the staff member does not exist
/// or has been deleted.
pub fn update_staff(
    conn: &mut _,
    staff_id: i64,
    draft: &StaffDraft,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(staff::table)
        .filter(staff::staff_id.eq(staff_id))
        .filter(staff::deleted_at.is_null())
        .set((
            staff::name.eq(draft.name.trim()),
            staff::employment_category.eq(draft.employment_category.as_str()),
            staff::phone.eq(draft.phone.as_deref()),
            staff::is_hidden.eq(i32::from(draft.hidden)),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("Staff {staff_id}")));
    }
    info!(staff_id, "Staff updated");
    Ok(())
}
}

backend_fn! {
/// Soft-deletes a staff member by stamping `deleted_at`.
///
/// Existing assignment and availability rows are kept.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the staff member does not exist
/// or is already deleted.
pub fn soft_delete_staff(conn: &mut _, staff_id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(staff::table)
        .filter(staff::staff_id.eq(staff_id))
        .filter(staff::deleted_at.is_null())
        .set(staff::deleted_at.eq(diesel::dsl::sql::<
            diesel::sql_types::Nullable<diesel::sql_types::Text>,
        >("CURRENT_TIMESTAMP")))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("Staff {staff_id}")));
    }
    info!(staff_id, "Staff soft-deleted");
    Ok(())
}
}
