// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::prelude::*;
use sitecrew_domain::{SiteDraft, format_date, format_start_time};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::sites;
use crate::error::PersistenceError;

backend_fn! {
/// Creates a site and returns its ID.
///
/// # Errors
///
/// Returns `PersistenceError::ReferentialIntegrity` if the client does not
/// exist, or another error if the insert fails.
pub fn create_site(conn: &mut _, draft: &SiteDraft) -> Result<i64, PersistenceError> {
    diesel::insert_into(sites::table)
        .values((
            sites::client_id.eq(draft.client_id.value()),
            sites::work_date.eq(format_date(draft.date)),
            sites::start_time.eq(format_start_time(draft.start_time)),
            sites::site_type.eq(draft.site_type.as_str()),
            sites::is_cancelled.eq(i32::from(draft.cancelled)),
            sites::address.eq(draft.address.as_deref()),
            sites::manager_name.eq(draft.manager_name.as_deref()),
            sites::manager_phone.eq(draft.manager_phone.as_deref()),
            sites::work_content.eq(draft.work_content.as_deref()),
            sites::notes.eq(draft.notes.as_deref()),
        ))
        .execute(conn)?;

    let site_id: i64 = conn.get_last_insert_rowid()?;
    info!(site_id, client_id = draft.client_id.value(), date = %draft.date, "Site created");
    Ok(site_id)
}
}

backend_fn! {
/// Overwrites a site's fields.
///
/// Cancelling a site only sets the flag; its assignments are kept.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the site does not exist, or
/// `PersistenceError::ReferentialIntegrity` if the new client does not.
pub fn update_site(
    conn: &mut _,
    site_id: i64,
    draft: &SiteDraft,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(sites::table)
        .filter(sites::site_id.eq(site_id))
        .set((
            sites::client_id.eq(draft.client_id.value()),
            sites::work_date.eq(format_date(draft.date)),
            sites::start_time.eq(format_start_time(draft.start_time)),
            sites::site_type.eq(draft.site_type.as_str()),
            sites::is_cancelled.eq(i32::from(draft.cancelled)),
            sites::address.eq(draft.address.as_deref()),
            sites::manager_name.eq(draft.manager_name.as_deref()),
            sites::manager_phone.eq(draft.manager_phone.as_deref()),
            sites::work_content.eq(draft.work_content.as_deref()),
            sites::notes.eq(draft.notes.as_deref()),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("Site {site_id}")));
    }
    info!(site_id, cancelled = draft.cancelled, "Site updated");
    Ok(())
}
}

backend_fn! {
/// Deletes a site. Its assignment rows go with it.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the site does not exist.
pub fn delete_site(conn: &mut _, site_id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(sites::table)
        .filter(sites::site_id.eq(site_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("Site {site_id}")));
    }
    info!(site_id, "Site deleted");
    Ok(())
}
}
