// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::prelude::*;
use sitecrew_domain::ClientDraft;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::clients;
use crate::error::PersistenceError;

backend_fn! {
/// Creates a client and returns its ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_client(conn: &mut _, draft: &ClientDraft) -> Result<i64, PersistenceError> {
    diesel::insert_into(clients::table)
        .values((
            clients::name.eq(draft.name.trim()),
            clients::contact_name.eq(draft.contact_name.as_deref()),
            clients::phone.eq(draft.phone.as_deref()),
            clients::address.eq(draft.address.as_deref()),
            clients::notes.eq(draft.notes.as_deref()),
        ))
        .execute(conn)?;

    let client_id: i64 = conn.get_last_insert_rowid()?;
    info!(client_id, "Client created");
    Ok(client_id)
}
}

backend_fn! {
/// Overwrites a client's fields.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such client exists.
pub fn update_client(
    conn: &mut _,
    client_id: i64,
    draft: &ClientDraft,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(clients::table)
        .filter(clients::client_id.eq(client_id))
        .set((
            clients::name.eq(draft.name.trim()),
            clients::contact_name.eq(draft.contact_name.as_deref()),
            clients::phone.eq(draft.phone.as_deref()),
            clients::address.eq(draft.address.as_deref()),
            clients::notes.eq(draft.notes.as_deref()),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("Client {client_id}")));
    }
    info!(client_id, "Client updated");
    Ok(())
}
}

backend_fn! {
/// Deletes a client.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such client exists, or
/// `PersistenceError::ReferentialIntegrity` if sites or sales still
/// reference it.
pub fn delete_client(conn: &mut _, client_id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(clients::table)
        .filter(clients::client_id.eq(client_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("Client {client_id}")));
    }
    info!(client_id, "Client deleted");
    Ok(())
}
}
