// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::prelude::*;
use sitecrew_domain::{Client, ClientId};
use tracing::debug;

use crate::data_models::{Page, Paged};
use crate::diesel_schema::clients;
use crate::error::PersistenceError;
use crate::queries::{LIKE_ESCAPE, contains_pattern};

/// Diesel Queryable struct for client rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = clients)]
struct ClientRow {
    client_id: i64,
    name: String,
    contact_name: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    notes: Option<String>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Self {
            client_id: ClientId::new(row.client_id),
            name: row.name,
            contact_name: row.contact_name,
            phone: row.phone,
            address: row.address,
            notes: row.notes,
        }
    }
}

backend_fn! {
/// Lists clients, optionally filtered by a substring of the name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_clients(
    conn: &mut _,
    name_filter: Option<&str>,
    page: Page,
) -> Result<Paged<Client>, PersistenceError> {
    debug!(?name_filter, page = page.page, limit = page.limit, "Listing clients");

    let mut count_query = clients::table.into_boxed();
    let mut rows_query = clients::table.into_boxed();
    if let Some(fragment) = name_filter {
        let pattern: String = contains_pattern(fragment);
        count_query = count_query.filter(clients::name.like(pattern.clone()).escape(LIKE_ESCAPE));
        rows_query = rows_query.filter(clients::name.like(pattern).escape(LIKE_ESCAPE));
    }

    let total: i64 = count_query.count().get_result(conn)?;
    let rows: Vec<ClientRow> = rows_query
        .select(ClientRow::as_select())
        .order((clients::name.asc(), clients::client_id.asc()))
        .limit(page.sql_limit())
        .offset(page.offset())
        .load(conn)?;

    Ok(Paged {
        items: rows.into_iter().map(Client::from).collect(),
        total,
        page: page.page,
        limit: page.limit,
    })
}
}

backend_fn! {
/// Retrieves a client by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the client is not found.
pub fn get_client(conn: &mut _, client_id: i64) -> Result<Option<Client>, PersistenceError> {
    debug!(client_id, "Looking up client");

    let row: Option<ClientRow> = clients::table
        .filter(clients::client_id.eq(client_id))
        .select(ClientRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Client::from))
}
}
