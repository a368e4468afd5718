// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` connection setup.
//!
//! PRAGMAs have no Diesel DSL, so this is the one place raw SQL is issued
//! against `SQLite`.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Schema for the record, availability and assignment tables.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Milliseconds a writer waits on a locked file before giving up.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Journal mode applied when a connection is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Journal {
    /// Leave `SQLite`'s default in place. Used for shared-cache memory databases.
    Default,
    /// Write-ahead logging, for file databases read while a day is replaced.
    Wal,
}

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

fn pragma(conn: &mut SqliteConnection, statement: &str) -> Result<(), PersistenceError> {
    debug!(statement, "Applying SQLite pragma");
    diesel::sql_query(statement)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("{statement}: {e}")))?;
    Ok(())
}

/// Opens `database_url`, switches on foreign keys and brings the schema up
/// to date.
///
/// Foreign keys are enabled before migrating so the cascades from sites and
/// staff into the assignment tables hold from the first write.
///
/// # Errors
///
/// Returns `DatabaseConnectionFailed`, `QueryFailed` or `MigrationFailed`
/// for the step that failed.
pub fn open(database_url: &str, journal: Journal) -> Result<SqliteConnection, PersistenceError> {
    info!(database_url, ?journal, "Opening SQLite database");

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;

    pragma(&mut conn, "PRAGMA foreign_keys = ON")?;
    pragma(&mut conn, &format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"))?;
    if journal == Journal::Wal {
        pragma(&mut conn, "PRAGMA journal_mode = WAL")?;
    }

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    info!(applied = applied.len(), "SQLite schema is current");

    Ok(conn)
}

/// Returns `last_insert_rowid()` for the connection.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn last_insert_id(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

/// Fails unless `PRAGMA foreign_keys` reports enforcement.
///
/// Deleting a client that still has sales relies on this, as does
/// rejecting assignments that name a missing site.
///
/// # Errors
///
/// Returns `ForeignKeyEnforcementNotEnabled` if the pragma reads 0.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let row: ForeignKeysPragma = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    if row.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }
    debug!("SQLite foreign keys enforced");
    Ok(())
}
