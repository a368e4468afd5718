// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `MySQL`/`MariaDB` connection setup, behind the `mysql` feature.
//!
//! `migrations_mysql/` mirrors `migrations/` table for table; run
//! `cargo xtask verify-migrations` after touching either directory.
//! `cargo xtask test-mariadb` exercises this module against a container.

use diesel::dsl::sql;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, MysqlConnection, QueryableByName, RunQueryDsl};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// `InnoDB` schema equivalent to the `SQLite` migrations.
pub const MYSQL_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations_mysql");

#[derive(QueryableByName)]
struct SessionVariable {
    #[diesel(sql_type = Integer)]
    value: i32,
}

/// Connects to `database_url` and applies pending migrations.
///
/// # Errors
///
/// Returns `DatabaseConnectionFailed` or `MigrationFailed`.
pub fn initialize_database(database_url: &str) -> Result<MysqlConnection, PersistenceError> {
    info!("Opening MySQL database");

    let mut conn: MysqlConnection = MysqlConnection::establish(database_url)?;
    let applied = conn
        .run_pending_migrations(MYSQL_MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    info!(applied = applied.len(), "MySQL schema is current");

    Ok(conn)
}

/// Returns `LAST_INSERT_ID()` for the connection.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn last_insert_id(conn: &mut MysqlConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("LAST_INSERT_ID()")).get_result(conn)?)
}

/// Fails unless the session has `foreign_key_checks` switched on.
///
/// # Errors
///
/// Returns `ForeignKeyEnforcementNotEnabled` when the variable is 0, or
/// `QueryFailed` when it cannot be read.
pub fn verify_foreign_key_enforcement(conn: &mut MysqlConnection) -> Result<(), PersistenceError> {
    let checks: SessionVariable = diesel::sql_query("SELECT @@foreign_key_checks AS value")
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("reading foreign_key_checks: {e}")))?;

    if checks.value != 1 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }
    debug!("MySQL foreign keys enforced");
    Ok(())
}
