// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-backend connection setup.
//!
//! Everything under `queries/` and `mutations/` is written against the
//! Diesel DSL and runs unchanged on either backend. Only opening a
//! connection, reading a generated key and checking foreign keys differ.

#[cfg(feature = "mysql")]
pub mod mysql;
pub mod sqlite;

#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::{Connection, SqliteConnection};

use crate::error::PersistenceError;

/// What a mutation needs from a connection beyond the Diesel DSL.
pub trait PersistenceBackend: Connection {
    /// Key generated by the most recent insert on this connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError>;

    /// # Errors
    ///
    /// Returns `ForeignKeyEnforcementNotEnabled` when the backend would
    /// accept dangling references.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;
}

impl PersistenceBackend for SqliteConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        sqlite::last_insert_id(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(self)
    }
}

#[cfg(feature = "mysql")]
impl PersistenceBackend for MysqlConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        mysql::last_insert_id(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        mysql::verify_foreign_key_enforcement(self)
    }
}
