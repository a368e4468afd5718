// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use sitecrew_domain::DomainError;
use thiserror::Error;

/// Failures from the storage layer.
///
/// `NotFound` and `ReferentialIntegrity` carry meaning for callers (404 and
/// 409 at the HTTP edge). The rest are operational and surface as internal
/// errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Database connection failed: {0}")]
    DatabaseConnectionFailed(String),
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Initialization error: {0}")]
    InitializationError(String),
    #[error("Foreign key enforcement is not enabled")]
    ForeignKeyEnforcementNotEnabled,
    /// No row with the requested key.
    #[error("Not found: {0}")]
    NotFound(String),
    /// A write named a missing site, staff member or client, or a delete
    /// would leave sales or assignments pointing at nothing.
    #[error("Referential integrity violation: {0}")]
    ReferentialIntegrity(String),
    /// A stored column failed to decode into its domain type.
    #[error("Invalid stored data: {0}")]
    InvalidData(String),
}

impl From<DieselError> for PersistenceError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound(String::from("Record not found")),
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::ReferentialIntegrity(info.message().to_owned())
            }
            other => Self::DatabaseError(other.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::InvalidData(err.to_string())
    }
}
