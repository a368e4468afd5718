// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use sitecrew_domain::DomainError;
use sitecrew_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract. The server maps each variant onto one HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request references records that do not exist or are still
    /// referenced elsewhere.
    ReferentialIntegrity {
        /// A human-readable description of the broken reference.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Builds an `InvalidInput` error.
    #[must_use]
    pub fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Builds a `ResourceNotFound` error.
    #[must_use]
    pub fn not_found(resource_type: &str, message: impl Into<String>) -> Self {
        Self::ResourceNotFound {
            resource_type: resource_type.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::ReferentialIntegrity { message } => {
                write!(f, "Referential integrity violation: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidName(_) => ApiError::invalid_input("name", message),
        DomainError::InvalidEmploymentCategory(_) => {
            ApiError::invalid_input("employment_category", message)
        }
        DomainError::InvalidAvailabilityType(_) => {
            ApiError::invalid_input("availability_type", message)
        }
        DomainError::InvalidSiteType(_) => ApiError::invalid_input("site_type", message),
        DomainError::InvalidTimeSlot(_) => ApiError::invalid_input("time_slot", message),
        DomainError::DateParseError { .. } => ApiError::invalid_input("date", message),
        DomainError::InvalidStartTime { .. } => ApiError::invalid_input("start_time", message),
        DomainError::InvalidMonth(_) => ApiError::invalid_input("month", message),
        DomainError::InvalidAmount(_) => ApiError::invalid_input("amount", message),
        DomainError::BlankCompanyName => ApiError::invalid_input("company_name", message),
        DomainError::InvalidHeadcount(_) => ApiError::invalid_input("headcount", message),
        DomainError::DuplicateAssignment { .. } => ApiError::DomainRuleViolation {
            rule: String::from("unique_assignment"),
            message,
        },
        DomainError::InconsistentSupportEntry(_) => ApiError::DomainRuleViolation {
            rule: String::from("consistent_support_entry"),
            message,
        },
    }
}

/// Translates a persistence error into an API error.
///
/// `resource_type` names the record the operation addressed and is used for
/// `NotFound` failures.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError, resource_type: &str) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::not_found(resource_type, message),
        PersistenceError::ReferentialIntegrity(message) => {
            ApiError::ReferentialIntegrity { message }
        }
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
