// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain record types managed by the record store.
//!
//! Each persisted record has a matching `*Draft` carrying the operator's
//! input for create and update operations. Drafts are validated here so the
//! persistence layer only ever sees well-formed values.

use crate::dates::{hh_mm, iso_date, parse_month};
use crate::error::DomainError;
use crate::types::{AvailabilityType, ClientId, EmploymentCategory, SiteId, SiteType, StaffId};
use serde::{Deserialize, Serialize};
use time::{Date, Time};

/// A roster staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    /// The staff identifier.
    pub staff_id: StaffId,
    /// Display name.
    pub name: String,
    /// Employment category.
    pub employment_category: EmploymentCategory,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Hidden from rosters and assignment offers.
    pub hidden: bool,
    /// Soft-delete timestamp, if deleted.
    pub deleted_at: Option<String>,
}

impl Staff {
    /// Returns whether the staff member can be offered for work.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.hidden && self.deleted_at.is_none()
    }
}

/// Operator input for creating or updating a staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffDraft {
    /// Display name.
    pub name: String,
    /// Employment category.
    pub employment_category: EmploymentCategory,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Hidden from rosters and assignment offers.
    #[serde(default)]
    pub hidden: bool,
}

impl StaffDraft {
    /// Validates the draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name(&self.name, "Staff name")
    }
}

/// A single availability declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Availability {
    /// The staff member.
    pub staff_id: StaffId,
    /// The calendar date.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// The declaration type.
    pub availability_type: AvailabilityType,
}

/// One entry of a per-staff availability replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AvailabilityEntry {
    /// The calendar date.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// The declaration type.
    pub availability_type: AvailabilityType,
}

/// A client operating construction sites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// The client identifier.
    pub client_id: ClientId,
    /// Company name.
    pub name: String,
    /// Contact person.
    pub contact_name: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Operator input for creating or updating a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDraft {
    /// Company name.
    pub name: String,
    /// Contact person.
    #[serde(default)]
    pub contact_name: Option<String>,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl ClientDraft {
    /// Validates the draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name(&self.name, "Client name")
    }
}

/// A job site scheduled on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// The site identifier.
    pub site_id: SiteId,
    /// The owning client.
    pub client_id: ClientId,
    /// The work date.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Start time on the work date.
    #[serde(with = "hh_mm")]
    pub start_time: Time,
    /// Which slots need coverage.
    pub site_type: SiteType,
    /// Cancelled sites stay on record but need no coverage.
    pub cancelled: bool,
    /// Site address.
    pub address: Option<String>,
    /// On-site manager.
    pub manager_name: Option<String>,
    /// On-site manager phone.
    pub manager_phone: Option<String>,
    /// Description of the work.
    pub work_content: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Operator input for creating or updating a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteDraft {
    /// The owning client.
    pub client_id: ClientId,
    /// The work date.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Start time on the work date.
    #[serde(with = "hh_mm")]
    pub start_time: Time,
    /// Which slots need coverage.
    pub site_type: SiteType,
    /// Cancelled sites stay on record but need no coverage.
    #[serde(default)]
    pub cancelled: bool,
    /// Site address.
    #[serde(default)]
    pub address: Option<String>,
    /// On-site manager.
    #[serde(default)]
    pub manager_name: Option<String>,
    /// On-site manager phone.
    #[serde(default)]
    pub manager_phone: Option<String>,
    /// Description of the work.
    #[serde(default)]
    pub work_content: Option<String>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// A client's sales figure for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    /// The sale identifier.
    pub sale_id: i64,
    /// The client billed.
    pub client_id: ClientId,
    /// Month as `YYYY-MM`.
    pub month: String,
    /// Amount in whole currency units.
    pub amount: i64,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Operator input for creating or updating a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleDraft {
    /// The client billed.
    pub client_id: ClientId,
    /// Month as `YYYY-MM`.
    pub month: String,
    /// Amount in whole currency units.
    pub amount: i64,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl SaleDraft {
    /// Validates the draft and normalizes the month.
    ///
    /// # Errors
    ///
    /// Returns an error if the month is malformed or the amount is negative.
    pub fn normalized(mut self) -> Result<Self, DomainError> {
        self.month = parse_month(&self.month)?;
        if self.amount < 0 {
            return Err(DomainError::InvalidAmount(self.amount));
        }
        Ok(self)
    }
}

fn validate_name(name: &str, what: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(format!("{what} cannot be empty")));
    }
    Ok(())
}
