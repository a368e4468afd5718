// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Support-staff registration.
//!
//! Support blocks get a synthetic identifier of the form
//! `support_<unix-millis>_<counter>`. If that identifier is already taken in
//! the session (for example by an entry re-hydrated from the ledger) a random
//! numeric suffix is appended until it is unique.

use crate::error::CoreError;
use sitecrew_domain::{SupportEntry, SupportId, validate_support_registration};
use time::OffsetDateTime;

/// Prefix of every minted support identifier.
pub const SUPPORT_ID_PREFIX: &str = "support_";

/// Mints support identifiers for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportRegistrar {
    counter: u64,
}

impl SupportRegistrar {
    /// Creates a registrar with its counter at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { counter: 0 }
    }

    /// Validates a registration and mints its entry using the current time.
    ///
    /// # Arguments
    ///
    /// * `company_name` - The supplying company
    /// * `count` - The headcount
    /// * `existing` - Entries already registered in the session
    ///
    /// # Errors
    ///
    /// Returns an error if the company name is blank or the count is below one.
    pub fn register(
        &mut self,
        company_name: &str,
        count: i64,
        existing: &[SupportEntry],
    ) -> Result<SupportEntry, CoreError> {
        let millis: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        self.register_at(millis, company_name, count, existing)
    }

    /// Same as [`Self::register`] with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the company name is blank or the count is below one.
    pub fn register_at(
        &mut self,
        millis: i128,
        company_name: &str,
        count: i64,
        existing: &[SupportEntry],
    ) -> Result<SupportEntry, CoreError> {
        let (company_name, count) = validate_support_registration(company_name, count)?;
        let id: SupportId = self.mint_at(millis, |candidate| {
            existing.iter().any(|entry| entry.id.value() == candidate)
        });

        Ok(SupportEntry {
            id,
            company_name,
            count,
        })
    }

    /// Mints an identifier for which `is_taken` returns `false`.
    pub fn mint_at(&mut self, millis: i128, is_taken: impl Fn(&str) -> bool) -> SupportId {
        let base: String = format!("{SUPPORT_ID_PREFIX}{millis}_{}", self.counter);
        self.counter += 1;

        let mut candidate: String = base.clone();
        while is_taken(&candidate) {
            candidate = format!("{base}_{}", rand::random::<u16>());
        }
        SupportId::new(candidate)
    }
}
