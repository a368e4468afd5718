// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Validates a support-staff registration.
///
/// # Arguments
///
/// * `company_name` - The supplying company; must not be blank
/// * `count` - The headcount; must be at least 1
///
/// # Returns
///
/// The trimmed company name and the headcount as `u32`.
///
/// # Errors
///
/// Returns `DomainError::BlankCompanyName` or `DomainError::InvalidHeadcount`.
pub fn validate_support_registration(
    company_name: &str,
    count: i64,
) -> Result<(String, u32), DomainError> {
    let company_name: &str = company_name.trim();
    if company_name.is_empty() {
        return Err(DomainError::BlankCompanyName);
    }

    if count < 1 {
        return Err(DomainError::InvalidHeadcount(count));
    }
    let count: u32 = u32::try_from(count).map_err(|_| DomainError::InvalidHeadcount(count))?;

    Ok((company_name.to_string(), count))
}
