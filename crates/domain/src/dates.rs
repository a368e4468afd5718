// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar date, wall-clock time and month handling.
//!
//! Dates travel over the wire and live in the database as `YYYY-MM-DD`,
//! site start times as `HH:MM`, and sales months as `YYYY-MM`. This module
//! owns parsing and formatting for all three so every layer agrees on the
//! representation.

use crate::error::DomainError;
use time::macros::format_description;
use time::{Date, Month, Time};

/// Parses a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(raw: &str) -> Result<Date, DomainError> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: raw.to_string(),
            error: e.to_string(),
        }
    })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Parses an `HH:MM` start time.
///
/// # Errors
///
/// Returns `DomainError::InvalidStartTime` if the string is not a valid time.
pub fn parse_start_time(raw: &str) -> Result<Time, DomainError> {
    Time::parse(raw.trim(), format_description!("[hour]:[minute]")).map_err(|e| {
        DomainError::InvalidStartTime {
            value: raw.to_string(),
            error: e.to_string(),
        }
    })
}

/// Formats a time as `HH:MM`.
#[must_use]
pub fn format_start_time(time: Time) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Validates and normalizes a `YYYY-MM` sales month.
///
/// # Errors
///
/// Returns `DomainError::InvalidMonth` if the value is not a valid month.
pub fn parse_month(raw: &str) -> Result<String, DomainError> {
    let invalid = || DomainError::InvalidMonth(raw.to_string());
    let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
    if year.len() != 4 || month.len() != 2 {
        return Err(invalid());
    }
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u8 = month.parse().map_err(|_| invalid())?;
    let month: Month = Month::try_from(month).map_err(|_| invalid())?;
    Ok(format!("{year:04}-{:02}", u8::from(month)))
}

/// Serde adapter for `YYYY-MM-DD` dates.
pub mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    /// Serializes a date as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    /// Deserializes a `YYYY-MM-DD` date.
    ///
    /// # Errors
    ///
    /// Fails if the value is not a string or not a valid date.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `HH:MM` times.
pub mod hh_mm {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Time;

    /// Serializes a time as `HH:MM`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(time: &Time, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_start_time(*time))
    }

    /// Deserializes an `HH:MM` time.
    ///
    /// # Errors
    ///
    /// Fails if the value is not a string or not a valid time.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Time, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        super::parse_start_time(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_date_round_trips_through_text() {
        let date: Date = parse_date("2024-06-10").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), Month::June);
        assert_eq!(date.day(), 10);
        assert_eq!(format_date(date), "2024-06-10");
    }

    #[test]
    fn test_unparseable_date_is_rejected() {
        assert!(matches!(
            parse_date("2024-13-40"),
            Err(DomainError::DateParseError { .. })
        ));
        assert!(parse_date("").is_err());
        assert!(parse_date("06/10/2024").is_err());
    }

    #[test]
    fn test_start_time_is_zero_padded() {
        let time: Time = parse_start_time("07:30").unwrap();
        assert_eq!(format_start_time(time), "07:30");
        assert!(parse_start_time("25:00").is_err());
    }

    #[test]
    fn test_month_normalization() {
        assert_eq!(parse_month("2024-06").unwrap(), "2024-06");
        assert!(parse_month("2024-6").is_err());
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("june").is_err());
    }
}
