// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Declares a database-assigned numeric identifier.
macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw database identifier.
            #[must_use]
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id! {
    /// Identifier of a roster staff member.
    StaffId
}

numeric_id! {
    /// Identifier of a job site.
    SiteId
}

numeric_id! {
    /// Identifier of a client (site operator).
    ClientId
}

/// A staff member's employment category.
///
/// The category decides the default eligibility of a staff member on any
/// given day: regular staff work unless on holiday, spot staff only work
/// when they have declared availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentCategory {
    /// Regular staff, workable every day unless a holiday is recorded.
    Regular,
    /// Spot staff, workable only on days with declared availability.
    Spot,
}

impl EmploymentCategory {
    /// Converts this category to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "REGULAR",
            Self::Spot => "SPOT",
        }
    }
}

impl FromStr for EmploymentCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REGULAR" => Ok(Self::Regular),
            "SPOT" => Ok(Self::Spot),
            _ => Err(DomainError::InvalidEmploymentCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for EmploymentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A half-day window within a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeSlot {
    /// Morning.
    Am,
    /// Afternoon.
    Pm,
}

impl TimeSlot {
    /// Both slots, in day order.
    pub const ALL: [Self; 2] = [Self::Am, Self::Pm];

    /// Converts this slot to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

impl FromStr for TimeSlot {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AM" => Ok(Self::Am),
            "PM" => Ok(Self::Pm),
            _ => Err(DomainError::InvalidTimeSlot(s.to_string())),
        }
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which slots a site needs covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SiteType {
    /// Morning only.
    Am,
    /// Afternoon only.
    Pm,
    /// Both slots, potentially with different crews.
    Full,
}

impl SiteType {
    /// Converts this site type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
            Self::Full => "FULL",
        }
    }

    /// Returns whether a site of this type needs coverage in `slot`.
    #[must_use]
    pub const fn requires(&self, slot: TimeSlot) -> bool {
        matches!(
            (self, slot),
            (Self::Full, _) | (Self::Am, TimeSlot::Am) | (Self::Pm, TimeSlot::Pm)
        )
    }
}

impl FromStr for SiteType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AM" => Ok(Self::Am),
            "PM" => Ok(Self::Pm),
            "FULL" => Ok(Self::Full),
            _ => Err(DomainError::InvalidSiteType(s.to_string())),
        }
    }
}

impl std::fmt::Display for SiteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A per-staff, per-date attendance declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityType {
    /// Whole-day holiday.
    HolidayFull,
    /// Morning holiday.
    HolidayAm,
    /// Afternoon holiday.
    HolidayPm,
    /// Available all day.
    AvailableFull,
    /// Available in the morning.
    AvailableAm,
    /// Available in the afternoon.
    AvailablePm,
}

impl AvailabilityType {
    /// Converts this type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HolidayFull => "HOLIDAY_FULL",
            Self::HolidayAm => "HOLIDAY_AM",
            Self::HolidayPm => "HOLIDAY_PM",
            Self::AvailableFull => "AVAILABLE_FULL",
            Self::AvailableAm => "AVAILABLE_AM",
            Self::AvailablePm => "AVAILABLE_PM",
        }
    }

    /// Returns whether this declaration is a holiday of any length.
    #[must_use]
    pub const fn is_holiday(&self) -> bool {
        matches!(self, Self::HolidayFull | Self::HolidayAm | Self::HolidayPm)
    }

    /// Returns whether this declaration is an availability of any length.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        !self.is_holiday()
    }

    /// The slots this declaration talks about.
    #[must_use]
    pub const fn slots(&self) -> &'static [TimeSlot] {
        match self {
            Self::HolidayFull | Self::AvailableFull => &TimeSlot::ALL,
            Self::HolidayAm | Self::AvailableAm => &[TimeSlot::Am],
            Self::HolidayPm | Self::AvailablePm => &[TimeSlot::Pm],
        }
    }
}

impl FromStr for AvailabilityType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HOLIDAY_FULL" => Ok(Self::HolidayFull),
            "HOLIDAY_AM" => Ok(Self::HolidayAm),
            "HOLIDAY_PM" => Ok(Self::HolidayPm),
            "AVAILABLE_FULL" => Ok(Self::AvailableFull),
            "AVAILABLE_AM" => Ok(Self::AvailableAm),
            "AVAILABLE_PM" => Ok(Self::AvailablePm),
            _ => Err(DomainError::InvalidAvailabilityType(s.to_string())),
        }
    }
}

impl std::fmt::Display for AvailabilityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
