// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment vocabulary shared by the ledger, the session and the wire.
//!
//! A day's assignments consist of roster rows (one per staff member per
//! site per slot) and support rows (a block of headcount from an external
//! company). Inside an editing session both kinds are addressed through the
//! tagged [`Assignee`] so that no code has to inspect identifier formats to
//! tell them apart.

use crate::dates::iso_date;
use crate::error::DomainError;
use crate::types::{SiteId, StaffId, TimeSlot};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use time::Date;

/// Synthetic identifier of a support-staff block.
///
/// Support identifiers are minted per editing session and persisted with
/// the external assignment rows so a re-read re-hydrates the same ids.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupportId(String);

impl SupportId {
    /// Wraps an already-minted support identifier.
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SupportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Someone (or some block of headcount) placed on a site for a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Assignee {
    /// A roster staff member.
    Staff {
        /// The staff identifier.
        id: StaffId,
    },
    /// A registered support-staff block.
    Support {
        /// The support identifier.
        id: SupportId,
    },
}

impl Assignee {
    /// Shorthand for a roster staff assignee.
    #[must_use]
    pub const fn staff(id: StaffId) -> Self {
        Self::Staff { id }
    }

    /// Shorthand for a support assignee.
    #[must_use]
    pub const fn support(id: SupportId) -> Self {
        Self::Support { id }
    }
}

impl std::fmt::Display for Assignee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Staff { id } => write!(f, "staff:{id}"),
            Self::Support { id } => write!(f, "support:{id}"),
        }
    }
}

/// A support-staff block registered in a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SupportEntry {
    /// The synthetic identifier.
    pub id: SupportId,
    /// The supplying company.
    pub company_name: String,
    /// Number of people supplied.
    pub count: u32,
}

/// One roster staff member on one site in one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaffAssignment {
    /// The site.
    pub site_id: SiteId,
    /// The slot.
    pub time_slot: TimeSlot,
    /// The staff member.
    pub staff_id: StaffId,
    /// Index among everyone on the same `(site, slot)`, support included.
    #[serde(default)]
    pub position: u32,
}

/// One support block on one site in one slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SupportAssignment {
    /// The site.
    pub site_id: SiteId,
    /// The slot.
    pub time_slot: TimeSlot,
    /// The session-minted support identifier.
    pub support_id: SupportId,
    /// The supplying company.
    pub company_name: String,
    /// Number of people supplied.
    pub headcount: u32,
    /// Index among everyone on the same `(site, slot)`, staff included.
    #[serde(default)]
    pub position: u32,
}

/// A roster assignment as read back from the ledger, with display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedStaff {
    /// The site.
    pub site_id: SiteId,
    /// The slot.
    pub time_slot: TimeSlot,
    /// The staff member.
    pub staff_id: StaffId,
    /// The staff member's name.
    pub staff_name: String,
    /// The client operating the site.
    pub client_name: String,
    #[serde(default)]
    pub position: u32,
}

/// Everything the ledger holds for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAssignments {
    /// The date.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Roster assignments.
    pub assignments: Vec<AssignedStaff>,
    /// Support assignments.
    pub support_assignments: Vec<SupportAssignment>,
}

impl DayAssignments {
    /// An empty day.
    #[must_use]
    pub const fn empty(date: Date) -> Self {
        Self {
            date,
            assignments: Vec::new(),
            support_assignments: Vec::new(),
        }
    }
}

/// The complete replacement set for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    /// The date being replaced.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Roster assignments.
    #[serde(default)]
    pub assignments: Vec<StaffAssignment>,
    /// Support assignments.
    #[serde(default)]
    pub support_assignments: Vec<SupportAssignment>,
}

impl DayPlan {
    /// Validates the plan before it reaches the ledger.
    ///
    /// Checks support company names and headcounts, rejects any assignee
    /// listed twice for the same `(site, slot)`, and requires every row of
    /// one support id to name the same company and headcount.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen: HashSet<(SiteId, TimeSlot, Assignee)> = HashSet::new();
        let mut blocks: HashMap<&SupportId, (&str, u32)> = HashMap::new();

        for row in &self.assignments {
            let assignee: Assignee = Assignee::staff(row.staff_id);
            if !seen.insert((row.site_id, row.time_slot, assignee.clone())) {
                return Err(duplicate(row.site_id, row.time_slot, &assignee));
            }
        }

        for row in &self.support_assignments {
            crate::validation::validate_support_registration(
                &row.company_name,
                i64::from(row.headcount),
            )?;
            let block = (row.company_name.as_str(), row.headcount);
            if *blocks.entry(&row.support_id).or_insert(block) != block {
                return Err(DomainError::InconsistentSupportEntry(
                    row.support_id.to_string(),
                ));
            }
            let assignee: Assignee = Assignee::support(row.support_id.clone());
            if !seen.insert((row.site_id, row.time_slot, assignee.clone())) {
                return Err(duplicate(row.site_id, row.time_slot, &assignee));
            }
        }

        Ok(())
    }

    /// Total number of rows in the plan.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.assignments.len() + self.support_assignments.len()
    }
}

fn duplicate(site_id: SiteId, time_slot: TimeSlot, assignee: &Assignee) -> DomainError {
    DomainError::DuplicateAssignment {
        site_id: site_id.value(),
        time_slot: time_slot.to_string(),
        assignee: assignee.to_string(),
    }
}

/// Result of a full-day replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceDayOutcome {
    /// The replaced date.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Roster rows written.
    pub assignment_count: usize,
    /// Support rows written.
    pub support_assignment_count: usize,
}
