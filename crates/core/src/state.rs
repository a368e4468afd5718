// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The assignment session: the in-memory matrix an operator edits for one day.
//!
//! A session moves through `Empty -> Loaded -> Dirty -> Confirming` and then
//! back to `Loaded` (confirm succeeded, rebased on the ledger read) or `Dirty`
//! (confirm failed, edits kept for a retry).

use crate::error::CoreError;
use crate::registrar::SupportRegistrar;
use sitecrew_domain::{
    Assignee, Coverage, DayAssignments, DayPlan, EligibleStaff, SiteId, StaffAssignment, StaffId,
    SupportAssignment, SupportEntry, SupportId, TimeSlot,
};
use std::collections::BTreeMap;
use time::Date;

/// Lifecycle phase of an [`AssignmentSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// No date loaded.
    Empty,
    /// Hydrated from the ledger and unchanged since.
    Loaded,
    /// Edited since the last load or confirm.
    Dirty,
    /// A full-day replace is in flight.
    Confirming,
}

impl SessionPhase {
    /// Returns the phase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Loaded => "loaded",
            Self::Dirty => "dirty",
            Self::Confirming => "confirming",
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The editable assignment matrix for one date.
///
/// Each `(site, slot)` key maps to an insertion-ordered set of assignees.
/// Keys with no assignees are never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentSession {
    phase: SessionPhase,
    date: Option<Date>,
    eligible: Vec<EligibleStaff>,
    coverage: Option<Coverage>,
    entries: BTreeMap<(SiteId, TimeSlot), Vec<Assignee>>,
    support: Vec<SupportEntry>,
    registrar: SupportRegistrar,
}

impl AssignmentSession {
    /// Creates an empty session.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: SessionPhase::Empty,
            date: None,
            eligible: Vec::new(),
            coverage: None,
            entries: BTreeMap::new(),
            support: Vec::new(),
            registrar: SupportRegistrar::new(),
        }
    }

    /// The current phase.
    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The loaded date, if any.
    #[must_use]
    pub const fn date(&self) -> Option<Date> {
        self.date
    }

    /// Staff eligible on the loaded date.
    #[must_use]
    pub fn eligible(&self) -> &[EligibleStaff] {
        &self.eligible
    }

    /// Coverage for the loaded date.
    #[must_use]
    pub const fn coverage(&self) -> Option<&Coverage> {
        self.coverage.as_ref()
    }

    /// Support entries registered in this session.
    #[must_use]
    pub fn support_entries(&self) -> &[SupportEntry] {
        &self.support
    }

    /// Looks up a registered support entry.
    #[must_use]
    pub fn support_entry(&self, id: &SupportId) -> Option<&SupportEntry> {
        self.support.iter().find(|entry| &entry.id == id)
    }

    /// The assignees on `site_id` in `slot`, in insertion order.
    #[must_use]
    pub fn assignees(&self, site_id: SiteId, slot: TimeSlot) -> &[Assignee] {
        self.entries
            .get(&(site_id, slot))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All non-empty `(site, slot)` entries, ordered by site then slot.
    pub fn entries(&self) -> impl Iterator<Item = (SiteId, TimeSlot, &[Assignee])> {
        self.entries
            .iter()
            .map(|((site_id, slot), assignees)| (*site_id, *slot, assignees.as_slice()))
    }

    /// Total assignees across all entries.
    #[must_use]
    pub fn assignment_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Returns whether the session holds edits not yet confirmed.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.phase == SessionPhase::Dirty
    }

    /// Hydrates the session for `date` from the ledger read.
    ///
    /// Any previous date, edits and support registrations are dropped. The
    /// existing rows are taken as-is; they are not re-checked against
    /// `eligible` or `coverage`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ConfirmInFlight` while a confirm is pending.
    pub fn load(
        &mut self,
        date: Date,
        eligible: Vec<EligibleStaff>,
        coverage: Coverage,
        existing: &DayAssignments,
    ) -> Result<(), CoreError> {
        self.guard_not_confirming()?;

        *self = Self::new();
        self.date = Some(date);
        self.eligible = eligible;
        self.coverage = Some(coverage);
        self.hydrate(existing);
        self.phase = SessionPhase::Loaded;
        Ok(())
    }

    /// Places `assignee` on `site_id` in `slot`.
    ///
    /// Returns `true` if the assignee was added, `false` if it was already
    /// present.
    ///
    /// # Errors
    ///
    /// Returns an error if no date is loaded, a confirm is in flight, the
    /// site does not need coverage in `slot`, the staff member is not
    /// eligible, or the support entry was never registered.
    pub fn assign(
        &mut self,
        site_id: SiteId,
        slot: TimeSlot,
        assignee: Assignee,
    ) -> Result<bool, CoreError> {
        self.guard_editable()?;

        let covered: bool = self
            .coverage
            .as_ref()
            .is_some_and(|coverage| coverage.requires(site_id, slot));
        if !covered {
            return Err(CoreError::SiteNotCovered {
                site_id,
                time_slot: slot,
            });
        }

        match &assignee {
            Assignee::Staff { id } => {
                if !self.is_eligible(*id) {
                    return Err(CoreError::StaffNotEligible(*id));
                }
            }
            Assignee::Support { id } => {
                if self.support_entry(id).is_none() {
                    return Err(CoreError::UnknownSupportEntry(id.clone()));
                }
            }
        }

        let slot_assignees: &mut Vec<Assignee> = self.entries.entry((site_id, slot)).or_default();
        if slot_assignees.contains(&assignee) {
            return Ok(false);
        }
        slot_assignees.push(assignee);
        self.phase = SessionPhase::Dirty;
        Ok(true)
    }

    /// Removes `assignee` from `site_id` in `slot`.
    ///
    /// Returns `true` if something was removed. Unknown keys and assignees
    /// are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if no date is loaded or a confirm is in flight.
    pub fn unassign(
        &mut self,
        site_id: SiteId,
        slot: TimeSlot,
        assignee: &Assignee,
    ) -> Result<bool, CoreError> {
        self.guard_editable()?;

        let Some(slot_assignees) = self.entries.get_mut(&(site_id, slot)) else {
            return Ok(false);
        };
        let before: usize = slot_assignees.len();
        slot_assignees.retain(|a| a != assignee);
        let removed: bool = slot_assignees.len() != before;

        if slot_assignees.is_empty() {
            self.entries.remove(&(site_id, slot));
        }
        if removed {
            self.phase = SessionPhase::Dirty;
        }
        Ok(removed)
    }

    /// Registers a support-staff block and returns its entry.
    ///
    /// Registration creates no assignment; the returned id must be assigned
    /// separately.
    ///
    /// # Errors
    ///
    /// Returns an error if no date is loaded, a confirm is in flight, the
    /// company name is blank, or `count` is below one.
    pub fn register_support_staff(
        &mut self,
        company_name: &str,
        count: i64,
    ) -> Result<SupportEntry, CoreError> {
        self.guard_editable()?;

        let entry: SupportEntry = self
            .registrar
            .register(company_name, count, &self.support)?;
        self.support.push(entry.clone());
        Ok(entry)
    }

    /// Starts a confirm and returns the full-day plan to persist.
    ///
    /// Staff assignees become roster rows and support assignees become
    /// support rows carrying their registered company name and headcount.
    ///
    /// # Errors
    ///
    /// Returns an error if no date is loaded, a confirm is already in
    /// flight, or the session holds no assignments.
    pub fn begin_confirm(&mut self) -> Result<DayPlan, CoreError> {
        let date: Date = self.date.ok_or(CoreError::NoDateSelected)?;
        self.guard_not_confirming()?;
        if self.entries.is_empty() {
            return Err(CoreError::NothingToConfirm);
        }

        let mut assignments: Vec<StaffAssignment> = Vec::new();
        let mut support_assignments: Vec<SupportAssignment> = Vec::new();

        for ((site_id, slot), assignees) in &self.entries {
            for (position, assignee) in (0_u32..).zip(assignees) {
                match assignee {
                    Assignee::Staff { id } => assignments.push(StaffAssignment {
                        site_id: *site_id,
                        time_slot: *slot,
                        staff_id: *id,
                        position,
                    }),
                    Assignee::Support { id } => {
                        let entry: &SupportEntry = self
                            .support_entry(id)
                            .ok_or_else(|| CoreError::UnknownSupportEntry(id.clone()))?;
                        support_assignments.push(SupportAssignment {
                            site_id: *site_id,
                            time_slot: *slot,
                            support_id: entry.id.clone(),
                            company_name: entry.company_name.clone(),
                            headcount: entry.count,
                            position,
                        });
                    }
                }
            }
        }

        self.phase = SessionPhase::Confirming;
        Ok(DayPlan {
            date,
            assignments,
            support_assignments,
        })
    }

    /// Finishes a successful confirm by rebasing on the ledger read.
    ///
    /// Eligibility, coverage and support registrations are kept; the
    /// entries are replaced by `read_back`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoConfirmInFlight` if no confirm is pending.
    pub fn complete_confirm(&mut self, read_back: &DayAssignments) -> Result<(), CoreError> {
        if self.phase != SessionPhase::Confirming {
            return Err(CoreError::NoConfirmInFlight);
        }

        self.entries.clear();
        self.hydrate(read_back);
        self.phase = SessionPhase::Loaded;
        Ok(())
    }

    /// Abandons a failed confirm, keeping the edits for a retry.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoConfirmInFlight` if no confirm is pending.
    pub fn fail_confirm(&mut self) -> Result<(), CoreError> {
        if self.phase != SessionPhase::Confirming {
            return Err(CoreError::NoConfirmInFlight);
        }
        self.phase = SessionPhase::Dirty;
        Ok(())
    }

    /// Drops everything and returns to `Empty`.
    pub fn discard(&mut self) {
        *self = Self::new();
    }

    fn is_eligible(&self, staff_id: StaffId) -> bool {
        self.eligible.iter().any(|s| s.staff_id == staff_id)
    }

    fn guard_not_confirming(&self) -> Result<(), CoreError> {
        if self.phase == SessionPhase::Confirming {
            return Err(CoreError::ConfirmInFlight);
        }
        Ok(())
    }

    fn guard_editable(&self) -> Result<(), CoreError> {
        if self.date.is_none() {
            return Err(CoreError::NoDateSelected);
        }
        self.guard_not_confirming()
    }

    /// Inserts ledger rows without the editing checks.
    ///
    /// Staff and support rows are merged on their stored position so each
    /// `(site, slot)` comes back in the order it was confirmed in. Equal
    /// positions keep staff ahead of support.
    fn hydrate(&mut self, day: &DayAssignments) {
        let mut placed: Vec<(u32, SiteId, TimeSlot, Assignee)> = day
            .assignments
            .iter()
            .map(|row| {
                (
                    row.position,
                    row.site_id,
                    row.time_slot,
                    Assignee::staff(row.staff_id),
                )
            })
            .collect();

        for row in &day.support_assignments {
            match self.support.iter_mut().find(|e| e.id == row.support_id) {
                Some(entry) => {
                    entry.company_name.clone_from(&row.company_name);
                    entry.count = row.headcount;
                }
                None => self.support.push(SupportEntry {
                    id: row.support_id.clone(),
                    company_name: row.company_name.clone(),
                    count: row.headcount,
                }),
            }
            placed.push((
                row.position,
                row.site_id,
                row.time_slot,
                Assignee::support(row.support_id.clone()),
            ));
        }

        placed.sort_by_key(|(position, ..)| *position);
        for (_, site_id, slot, assignee) in placed {
            self.insert_unchecked(site_id, slot, assignee);
        }
    }

    fn insert_unchecked(&mut self, site_id: SiteId, slot: TimeSlot, assignee: Assignee) {
        let slot_assignees: &mut Vec<Assignee> = self.entries.entry((site_id, slot)).or_default();
        if !slot_assignees.contains(&assignee) {
            slot_assignees.push(assignee);
        }
    }
}

impl Default for AssignmentSession {
    fn default() -> Self {
        Self::new()
    }
}
