// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::ClientConfig;
use crate::error::ControllerError;
use crate::gateway::AssignmentGateway;
use sitecrew::{AssignmentSession, CommandOutcome, CoreError, SessionCommand, apply};
use sitecrew_domain::{DayAssignments, DayPlan, ReplaceDayOutcome};
use std::time::Duration;
use time::Date;
use tracing::{debug, info, warn};

/// Drives an [`AssignmentSession`] against a server.
///
/// The controller is the only writer of its session. Every await point
/// that can fail leaves the session in a state the operator can act on:
/// a failed load leaves it empty, a failed confirm leaves the edits dirty.
#[derive(Debug)]
pub struct SessionController<G> {
    gateway: G,
    session: AssignmentSession,
    confirm_timeout: Duration,
}

impl<G: AssignmentGateway + Send + Sync> SessionController<G> {
    /// Creates a controller with an empty session.
    #[must_use]
    pub const fn new(gateway: G, config: &ClientConfig) -> Self {
        Self {
            gateway,
            session: AssignmentSession::new(),
            confirm_timeout: config.confirm_timeout,
        }
    }

    /// The session being edited.
    #[must_use]
    pub const fn session(&self) -> &AssignmentSession {
        &self.session
    }

    /// The gateway in use.
    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Loads `date`, fetching eligibility, coverage and existing rows
    /// concurrently.
    ///
    /// Unsaved edits for a previously loaded date are dropped.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Load` if any fetch fails, leaving the
    /// session empty, or `ControllerError::Session` while a confirm is in
    /// flight.
    pub async fn select_date(&mut self, date: Date) -> Result<(), ControllerError> {
        if self.session.is_dirty() {
            warn!(%date, "Dropping unsaved edits to load another date");
        }

        let fetched = futures::try_join!(
            self.gateway.fetch_eligible_staff(date),
            self.gateway.fetch_coverage(date),
            self.gateway.fetch_assignments(date),
        );

        match fetched {
            Ok((eligible, coverage, existing)) => {
                self.session.load(date, eligible, coverage, &existing)?;
                info!(
                    %date,
                    assignments = self.session.assignment_count(),
                    "Loaded assignment day"
                );
                Ok(())
            }
            Err(err) => {
                warn!(%date, error = %err, "Failed to load assignment day");
                self.session.discard();
                Err(ControllerError::Load(err))
            }
        }
    }

    /// Applies an operator edit to the session.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Session` when the session rejects the edit.
    pub fn apply(&mut self, command: SessionCommand) -> Result<CommandOutcome, ControllerError> {
        let name: &str = command.name();
        apply(&mut self.session, command).map_err(|err| {
            warn!(command = name, error = %err, "Edit rejected");
            ControllerError::Session(err)
        })
    }

    /// Persists the whole day and rebases the session on what was stored.
    ///
    /// Dropping the returned future before it resolves puts the session
    /// back to dirty, so a cancelled confirm can be retried.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Session` if there is nothing to confirm or
    /// a confirm is already running. Any gateway failure or
    /// `ControllerError::TimedOut` keeps the edits for a retry.
    pub async fn confirm(&mut self) -> Result<ReplaceDayOutcome, ControllerError> {
        let plan: DayPlan = self.session.begin_confirm()?;
        let date: Date = plan.date;
        let confirm_timeout: Duration = self.confirm_timeout;
        let pending: PendingConfirm<'_> = PendingConfirm::new(&mut self.session);

        let outcome: ReplaceDayOutcome =
            match tokio::time::timeout(confirm_timeout, self.gateway.replace_day(&plan)).await {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(err)) => {
                    warn!(%date, error = %err, "Confirm rejected");
                    return Err(ControllerError::Confirm(err));
                }
                Err(_) => {
                    warn!(%date, timeout_ms = confirm_timeout.as_millis(), "Confirm timed out");
                    return Err(ControllerError::TimedOut {
                        after: confirm_timeout,
                    });
                }
            };

        let read_back: DayAssignments = match self.gateway.fetch_assignments(date).await {
            Ok(read_back) => read_back,
            Err(err) => {
                warn!(%date, error = %err, "Re-read after confirm failed");
                return Err(ControllerError::ReadBack(err));
            }
        };

        pending.complete(&read_back)?;
        info!(
            %date,
            assignments = outcome.assignment_count,
            support_assignments = outcome.support_assignment_count,
            "Confirmed assignment day"
        );
        Ok(outcome)
    }

    /// Drops the session, returning to no date selected.
    pub fn discard(&mut self) {
        self.session.discard();
    }
}

/// A confirm between `begin_confirm` and its outcome.
///
/// Unless [`PendingConfirm::complete`] runs, dropping it fails the confirm.
struct PendingConfirm<'a> {
    session: &'a mut AssignmentSession,
    armed: bool,
}

impl<'a> PendingConfirm<'a> {
    const fn new(session: &'a mut AssignmentSession) -> Self {
        Self {
            session,
            armed: true,
        }
    }

    fn complete(mut self, read_back: &DayAssignments) -> Result<(), CoreError> {
        self.armed = false;
        self.session.complete_confirm(read_back)
    }
}

impl Drop for PendingConfirm<'_> {
    fn drop(&mut self) {
        if self.armed && self.session.fail_confirm().is_ok() {
            debug!("Confirm abandoned, edits kept");
        }
    }
}
