// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::SessionCommand;
use crate::error::CoreError;
use crate::state::AssignmentSession;
use sitecrew_domain::SupportEntry;

/// What applying a command did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The matrix changed.
    Changed,
    /// The command was a no-op (already assigned, or nothing to remove).
    Unchanged,
    /// A support block was registered.
    Registered(SupportEntry),
}

/// Applies an operator command to the session.
///
/// A failed command leaves the session untouched.
///
/// # Arguments
///
/// * `session` - The session to edit
/// * `command` - The edit to apply
///
/// # Errors
///
/// Returns the session's rejection of the command.
pub fn apply(
    session: &mut AssignmentSession,
    command: SessionCommand,
) -> Result<CommandOutcome, CoreError> {
    match command {
        SessionCommand::Assign {
            site_id,
            time_slot,
            assignee,
        } => session
            .assign(site_id, time_slot, assignee)
            .map(changed_or_not),
        SessionCommand::Unassign {
            site_id,
            time_slot,
            assignee,
        } => session
            .unassign(site_id, time_slot, &assignee)
            .map(changed_or_not),
        SessionCommand::RegisterSupport {
            company_name,
            count,
        } => session
            .register_support_staff(&company_name, count)
            .map(CommandOutcome::Registered),
    }
}

const fn changed_or_not(changed: bool) -> CommandOutcome {
    if changed {
        CommandOutcome::Changed
    } else {
        CommandOutcome::Unchanged
    }
}
