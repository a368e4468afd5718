// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sitecrew_domain::{Assignee, SiteId, TimeSlot};

/// An operator edit to an assignment session, as data only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Place an assignee on a site for a slot.
    Assign {
        /// The site.
        site_id: SiteId,
        /// The slot.
        time_slot: TimeSlot,
        /// Who is placed.
        assignee: Assignee,
    },
    /// Remove an assignee from a site for a slot.
    Unassign {
        /// The site.
        site_id: SiteId,
        /// The slot.
        time_slot: TimeSlot,
        /// Who is removed.
        assignee: Assignee,
    },
    /// Register a block of support staff from an external company.
    RegisterSupport {
        /// The supplying company.
        company_name: String,
        /// Number of people supplied.
        count: i64,
    },
}

impl SessionCommand {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Assign { .. } => "assign",
            Self::Unassign { .. } => "unassign",
            Self::RegisterSupport { .. } => "register_support",
        }
    }
}
