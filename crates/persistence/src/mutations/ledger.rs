// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The full-day assignment replace.
//!
//! A replace deletes every roster and support row for the date and inserts
//! the plan, all inside one transaction. References are checked explicitly
//! before any row is touched so that a missing, cancelled or off-date site,
//! or an inactive staff member, rejects the whole plan with a clear message.
//! The foreign keys back this up.

use diesel::SqliteConnection;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::prelude::*;
use sitecrew_domain::{DayPlan, ReplaceDayOutcome, format_date};
use std::collections::BTreeSet;
use tracing::info;

use crate::diesel_schema::{assignments, external_assignments, sites, staff};
use crate::error::PersistenceError;

fn slot_position(position: u32) -> Result<i32, PersistenceError> {
    i32::try_from(position).map_err(|_| {
        PersistenceError::InvalidData(format!("Slot position {position} is too large"))
    })
}

backend_fn! {
/// Replaces every assignment recorded for `plan.date` with the plan.
///
/// Replaying the same plan leaves the ledger unchanged. Concurrent
/// replaces of the same date are last-writer-wins.
///
/// # Errors
///
/// Returns `PersistenceError::ReferentialIntegrity` if the plan references a
/// site that does not exist, is cancelled or is scheduled on another date,
/// or a staff member that does not exist, is hidden, or has been deleted.
/// Nothing is written in that case.
pub fn replace_day(conn: &mut _, plan: &DayPlan) -> Result<ReplaceDayOutcome, PersistenceError> {
    let work_date: String = format_date(plan.date);

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let site_ids: BTreeSet<i64> = plan
            .assignments
            .iter()
            .map(|row| row.site_id.value())
            .chain(plan.support_assignments.iter().map(|row| row.site_id.value()))
            .collect();
        for site_id in site_ids {
            let scheduled: Option<(String, i32)> = sites::table
                .filter(sites::site_id.eq(site_id))
                .select((sites::work_date, sites::is_cancelled))
                .first(conn)
                .optional()?;
            match scheduled {
                None => {
                    return Err(PersistenceError::ReferentialIntegrity(format!(
                        "Site {site_id} does not exist"
                    )));
                }
                Some((site_date, _)) if site_date != work_date => {
                    return Err(PersistenceError::ReferentialIntegrity(format!(
                        "Site {site_id} is scheduled on {site_date}, not {work_date}"
                    )));
                }
                Some((_, cancelled)) if cancelled != 0 => {
                    return Err(PersistenceError::ReferentialIntegrity(format!(
                        "Site {site_id} is cancelled"
                    )));
                }
                Some(_) => {}
            }
        }

        let staff_ids: BTreeSet<i64> = plan
            .assignments
            .iter()
            .map(|row| row.staff_id.value())
            .collect();
        for staff_id in staff_ids {
            let found: i64 = staff::table
                .filter(staff::staff_id.eq(staff_id))
                .filter(staff::deleted_at.is_null())
                .filter(staff::is_hidden.eq(0))
                .count()
                .get_result(conn)?;
            if found == 0 {
                return Err(PersistenceError::ReferentialIntegrity(format!(
                    "Staff {staff_id} does not exist or is no longer active"
                )));
            }
        }

        let removed: usize = diesel::delete(assignments::table)
            .filter(assignments::work_date.eq(work_date.as_str()))
            .execute(conn)?;
        let removed_support: usize = diesel::delete(external_assignments::table)
            .filter(external_assignments::work_date.eq(work_date.as_str()))
            .execute(conn)?;

        for row in &plan.assignments {
            diesel::insert_into(assignments::table)
                .values((
                    assignments::work_date.eq(work_date.as_str()),
                    assignments::site_id.eq(row.site_id.value()),
                    assignments::staff_id.eq(row.staff_id.value()),
                    assignments::time_slot.eq(row.time_slot.as_str()),
                    assignments::slot_position.eq(slot_position(row.position)?),
                ))
                .execute(conn)?;
        }

        for row in &plan.support_assignments {
            let headcount: i32 = i32::try_from(row.headcount).map_err(|_| {
                PersistenceError::InvalidData(format!("Headcount {} is too large", row.headcount))
            })?;
            diesel::insert_into(external_assignments::table)
                .values((
                    external_assignments::work_date.eq(work_date.as_str()),
                    external_assignments::site_id.eq(row.site_id.value()),
                    external_assignments::time_slot.eq(row.time_slot.as_str()),
                    external_assignments::support_key.eq(row.support_id.value()),
                    external_assignments::company_name.eq(row.company_name.as_str()),
                    external_assignments::headcount.eq(headcount),
                    external_assignments::slot_position.eq(slot_position(row.position)?),
                ))
                .execute(conn)?;
        }

        info!(
            %work_date,
            removed,
            removed_support,
            assignments = plan.assignments.len(),
            support_assignments = plan.support_assignments.len(),
            "Replaced day assignments"
        );

        Ok(ReplaceDayOutcome {
            date: plan.date,
            assignment_count: plan.assignments.len(),
            support_assignment_count: plan.support_assignments.len(),
        })
    })
}
}
