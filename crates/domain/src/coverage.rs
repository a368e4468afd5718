// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Site coverage for a date.
//!
//! Partitions the non-cancelled sites of a day by the slots they need staffed.

use crate::dates::{hh_mm, iso_date};
use crate::records::Site;
use crate::types::{ClientId, SiteId, SiteType, TimeSlot};
use serde::{Deserialize, Serialize};
use time::{Date, Time};

/// A site joined with its client's name, as loaded from the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteListing {
    /// The site record.
    pub site: Site,
    /// The owning client's name.
    pub client_name: String,
}

/// Display summary of a site that needs coverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSummary {
    /// The site identifier.
    pub site_id: SiteId,
    /// The owning client.
    pub client_id: ClientId,
    /// The owning client's name.
    pub client_name: String,
    /// Which slots need coverage.
    pub site_type: SiteType,
    /// Start time on the work date.
    #[serde(with = "hh_mm")]
    pub start_time: Time,
    /// Site address.
    pub address: Option<String>,
    /// Description of the work.
    pub work_content: Option<String>,
}

impl SiteSummary {
    fn from_listing(listing: &SiteListing) -> Self {
        Self {
            site_id: listing.site.site_id,
            client_id: listing.site.client_id,
            client_name: listing.client_name.clone(),
            site_type: listing.site.site_type,
            start_time: listing.site.start_time,
            address: listing.site.address.clone(),
            work_content: listing.site.work_content.clone(),
        }
    }
}

/// Sites needing coverage on a date, per slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coverage {
    /// The work date.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Sites needing morning coverage, by start time.
    pub am: Vec<SiteSummary>,
    /// Sites needing afternoon coverage, by start time.
    pub pm: Vec<SiteSummary>,
}

impl Coverage {
    /// The sites needing coverage in `slot`.
    #[must_use]
    pub fn sites_for(&self, slot: TimeSlot) -> &[SiteSummary] {
        match slot {
            TimeSlot::Am => &self.am,
            TimeSlot::Pm => &self.pm,
        }
    }

    /// Returns whether `site_id` needs coverage in `slot`.
    #[must_use]
    pub fn requires(&self, site_id: SiteId, slot: TimeSlot) -> bool {
        self.sites_for(slot).iter().any(|s| s.site_id == site_id)
    }

    /// Looks a site up in either partition.
    #[must_use]
    pub fn site(&self, site_id: SiteId) -> Option<&SiteSummary> {
        self.am
            .iter()
            .chain(self.pm.iter())
            .find(|s| s.site_id == site_id)
    }
}

/// Resolves the coverage-required sites for `date`.
///
/// Cancelled sites and sites scheduled on other dates are dropped. A `FULL`
/// site lands in both partitions; each partition is ordered by start time,
/// then by site identifier.
#[must_use]
pub fn resolve_coverage(date: Date, listings: &[SiteListing]) -> Coverage {
    let mut am: Vec<SiteSummary> = Vec::new();
    let mut pm: Vec<SiteSummary> = Vec::new();

    for listing in listings
        .iter()
        .filter(|l| l.site.date == date && !l.site.cancelled)
    {
        if listing.site.site_type.requires(TimeSlot::Am) {
            am.push(SiteSummary::from_listing(listing));
        }
        if listing.site.site_type.requires(TimeSlot::Pm) {
            pm.push(SiteSummary::from_listing(listing));
        }
    }

    let by_start = |a: &SiteSummary, b: &SiteSummary| {
        a.start_time
            .cmp(&b.start_time)
            .then(a.site_id.cmp(&b.site_id))
    };
    am.sort_by(by_start);
    pm.sort_by(by_start);

    Coverage { date, am, pm }
}
