// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_listing, test_date};
use crate::{Coverage, SiteId, SiteType, TimeSlot, resolve_coverage};
use time::Duration;

#[test]
fn test_full_site_appears_in_both_partitions() {
    let listings = vec![create_test_listing(1, SiteType::Full, "08:00")];

    let coverage: Coverage = resolve_coverage(test_date(), &listings);

    assert!(coverage.requires(SiteId::new(1), TimeSlot::Am));
    assert!(coverage.requires(SiteId::new(1), TimeSlot::Pm));
}

#[test]
fn test_half_day_sites_appear_in_one_partition() {
    let listings = vec![
        create_test_listing(1, SiteType::Am, "08:00"),
        create_test_listing(2, SiteType::Pm, "13:00"),
    ];

    let coverage: Coverage = resolve_coverage(test_date(), &listings);

    assert_eq!(coverage.am.len(), 1);
    assert_eq!(coverage.am[0].site_id, SiteId::new(1));
    assert_eq!(coverage.pm.len(), 1);
    assert_eq!(coverage.pm[0].site_id, SiteId::new(2));
    assert!(!coverage.requires(SiteId::new(1), TimeSlot::Pm));
}

#[test]
fn test_cancelled_site_never_appears() {
    let mut cancelled = create_test_listing(1, SiteType::Full, "08:00");
    cancelled.site.cancelled = true;

    let coverage: Coverage = resolve_coverage(test_date(), &[cancelled]);

    assert!(coverage.am.is_empty());
    assert!(coverage.pm.is_empty());
    assert!(coverage.site(SiteId::new(1)).is_none());
}

#[test]
fn test_sites_on_other_dates_are_dropped() {
    let mut other_day = create_test_listing(1, SiteType::Am, "08:00");
    other_day.site.date = test_date() + Duration::days(1);

    assert!(resolve_coverage(test_date(), &[other_day]).am.is_empty());
}

#[test]
fn test_partitions_ordered_by_start_time() {
    let listings = vec![
        create_test_listing(1, SiteType::Full, "10:30"),
        create_test_listing(2, SiteType::Am, "07:00"),
        create_test_listing(3, SiteType::Full, "08:15"),
    ];

    let coverage: Coverage = resolve_coverage(test_date(), &listings);

    let am_ids: Vec<i64> = coverage.am.iter().map(|s| s.site_id.value()).collect();
    let pm_ids: Vec<i64> = coverage.pm.iter().map(|s| s.site_id.value()).collect();
    assert_eq!(am_ids, vec![2, 3, 1]);
    assert_eq!(pm_ids, vec![3, 1]);
    assert_eq!(coverage.am[0].client_name, "Acme");
}
