use std::time::Duration;

use chrono::{TimeZone, Utc};
use courtwatch_db::repositories::snapshot::snapshot_cutoff;
use pretty_assertions::assert_eq;

#[test]
fn test_cutoff_is_ttl_before_now() {
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();

    let cutoff = snapshot_cutoff(now, Duration::from_secs(24 * 3600)).unwrap();

    assert_eq!(cutoff, Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap());
}

#[test]
fn test_ttl_beyond_calendar_range_is_an_error() {
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
    let three_hundred_thousand_years = Duration::from_secs(300_000 * 365 * 86_400);

    assert!(snapshot_cutoff(now, three_hundred_thousand_years).is_err());
    assert!(snapshot_cutoff(now, Duration::MAX).is_err());
}
