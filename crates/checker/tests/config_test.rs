use std::collections::HashMap;
use std::time::Duration;

use chrono::TimeDelta;
use courtwatch_checker::WatcherConfig;
use courtwatch_checker::config::{DEFAULT_TIMEZONE, snapshot_ttl_from_lookup};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tracing::Level;

fn load(vars: &[(&str, &str)]) -> eyre::Result<WatcherConfig> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    WatcherConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = load(&[("DATABASE_URL", "postgres://localhost/courtwatch")]).unwrap();

    assert_eq!(config.database_url, "postgres://localhost/courtwatch");
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.timezone, DEFAULT_TIMEZONE);
    assert_eq!(config.day_interval, Duration::from_secs(20 * 60));
    assert_eq!(config.night_interval, Duration::from_secs(4 * 3600));
    assert_eq!(config.lookahead_days, 14);
    assert_eq!(config.past_grace, TimeDelta::minutes(5));
    assert_eq!(config.snapshot_ttl, Duration::from_secs(24 * 3600));
}

#[test]
fn test_overrides() {
    let config = load(&[
        ("DATABASE_URL", "postgres://db/watch"),
        ("LOG_LEVEL", "DEBUG"),
        ("WATCH_TIMEZONE", "Europe/Berlin"),
        ("WATCH_DAY_INTERVAL_MINUTES", "10"),
        ("WATCH_NIGHT_INTERVAL_HOURS", "3"),
        ("WATCH_LOOKAHEAD_DAYS", "7"),
        ("WATCH_PAST_GRACE_MINUTES", "0"),
        ("WATCH_SNAPSHOT_TTL_HOURS", "48"),
    ])
    .unwrap();

    assert_eq!(config.log_level, Level::DEBUG);
    assert_eq!(config.timezone, chrono_tz::Europe::Berlin);
    assert_eq!(config.intervals().day, Duration::from_secs(600));
    assert_eq!(config.intervals().night, Duration::from_secs(3 * 3600));
    assert_eq!(config.lookahead_days, 7);
    assert_eq!(config.past_grace, TimeDelta::zero());
    assert_eq!(config.snapshot_ttl, Duration::from_secs(48 * 3600));
}

#[test]
fn test_unknown_log_level_falls_back_to_info() {
    let config = load(&[("DATABASE_URL", "postgres://db"), ("LOG_LEVEL", "loud")]).unwrap();

    assert_eq!(config.log_level, Level::INFO);
}

#[test]
fn test_database_url_is_required() {
    assert!(load(&[]).is_err());
    assert!(load(&[("DATABASE_URL", "  ")]).is_err());
}

#[test]
fn test_invalid_values_are_rejected() {
    let err = load(&[
        ("DATABASE_URL", "postgres://db"),
        ("WATCH_DAY_INTERVAL_MINUTES", "soon"),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("WATCH_DAY_INTERVAL_MINUTES"));

    assert!(load(&[("DATABASE_URL", "postgres://db"), ("WATCH_TIMEZONE", "Mars/Olympus")]).is_err());
}

#[rstest]
#[case("WATCH_DAY_INTERVAL_MINUTES", "18446744073709551615")]
#[case("WATCH_DAY_INTERVAL_MINUTES", "0")]
#[case("WATCH_DAY_INTERVAL_MINUTES", "1441")]
#[case("WATCH_NIGHT_INTERVAL_HOURS", "18446744073709551615")]
#[case("WATCH_NIGHT_INTERVAL_HOURS", "25")]
#[case("WATCH_LOOKAHEAD_DAYS", "0")]
#[case("WATCH_LOOKAHEAD_DAYS", "4294967295")]
#[case("WATCH_PAST_GRACE_MINUTES", "-60")]
#[case("WATCH_PAST_GRACE_MINUTES", "10000000000000")]
#[case("WATCH_SNAPSHOT_TTL_HOURS", "18446744073709551615")]
#[case("WATCH_SNAPSHOT_TTL_HOURS", "0")]
fn test_out_of_range_values_are_rejected(#[case] key: &str, #[case] value: &str) {
    let err = load(&[("DATABASE_URL", "postgres://db"), (key, value)]).unwrap_err();

    assert!(err.to_string().contains(key), "{err}");
}

#[test]
fn test_range_edges_are_accepted() {
    let config = load(&[
        ("DATABASE_URL", "postgres://db"),
        ("WATCH_DAY_INTERVAL_MINUTES", "1440"),
        ("WATCH_NIGHT_INTERVAL_HOURS", "1"),
        ("WATCH_LOOKAHEAD_DAYS", "60"),
        ("WATCH_PAST_GRACE_MINUTES", "1440"),
        ("WATCH_SNAPSHOT_TTL_HOURS", "8760"),
    ])
    .unwrap();

    assert_eq!(config.day_interval, Duration::from_secs(24 * 3600));
    assert_eq!(config.night_interval, Duration::from_secs(3600));
    assert_eq!(config.lookahead_days, 60);
    assert_eq!(config.past_grace, TimeDelta::days(1));
    assert_eq!(config.snapshot_ttl, Duration::from_secs(8760 * 3600));
}

#[test]
fn test_snapshot_ttl_reads_on_its_own() {
    let no_vars = |_: &str| None::<String>;
    assert_eq!(
        snapshot_ttl_from_lookup(&no_vars).unwrap(),
        Duration::from_secs(24 * 3600)
    );

    let bad = |key: &str| (key == "WATCH_SNAPSHOT_TTL_HOURS").then(|| "forever".to_string());
    assert!(snapshot_ttl_from_lookup(&bad).is_err());
}
