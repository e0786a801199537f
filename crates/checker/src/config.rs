//! # Watcher Configuration
//!
//! Loaded from environment variables.
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: logging level (default: "info")
//! - `WATCH_TIMEZONE`: IANA zone used for dates and cadence (default: "Europe/Warsaw")
//! - `WATCH_DAY_INTERVAL_MINUTES`: daytime polling interval, 1 to 1440 (default: 20)
//! - `WATCH_NIGHT_INTERVAL_HOURS`: night polling interval, 1 to 24 (default: 4)
//! - `WATCH_LOOKAHEAD_DAYS`: days checked ahead, today included, 1 to 60 (default: 14)
//! - `WATCH_PAST_GRACE_MINUTES`: how long a started slot is still reported, 0 to 1440 (default: 5)
//! - `WATCH_SNAPSHOT_TTL_HOURS`: age after which a snapshot is ignored, 1 to 8760 (default: 24)

use std::env;
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;

use chrono::TimeDelta;
use chrono_tz::Tz;
use eyre::{Result, WrapErr, eyre};
use tracing::Level;

use crate::scheduler::CadenceIntervals;

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Warsaw;

pub const MAX_LOOKAHEAD_DAYS: u32 = 60;
pub const MAX_SNAPSHOT_TTL_HOURS: i64 = 24 * 365;

/// Configuration for the watcher process.
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    pub timezone: Tz,

    pub day_interval: Duration,
    pub night_interval: Duration,

    pub lookahead_days: u32,
    pub past_grace: TimeDelta,

    /// Snapshots older than this read as absent.
    pub snapshot_ttl: Duration,
}

impl WatcherConfig {
    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Fails when `DATABASE_URL` is missing, a numeric or timezone value
    /// cannot be parsed, or a number falls outside its allowed range.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;

        let log_level = match lookup("LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .to_lowercase()
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        let timezone = match lookup("WATCH_TIMEZONE").filter(|tz| !tz.trim().is_empty()) {
            Some(name) => name
                .trim()
                .parse::<Tz>()
                .map_err(|e| eyre!("Invalid WATCH_TIMEZONE value: {e}"))?,
            None => DEFAULT_TIMEZONE,
        };

        let day_interval = minutes_or(&lookup, "WATCH_DAY_INTERVAL_MINUTES", 20, 1..=24 * 60)?;
        let night_interval = hours_or(&lookup, "WATCH_NIGHT_INTERVAL_HOURS", 4, 1..=24)?;
        let lookahead_days = bounded_or(&lookup, "WATCH_LOOKAHEAD_DAYS", 14, 1..=MAX_LOOKAHEAD_DAYS)?;
        let grace_minutes = bounded_or(&lookup, "WATCH_PAST_GRACE_MINUTES", 5, 0..=24 * 60)?;
        let snapshot_ttl = snapshot_ttl_from_lookup(&lookup)?;

        let past_grace = TimeDelta::try_minutes(grace_minutes)
            .ok_or_else(|| eyre!("Invalid WATCH_PAST_GRACE_MINUTES value"))?;

        Ok(Self {
            database_url,
            log_level,
            timezone,
            day_interval,
            night_interval,
            lookahead_days,
            past_grace,
            snapshot_ttl,
        })
    }

    pub fn intervals(&self) -> CadenceIntervals {
        CadenceIntervals {
            day: self.day_interval,
            night: self.night_interval,
        }
    }
}

/// Reads `WATCH_SNAPSHOT_TTL_HOURS` (default 24, at most a year).
pub fn snapshot_ttl_from_lookup<F>(lookup: &F) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    hours_or(lookup, "WATCH_SNAPSHOT_TTL_HOURS", 24, 1..=MAX_SNAPSHOT_TTL_HOURS)
}

fn minutes_or<F>(lookup: &F, key: &str, default: i64, range: RangeInclusive<i64>) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    scaled_or(lookup, key, default, range, 60)
}

fn hours_or<F>(lookup: &F, key: &str, default: i64, range: RangeInclusive<i64>) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    scaled_or(lookup, key, default, range, 3600)
}

fn scaled_or<F>(
    lookup: &F,
    key: &str,
    default: i64,
    range: RangeInclusive<i64>,
    unit_secs: u64,
) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let value = bounded_or(lookup, key, default, range)?;
    u64::try_from(value)
        .ok()
        .and_then(|value| value.checked_mul(unit_secs))
        .map(Duration::from_secs)
        .ok_or_else(|| eyre!("Invalid {key} value: {value}"))
}

fn bounded_or<F, T>(lookup: &F, key: &str, default: T, range: RangeInclusive<T>) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialOrd + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .wrap_err_with(|| format!("Invalid {key} value"))?,
        _ => default,
    };

    if !range.contains(&value) {
        return Err(eyre!(
            "Invalid {key} value: {value} is outside {}..={}",
            range.start(),
            range.end()
        ));
    }
    Ok(value)
}
