//! Time-of-day helpers.
//!
//! Slot times and subscription bounds are carried as [`NaiveTime`] internally
//! but always cross the wire (JSON snapshots, fingerprints) as zero-padded
//! `HH:MM` strings, so lexicographic and chronological order agree.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Wire format for clock times.
pub const HHMM: &str = "%H:%M";

/// Formats a time as zero-padded `HH:MM`.
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format(HHMM).to_string()
}

/// Parses a zero-padded `HH:MM` string.
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), HHMM).ok()
}

/// Serde adapter for `NaiveTime` fields stored as `HH:MM`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_hhmm(&raw).ok_or_else(|| D::Error::custom(format!("invalid HH:MM time: {raw}")))
    }
}

/// Serde adapter for optional `NaiveTime` fields stored as `HH:MM`.
pub mod hhmm_option {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(time) => serializer.serialize_some(&super::format_hhmm(*time)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => super::parse_hhmm(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid HH:MM time: {raw}"))),
            None => Ok(None),
        }
    }
}

/// Time-of-day window used to decide which schedule rows are emitted.
///
/// Both bounds are inclusive: a row labelled exactly `to` still counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(with = "hhmm")]
    pub from: NaiveTime,
    #[serde(with = "hhmm")]
    pub to: NaiveTime,
}

impl TimeWindow {
    pub fn new(from: NaiveTime, to: NaiveTime) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        self.from <= time && time <= self.to
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", format_hhmm(self.from), format_hhmm(self.to))
    }
}
