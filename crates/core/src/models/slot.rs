use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::clock::{format_hhmm, hhmm};

/// Number of 30-minute intervals a slot covers when the source says nothing.
pub const DEFAULT_DURATION_UNITS: u8 = 4;

/// Displayed when the schedule table carries no price.
pub const PRICE_PLACEHOLDER: &str = "0,00";

/// One bookable (resource, court, date, time) unit.
///
/// Slots are rebuilt from HTML on every pass and never mutated. Identity is
/// the [`Fingerprint`]; `price`, `booking_url` and `duration_units` are
/// presentation data and may change without the slot counting as new.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub resource_id: String,
    pub resource_name: String,
    pub court_label: String,
    pub court_type_key: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub duration_units: u8,
    pub price: String,
    pub booking_url: String,
}

impl Slot {
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(
            &self.resource_id,
            &self.court_type_key,
            &self.court_label,
            self.date,
            self.time,
        )
    }

    /// Local start of the slot.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// Deterministic identity key of a [`Slot`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(
        resource_id: &str,
        court_type_key: &str,
        court_label: &str,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Self {
        Self(format!(
            "{}_{}_{}_{}_{}",
            resource_id,
            court_type_key,
            court_label,
            date.format("%Y-%m-%d"),
            format_hhmm(time)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
