use chrono::{DateTime, NaiveTime, Utc, Weekday};
use courtwatch_core::{
    Slot, Subscription,
    models::clock::{format_hhmm, parse_hhmm},
};
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSubscription {
    pub chat_id: i64,
    pub districts: Json<Vec<String>>,
    pub resources: Json<Vec<String>>,
    pub weekdays: Json<Vec<Weekday>>,
    pub time_from: Option<String>,
    pub time_to: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSnapshot {
    pub chat_id: i64,
    pub slots: Json<Vec<Slot>>,
    pub updated_at: DateTime<Utc>,
}

fn parse_bound(chat_id: i64, column: &str, value: Option<String>) -> Result<Option<NaiveTime>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_hhmm(raw)
            .map(Some)
            .ok_or_else(|| eyre!("subscription {chat_id}: invalid {column} value {raw:?}")),
    }
}

impl TryFrom<DbSubscription> for Subscription {
    type Error = eyre::Report;

    fn try_from(row: DbSubscription) -> Result<Self> {
        Ok(Subscription {
            chat_id: row.chat_id,
            districts: row.districts.0,
            resources: row.resources.0,
            weekdays: row.weekdays.0,
            time_from: parse_bound(row.chat_id, "time_from", row.time_from)?,
            time_to: parse_bound(row.chat_id, "time_to", row.time_to)?,
        })
    }
}

/// Column values for writing a subscription.
pub(crate) fn bound_to_column(value: Option<NaiveTime>) -> Option<String> {
    value.map(format_hhmm)
}
