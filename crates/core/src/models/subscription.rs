use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use super::clock::{TimeWindow, hhmm_option};

/// Chat identity; doubles as the subscription id.
pub type ChatId = i64;

/// A user's notification preferences.
///
/// Owned by the subscription store. The watcher only reads it; the derived
/// snapshot is the only thing written back per chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub chat_id: ChatId,
    #[serde(default)]
    pub districts: Vec<String>,
    /// Selected resource (club) ids.
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub weekdays: Vec<Weekday>,
    #[serde(default, with = "hhmm_option")]
    pub time_from: Option<NaiveTime>,
    #[serde(default, with = "hhmm_option")]
    pub time_to: Option<NaiveTime>,
}

impl Subscription {
    pub fn new(chat_id: ChatId) -> Self {
        Self {
            chat_id,
            districts: Vec::new(),
            resources: Vec::new(),
            weekdays: Vec::new(),
            time_from: None,
            time_to: None,
        }
    }

    /// Time-of-day window, present only when both bounds are set.
    pub fn window(&self) -> Option<TimeWindow> {
        Some(TimeWindow::new(self.time_from?, self.time_to?))
    }

    /// Whether the subscription has everything a check needs.
    pub fn is_complete(&self) -> bool {
        !self.resources.is_empty() && !self.weekdays.is_empty() && self.window().is_some()
    }

    pub fn watches_resource(&self, resource_id: &str) -> bool {
        self.resources.iter().any(|id| id == resource_id)
    }
}
