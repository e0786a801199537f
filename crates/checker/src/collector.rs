//! # Slot Collector
//!
//! Fetches and parses every (resource, date) schedule a subscription
//! covers and reduces the result to one deduplicated, still-relevant slot
//! set.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, TimeDelta, Weekday};
use courtwatch_core::{Slot, Subscription};
use courtwatch_parser::{RawDocument, ScheduleRequest, ScheduleSource, parse_schedule};
use tracing::{debug, info, warn};

use crate::clock::Clock;

pub const DEFAULT_LOOKAHEAD_DAYS: u32 = 14;

pub fn default_past_grace() -> TimeDelta {
    TimeDelta::minutes(5)
}

pub struct SlotCollector {
    source: Arc<dyn ScheduleSource>,
    clock: Arc<dyn Clock>,
    lookahead_days: u32,
    past_grace: TimeDelta,
}

impl SlotCollector {
    pub fn new(source: Arc<dyn ScheduleSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            clock,
            lookahead_days: DEFAULT_LOOKAHEAD_DAYS,
            past_grace: default_past_grace(),
        }
    }

    pub fn with_lookahead_days(mut self, days: u32) -> Self {
        self.lookahead_days = days;
        self
    }

    pub fn with_past_grace(mut self, grace: TimeDelta) -> Self {
        self.past_grace = grace;
        self
    }

    /// Dates from today on, within the lookahead, falling on one of `weekdays`.
    pub fn upcoming_dates(&self, weekdays: &[Weekday]) -> Vec<NaiveDate> {
        let today = self.clock.now().date();

        (0..self.lookahead_days)
            .filter_map(|offset| today.checked_add_days(Days::new(u64::from(offset))))
            .filter(|date| weekdays.contains(&date.weekday()))
            .collect()
    }

    /// Available slots for `subscription`.
    ///
    /// One fetch per (resource, date) pair, sequentially. A pair that fails
    /// to fetch contributes nothing; it never fails the collection.
    pub async fn collect(&self, subscription: &Subscription) -> Vec<Slot> {
        let Some(window) = subscription.window() else {
            debug!(
                chat_id = subscription.chat_id,
                "Subscription has no time window, nothing to collect"
            );
            return Vec::new();
        };

        let dates = self.upcoming_dates(&subscription.weekdays);
        let mut seen = HashSet::new();
        let mut slots = Vec::new();

        for resource_id in &subscription.resources {
            for &date in &dates {
                let body = match self.source.fetch_schedule_document(resource_id, date).await {
                    Ok(RawDocument::Schedule(body)) => body,
                    Ok(RawDocument::LoginRequired) => {
                        info!(
                            resource_id = %resource_id,
                            date = %date,
                            "Schedule requires login, skipping"
                        );
                        continue;
                    }
                    Err(e) => {
                        warn!(
                            resource_id = %resource_id,
                            date = %date,
                            "Error checking schedule: {}",
                            e
                        );
                        continue;
                    }
                };

                let request = ScheduleRequest {
                    resource_id,
                    date,
                    window,
                    origin: self.source.origin(),
                };
                for slot in parse_schedule(&body, &request) {
                    if seen.insert(slot.fingerprint()) {
                        slots.push(slot);
                    }
                }
            }
        }

        let slots = retain_selected(slots, subscription);
        let slots = retain_upcoming(slots, self.clock.now(), self.past_grace);

        debug!(
            chat_id = subscription.chat_id,
            dates = dates.len(),
            "Collected {} slots",
            slots.len()
        );
        slots
    }
}

/// Keeps slots of resources the subscription selected.
pub fn retain_selected(slots: Vec<Slot>, subscription: &Subscription) -> Vec<Slot> {
    slots
        .into_iter()
        .filter(|slot| subscription.watches_resource(&slot.resource_id))
        .collect()
}

/// Keeps slots starting after `now - grace`.
///
/// A grace reaching past the representable range keeps everything.
pub fn retain_upcoming(slots: Vec<Slot>, now: NaiveDateTime, grace: TimeDelta) -> Vec<Slot> {
    let cutoff = now.checked_sub_signed(grace).unwrap_or(NaiveDateTime::MIN);
    slots
        .into_iter()
        .filter(|slot| slot.starts_at() > cutoff)
        .collect()
}
