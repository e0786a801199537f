//! # Poll Scheduler
//!
//! Drives the engine: a warm-up pass at start, then periodic cycles spaced
//! by a day or night interval picked from the local hour after each cycle.
//! On-demand checks for a single subscription run on their own tasks.
//!
//! Snapshot policy:
//! - warm-up always saves and never notifies;
//! - on-demand always saves and notifies the full set;
//! - periodic saves only when it found new slots.

use std::sync::Arc;
use std::time::Duration;

use chrono::Timelike;
use courtwatch_core::{ChatId, Slot, Subscription, WatchError, WatchResult};
use courtwatch_db::{SnapshotStore, SubscriptionStore};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::clock::Clock;
use crate::collector::SlotCollector;
use crate::diff::DiffEngine;
use crate::notifier::{NotificationKind, Notifier, group_by_resource};

/// Polling rhythm, recomputed after every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    Day,
    /// From 01:00 until 08:00 local time.
    Night,
}

impl Cadence {
    pub fn for_hour(hour: u32) -> Self {
        if (1..8).contains(&hour) {
            Cadence::Night
        } else {
            Cadence::Day
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CadenceIntervals {
    pub day: Duration,
    pub night: Duration,
}

impl Default for CadenceIntervals {
    fn default() -> Self {
        Self {
            day: Duration::from_secs(20 * 60),
            night: Duration::from_secs(4 * 3600),
        }
    }
}

impl CadenceIntervals {
    pub fn interval(&self, cadence: Cadence) -> Duration {
        match cadence {
            Cadence::Day => self.day,
            Cadence::Night => self.night,
        }
    }
}

/// Result of checking one subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub chat_id: ChatId,
    /// Slots found by the collector.
    pub collected: usize,
    /// Slots absent from the previous snapshot.
    pub new_slots: Vec<Slot>,
    pub notified: bool,
    pub snapshot_written: bool,
}

/// Result of one pass over all subscriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub outcomes: Vec<CheckOutcome>,
    /// Subscriptions left out for missing resources, weekdays or time bounds.
    pub skipped: usize,
}

impl CycleReport {
    pub fn new_slot_count(&self) -> usize {
        self.outcomes.iter().map(|outcome| outcome.new_slots.len()).sum()
    }
}

pub struct PollScheduler {
    subscriptions: Arc<dyn SubscriptionStore>,
    snapshots: Arc<dyn SnapshotStore>,
    collector: SlotCollector,
    diff: DiffEngine,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    intervals: CadenceIntervals,
}

impl PollScheduler {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionStore>,
        snapshots: Arc<dyn SnapshotStore>,
        collector: SlotCollector,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            subscriptions,
            diff: DiffEngine::new(Arc::clone(&snapshots)),
            snapshots,
            collector,
            notifier,
            clock,
            intervals: CadenceIntervals::default(),
        }
    }

    pub fn with_intervals(mut self, intervals: CadenceIntervals) -> Self {
        self.intervals = intervals;
        self
    }

    pub fn cadence(&self) -> Cadence {
        Cadence::for_hour(self.clock.now().hour())
    }

    /// Sleep before the next periodic cycle.
    pub fn next_interval(&self) -> Duration {
        self.intervals.interval(self.cadence())
    }

    /// Starts the background loop: warm-up, then periodic cycles forever.
    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!("Checker service started");

            match self.run_warm_up().await {
                Ok(report) => info!(
                    "Cache initialization completed for {} subscriptions",
                    report.outcomes.len()
                ),
                Err(e) => error!("Cache initialization failed: {}", e),
            }

            loop {
                let cadence = self.cadence();
                let interval = self.intervals.interval(cadence);
                info!(?cadence, "Next check in {} minutes", interval.as_secs() / 60);
                tokio::time::sleep(interval).await;

                match self.run_periodic_cycle().await {
                    Ok(report) => info!(
                        checked = report.outcomes.len(),
                        skipped = report.skipped,
                        "Availability check finished with {} new slots",
                        report.new_slot_count()
                    ),
                    Err(e) => error!("Availability check failed: {}", e),
                }
            }
        })
    }

    /// Runs an on-demand check on its own task.
    pub fn spawn_on_demand_check(self: Arc<Self>, chat_id: ChatId) -> JoinHandle<()> {
        tokio::spawn(async move {
            match self.run_on_demand_check(chat_id).await {
                Ok(outcome) => info!(
                    chat_id,
                    "On-demand check found {} slots",
                    outcome.collected
                ),
                Err(e) => warn!(chat_id, "On-demand check failed: {}", e),
            }
        })
    }

    /// Checks every complete subscription and notifies only new slots.
    pub async fn run_periodic_cycle(&self) -> WatchResult<CycleReport> {
        info!("Running availability check");
        let subscriptions = self.subscriptions.list_all().await?;
        info!("Found {} subscriptions", subscriptions.len());

        let mut report = CycleReport::default();
        for subscription in subscriptions {
            if !subscription.is_complete() {
                debug!(chat_id = subscription.chat_id, "Skipping incomplete subscription");
                report.skipped += 1;
                continue;
            }
            report.outcomes.push(self.check_periodic(&subscription).await);
        }

        Ok(report)
    }

    /// Records the current slots of every complete subscription without
    /// notifying anyone.
    pub async fn run_warm_up(&self) -> WatchResult<CycleReport> {
        info!("Initializing cache for existing subscriptions");
        let subscriptions = self.subscriptions.list_all().await?;

        let mut report = CycleReport::default();
        for subscription in subscriptions {
            if !subscription.is_complete() {
                report.skipped += 1;
                continue;
            }

            let chat_id = subscription.chat_id;
            let current = self.collector.collect(&subscription).await;
            let snapshot_written = self.persist(chat_id, &current).await;
            debug!(chat_id, "Cached {} slots", current.len());

            report.outcomes.push(CheckOutcome {
                chat_id,
                collected: current.len(),
                new_slots: Vec::new(),
                notified: false,
                snapshot_written,
            });
        }

        Ok(report)
    }

    /// Checks one subscription now and reports its full current availability.
    ///
    /// # Errors
    ///
    /// [`WatchError::NotFound`] when no subscription exists for `chat_id`,
    /// [`WatchError::Validation`] when it is incomplete.
    pub async fn run_on_demand_check(&self, chat_id: ChatId) -> WatchResult<CheckOutcome> {
        let subscription = self
            .subscriptions
            .get(chat_id)
            .await?
            .ok_or_else(|| WatchError::NotFound(format!("subscription for chat {chat_id}")))?;

        if !subscription.is_complete() {
            return Err(WatchError::Validation(format!(
                "subscription for chat {chat_id} is incomplete"
            )));
        }

        let current = self.collector.collect(&subscription).await;
        let new_slots = self.diff.diff(chat_id, &current).await;

        let notified = !current.is_empty()
            && self
                .dispatch(chat_id, NotificationKind::Current, &current)
                .await;
        let snapshot_written = self.persist(chat_id, &current).await;

        Ok(CheckOutcome {
            chat_id,
            collected: current.len(),
            new_slots,
            notified,
            snapshot_written,
        })
    }

    async fn check_periodic(&self, subscription: &Subscription) -> CheckOutcome {
        let chat_id = subscription.chat_id;
        info!(chat_id, "Checking subscription");

        let current = self.collector.collect(subscription).await;
        let new_slots = self.diff.diff(chat_id, &current).await;
        info!(
            chat_id,
            "Found {} slots, {} new",
            current.len(),
            new_slots.len()
        );

        // Without new slots the previous snapshot stays as it is.
        if new_slots.is_empty() {
            return CheckOutcome {
                chat_id,
                collected: current.len(),
                new_slots,
                notified: false,
                snapshot_written: false,
            };
        }

        let notified = self
            .dispatch(chat_id, NotificationKind::New, &new_slots)
            .await;
        let snapshot_written = self.persist(chat_id, &current).await;

        CheckOutcome {
            chat_id,
            collected: current.len(),
            new_slots,
            notified,
            snapshot_written,
        }
    }

    async fn dispatch(&self, chat_id: ChatId, kind: NotificationKind, slots: &[Slot]) -> bool {
        let groups = group_by_resource(slots);
        match self.notifier.notify(chat_id, kind, &groups).await {
            Ok(()) => true,
            Err(e) => {
                warn!(chat_id, "Error sending notification: {e:#}");
                false
            }
        }
    }

    async fn persist(&self, chat_id: ChatId, slots: &[Slot]) -> bool {
        match self.snapshots.save_snapshot(chat_id, slots).await {
            Ok(()) => true,
            Err(e) => {
                warn!(chat_id, "Error saving last slots: {e:#}");
                false
            }
        }
    }
}
