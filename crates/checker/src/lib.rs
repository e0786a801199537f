//! # courtwatch checker
//!
//! The availability engine proper: collects slots for a subscription, diffs
//! them against the last committed snapshot and drives the periodic polling
//! loop that hands new slots to a [`Notifier`](notifier::Notifier).

pub mod clock;
pub mod collector;
pub mod config;
pub mod diff;
pub mod notifier;
pub mod scheduler;

pub use clock::{Clock, FixedClock, SystemClock};
pub use collector::SlotCollector;
pub use config::WatcherConfig;
pub use diff::DiffEngine;
pub use notifier::{LogNotifier, NotificationKind, Notifier, SlotGroup};
pub use scheduler::{Cadence, CadenceIntervals, CheckOutcome, CycleReport, PollScheduler};
