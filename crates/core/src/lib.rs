//! # courtwatch core
//!
//! Shared data model for the court availability watcher: the canonical
//! [`Slot`](models::slot::Slot) record and its fingerprint, subscriptions,
//! resources and the error taxonomy used across the workspace.

pub mod errors;
pub mod models;

pub use errors::{WatchError, WatchResult};
pub use models::{
    clock::TimeWindow,
    resource::Resource,
    slot::{Fingerprint, Slot},
    subscription::{ChatId, Subscription},
};
