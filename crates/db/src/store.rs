//! Store ports.
//!
//! The checker only ever talks to these traits; which backend sits behind
//! them is decided by the binary.

use async_trait::async_trait;
use courtwatch_core::{ChatId, Slot, Subscription};
use eyre::Result;

/// Read access to subscriptions, plus the upsert the chat front-end uses.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    async fn get(&self, chat_id: ChatId) -> Result<Option<Subscription>>;

    async fn list_all(&self) -> Result<Vec<Subscription>>;

    async fn save(&self, subscription: &Subscription) -> Result<()>;
}

/// Last committed slot set per subscription.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// `None` when nothing was stored (or the stored set expired).
    async fn get_snapshot(&self, chat_id: ChatId) -> Result<Option<Vec<Slot>>>;

    /// Replaces the whole snapshot for `chat_id`.
    async fn save_snapshot(&self, chat_id: ChatId, slots: &[Slot]) -> Result<()>;
}
