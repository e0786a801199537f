use std::collections::HashMap;

use async_trait::async_trait;
use courtwatch_core::{ChatId, Slot, Subscription};
use eyre::Result;
use tokio::sync::RwLock;

use crate::store::{SnapshotStore, SubscriptionStore};

/// In-process store for tests and local runs without PostgreSQL.
///
/// Snapshots never expire here.
#[derive(Debug, Default)]
pub struct MemoryStore {
    subscriptions: RwLock<HashMap<ChatId, Subscription>>,
    snapshots: RwLock<HashMap<ChatId, Vec<Slot>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subscriptions(subscriptions: impl IntoIterator<Item = Subscription>) -> Self {
        let subscriptions = subscriptions
            .into_iter()
            .map(|sub| (sub.chat_id, sub))
            .collect();

        Self {
            subscriptions: RwLock::new(subscriptions),
            snapshots: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl SubscriptionStore for MemoryStore {
    async fn get(&self, chat_id: ChatId) -> Result<Option<Subscription>> {
        Ok(self.subscriptions.read().await.get(&chat_id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Subscription>> {
        let mut subscriptions: Vec<_> = self.subscriptions.read().await.values().cloned().collect();
        subscriptions.sort_by_key(|sub| sub.chat_id);
        Ok(subscriptions)
    }

    async fn save(&self, subscription: &Subscription) -> Result<()> {
        self.subscriptions
            .write()
            .await
            .insert(subscription.chat_id, subscription.clone());
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn get_snapshot(&self, chat_id: ChatId) -> Result<Option<Vec<Slot>>> {
        Ok(self.snapshots.read().await.get(&chat_id).cloned())
    }

    async fn save_snapshot(&self, chat_id: ChatId, slots: &[Slot]) -> Result<()> {
        self.snapshots.write().await.insert(chat_id, slots.to_vec());
        Ok(())
    }
}
