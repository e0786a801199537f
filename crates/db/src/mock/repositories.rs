use async_trait::async_trait;
use courtwatch_core::{ChatId, Slot, Subscription};
use mockall::mock;

use crate::store::{SnapshotStore, SubscriptionStore};

// Mock stores for testing
mock! {
    pub SubscriptionRepo {}

    #[async_trait]
    impl SubscriptionStore for SubscriptionRepo {
        async fn get(&self, chat_id: ChatId) -> eyre::Result<Option<Subscription>>;

        async fn list_all(&self) -> eyre::Result<Vec<Subscription>>;

        async fn save(&self, subscription: &Subscription) -> eyre::Result<()>;
    }
}

mock! {
    pub SnapshotRepo {}

    #[async_trait]
    impl SnapshotStore for SnapshotRepo {
        async fn get_snapshot(&self, chat_id: ChatId) -> eyre::Result<Option<Vec<Slot>>>;

        async fn save_snapshot(&self, chat_id: ChatId, slots: &[Slot]) -> eyre::Result<()>;
    }
}
