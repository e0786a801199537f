//! # courtwatch persistence
//!
//! Store ports consumed by the checker plus their implementations:
//! PostgreSQL through sqlx ([`PgStore`]), an in-process [`MemoryStore`]
//! and mockall mocks under [`mock`].

pub mod memory;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod store;

pub mod mock;

use std::time::Duration;

use async_trait::async_trait;
use courtwatch_core::{ChatId, Slot, Subscription};
use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub use memory::MemoryStore;
pub use store::{SnapshotStore, SubscriptionStore};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// PostgreSQL-backed subscription and snapshot store.
///
/// Snapshots written longer ago than `snapshot_ttl` read as absent.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
    snapshot_ttl: Duration,
}

impl PgStore {
    pub fn new(pool: DbPool, snapshot_ttl: Duration) -> Self {
        Self { pool, snapshot_ttl }
    }
}

#[async_trait]
impl SubscriptionStore for PgStore {
    async fn get(&self, chat_id: ChatId) -> Result<Option<Subscription>> {
        let row = repositories::subscription::get_subscription(&self.pool, chat_id).await?;
        row.map(Subscription::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Subscription>> {
        let rows = repositories::subscription::list_subscriptions(&self.pool).await?;
        let mut subscriptions = Vec::with_capacity(rows.len());
        for row in rows {
            let chat_id = row.chat_id;
            match Subscription::try_from(row) {
                Ok(sub) => subscriptions.push(sub),
                // Unreadable rows are skipped, the rest are still returned.
                Err(e) => tracing::warn!(chat_id, "Skipping unreadable subscription: {e:#}"),
            }
        }
        Ok(subscriptions)
    }

    async fn save(&self, subscription: &Subscription) -> Result<()> {
        repositories::subscription::upsert_subscription(&self.pool, subscription).await
    }
}

#[async_trait]
impl SnapshotStore for PgStore {
    async fn get_snapshot(&self, chat_id: ChatId) -> Result<Option<Vec<Slot>>> {
        let row =
            repositories::snapshot::get_snapshot(&self.pool, chat_id, self.snapshot_ttl).await?;
        Ok(row.map(|row| row.slots.0))
    }

    async fn save_snapshot(&self, chat_id: ChatId, slots: &[Slot]) -> Result<()> {
        repositories::snapshot::save_snapshot(&self.pool, chat_id, slots).await
    }
}
