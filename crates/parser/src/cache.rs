use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use courtwatch_core::Resource;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::client::ResourceDirectory;
use crate::error::FetchError;

pub const DISTRICTS_TTL: Duration = Duration::from_secs(72 * 3600);
pub const RESOURCES_TTL: Duration = Duration::from_secs(24 * 3600);

#[derive(Debug, Clone)]
struct Entry<T> {
    stored_at: Instant,
    value: T,
}

impl<T: Clone> Entry<T> {
    fn fresh(&self, ttl: Duration) -> Option<T> {
        (self.stored_at.elapsed() < ttl).then(|| self.value.clone())
    }
}

/// Keeps directory listings in memory so repeated lookups skip the site.
///
/// Club lists are keyed by the sorted district set. Failed lookups are
/// never stored.
pub struct CachedDirectory {
    inner: Arc<dyn ResourceDirectory>,
    districts_ttl: Duration,
    resources_ttl: Duration,
    districts: RwLock<Option<Entry<Vec<String>>>>,
    resources: RwLock<HashMap<String, Entry<Vec<Resource>>>>,
}

impl CachedDirectory {
    pub fn new(inner: Arc<dyn ResourceDirectory>) -> Self {
        Self {
            inner,
            districts_ttl: DISTRICTS_TTL,
            resources_ttl: RESOURCES_TTL,
            districts: RwLock::new(None),
            resources: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_ttls(mut self, districts: Duration, resources: Duration) -> Self {
        self.districts_ttl = districts;
        self.resources_ttl = resources;
        self
    }
}

fn districts_key(districts: &[String]) -> String {
    let mut sorted = districts.to_vec();
    sorted.sort();
    sorted.dedup();
    sorted.join(",")
}

#[async_trait]
impl ResourceDirectory for CachedDirectory {
    async fn list_districts(&self) -> Result<Vec<String>, FetchError> {
        if let Some(districts) = self
            .districts
            .read()
            .await
            .as_ref()
            .and_then(|entry| entry.fresh(self.districts_ttl))
        {
            debug!("District list served from cache");
            return Ok(districts);
        }

        let districts = self.inner.list_districts().await?;
        *self.districts.write().await = Some(Entry {
            stored_at: Instant::now(),
            value: districts.clone(),
        });
        Ok(districts)
    }

    async fn list_resources_in_districts(
        &self,
        districts: &[String],
    ) -> Result<Vec<Resource>, FetchError> {
        let key = districts_key(districts);

        if let Some(resources) = self
            .resources
            .read()
            .await
            .get(&key)
            .and_then(|entry| entry.fresh(self.resources_ttl))
        {
            debug!(districts = %key, "Club list served from cache");
            return Ok(resources);
        }

        let resources = self.inner.list_resources_in_districts(districts).await?;
        self.resources.write().await.insert(
            key,
            Entry {
                stored_at: Instant::now(),
                value: resources.clone(),
            },
        );
        Ok(resources)
    }
}
