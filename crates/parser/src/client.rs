use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use courtwatch_core::Resource;
use reqwest::{Client, Url, cookie::Jar};
use tracing::{debug, info, warn};

use crate::config::FetchConfig;
use crate::directory::{CITY_PATH, district_slug, parse_district_resources, parse_districts};
use crate::error::FetchError;
use crate::rate_limit::RateLimiter;
use crate::schedule::requires_login;

/// A fetched schedule page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawDocument {
    Schedule(String),
    /// The site served a login wall instead of the schedule.
    LoginRequired,
}

/// Source of per-resource, per-date schedule documents.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Origin used to absolutize booking links.
    fn origin(&self) -> &str;

    async fn fetch_schedule_document(
        &self,
        resource_id: &str,
        date: NaiveDate,
    ) -> Result<RawDocument, FetchError>;
}

/// Lists districts and the clubs bookable in them.
#[async_trait]
pub trait ResourceDirectory: Send + Sync {
    async fn list_districts(&self) -> Result<Vec<String>, FetchError>;

    async fn list_resources_in_districts(
        &self,
        districts: &[String],
    ) -> Result<Vec<Resource>, FetchError>;
}

/// HTTP client for the booking site.
///
/// All requests, from any task, go through one [`RateLimiter`].
pub struct SiteClient {
    http: Client,
    config: FetchConfig,
    limiter: RateLimiter,
}

impl SiteClient {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let origin = Url::parse(&config.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {e}", config.base_url)))?;

        let jar = Arc::new(Jar::default());
        for cookie in &config.cookies {
            jar.add_cookie_str(&format!("{cookie}; Path=/"), &origin);
        }
        info!("Site client seeded with {} cookies", config.cookies.len());

        let http = Client::builder()
            .cookie_provider(jar)
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout)
            .build()?;
        let limiter = RateLimiter::new(config.min_delay, config.max_delay);

        Ok(Self {
            http,
            config,
            limiter,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get(&self, url: &str) -> Result<String, FetchError> {
        self.limiter.wait().await;

        debug!("GET {}", url);
        let response = self.http.get(url).send().await?;
        let status = response.status();
        debug!("Response received with status: {}", status);

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl ScheduleSource for SiteClient {
    fn origin(&self) -> &str {
        &self.config.base_url
    }

    async fn fetch_schedule_document(
        &self,
        resource_id: &str,
        date: NaiveDate,
    ) -> Result<RawDocument, FetchError> {
        let date = date.format("%Y-%m-%d").to_string();

        // Visit the reservations page first, the way a browser session would.
        if self.config.prime_reservations {
            let reserve_url = self.url(&format!(
                "/{resource_id}/rezerwacje?data_grafiku={date}&dyscyplina=1"
            ));
            self.get(&reserve_url).await?;
        }

        let schedule_url = self.url(&format!(
            "/{resource_id}/grafik?data_grafiku={date}&dyscyplina=1&strona=0"
        ));
        let body = self.get(&schedule_url).await?;

        if requires_login(&body) {
            return Ok(RawDocument::LoginRequired);
        }
        Ok(RawDocument::Schedule(body))
    }
}

#[async_trait]
impl ResourceDirectory for SiteClient {
    async fn list_districts(&self) -> Result<Vec<String>, FetchError> {
        let body = self.get(&self.url(CITY_PATH)).await?;
        let districts = parse_districts(&body);

        info!("Found {} districts", districts.len());
        Ok(districts)
    }

    async fn list_resources_in_districts(
        &self,
        districts: &[String],
    ) -> Result<Vec<Resource>, FetchError> {
        let mut seen = HashSet::new();
        let mut resources = Vec::new();

        for district in districts {
            let url = self.url(&format!("{CITY_PATH}/{}", district_slug(district)));
            let body = match self.get(&url).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(district = %district, "Error fetching clubs: {}", e);
                    continue;
                }
            };

            let found = parse_district_resources(&body, district);
            debug!(district = %district, "Found {} clubs", found.len());

            for resource in found {
                if seen.insert(resource.id.clone()) {
                    resources.push(resource);
                }
            }
        }

        info!("Total clubs found: {}", resources.len());
        Ok(resources)
    }
}
