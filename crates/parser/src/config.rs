//! # Site client configuration
//!
//! Loaded from environment variables, with defaults for everything except
//! the session cookies.
//!
//! - `SITE_BASE_URL`: booking site origin (default: "https://kluby.org")
//! - `SITE_USER_AGENT`: user agent sent with every request
//! - `SITE_COOKIES`: `name=value` pairs separated by `;`, seeded into the cookie jar
//! - `SITE_REQUEST_TIMEOUT_SECONDS`: per-request timeout (default: 15)
//! - `SITE_MIN_DELAY_MS` / `SITE_MAX_DELAY_MS`: request spacing bounds (default: 200 / 500)
//! - `SITE_PRIME_RESERVATIONS`: open the reservations page before the schedule (default: true)

use std::env;
use std::str::FromStr;
use std::time::Duration;

use eyre::{Result, WrapErr};

pub const DEFAULT_BASE_URL: &str = "https://kluby.org";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; CourtsBot/1.0)";

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Raw `name=value` cookie pairs.
    pub cookies: Vec<String>,
    pub request_timeout: Duration,
    pub min_delay: Duration,
    pub max_delay: Duration,
    pub prime_reservations: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cookies: Vec::new(),
            request_timeout: Duration::from_secs(15),
            min_delay: Duration::from_millis(200),
            max_delay: Duration::from_millis(500),
            prime_reservations: true,
        }
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .wrap_err_with(|| format!("Invalid {key} value")),
        _ => Ok(default),
    }
}

impl FetchConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let base_url = env_or("SITE_BASE_URL", defaults.base_url)?;
        let user_agent = env_or("SITE_USER_AGENT", defaults.user_agent)?;
        let cookies = env::var("SITE_COOKIES")
            .map(|raw| parse_cookie_pairs(&raw))
            .unwrap_or_default();

        let request_timeout = Duration::from_secs(env_or("SITE_REQUEST_TIMEOUT_SECONDS", 15)?);
        let min_delay = Duration::from_millis(env_or("SITE_MIN_DELAY_MS", 200)?);
        let max_delay = Duration::from_millis(env_or("SITE_MAX_DELAY_MS", 500)?);
        let prime_reservations = env_or("SITE_PRIME_RESERVATIONS", defaults.prime_reservations)?;

        Ok(Self {
            base_url,
            user_agent,
            cookies,
            request_timeout,
            min_delay,
            max_delay,
            prime_reservations,
        })
    }
}

/// Splits `a=1; b=2` into `["a=1", "b=2"]`, dropping malformed entries.
pub fn parse_cookie_pairs(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|pair| pair.split_once('=').is_some_and(|(name, _)| !name.trim().is_empty()))
        .map(str::to_string)
        .collect()
}
