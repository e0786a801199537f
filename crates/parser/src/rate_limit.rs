use std::time::Duration;

use rand::Rng;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};

/// Enforces a randomized minimum spacing between outbound requests.
///
/// Callers queue on the internal lock, so concurrent checks sharing one
/// limiter never burst against the origin.
#[derive(Debug)]
pub struct RateLimiter {
    min_delay_ms: u64,
    max_delay_ms: u64,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        let min_delay_ms = u64::try_from(min_delay.as_millis()).unwrap_or(u64::MAX);
        let max_delay_ms = u64::try_from(max_delay.as_millis()).unwrap_or(u64::MAX);

        Self {
            min_delay_ms,
            max_delay_ms: max_delay_ms.max(min_delay_ms),
            last_request: Mutex::new(None),
        }
    }

    fn pick_spacing(&self) -> Duration {
        let millis = if self.max_delay_ms > self.min_delay_ms {
            rand::thread_rng().gen_range(self.min_delay_ms..=self.max_delay_ms)
        } else {
            self.min_delay_ms
        };
        Duration::from_millis(millis)
    }

    /// Waits until the next request may go out and books that slot.
    pub async fn wait(&self) {
        let spacing = self.pick_spacing();
        let mut last_request = self.last_request.lock().await;

        if let Some(previous) = *last_request {
            let elapsed = previous.elapsed();
            if elapsed < spacing {
                sleep(spacing - elapsed).await;
            }
        }

        *last_request = Some(Instant::now());
    }
}
