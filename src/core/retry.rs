use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Exponential backoff schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackoffPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub factor: f64,
    pub max_delay: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            initial_delay: Duration::from_millis(1000),
            factor: 2.0,
            max_delay: Duration::from_millis(10_000),
        }
    }
}

impl BackoffPolicy {
    /// Delay to wait after the failed attempt with the given 0-based index:
    /// `initial_delay * factor^attempt_index`, capped at `max_delay`.
    pub fn delay_for(&self, attempt_index: u32) -> Duration {
        let exponent = i32::try_from(attempt_index).unwrap_or(i32::MAX);
        let millis = self.initial_delay.as_millis() as f64 * self.factor.powi(exponent);
        let cap = self.max_delay.as_millis() as f64;

        if !millis.is_finite() || millis >= cap {
            self.max_delay
        } else {
            Duration::from_millis(millis.max(0.0) as u64)
        }
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Runs `operation` until it succeeds, fails with an error `is_retryable`
/// rejects, or the attempt budget is spent. The operation receives the
/// 0-based attempt index. The last attempt always runs; no delay follows it.
pub async fn retry_with_backoff<T, E, F, Fut, R>(
    policy: &BackoffPolicy,
    is_retryable: R,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    let attempts = policy.attempts();
    let mut attempt = 0;

    loop {
        match operation(attempt).await {
            Ok(value) => {
                if attempt > 0 {
                    tracing::info!("✅ Succeeded on attempt {}/{}", attempt + 1, attempts);
                }
                return Ok(value);
            }
            Err(e) if !is_retryable(&e) => {
                tracing::warn!("❌ Attempt {}/{} failed, not retrying: {}", attempt + 1, attempts, e);
                return Err(e);
            }
            Err(e) if attempt + 1 >= attempts => {
                tracing::warn!("❌ Attempt {}/{} failed, giving up: {}", attempt + 1, attempts, e);
                return Err(e);
            }
            Err(e) => {
                let delay = policy.delay_for(attempt);
                tracing::warn!("⚠️ Attempt {}/{} failed: {}", attempt + 1, attempts, e);
                tracing::info!("🔁 Retrying in {:?}", delay);
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
