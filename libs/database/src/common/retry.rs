use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Exponential backoff for store connectivity checks
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Scale each delay to a pseudo-random 50-100% of its nominal value
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    /// Nominal delay before retry `attempt` (1-based): doubles each time, capped
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(16);
        self.initial_delay
            .saturating_mul(1 << shift)
            .min(self.max_delay)
    }

    fn sleep_for(&self, attempt: u32) -> Duration {
        let delay = self.delay_for(attempt);
        if self.jitter { jittered(delay) } else { delay }
    }
}

/// Run `operation` until it succeeds or the retries are spent; the last error
/// is returned on exhaustion.
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt = 0;

    loop {
        let error = match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!("Succeeded after {} retries", attempt);
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        attempt += 1;
        if attempt > config.max_retries {
            warn!("Giving up after {} attempts: {}", attempt, error);
            return Err(error);
        }

        let delay = config.sleep_for(attempt);
        debug!(
            "Attempt {}/{} failed: {}. Retrying in {:?}",
            attempt, config.max_retries, error, delay
        );
        tokio::time::sleep(delay).await;
    }
}

fn jittered(delay: Duration) -> Duration {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let percent = 50 + (RandomState::new().hash_one(std::time::Instant::now()) % 51) as u32;
    delay * percent / 100
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn quick() -> RetryConfig {
        RetryConfig::new()
            .with_initial_delay(Duration::from_millis(5))
            .without_jitter()
    }

    #[tokio::test]
    async fn test_first_success_makes_one_call() {
        let counter = AtomicU32::new(0);
        let calls = &counter;

        let result = retry_with_backoff(
            || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>("pong")
            },
            quick(),
        )
        .await;

        assert_eq!(result.unwrap(), "pong");
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let counter = AtomicU32::new(0);
        let calls = &counter;

        let result = retry_with_backoff(
            || async move {
                match calls.fetch_add(1, Ordering::SeqCst) {
                    0 | 1 => Err("server selection timeout".to_string()),
                    _ => Ok("pong"),
                }
            },
            quick(),
        )
        .await;

        assert_eq!(result.unwrap(), "pong");
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_returns_last_error_when_exhausted() {
        let counter = AtomicU32::new(0);
        let calls = &counter;

        let result = retry_with_backoff(
            || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(format!("attempt {}", n + 1))
            },
            quick().with_max_retries(2),
        )
        .await;

        assert_eq!(result.unwrap_err(), "attempt 3");
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_delay_doubles_up_to_cap() {
        let config = RetryConfig::new()
            .with_initial_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_millis(350));

        assert_eq!(config.delay_for(1), Duration::from_millis(100));
        assert_eq!(config.delay_for(2), Duration::from_millis(200));
        assert_eq!(config.delay_for(3), Duration::from_millis(350));
        assert_eq!(config.delay_for(40), Duration::from_millis(350));
    }

    #[test]
    fn test_jitter_stays_within_half_to_full() {
        for _ in 0..10 {
            let delay = jittered(Duration::from_millis(1000));
            assert!(delay >= Duration::from_millis(500));
            assert!(delay <= Duration::from_millis(1000));
        }
    }
}
