//! Bounded-wait polling for asynchronous UI updates

use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::sleep;

use crate::error::{Error, Result};

/// Default ceiling for bounded waits (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Polls an async probe until it produces a value or the ceiling elapses.
///
/// Browser rendering is asynchronous relative to the driver, so every
/// wait-bound page operation goes through one of these instead of blocking
/// indefinitely. A probe error is propagated immediately; an exhausted
/// ceiling becomes [`Error::Timeout`] naming the awaited condition.
#[derive(Debug, Clone, Copy)]
pub struct Waiter {
    timeout: Duration,
    poll_interval: Duration,
}

impl Default for Waiter {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_WAIT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl Waiter {
    /// Create a waiter with a custom ceiling and polling interval
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Create a waiter with a custom ceiling and the default interval
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// The configured ceiling
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Poll `probe` until it yields `Some(value)`.
    ///
    /// `what` describes the awaited condition and is embedded in the
    /// timeout error.
    pub async fn until<T, F, Fut>(&self, what: &str, mut probe: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<T>>>,
    {
        let start = Instant::now();
        loop {
            if let Some(value) = probe().await? {
                return Ok(value);
            }
            if start.elapsed() >= self.timeout {
                return Err(Error::Timeout {
                    what: what.to_string(),
                    timeout: self.timeout,
                });
            }
            sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn resolves_once_the_probe_produces_a_value() {
        let polls = AtomicUsize::new(0);
        let waiter = Waiter::new(Duration::from_secs(1), Duration::from_millis(5));

        let value = waiter
            .until("counter to reach three", || {
                let n = polls.fetch_add(1, Ordering::SeqCst) + 1;
                async move { Ok(if n >= 3 { Some(n) } else { None }) }
            })
            .await
            .unwrap();

        assert_eq!(value, 3);
        assert_eq!(polls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn times_out_when_the_probe_never_produces() {
        let waiter = Waiter::new(Duration::from_millis(30), Duration::from_millis(5));

        let result: Result<()> = waiter
            .until("a condition that never holds", || async { Ok(None) })
            .await;

        match result {
            Err(Error::Timeout { what, .. }) => {
                assert_eq!(what, "a condition that never holds");
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn probe_errors_propagate_immediately() {
        let waiter = Waiter::new(Duration::from_secs(5), Duration::from_millis(5));
        let start = Instant::now();

        let result: Result<()> = waiter
            .until("a probe that fails", || async {
                Err(Error::Assertion("boom".into()))
            })
            .await;

        assert!(matches!(result, Err(Error::Assertion(_))));
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
