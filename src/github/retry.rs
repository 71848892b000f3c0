use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use backon::{ConstantBuilder, Retryable};

use crate::error::{MigrateError, Result};

/// Total attempts (initial call plus retries) before giving up.
pub const MAX_ATTEMPTS: u32 = 16;
/// Fixed wait after each "submitted too quickly" rejection.
pub const COOLDOWN: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub cooldown: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            cooldown: COOLDOWN,
        }
    }
}

impl RetryPolicy {
    /// Constant cooldown, no jitter, `max_attempts - 1` retries.
    #[must_use]
    pub fn backoff(&self) -> ConstantBuilder {
        ConstantBuilder::default()
            .with_delay(self.cooldown)
            .with_max_times(self.max_attempts.saturating_sub(1) as usize)
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error,
    /// or has been rate limited `max_attempts` times.
    ///
    /// `on_backoff` is told the failed attempt number and the cooldown
    /// before each wait.
    pub async fn run<T, F, Fut, N>(&self, mut operation: F, mut on_backoff: N) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
        N: FnMut(u32, Duration, &MigrateError),
    {
        let attempt = AtomicU32::new(0);

        let retry_op = || {
            attempt.fetch_add(1, Ordering::SeqCst);
            operation()
        };

        retry_op
            .retry(self.backoff())
            .sleep(tokio::time::sleep)
            .when(MigrateError::is_retryable)
            .notify(|err, wait| on_backoff(attempt.load(Ordering::SeqCst), wait, err))
            .await
            .map_err(|err| {
                if err.is_retryable() {
                    MigrateError::RetryExhausted {
                        attempts: attempt.load(Ordering::SeqCst),
                    }
                } else {
                    err
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tokio::time::Instant;

    fn rate_limited() -> MigrateError {
        MigrateError::RateLimited {
            message: "was submitted too quickly".into(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_three_rate_limits() {
        let calls = Cell::new(0u32);
        let mut waits = Vec::new();
        let start = Instant::now();

        let result = RetryPolicy::default()
            .run(
                || {
                    calls.set(calls.get() + 1);
                    let n = calls.get();
                    async move {
                        if n <= 3 {
                            Err(rate_limited())
                        } else {
                            Ok("issue")
                        }
                    }
                },
                |attempt, wait, _| waits.push((attempt, wait)),
            )
            .await;

        assert_eq!(result.unwrap(), "issue");
        assert_eq!(calls.get(), 4);
        assert_eq!(
            waits,
            vec![(1, COOLDOWN), (2, COOLDOWN), (3, COOLDOWN)]
        );
        assert_eq!(start.elapsed(), COOLDOWN * 3);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_sixteen_attempts() {
        let calls = Cell::new(0u32);
        let mut waits = 0;

        let result: Result<()> = RetryPolicy::default()
            .run(
                || {
                    calls.set(calls.get() + 1);
                    async { Err(rate_limited()) }
                },
                |_, _, _| waits += 1,
            )
            .await;

        assert!(matches!(
            result,
            Err(MigrateError::RetryExhausted { attempts: 16 })
        ));
        assert_eq!(calls.get(), 16);
        assert_eq!(waits, 15);
    }

    #[tokio::test(start_paused = true)]
    async fn other_errors_are_not_retried() {
        let calls = Cell::new(0u32);
        let start = Instant::now();

        let result: Result<()> = RetryPolicy::default()
            .run(
                || {
                    calls.set(calls.get() + 1);
                    async {
                        Err(MigrateError::Transport {
                            status: reqwest::StatusCode::BAD_GATEWAY,
                            body: String::new(),
                        })
                    }
                },
                |_, _, _| panic!("should not back off"),
            )
            .await;

        assert!(matches!(result, Err(MigrateError::Transport { .. })));
        assert_eq!(calls.get(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
