//! Bounded fixed-delay retry execution.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

/// Retry budget for one operation: attempt count and inter-attempt delay.
///
/// The delay is fixed — no backoff growth, no jitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            delay: Duration::from_millis(300),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Policy with no inter-attempt delay. Mostly useful in tests.
    pub fn no_delay(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }
}

/// Invoke `op` until it succeeds or the attempt budget is spent.
///
/// Every error is treated as transient and retryable; this function knows
/// nothing about what it runs. After the final failed attempt the last error
/// is returned unchanged — callers that want to recognize a specific failure
/// (e.g. a bucket conflict) inspect it afterwards.
///
/// A `max_attempts` of zero is normalized to one: the operation always runs
/// at least once. The delay is applied between attempts only, not after the
/// final failure.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let budget = policy.max_attempts.max(1);
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < budget => {
                debug!(attempt, budget, error = %err, "attempt failed, retrying");
                tokio::time::sleep(policy.delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Operation that fails `failures` times, then succeeds forever.
    fn flaky(failures: u32) -> (Arc<AtomicU32>, impl FnMut() -> std::future::Ready<Result<u32, String>>) {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let op = move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            if n <= failures {
                std::future::ready(Err(format!("boom {n}")))
            } else {
                std::future::ready(Ok(n))
            }
        };
        (calls, op)
    }

    #[tokio::test]
    async fn returns_immediately_on_first_success() {
        let (calls, op) = flaky(0);
        let out = retry(&RetryPolicy::no_delay(10), op).await;
        assert_eq!(out, Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn succeeds_after_k_failures_with_k_plus_one_invocations() {
        let (calls, op) = flaky(3);
        let out = retry(&RetryPolicy::no_delay(10), op).await;
        assert_eq!(out, Ok(4));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn propagates_final_error_after_exhaustion() {
        let (calls, op) = flaky(u32::MAX);
        let out = retry(&RetryPolicy::no_delay(5), op).await;
        assert_eq!(out, Err("boom 5".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn zero_attempts_still_runs_once() {
        let (calls, op) = flaky(0);
        let out = retry(&RetryPolicy::no_delay(0), op).await;
        assert_eq!(out, Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn fixed_delay_elapses_between_attempts() {
        let (calls, op) = flaky(2);
        let policy = RetryPolicy::new(10, Duration::from_millis(300));
        let start = tokio::time::Instant::now();
        let out = retry(&policy, op).await;
        assert_eq!(out, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // Two failures, so exactly two sleeps; none after the success.
        assert_eq!(start.elapsed(), Duration::from_millis(600));
    }
}
