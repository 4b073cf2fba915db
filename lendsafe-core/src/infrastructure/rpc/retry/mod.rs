use crate::domain::RetryPolicy;
use crate::foundation::LendsafeError;
use log::{debug, warn};
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

fn lock_policy(policy: &Mutex<RetryPolicy>) -> MutexGuard<'_, RetryPolicy> {
    policy.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Retry an async operation with the policy's exponential backoff.
///
/// Only transient errors are retried, and only while `policy.can_retry()`. Every attempt and every backoff sleep
/// races `token`; a cancelled token surfaces as `Cancelled { step }`.
pub async fn retry_with_policy<F, Fut, T>(
    policy: &Mutex<RetryPolicy>,
    token: &CancellationToken,
    step: &str,
    mut op: F,
) -> Result<T, LendsafeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LendsafeError>>,
{
    loop {
        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(LendsafeError::Cancelled { step: step.to_string() }),
            outcome = op() => outcome,
        };

        let err = match outcome {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() => err,
            Err(err) => return Err(err),
        };

        let delay = {
            let mut guard = lock_policy(policy);
            if !guard.can_retry() {
                warn!("retries exhausted step={} retry_count={} error={}", step, guard.state().retry_count, err);
                return Err(err);
            }
            guard.set_retry_delay_active(true);
            guard.next_retry_delay()
        };
        warn!("transient failure, backing off step={} delay_ms={} error={}", step, delay.as_millis(), err);

        let cancelled = tokio::select! {
            biased;
            _ = token.cancelled() => true,
            _ = sleep(delay) => false,
        };

        let attempt = {
            let mut guard = lock_policy(policy);
            guard.set_retry_delay_active(false);
            if cancelled {
                return Err(LendsafeError::Cancelled { step: step.to_string() });
            }
            guard.record_retry()
        };
        debug!("retrying step={} retry_count={}", step, attempt);
    }
}
