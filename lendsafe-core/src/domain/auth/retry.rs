use crate::foundation::{DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BASE_DELAY_MS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Who asked for an authentication attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetryTrigger {
    User,
    Automatic,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryState {
    pub retry_count: u32,
    pub max_retries: u32,
    pub is_retry_delay_active: bool,
    pub is_grace_period: bool,
}

impl RetryState {
    pub fn can_retry(&self) -> bool {
        self.retry_count < self.max_retries
    }
}

/// Exponential backoff plus a one-shot startup grace period.
///
/// The grace period starts set and is cleared once by [`RetryPolicy::end_grace_period`]. While it is set,
/// automatic retry triggers are suppressed so an app launch or resume cannot start a retry storm.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    base_delay_ms: u64,
    state: RetryState,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_BASE_DELAY_MS, DEFAULT_MAX_RETRIES)
    }
}

impl RetryPolicy {
    pub fn new(base_delay_ms: u64, max_retries: u32) -> Self {
        Self {
            base_delay_ms,
            state: RetryState { retry_count: 0, max_retries, is_retry_delay_active: false, is_grace_period: true },
        }
    }

    pub fn state(&self) -> &RetryState {
        &self.state
    }

    /// `base * 2^(retry_count - 1)`; a count of 0 is treated as the first retry.
    pub fn next_delay(&self, retry_count: u32) -> Duration {
        let exponent = retry_count.max(1) - 1;
        let factor = 2u64.saturating_pow(exponent);
        Duration::from_millis(self.base_delay_ms.saturating_mul(factor))
    }

    /// Delay to wait before the upcoming retry.
    pub fn next_retry_delay(&self) -> Duration {
        self.next_delay(self.state.retry_count.saturating_add(1))
    }

    pub fn can_retry(&self) -> bool {
        self.state.can_retry()
    }

    pub fn set_retry_count(&mut self, retry_count: i64) {
        let clamped = retry_count.clamp(0, i64::from(self.state.max_retries));
        self.state.retry_count = u32::try_from(clamped).unwrap_or(self.state.max_retries);
    }

    /// Counts one retry, never exceeding `max_retries`. Returns the new count.
    pub fn record_retry(&mut self) -> u32 {
        self.set_retry_count(i64::from(self.state.retry_count) + 1);
        self.state.retry_count
    }

    pub fn reset(&mut self) {
        self.state.retry_count = 0;
        self.state.is_retry_delay_active = false;
    }

    pub fn set_retry_delay_active(&mut self, active: bool) {
        self.state.is_retry_delay_active = active;
    }

    pub fn is_grace_period(&self) -> bool {
        self.state.is_grace_period
    }

    /// Clears the grace period. Returns `true` only on the call that actually cleared it.
    pub fn end_grace_period(&mut self) -> bool {
        std::mem::replace(&mut self.state.is_grace_period, false)
    }

    pub fn suppresses(&self, trigger: RetryTrigger) -> bool {
        trigger == RetryTrigger::Automatic && self.state.is_grace_period
    }
}
