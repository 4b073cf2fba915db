use crate::foundation::constants::NANOS_PER_SECOND;
use crate::foundation::LendsafeError;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn current_timestamp_nanos() -> Result<u64, LendsafeError> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).map_err(|err| LendsafeError::Message(err.to_string()))?;
    Ok(now.as_secs().saturating_mul(NANOS_PER_SECOND).saturating_add(u64::from(now.subsec_nanos())))
}

/// Returns the current wall-clock timestamp in nanoseconds (0 if the clock is before the epoch).
pub fn now_nanos() -> u64 {
    current_timestamp_nanos().unwrap_or(0)
}
