use crate::foundation::{addresses_match, RequestId};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// Single-flight lock over one authentication attempt.
///
/// Unlocked implies `wallet_address`, `request_id` and `cancellation` are all `None`.
#[derive(Debug, Default)]
pub struct AuthenticationLock {
    is_locked: bool,
    wallet_address: Option<String>,
    start_time_nanos: u64,
    request_id: Option<RequestId>,
    cancellation: Option<CancellationToken>,
}

/// Handle given to the flow that won the lock.
#[derive(Clone, Debug)]
pub struct AuthLease {
    pub request_id: RequestId,
    pub wallet_address: String,
    pub cancellation: CancellationToken,
}

/// Immutable view of the lock for observers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthLockSnapshot {
    pub is_locked: bool,
    pub wallet_address: Option<String>,
    pub start_time_nanos: u64,
    pub request_id: Option<RequestId>,
}

impl AuthenticationLock {
    /// Check-and-set in one step. Returns `None` without touching state when already locked.
    pub fn try_lock(&mut self, wallet_address: &str, request_id: Option<RequestId>, now_nanos: u64) -> Option<AuthLease> {
        if self.is_locked {
            return None;
        }
        let request_id = request_id.unwrap_or_else(RequestId::generate);
        let cancellation = CancellationToken::new();
        self.is_locked = true;
        self.wallet_address = Some(wallet_address.to_string());
        self.start_time_nanos = now_nanos;
        self.request_id = Some(request_id.clone());
        self.cancellation = Some(cancellation.clone());
        Some(AuthLease { request_id, wallet_address: wallet_address.to_string(), cancellation })
    }

    /// Cancels the outstanding token and clears every field. Returns `false` when already unlocked.
    pub fn unlock(&mut self) -> bool {
        if !self.is_locked {
            return false;
        }
        if let Some(token) = self.cancellation.take() {
            token.cancel();
        }
        *self = Self::default();
        true
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    pub fn wallet_address(&self) -> Option<&str> {
        self.wallet_address.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn is_held_by(&self, request_id: &RequestId) -> bool {
        self.is_locked && self.request_id.as_ref() == Some(request_id)
    }

    pub fn is_authenticating_for(&self, address: &str) -> bool {
        self.is_locked && self.wallet_address.as_deref().is_some_and(|held| addresses_match(held, address))
    }

    pub fn snapshot(&self) -> AuthLockSnapshot {
        AuthLockSnapshot {
            is_locked: self.is_locked,
            wallet_address: self.wallet_address.clone(),
            start_time_nanos: self.start_time_nanos,
            request_id: self.request_id.clone(),
        }
    }
}
