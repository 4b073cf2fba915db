use crate::domain::{AuthLease, AuthLockSnapshot, AuthenticationLock};
use crate::foundation::{now_nanos, RequestId};
use log::{debug, info, warn};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Single-flight guard over one authentication attempt per process.
///
/// Every check-and-set happens under a `std::sync::Mutex` that is never held across an await, so two attempts can
/// never both observe the lock as free.
pub struct AuthLockCoordinator {
    lock: Mutex<AuthenticationLock>,
    snapshots: watch::Sender<AuthLockSnapshot>,
}

impl AuthLockCoordinator {
    pub fn new() -> Self {
        let (snapshots, _) = watch::channel(AuthLockSnapshot::default());
        Self { lock: Mutex::new(AuthenticationLock::default()), snapshots }
    }

    fn guard(&self) -> MutexGuard<'_, AuthenticationLock> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `false` without touching state when another attempt holds the lock.
    pub fn acquire(&self, wallet_address: &str, request_id: Option<RequestId>) -> bool {
        self.try_acquire(wallet_address, request_id).is_some()
    }

    /// Like [`Self::acquire`], but hands back the lease for the attempt that now owns the lock.
    pub fn try_acquire(&self, wallet_address: &str, request_id: Option<RequestId>) -> Option<AuthLease> {
        let mut lock = self.guard();
        let Some(lease) = lock.try_lock(wallet_address, request_id, now_nanos()) else {
            warn!(
                "authentication already in progress requested_wallet={} held_by_wallet={:?} held_request_id={:?}",
                wallet_address,
                lock.wallet_address(),
                lock.request_id().map(RequestId::as_str)
            );
            return None;
        };
        info!("auth lock acquired wallet={} request_id={}", lease.wallet_address, lease.request_id);
        self.snapshots.send_replace(lock.snapshot());
        Some(lease)
    }

    /// Cancels the in-flight attempt, if any, and clears the lock. Safe to call repeatedly.
    pub fn release(&self) {
        let mut lock = self.guard();
        let request_id = lock.request_id().cloned();
        if lock.unlock() {
            info!("auth lock released request_id={:?}", request_id.as_ref().map(RequestId::as_str));
            self.snapshots.send_replace(lock.snapshot());
        } else {
            debug!("auth lock release ignored; not locked");
        }
    }

    /// Releases only when `request_id` still owns the lock. Returns whether it did.
    pub fn release_if_owner(&self, request_id: &RequestId) -> bool {
        let mut lock = self.guard();
        if !lock.is_held_by(request_id) {
            debug!("auth lock release skipped; not owner request_id={}", request_id);
            return false;
        }
        lock.unlock();
        info!("auth lock released request_id={}", request_id);
        self.snapshots.send_replace(lock.snapshot());
        true
    }

    pub fn is_authenticating(&self) -> bool {
        self.guard().is_locked()
    }

    pub fn auth_wallet_address(&self) -> Option<String> {
        self.guard().wallet_address().map(str::to_string)
    }

    pub fn is_authenticating_for(&self, wallet_address: &str) -> bool {
        self.guard().is_authenticating_for(wallet_address)
    }

    pub fn snapshot(&self) -> AuthLockSnapshot {
        self.guard().snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthLockSnapshot> {
        self.snapshots.subscribe()
    }
}

impl Default for AuthLockCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
