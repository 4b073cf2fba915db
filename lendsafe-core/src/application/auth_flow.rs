use crate::application::auth_lock::AuthLockCoordinator;
use crate::application::progress::AuthProgressTracker;
use crate::domain::{AuthLease, AuthNonceRecord, AuthSession, AuthStep, RetryPolicy, RetryState, RetryTrigger, SignInMessage};
use crate::foundation::{addresses_match, now_nanos, Bytes, LendsafeError};
use crate::infrastructure::config::AuthConfig;
use crate::infrastructure::identity::{IdentityService, WalletSigner};
use crate::infrastructure::rpc::retry_with_policy;
use crate::infrastructure::storage::Storage;
use log::{debug, info, warn};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use subtle::ConstantTimeEq;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(AuthSession),
    /// Another attempt holds the lock; nothing was changed.
    Busy,
    /// Automatic trigger ignored during the startup grace period.
    Suppressed,
}

/// Drives one wallet-signature sign-in from wallet check to established session.
pub struct AuthFlow {
    lock: Arc<AuthLockCoordinator>,
    progress: Arc<AuthProgressTracker>,
    retry: Mutex<RetryPolicy>,
    wallet: Arc<dyn WalletSigner>,
    identity: Arc<dyn IdentityService>,
    storage: Arc<dyn Storage>,
    config: AuthConfig,
}

impl AuthFlow {
    pub fn new(
        lock: Arc<AuthLockCoordinator>,
        progress: Arc<AuthProgressTracker>,
        wallet: Arc<dyn WalletSigner>,
        identity: Arc<dyn IdentityService>,
        storage: Arc<dyn Storage>,
        config: AuthConfig,
    ) -> Self {
        let retry = Mutex::new(RetryPolicy::new(config.base_delay_ms, config.max_retries));
        Self { lock, progress, retry, wallet, identity, storage, config }
    }

    fn retry_policy(&self) -> MutexGuard<'_, RetryPolicy> {
        self.retry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs a full sign-in for `wallet_address`.
    ///
    /// A user trigger starts with a fresh retry budget; automatic triggers keep spending what is left.
    /// Returns `Busy` when another attempt owns the lock and `Suppressed` for automatic triggers during the grace
    /// period. Errors have already been recorded on the progress tracker, except `Cancelled`, which leaves progress
    /// to whoever cancelled.
    pub async fn authenticate(&self, wallet_address: &str, trigger: RetryTrigger) -> Result<AuthOutcome, LendsafeError> {
        if self.retry_policy().suppresses(trigger) {
            debug!("auth trigger suppressed during grace period wallet={} trigger={:?}", wallet_address, trigger);
            return Ok(AuthOutcome::Suppressed);
        }

        let Some(lease) = self.lock.try_acquire(wallet_address, None) else {
            return Ok(AuthOutcome::Busy);
        };
        if trigger == RetryTrigger::User {
            self.retry_policy().reset();
        }
        info!("authentication started wallet={} request_id={} trigger={:?}", wallet_address, lease.request_id, trigger);

        let result = self.run(&lease).await;
        self.lock.release_if_owner(&lease.request_id);

        match result {
            Ok(session) => {
                self.retry_policy().reset();
                info!("authentication succeeded wallet={} request_id={}", session.wallet_address, lease.request_id);
                Ok(AuthOutcome::Authenticated(session))
            }
            Err(err) => {
                warn!("authentication failed wallet={} request_id={} error={}", wallet_address, lease.request_id, err);
                Err(err)
            }
        }
    }

    async fn run(&self, lease: &AuthLease) -> Result<AuthSession, LendsafeError> {
        self.progress.reset_progress();

        self.step(lease, AuthStep::ConnectWallet, self.check_wallet(&lease.wallet_address)).await?;
        self.step(lease, AuthStep::AcquireLock, async { Ok(()) }).await?;
        let message = self.step(lease, AuthStep::GenerateMessage, async { self.issue_message(&lease.wallet_address) }).await?;

        let token = &lease.cancellation;
        let signature = self
            .step(
                lease,
                AuthStep::RequestSignature,
                retry_with_policy(&self.retry, token, AuthStep::RequestSignature.as_str(), || self.wallet.sign_message(&message)),
            )
            .await?;

        let session = self.step(lease, AuthStep::VerifySignature, self.verify(lease, &signature, &message)).await?;

        self.step(
            lease,
            AuthStep::FirebaseAuth,
            retry_with_policy(&self.retry, token, AuthStep::FirebaseAuth.as_str(), || self.identity.establish_session(&session)),
        )
        .await?;
        Ok(session)
    }

    /// Runs one step. A cancelled lease never completes or fails the step.
    async fn step<T, Fut>(&self, lease: &AuthLease, step: AuthStep, work: Fut) -> Result<T, LendsafeError>
    where
        Fut: Future<Output = Result<T, LendsafeError>>,
    {
        let cancelled = || LendsafeError::Cancelled { step: step.to_string() };
        if lease.cancellation.is_cancelled() {
            return Err(cancelled());
        }
        self.progress.start_step(step);

        let outcome = tokio::select! {
            biased;
            _ = lease.cancellation.cancelled() => Err(cancelled()),
            outcome = work => outcome,
        };

        match outcome {
            Ok(_) if lease.cancellation.is_cancelled() => Err(cancelled()),
            Ok(value) => {
                self.progress.complete_step(step);
                Ok(value)
            }
            Err(err @ LendsafeError::Cancelled { .. }) => {
                debug!("auth step cancelled step={} request_id={}", step, lease.request_id);
                Err(err)
            }
            Err(err) => {
                if !lease.cancellation.is_cancelled() {
                    self.progress.fail_step(step, err.to_string());
                }
                Err(err)
            }
        }
    }

    async fn check_wallet(&self, wallet_address: &str) -> Result<(), LendsafeError> {
        let connected = self.wallet.connected_address().await?.ok_or(LendsafeError::WalletNotConnected)?;
        if !addresses_match(&connected, wallet_address) {
            return Err(LendsafeError::WalletMismatch { expected: wallet_address.to_string(), actual: connected });
        }
        Ok(())
    }

    fn issue_message(&self, wallet_address: &str) -> Result<String, LendsafeError> {
        let issued_at_nanos = now_nanos();
        let record = SignInMessage {
            domain: self.config.message_domain.clone(),
            wallet_address: wallet_address.to_string(),
            statement: self.config.message_statement.clone(),
            chain_id: self.config.chain_id,
            nonce: SignInMessage::new_nonce(),
            issued_at_nanos,
            expires_at_nanos: issued_at_nanos.saturating_add(self.config.nonce_ttl_nanos()),
        }
        .into_nonce_record();
        let message = record.message.clone();
        debug!("sign-in message issued wallet={} nonce={} expires_at_nanos={}", wallet_address, record.nonce, record.expires_at_nanos);
        self.storage.put_auth_nonce(record)?;
        Ok(message)
    }

    async fn verify(&self, lease: &AuthLease, signature: &Bytes, message: &str) -> Result<AuthSession, LendsafeError> {
        let record = self.consume_nonce(&lease.wallet_address, message)?;
        retry_with_policy(&self.retry, &lease.cancellation, AuthStep::VerifySignature.as_str(), || {
            self.identity.verify_and_issue_session(signature, &record.wallet_address, &record.message)
        })
        .await
    }

    fn consume_nonce(&self, wallet_address: &str, message: &str) -> Result<AuthNonceRecord, LendsafeError> {
        let record = self
            .storage
            .take_auth_nonce(wallet_address)?
            .ok_or_else(|| LendsafeError::AuthNonceMissing { address: wallet_address.to_string() })?;
        if record.is_expired(now_nanos()) {
            return Err(LendsafeError::AuthNonceExpired { address: wallet_address.to_string(), expired_at: record.expires_at_nanos });
        }
        if !bool::from(record.message.as_bytes().ct_eq(message.as_bytes())) {
            return Err(LendsafeError::SessionVerificationFailed("signed message does not match issued nonce".to_string()));
        }
        Ok(record)
    }

    /// Cancels whatever attempt currently holds the lock.
    pub fn cancel(&self) {
        self.lock.release();
    }

    pub fn can_retry(&self) -> bool {
        self.retry_policy().can_retry()
    }

    pub fn next_retry_delay(&self) -> Duration {
        self.retry_policy().next_retry_delay()
    }

    pub fn set_retry_count(&self, retry_count: i64) {
        self.retry_policy().set_retry_count(retry_count);
    }

    pub fn reset_retries(&self) {
        self.retry_policy().reset();
    }

    pub fn retry_state(&self) -> RetryState {
        self.retry_policy().state().clone()
    }

    /// Ends the startup grace period. Returns `true` only for the call that ended it.
    pub fn end_grace_period(&self) -> bool {
        let ended = self.retry_policy().end_grace_period();
        if ended {
            debug!("auth retry grace period ended");
        }
        ended
    }

    pub fn lock(&self) -> &Arc<AuthLockCoordinator> {
        &self.lock
    }

    pub fn progress(&self) -> &Arc<AuthProgressTracker> {
        &self.progress
    }
}
