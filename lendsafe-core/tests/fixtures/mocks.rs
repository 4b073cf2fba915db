#![allow(dead_code)]

use crate::fixtures::{addr, owners, TEST_SAFE_ADDRESS, TEST_SAFE_NONCE, TEST_SIGNATURE, TEST_WALLET};
use alloy::primitives::keccak256;
use async_trait::async_trait;
use lendsafe_core::domain::{AuthSession, SafeTxFields};
use lendsafe_core::foundation::{now_nanos, Address, Bytes, LendsafeError, SafeTxHash, SessionToken, U256};
use lendsafe_core::infrastructure::chain::SafeContract;
use lendsafe_core::infrastructure::identity::{IdentityService, WalletSigner};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Notify;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignBehavior {
    Sign,
    Reject,
    /// Never answers, as if the wallet prompt were left open.
    Hang,
}

pub struct MockWallet {
    connected: Mutex<Option<String>>,
    behavior: Mutex<SignBehavior>,
    pub signed_messages: Mutex<Vec<String>>,
    pub sign_requested: Notify,
}

impl MockWallet {
    pub fn connected(address: &str) -> Self {
        Self {
            connected: Mutex::new(Some(address.to_string())),
            behavior: Mutex::new(SignBehavior::Sign),
            signed_messages: Mutex::new(Vec::new()),
            sign_requested: Notify::new(),
        }
    }

    pub fn with_behavior(self, behavior: SignBehavior) -> Self {
        *self.behavior.lock().unwrap() = behavior;
        self
    }

    pub fn disconnect(&self) {
        *self.connected.lock().unwrap() = None;
    }
}

impl Default for MockWallet {
    fn default() -> Self {
        Self::connected(TEST_WALLET)
    }
}

#[async_trait]
impl WalletSigner for MockWallet {
    async fn connected_address(&self) -> Result<Option<String>, LendsafeError> {
        Ok(self.connected.lock().unwrap().clone())
    }

    async fn sign_message(&self, message: &str) -> Result<Bytes, LendsafeError> {
        self.signed_messages.lock().unwrap().push(message.to_string());
        self.sign_requested.notify_one();
        let behavior = *self.behavior.lock().unwrap();
        match behavior {
            SignBehavior::Sign => Ok(Bytes::copy_from_slice(&TEST_SIGNATURE)),
            SignBehavior::Reject => Err(LendsafeError::UserRejected("user denied message signature".to_string())),
            SignBehavior::Hang => std::future::pending().await,
        }
    }
}

#[derive(Default)]
pub struct MockIdentity {
    transient_failures: AtomicU32,
    reject: Mutex<bool>,
    pub verify_calls: AtomicU32,
    pub verified_messages: Mutex<Vec<String>>,
    pub established: Mutex<Vec<AuthSession>>,
}

impl MockIdentity {
    /// The next `count` verifications fail with a network error.
    pub fn failing_transiently(count: u32) -> Self {
        let identity = Self::default();
        identity.transient_failures.store(count, Ordering::SeqCst);
        identity
    }

    pub fn rejecting() -> Self {
        let identity = Self::default();
        *identity.reject.lock().unwrap() = true;
        identity
    }
}

#[async_trait]
impl IdentityService for MockIdentity {
    async fn verify_and_issue_session(
        &self,
        signature: &Bytes,
        wallet_address: &str,
        message: &str,
    ) -> Result<AuthSession, LendsafeError> {
        let call = self.verify_calls.fetch_add(1, Ordering::SeqCst);
        if self.transient_failures.load(Ordering::SeqCst) > 0 {
            self.transient_failures.fetch_sub(1, Ordering::SeqCst);
            return Err(LendsafeError::NetworkError("identity backend unavailable".to_string()));
        }
        if *self.reject.lock().unwrap() || signature.as_ref() != TEST_SIGNATURE.as_slice() {
            return Err(LendsafeError::SessionVerificationFailed("signature does not recover to wallet".to_string()));
        }
        self.verified_messages.lock().unwrap().push(message.to_string());
        Ok(AuthSession {
            wallet_address: wallet_address.to_string(),
            session_token: SessionToken::new(format!("session-{call}")),
            issued_at_nanos: now_nanos(),
        })
    }

    async fn establish_session(&self, session: &AuthSession) -> Result<(), LendsafeError> {
        self.established.lock().unwrap().push(session.clone());
        Ok(())
    }
}

pub struct MockSafeContract {
    pub address: Address,
    pub owners: Vec<Address>,
    pub threshold: U256,
    pub nonce: U256,
    pub calls: AtomicUsize,
    pub hashed_fields: Mutex<Vec<SafeTxFields>>,
}

impl MockSafeContract {
    pub fn new(threshold: u64) -> Self {
        Self {
            address: addr(TEST_SAFE_ADDRESS),
            owners: owners(),
            threshold: U256::from(threshold),
            nonce: U256::from(TEST_SAFE_NONCE),
            calls: AtomicUsize::new(0),
            hashed_fields: Mutex::new(Vec::new()),
        }
    }

    pub fn with_owners(mut self, owners: Vec<Address>) -> Self {
        self.owners = owners;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Stand-in for the contract's EIP-712 hash; only determinism matters here.
    pub fn hash_of(fields: &SafeTxFields) -> SafeTxHash {
        let nonce: [u8; 32] = fields.nonce.to_be_bytes();
        keccak256([fields.to.as_slice(), fields.data.as_ref(), nonce.as_slice()].concat())
    }
}

#[async_trait]
impl SafeContract for MockSafeContract {
    fn address(&self) -> Address {
        self.address
    }

    async fn get_owners(&self) -> Result<Vec<Address>, LendsafeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.owners.clone())
    }

    async fn get_threshold(&self) -> Result<U256, LendsafeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.threshold)
    }

    async fn nonce(&self) -> Result<U256, LendsafeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.nonce)
    }

    async fn get_transaction_hash(&self, fields: &SafeTxFields) -> Result<SafeTxHash, LendsafeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.hashed_fields.lock().unwrap().push(fields.clone());
        Ok(Self::hash_of(fields))
    }
}
