//! Wallet and identity-service collaborators used by the sign-in flow.

use crate::domain::AuthSession;
use crate::foundation::{Bytes, LendsafeError};
use async_trait::async_trait;

/// Connected browser or mobile wallet.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Address the wallet currently exposes, if any.
    async fn connected_address(&self) -> Result<Option<String>, LendsafeError>;

    /// Personal-sign `message`. A user decline surfaces as `UserRejected`.
    async fn sign_message(&self, message: &str) -> Result<Bytes, LendsafeError>;
}

/// Backend that verifies a wallet signature and mints a session for it.
#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn verify_and_issue_session(&self, signature: &Bytes, wallet_address: &str, message: &str)
        -> Result<AuthSession, LendsafeError>;

    /// Final sign-in step: make the issued session the active one.
    async fn establish_session(&self, session: &AuthSession) -> Result<(), LendsafeError>;
}
