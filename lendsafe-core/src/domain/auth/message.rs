use crate::foundation::{SessionToken, NANOS_PER_SECOND};
use serde::{Deserialize, Serialize};

/// Sign-in message presented to the wallet. `Issued At` and `Expiration Time` are whole Unix seconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInMessage {
    pub domain: String,
    pub wallet_address: String,
    pub statement: String,
    pub chain_id: u64,
    pub nonce: String,
    pub issued_at_nanos: u64,
    pub expires_at_nanos: u64,
}

impl SignInMessage {
    pub fn new_nonce() -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }

    pub fn render(&self) -> String {
        format!(
            "{domain} wants you to sign in with your Ethereum account:\n{address}\n\n{statement}\n\n\
             Version: 1\nChain ID: {chain_id}\nNonce: {nonce}\nIssued At: {issued}\nExpiration Time: {expires}",
            domain = self.domain,
            address = self.wallet_address,
            statement = self.statement,
            chain_id = self.chain_id,
            nonce = self.nonce,
            issued = self.issued_at_nanos / NANOS_PER_SECOND,
            expires = self.expires_at_nanos / NANOS_PER_SECOND,
        )
    }

    pub fn into_nonce_record(self) -> AuthNonceRecord {
        let message = self.render();
        AuthNonceRecord {
            wallet_address: self.wallet_address,
            nonce: self.nonce,
            message,
            issued_at_nanos: self.issued_at_nanos,
            expires_at_nanos: self.expires_at_nanos,
        }
    }
}

/// Issued sign-in nonce, consumed once when the signature is verified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthNonceRecord {
    pub wallet_address: String,
    pub nonce: String,
    pub message: String,
    pub issued_at_nanos: u64,
    pub expires_at_nanos: u64,
}

impl AuthNonceRecord {
    pub fn is_expired(&self, now_nanos: u64) -> bool {
        now_nanos > self.expires_at_nanos
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub wallet_address: String,
    pub session_token: SessionToken,
    pub issued_at_nanos: u64,
}
