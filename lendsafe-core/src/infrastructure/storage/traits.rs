use crate::domain::{AuthNonceRecord, ProposalStatus, SafeTransactionProposal};
use crate::foundation::{Address, LendsafeError, SafeTxHash};

pub type Result<T> = std::result::Result<T, LendsafeError>;

/// Document store shared by every signer session.
///
/// Implementations must apply `update_proposal` as one transaction against the stored copy so two concurrent
/// signature submissions cannot overwrite each other.
///
/// Backends that enforce access rules return `LendsafeError::PermissionDenied` when the caller may not read or
/// write a document. Callers surface it unchanged and never retry it.
pub trait Storage: Send + Sync {
    /// Fails with `ProposalExists` when a proposal with the same hash is already stored.
    fn insert_proposal(&self, proposal: SafeTransactionProposal) -> Result<()>;
    fn get_proposal(&self, tx_hash: &SafeTxHash) -> Result<Option<SafeTransactionProposal>>;

    /// Atomic read-modify-write. Whatever `apply` leaves in the proposal is committed, except that changes to the
    /// transaction hash or nonce abort the update.
    fn update_proposal(
        &self,
        tx_hash: &SafeTxHash,
        apply: &mut dyn FnMut(&mut SafeTransactionProposal),
    ) -> Result<SafeTransactionProposal>;

    fn list_proposals(&self, safe_address: Option<&Address>, status: Option<ProposalStatus>) -> Result<Vec<SafeTransactionProposal>>;

    /// Stores the sign-in nonce for an address, replacing any earlier one.
    fn put_auth_nonce(&self, record: AuthNonceRecord) -> Result<()>;

    /// Removes and returns the nonce for an address so it can be used once.
    fn take_auth_nonce(&self, wallet_address: &str) -> Result<Option<AuthNonceRecord>>;

    fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

pub(crate) fn nonce_key(wallet_address: &str) -> String {
    wallet_address.trim().to_ascii_lowercase()
}
