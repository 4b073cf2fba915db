use crate::domain::SafeTxFields;
use crate::foundation::{Address, LendsafeError, SafeTxHash, U256};
use async_trait::async_trait;

/// Read-only view of one Safe multi-sig contract.
#[async_trait]
pub trait SafeContract: Send + Sync {
    fn address(&self) -> Address;
    async fn get_owners(&self) -> Result<Vec<Address>, LendsafeError>;
    async fn get_threshold(&self) -> Result<U256, LendsafeError>;
    async fn nonce(&self) -> Result<U256, LendsafeError>;
    /// The contract's own hash over the ten canonical fields; never recomputed locally.
    async fn get_transaction_hash(&self, fields: &SafeTxFields) -> Result<SafeTxHash, LendsafeError>;
}
