use crate::domain::{AuthNonceRecord, ProposalStatus, SafeTransactionProposal};
use crate::foundation::{Address, LendsafeError, SafeTxHash};
use crate::infrastructure::storage::traits::{nonce_key, Storage};
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

struct MemoryInner {
    proposals: HashMap<SafeTxHash, SafeTransactionProposal>,
    auth_nonces: HashMap<String, AuthNonceRecord>,
}

impl MemoryInner {
    fn new() -> Self {
        Self { proposals: HashMap::new(), auth_nonces: HashMap::new() }
    }
}

#[derive(Clone)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self { inner: Arc::new(Mutex::new(MemoryInner::new())) }
    }

    fn lock_inner(&self) -> Result<MutexGuard<'_, MemoryInner>, LendsafeError> {
        self.inner.lock().map_err(|_| LendsafeError::StorageError {
            operation: "memory storage lock".to_string(),
            details: "poisoned".to_string(),
        })
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemoryStorage {
    fn insert_proposal(&self, proposal: SafeTransactionProposal) -> Result<(), LendsafeError> {
        let mut inner = self.lock_inner()?;
        if inner.proposals.contains_key(&proposal.transaction_hash) {
            return Err(LendsafeError::ProposalExists(proposal.transaction_hash.to_string()));
        }
        debug!("proposal stored tx_hash={} safe={}", proposal.transaction_hash, proposal.safe_address);
        inner.proposals.insert(proposal.transaction_hash, proposal);
        Ok(())
    }

    fn get_proposal(&self, tx_hash: &SafeTxHash) -> Result<Option<SafeTransactionProposal>, LendsafeError> {
        Ok(self.lock_inner()?.proposals.get(tx_hash).cloned())
    }

    fn update_proposal(
        &self,
        tx_hash: &SafeTxHash,
        apply: &mut dyn FnMut(&mut SafeTransactionProposal),
    ) -> Result<SafeTransactionProposal, LendsafeError> {
        let mut inner = self.lock_inner()?;
        let stored = inner.proposals.get_mut(tx_hash).ok_or_else(|| LendsafeError::ProposalNotFound(tx_hash.to_string()))?;
        let mut working = stored.clone();
        apply(&mut working);
        if working.transaction_hash != stored.transaction_hash || working.nonce != stored.nonce {
            warn!("rejected proposal update touching immutable fields tx_hash={}", tx_hash);
            return Err(LendsafeError::StorageError {
                operation: "update_proposal".to_string(),
                details: "transaction_hash and nonce are immutable".to_string(),
            });
        }
        *stored = working.clone();
        Ok(working)
    }

    fn list_proposals(
        &self,
        safe_address: Option<&Address>,
        status: Option<ProposalStatus>,
    ) -> Result<Vec<SafeTransactionProposal>, LendsafeError> {
        let inner = self.lock_inner()?;
        let mut out: Vec<SafeTransactionProposal> = inner
            .proposals
            .values()
            .filter(|p| safe_address.map_or(true, |safe| &p.safe_address == safe))
            .filter(|p| status.map_or(true, |status| p.status == status))
            .cloned()
            .collect();
        out.sort_by_key(|p| (p.created_at_nanos, p.transaction_hash));
        Ok(out)
    }

    fn put_auth_nonce(&self, record: AuthNonceRecord) -> Result<(), LendsafeError> {
        let mut inner = self.lock_inner()?;
        inner.auth_nonces.insert(nonce_key(&record.wallet_address), record);
        Ok(())
    }

    fn take_auth_nonce(&self, wallet_address: &str) -> Result<Option<AuthNonceRecord>, LendsafeError> {
        Ok(self.lock_inner()?.auth_nonces.remove(&nonce_key(wallet_address)))
    }
}
