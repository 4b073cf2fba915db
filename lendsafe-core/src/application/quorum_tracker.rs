use crate::domain::{add_signature, expire_if_stale, validate_signature_bytes, ProposalStatus, QuorumProgress, SafeTransactionProposal};
use crate::foundation::util::encoding::decode_hex_prefixed;
use crate::foundation::{now_nanos, parse_address, LendsafeError, SafeTxHash};
use crate::infrastructure::storage::Storage;
use log::{debug, info, warn};
use std::sync::Arc;

/// Collects owner signatures for stored proposals until their threshold is met.
///
/// Each signer device calls [`SafeQuorumTracker::add_signature`] independently; every call is one atomic
/// read-modify-write against storage.
pub struct SafeQuorumTracker {
    storage: Arc<dyn Storage>,
}

impl SafeQuorumTracker {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn submit(&self, proposal: SafeTransactionProposal) -> Result<SafeTxHash, LendsafeError> {
        let tx_hash = proposal.transaction_hash;
        if proposal.status != ProposalStatus::PendingSignatures || !proposal.signatures.is_empty() {
            return Err(LendsafeError::ProposalNotPending { tx_hash: tx_hash.to_string(), status: proposal.status.to_string() });
        }
        self.storage.insert_proposal(proposal)?;
        info!("safe proposal submitted tx_hash={}", tx_hash);
        Ok(tx_hash)
    }

    pub fn get(&self, tx_hash: &SafeTxHash) -> Result<SafeTransactionProposal, LendsafeError> {
        self.storage.get_proposal(tx_hash)?.ok_or_else(|| LendsafeError::ProposalNotFound(tx_hash.to_string()))
    }

    pub fn add_signature(&self, tx_hash: &SafeTxHash, signer: &str, signature: &[u8]) -> Result<QuorumProgress, LendsafeError> {
        self.add_signature_at(tx_hash, signer, signature, now_nanos())
    }

    /// Accepts the `0x`-prefixed hex string wallets return from `eth_signTypedData`.
    pub fn add_signature_hex(&self, tx_hash: &SafeTxHash, signer: &str, signature_hex: &str) -> Result<QuorumProgress, LendsafeError> {
        let signature = decode_hex_prefixed(signature_hex)
            .map_err(|err| LendsafeError::InvalidSignature { reason: format!("not hex: {err}") })?;
        self.add_signature(tx_hash, signer, &signature)
    }

    /// [`Self::add_signature`] evaluated at an explicit time.
    pub fn add_signature_at(
        &self,
        tx_hash: &SafeTxHash,
        signer: &str,
        signature: &[u8],
        now_nanos: u64,
    ) -> Result<QuorumProgress, LendsafeError> {
        let signature = validate_signature_bytes(signature)?;
        let signer = parse_address("signer", signer)?;

        let mut outcome = None;
        self.storage.update_proposal(tx_hash, &mut |proposal| {
            outcome = Some(add_signature(proposal, signer, signature.clone(), now_nanos));
        })?;

        match outcome {
            Some(Ok(progress)) => {
                debug!(
                    "safe signature accepted tx_hash={} signer={} current={} required={} status={}",
                    tx_hash, signer, progress.current_signatures, progress.required_signatures, progress.status
                );
                Ok(progress)
            }
            Some(Err(err)) => {
                warn!("safe signature rejected tx_hash={} signer={} error={}", tx_hash, signer, err);
                Err(err)
            }
            None => Err(LendsafeError::Message(format!("proposal update for {tx_hash} did not run"))),
        }
    }

    /// Moves every pending proposal past its expiry to `expired`. Returns the hashes that changed.
    pub fn expire_stale(&self, now_nanos: u64) -> Result<Vec<SafeTxHash>, LendsafeError> {
        let pending = self.storage.list_proposals(None, Some(ProposalStatus::PendingSignatures))?;
        let mut expired = Vec::new();
        for proposal in pending.iter().filter(|p| p.is_past_expiry(now_nanos)) {
            let mut changed = false;
            self.storage.update_proposal(&proposal.transaction_hash, &mut |p| changed = expire_if_stale(p, now_nanos))?;
            if changed {
                info!("safe proposal expired tx_hash={} expires_at_nanos={}", proposal.transaction_hash, proposal.expires_at_nanos);
                expired.push(proposal.transaction_hash);
            }
        }
        Ok(expired)
    }

    pub fn remaining_signatures(&self, tx_hash: &SafeTxHash) -> Result<u32, LendsafeError> {
        Ok(self.get(tx_hash)?.remaining_signatures())
    }
}
