use crate::domain::safe::types::{ProposalStatus, SafeSignature, SafeTransactionProposal};
use crate::foundation::{Address, Bytes, LendsafeError};
use log::{debug, info};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuorumProgress {
    pub current_signatures: u32,
    pub required_signatures: u32,
    pub status: ProposalStatus,
    /// True only for the signature that moved the proposal to `ready_for_execution`.
    pub reached_quorum: bool,
}

/// Records one owner signature against `proposal`.
///
/// On rejection the proposal is untouched, except that a pending proposal found past its expiry is moved to
/// `expired` before the error is returned. Callers must persist the proposal in both cases.
pub fn add_signature(
    proposal: &mut SafeTransactionProposal,
    signer: Address,
    signature: Bytes,
    now_nanos: u64,
) -> Result<QuorumProgress, LendsafeError> {
    if !proposal.status.accepts_signatures() {
        return Err(LendsafeError::ProposalNotPending {
            tx_hash: proposal.transaction_hash.to_string(),
            status: proposal.status.to_string(),
        });
    }

    if proposal.is_past_expiry(now_nanos) {
        if proposal.status == ProposalStatus::PendingSignatures {
            proposal.transition_to(ProposalStatus::Expired)?;
            info!(
                "safe proposal expired tx_hash={} expires_at_nanos={} now_nanos={}",
                proposal.transaction_hash, proposal.expires_at_nanos, now_nanos
            );
        }
        return Err(LendsafeError::ProposalExpired {
            tx_hash: proposal.transaction_hash.to_string(),
            expired_at: proposal.expires_at_nanos,
            current_time: now_nanos,
        });
    }

    if !proposal.is_owner(&signer) {
        return Err(LendsafeError::NotAnOwner { signer: signer.to_string(), safe_address: proposal.safe_address.to_string() });
    }

    if proposal.has_signed(&signer) {
        return Err(LendsafeError::DuplicateSignature { signer: signer.to_string(), tx_hash: proposal.transaction_hash.to_string() });
    }

    proposal.signatures.push(SafeSignature { signer, signature, signed_at_nanos: now_nanos });
    proposal.current_signatures = u32::try_from(proposal.signatures.len()).unwrap_or(u32::MAX);
    debug!(
        "safe signature recorded tx_hash={} signer={} current={} required={}",
        proposal.transaction_hash, signer, proposal.current_signatures, proposal.required_signatures
    );

    let mut reached_quorum = false;
    if proposal.status == ProposalStatus::PendingSignatures && proposal.current_signatures >= proposal.required_signatures {
        proposal.transition_to(ProposalStatus::ReadyForExecution)?;
        reached_quorum = true;
        info!(
            "safe proposal reached quorum tx_hash={} signatures={} threshold={}",
            proposal.transaction_hash, proposal.current_signatures, proposal.required_signatures
        );
    }

    Ok(QuorumProgress {
        current_signatures: proposal.current_signatures,
        required_signatures: proposal.required_signatures,
        status: proposal.status,
        reached_quorum,
    })
}

/// Moves a pending proposal past its expiry to `expired`. Returns whether it changed.
pub fn expire_if_stale(proposal: &mut SafeTransactionProposal, now_nanos: u64) -> bool {
    if proposal.status == ProposalStatus::PendingSignatures && proposal.is_past_expiry(now_nanos) {
        proposal.status = ProposalStatus::Expired;
        return true;
    }
    false
}
