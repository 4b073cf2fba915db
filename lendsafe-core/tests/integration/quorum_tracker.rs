use crate::fixtures::{ProposalFixture, OUTSIDER, OWNER_A, OWNER_B, OWNER_C, TEST_SIGNATURE};
use lendsafe_core::application::SafeQuorumTracker;
use lendsafe_core::domain::{AuthNonceRecord, ProposalStatus, SafeTransactionProposal};
use lendsafe_core::foundation::{Address, LendsafeError, SafeTxHash};
use lendsafe_core::infrastructure::storage::{MemoryStorage, Storage};
use std::sync::Arc;

fn tracker() -> SafeQuorumTracker {
    SafeQuorumTracker::new(Arc::new(MemoryStorage::new()))
}

#[test]
fn two_of_three_reaches_quorum_once_and_records_late_signature() {
    let tracker = tracker();
    let hash = tracker.submit(ProposalFixture::default().threshold(2).build()).expect("submit");

    let first = tracker.add_signature_at(&hash, OWNER_A, &TEST_SIGNATURE, 1_100).expect("A");
    assert_eq!((first.current_signatures, first.status), (1, ProposalStatus::PendingSignatures));
    assert_eq!(tracker.remaining_signatures(&hash).unwrap(), 1);

    let second = tracker.add_signature_at(&hash, OWNER_B, &TEST_SIGNATURE, 1_200).expect("B");
    assert_eq!((second.current_signatures, second.status), (2, ProposalStatus::ReadyForExecution));
    assert!(second.reached_quorum);

    let third = tracker.add_signature_at(&hash, OWNER_C, &TEST_SIGNATURE, 1_300).expect("C");
    assert_eq!((third.current_signatures, third.status), (3, ProposalStatus::ReadyForExecution));
    assert!(!third.reached_quorum);

    let stored = tracker.get(&hash).unwrap();
    assert_eq!(stored.signatures.len(), 3);
    assert_eq!(tracker.remaining_signatures(&hash).unwrap(), 0);
}

#[test]
fn rejections_leave_stored_proposal_untouched() {
    let tracker = tracker();
    let hash = tracker.submit(ProposalFixture::default().build()).expect("submit");
    tracker.add_signature_at(&hash, OWNER_A, &TEST_SIGNATURE, 1_100).expect("A");
    let before = tracker.get(&hash).unwrap();

    let err = tracker.add_signature_at(&hash, OUTSIDER, &TEST_SIGNATURE, 1_200).unwrap_err();
    assert!(matches!(err, LendsafeError::NotAnOwner { .. }));
    let err = tracker.add_signature_at(&hash, &OWNER_A.to_uppercase().replace("0X", "0x"), &TEST_SIGNATURE, 1_200).unwrap_err();
    assert!(matches!(err, LendsafeError::DuplicateSignature { .. }));

    assert_eq!(tracker.get(&hash).unwrap(), before);
}

#[test]
fn expiry_side_effect_is_persisted_with_the_rejection() {
    let tracker = tracker();
    let hash = tracker.submit(ProposalFixture::default().window(1_000, 1_000).build()).expect("submit");

    let err = tracker.add_signature_at(&hash, OWNER_A, &TEST_SIGNATURE, 2_001).unwrap_err();
    assert!(matches!(err, LendsafeError::ProposalExpired { .. }));
    let stored = tracker.get(&hash).unwrap();
    assert_eq!(stored.status, ProposalStatus::Expired);
    assert_eq!(stored.current_signatures, 0);

    let err = tracker.add_signature_at(&hash, OWNER_B, &TEST_SIGNATURE, 2_002).unwrap_err();
    assert!(matches!(err, LendsafeError::ProposalNotPending { .. }));
}

#[test]
fn malformed_signature_rejected_before_storage() {
    let tracker = tracker();
    let missing = SafeTxHash::repeat_byte(0x99);
    let err = tracker.add_signature_at(&missing, OWNER_A, &TEST_SIGNATURE[..64], 1_100).unwrap_err();
    assert!(matches!(err, LendsafeError::InvalidSignature { .. }));
    let err = tracker.add_signature_at(&missing, "not-an-address", &TEST_SIGNATURE, 1_100).unwrap_err();
    assert!(matches!(err, LendsafeError::InvalidAddress { .. }));
    let err = tracker.add_signature_at(&missing, OWNER_A, &TEST_SIGNATURE, 1_100).unwrap_err();
    assert!(matches!(err, LendsafeError::ProposalNotFound(_)));
}

#[test]
fn duplicate_submission_rejected() {
    let tracker = tracker();
    tracker.submit(ProposalFixture::default().build()).expect("submit");
    assert!(matches!(tracker.submit(ProposalFixture::default().build()), Err(LendsafeError::ProposalExists(_))));
}

#[test]
fn expire_stale_sweeps_only_overdue_pending_proposals() {
    let tracker = tracker();
    let overdue = tracker.submit(ProposalFixture::default().hash_byte(1).window(0, 100).build()).unwrap();
    let fresh = tracker.submit(ProposalFixture::default().hash_byte(2).window(0, 10_000).build()).unwrap();
    let ready = tracker.submit(ProposalFixture::default().hash_byte(3).threshold(1).window(0, 100).build()).unwrap();
    tracker.add_signature_at(&ready, OWNER_A, &TEST_SIGNATURE, 50).unwrap();

    assert_eq!(tracker.expire_stale(500).unwrap(), vec![overdue]);
    assert_eq!(tracker.get(&overdue).unwrap().status, ProposalStatus::Expired);
    assert_eq!(tracker.get(&fresh).unwrap().status, ProposalStatus::PendingSignatures);
    assert_eq!(tracker.get(&ready).unwrap().status, ProposalStatus::ReadyForExecution);
    assert!(tracker.expire_stale(500).unwrap().is_empty());
}

#[test]
fn concurrent_signers_are_all_recorded() {
    let tracker = Arc::new(tracker());
    let hash = tracker.submit(ProposalFixture::default().threshold(2).window(0, u64::MAX / 2).build()).unwrap();

    let handles: Vec<_> = [OWNER_A, OWNER_B, OWNER_C]
        .into_iter()
        .map(|owner| {
            let tracker = Arc::clone(&tracker);
            std::thread::spawn(move || tracker.add_signature(&hash, owner, &TEST_SIGNATURE))
        })
        .collect();
    let reached: usize = handles.into_iter().map(|h| h.join().unwrap().expect("signature")).filter(|p| p.reached_quorum).count();

    let stored = tracker.get(&hash).unwrap();
    assert_eq!(stored.current_signatures, 3);
    assert_eq!(stored.status, ProposalStatus::ReadyForExecution);
    assert_eq!(reached, 1);
}

#[test]
fn hex_signatures_from_wallets_are_accepted() {
    let tracker = tracker();
    let hash = tracker.submit(ProposalFixture::default().threshold(1).window(0, u64::MAX / 2).build()).unwrap();

    let err = tracker.add_signature_hex(&hash, OWNER_A, "0xzz").unwrap_err();
    assert!(matches!(err, LendsafeError::InvalidSignature { .. }));

    let signature_hex = format!("0x{}", "07".repeat(65));
    let progress = tracker.add_signature_hex(&hash, OWNER_A, &signature_hex).expect("signature");
    assert_eq!(progress.status, ProposalStatus::ReadyForExecution);
}

/// Read-only view over a memory store: every write of an existing proposal is refused.
struct ReadOnlyStorage(MemoryStorage);

impl Storage for ReadOnlyStorage {
    fn insert_proposal(&self, proposal: SafeTransactionProposal) -> Result<(), LendsafeError> {
        self.0.insert_proposal(proposal)
    }

    fn get_proposal(&self, tx_hash: &SafeTxHash) -> Result<Option<SafeTransactionProposal>, LendsafeError> {
        self.0.get_proposal(tx_hash)
    }

    fn update_proposal(
        &self,
        tx_hash: &SafeTxHash,
        _apply: &mut dyn FnMut(&mut SafeTransactionProposal),
    ) -> Result<SafeTransactionProposal, LendsafeError> {
        Err(LendsafeError::PermissionDenied(format!("proposal {tx_hash} is read-only")))
    }

    fn list_proposals(
        &self,
        safe_address: Option<&Address>,
        status: Option<ProposalStatus>,
    ) -> Result<Vec<SafeTransactionProposal>, LendsafeError> {
        self.0.list_proposals(safe_address, status)
    }

    fn put_auth_nonce(&self, record: AuthNonceRecord) -> Result<(), LendsafeError> {
        self.0.put_auth_nonce(record)
    }

    fn take_auth_nonce(&self, wallet_address: &str) -> Result<Option<AuthNonceRecord>, LendsafeError> {
        self.0.take_auth_nonce(wallet_address)
    }
}

#[test]
fn denied_write_surfaces_unchanged_and_is_not_retryable() {
    let tracker = SafeQuorumTracker::new(Arc::new(ReadOnlyStorage(MemoryStorage::new())));
    let hash = tracker.submit(ProposalFixture::default().build()).expect("submit");

    let err = tracker.add_signature_at(&hash, OWNER_A, &TEST_SIGNATURE, 1_100).unwrap_err();
    assert!(matches!(err, LendsafeError::PermissionDenied(_)));
    assert!(!err.is_retryable());
    assert!(tracker.get(&hash).unwrap().signatures.is_empty());
}
