use crate::fixtures::{addr, ProposalFixture, OUTSIDER, OWNER_A, OWNER_B, OWNER_C, TEST_SIGNATURE};
use lendsafe_core::domain::{add_signature, ProposalStatus};
use lendsafe_core::foundation::{Bytes, LendsafeError};

fn sig() -> Bytes {
    Bytes::copy_from_slice(&TEST_SIGNATURE)
}

#[test]
fn current_signatures_always_matches_signature_list() {
    let mut proposal = ProposalFixture::default().threshold(2).build();
    for (signer, now) in [(OWNER_A, 1_100), (OUTSIDER, 1_150), (OWNER_A, 1_200), (OWNER_B, 1_300), (OWNER_C, 1_400)] {
        let _ = add_signature(&mut proposal, addr(signer), sig(), now);
        assert_eq!(proposal.current_signatures as usize, proposal.signatures.len());
    }
    assert_eq!(proposal.current_signatures, 3);
    assert_eq!(proposal.status, ProposalStatus::ReadyForExecution);
}

#[test]
fn signer_casing_does_not_matter() {
    let mut proposal = ProposalFixture::default().build();
    add_signature(&mut proposal, addr(&OWNER_B.to_lowercase()), sig(), 1_100).expect("owner");
    let err = add_signature(&mut proposal, addr(OWNER_B), sig(), 1_200).unwrap_err();
    assert!(matches!(err, LendsafeError::DuplicateSignature { .. }));
}

#[test]
fn nonce_and_hash_survive_signing() {
    let mut proposal = ProposalFixture::default().threshold(1).build();
    let (hash, nonce) = (proposal.transaction_hash, proposal.nonce);
    add_signature(&mut proposal, addr(OWNER_C), sig(), 1_100).expect("owner");
    assert_eq!(proposal.transaction_hash, hash);
    assert_eq!(proposal.nonce, nonce);
}

#[test]
fn terminal_states_do_not_transition() {
    for status in [ProposalStatus::ReadyForExecution, ProposalStatus::Expired, ProposalStatus::Cancelled] {
        let targets =
            [ProposalStatus::PendingSignatures, ProposalStatus::ReadyForExecution, ProposalStatus::Expired, ProposalStatus::Cancelled];
        for target in targets {
            assert!(!status.can_transition_to(target), "{status} -> {target}");
        }
    }
}
