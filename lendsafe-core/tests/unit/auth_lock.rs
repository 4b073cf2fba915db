use lendsafe_core::application::AuthLockCoordinator;
use lendsafe_core::foundation::RequestId;

#[test]
fn second_acquire_leaves_first_holder_untouched() {
    let coordinator = AuthLockCoordinator::new();
    assert!(coordinator.acquire("0xAAAA", Some(RequestId::new("first"))));
    let before = coordinator.snapshot();

    assert!(!coordinator.acquire("0xBBBB", Some(RequestId::new("second"))));
    assert_eq!(coordinator.snapshot(), before);
    assert_eq!(before.request_id.as_ref().map(RequestId::as_str), Some("first"));
}

#[test]
fn release_restores_unlocked_state() {
    let coordinator = AuthLockCoordinator::new();
    let lease = coordinator.try_acquire("0xAAAA", None).expect("free lock");
    coordinator.release();

    let snapshot = coordinator.snapshot();
    assert!(!snapshot.is_locked);
    assert!(snapshot.wallet_address.is_none());
    assert!(snapshot.request_id.is_none());
    assert!(lease.cancellation.is_cancelled());
    assert!(coordinator.auth_wallet_address().is_none());
}

#[test]
fn generated_request_ids_are_unique() {
    let coordinator = AuthLockCoordinator::new();
    let first = coordinator.try_acquire("0xAAAA", None).expect("free lock");
    coordinator.release();
    let second = coordinator.try_acquire("0xAAAA", None).expect("free lock");
    assert_ne!(first.request_id, second.request_id);
}
