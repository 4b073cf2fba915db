use lendsafe_core::domain::{RetryPolicy, RetryTrigger};
use std::time::Duration;

#[test]
fn retry_schedule_runs_two_four_eight_then_stops() {
    let mut policy = RetryPolicy::default();
    let mut delays = Vec::new();
    while policy.can_retry() {
        delays.push(policy.next_retry_delay());
        policy.record_retry();
    }
    assert_eq!(delays, vec![Duration::from_secs(2), Duration::from_secs(4), Duration::from_secs(8)]);
    assert_eq!(policy.state().retry_count, 3);
}

#[test]
fn grace_period_suppresses_only_automatic_triggers_until_ended() {
    let mut policy = RetryPolicy::default();
    assert!(policy.suppresses(RetryTrigger::Automatic));
    assert!(!policy.suppresses(RetryTrigger::User));
    assert!(policy.end_grace_period());
    assert!(!policy.end_grace_period());
    assert!(!policy.suppresses(RetryTrigger::Automatic));
}
