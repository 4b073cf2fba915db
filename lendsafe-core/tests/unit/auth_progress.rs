use lendsafe_core::application::AuthProgressTracker;
use lendsafe_core::domain::{AuthStep, StepStatus};

#[test]
fn walking_every_step_completes_the_attempt() {
    let tracker = AuthProgressTracker::new();
    tracker.reset_progress();
    for step in AuthStep::ALL {
        tracker.start_step(step);
        assert_eq!(tracker.current_step(), Some(step));
        tracker.complete_step(step);
    }

    let progress = tracker.snapshot();
    assert!(progress.is_complete);
    assert_eq!(progress.current_step, None);
    assert!(progress.completed_steps.contains(&AuthStep::FirebaseAuth));
    assert!(AuthStep::ALL.iter().all(|step| tracker.get_step_status(*step) == StepStatus::Completed));
}

#[test]
fn failure_clears_current_and_reports_failed() {
    let tracker = AuthProgressTracker::new();
    tracker.reset_progress();
    tracker.start_step(AuthStep::RequestSignature);
    tracker.fail_step(AuthStep::RequestSignature, "user denied message signature");

    let progress = tracker.snapshot();
    assert_eq!(progress.current_step, None);
    assert_eq!(progress.failed_step, Some(AuthStep::RequestSignature));
    assert_eq!(progress.progress_error.as_deref(), Some("user denied message signature"));
    assert!(!progress.is_complete);
    assert_eq!(tracker.get_step_status(AuthStep::RequestSignature), StepStatus::Failed);
    assert_eq!(tracker.get_step_status(AuthStep::VerifySignature), StepStatus::Pending);
}

#[test]
fn steps_are_not_order_enforced() {
    let tracker = AuthProgressTracker::new();
    tracker.start_step(AuthStep::VerifySignature);
    tracker.complete_step(AuthStep::VerifySignature);
    assert_eq!(tracker.get_step_status(AuthStep::VerifySignature), StepStatus::Completed);
    assert_eq!(tracker.get_step_status(AuthStep::GenerateMessage), StepStatus::Pending);
}
