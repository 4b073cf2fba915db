use crate::domain::{AuthProgress, AuthStep, StepStatus};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Step state machine for the authentication attempt that holds the lock.
pub struct AuthProgressTracker {
    progress: Mutex<AuthProgress>,
    resetting: AtomicBool,
    snapshots: watch::Sender<AuthProgress>,
}

/// Marks a reset in flight; cleared on drop, including on unwind.
struct ResetGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ResetGuard<'a> {
    fn enter(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).ok().map(|_| Self { flag })
    }
}

impl Drop for ResetGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl AuthProgressTracker {
    pub fn new() -> Self {
        let (snapshots, _) = watch::channel(AuthProgress::default());
        Self { progress: Mutex::new(AuthProgress::default()), resetting: AtomicBool::new(false), snapshots }
    }

    fn guard(&self) -> MutexGuard<'_, AuthProgress> {
        self.progress.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn mutate(&self, apply: impl FnOnce(&mut AuthProgress)) {
        let mut progress = self.guard();
        apply(&mut progress);
        self.snapshots.send_replace(progress.clone());
    }

    pub fn start_step(&self, step: AuthStep) {
        debug!("auth step started step={}", step);
        self.mutate(|p| p.start_step(step));
    }

    pub fn complete_step(&self, step: AuthStep) {
        debug!("auth step completed step={}", step);
        self.mutate(|p| p.complete_step(step));
        if step.is_terminal() {
            info!("authentication complete");
        }
    }

    pub fn fail_step(&self, step: AuthStep, message: impl Into<String>) {
        let message = message.into();
        warn!("auth step failed step={} error={}", step, message);
        self.mutate(|p| p.fail_step(step, message));
    }

    /// Clears the attempt. A reset issued while another reset is running is ignored.
    pub fn reset_progress(&self) {
        let Some(_guard) = ResetGuard::enter(&self.resetting) else {
            debug!("auth progress reset skipped; reset already in progress");
            return;
        };
        self.mutate(AuthProgress::reset);
        debug!("auth progress reset");
    }

    pub fn current_step(&self) -> Option<AuthStep> {
        self.guard().current_step
    }

    pub fn get_step_status(&self, step: AuthStep) -> StepStatus {
        self.guard().step_status(step)
    }

    pub fn is_complete(&self) -> bool {
        self.guard().is_complete
    }

    pub fn snapshot(&self) -> AuthProgress {
        self.guard().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthProgress> {
        self.snapshots.subscribe()
    }
}

impl Default for AuthProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}
