use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Steps of one wallet-signature authentication attempt, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthStep {
    ConnectWallet,
    AcquireLock,
    GenerateMessage,
    RequestSignature,
    VerifySignature,
    FirebaseAuth,
}

impl AuthStep {
    pub const ALL: [AuthStep; 6] = [
        AuthStep::ConnectWallet,
        AuthStep::AcquireLock,
        AuthStep::GenerateMessage,
        AuthStep::RequestSignature,
        AuthStep::VerifySignature,
        AuthStep::FirebaseAuth,
    ];

    pub const FIRST: AuthStep = AuthStep::ConnectWallet;
    pub const TERMINAL: AuthStep = AuthStep::FirebaseAuth;

    pub fn as_str(self) -> &'static str {
        match self {
            AuthStep::ConnectWallet => "connect-wallet",
            AuthStep::AcquireLock => "acquire-lock",
            AuthStep::GenerateMessage => "generate-message",
            AuthStep::RequestSignature => "request-signature",
            AuthStep::VerifySignature => "verify-signature",
            AuthStep::FirebaseAuth => "firebase-auth",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Self::TERMINAL
    }
}

impl fmt::Display for AuthStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Current,
    Completed,
    Failed,
}

/// Progress of the current authentication attempt.
///
/// Transitions do not enforce step order; callers drive the sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthProgress {
    pub current_step: Option<AuthStep>,
    pub completed_steps: BTreeSet<AuthStep>,
    pub failed_step: Option<AuthStep>,
    pub progress_error: Option<String>,
    pub is_complete: bool,
}

impl AuthProgress {
    pub fn start_step(&mut self, step: AuthStep) {
        self.current_step = Some(step);
        self.failed_step = None;
        self.progress_error = None;
    }

    pub fn complete_step(&mut self, step: AuthStep) {
        self.completed_steps.insert(step);
        if step.is_terminal() {
            self.is_complete = true;
            self.current_step = None;
        }
        self.failed_step = None;
        self.progress_error = None;
    }

    pub fn fail_step(&mut self, step: AuthStep, message: impl Into<String>) {
        self.current_step = None;
        self.failed_step = Some(step);
        self.progress_error = Some(message.into());
        self.is_complete = false;
    }

    /// Clears the attempt and re-seeds `connect-wallet` as completed: a reset assumes the wallet is still connected.
    pub fn reset(&mut self) {
        self.current_step = None;
        self.failed_step = None;
        self.progress_error = None;
        self.is_complete = false;
        self.completed_steps = BTreeSet::from([AuthStep::FIRST]);
    }

    /// Precedence: failed > completed > current > pending.
    pub fn step_status(&self, step: AuthStep) -> StepStatus {
        if self.failed_step == Some(step) {
            StepStatus::Failed
        } else if self.completed_steps.contains(&step) {
            StepStatus::Completed
        } else if self.current_step == Some(step) {
            StepStatus::Current
        } else {
            StepStatus::Pending
        }
    }
}
