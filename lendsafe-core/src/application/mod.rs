//! Application layer: orchestration across domain logic and infrastructure I/O.

pub mod auth_flow;
pub mod auth_lock;
pub mod context;
pub mod progress;
pub mod proposal_builder;
pub mod quorum_tracker;

pub use auth_flow::{AuthFlow, AuthOutcome};
pub use auth_lock::AuthLockCoordinator;
pub use context::{AppContext, Collaborators};
pub use progress::AuthProgressTracker;
pub use proposal_builder::SafeProposalBuilder;
pub use quorum_tracker::SafeQuorumTracker;
