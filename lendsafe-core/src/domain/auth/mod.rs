pub mod lock;
pub mod message;
pub mod progress;
pub mod retry;

pub use lock::{AuthLease, AuthLockSnapshot, AuthenticationLock};
pub use message::{AuthNonceRecord, AuthSession, SignInMessage};
pub use progress::{AuthProgress, AuthStep, StepStatus};
pub use retry::{RetryPolicy, RetryState, RetryTrigger};
