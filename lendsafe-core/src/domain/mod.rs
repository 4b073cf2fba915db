//! Domain layer: pure state machines and validation, no I/O.

pub mod auth;
pub mod safe;

pub use auth::{
    AuthLease, AuthLockSnapshot, AuthNonceRecord, AuthProgress, AuthSession, AuthStep, AuthenticationLock, RetryPolicy, RetryState,
    RetryTrigger, SignInMessage, StepStatus,
};
pub use safe::{
    add_signature, expire_if_stale, validate_pool_params, validate_signature_bytes, Operation, PoolParams, ProposalStatus,
    QuorumProgress, SafeSignature, SafeTransactionProposal, SafeTxFields, ValidatedPoolParams,
};
