pub mod quorum;
pub mod types;
pub mod validation;

pub use quorum::{add_signature, expire_if_stale, QuorumProgress};
pub use types::{Operation, ProposalStatus, SafeSignature, SafeTransactionProposal, SafeTxFields};
pub use validation::{sanitize_text, validate_pool_params, validate_signature_bytes, PoolParams, ValidatedPoolParams};
