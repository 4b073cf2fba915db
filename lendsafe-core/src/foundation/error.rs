use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ValidationFailed,
    InvalidAddress,
    InvalidSignature,
    ConfigError,
    NotAnOwner,
    DuplicateSignature,
    ProposalNotPending,
    ProposalExpired,
    ProposalNotFound,
    ProposalExists,
    PermissionDenied,
    NetworkError,
    ContractCallFailed,
    Timeout,
    StorageError,
    SerializationError,
    EncodingError,
    AbiError,
    AuthNonceMissing,
    AuthNonceExpired,
    WalletNotConnected,
    WalletMismatch,
    UserRejected,
    Cancelled,
    SessionVerificationFailed,
    InvalidStateTransition,
    Message,
}

/// Coarse classification used to decide propagation: retried locally, rejected locally, or surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transient,
    Authorization,
    Configuration,
    Validation,
    Expiration,
    Cancelled,
    UserRejected,
    Internal,
}

#[derive(Debug, Error)]
pub enum LendsafeError {
    #[error("validation failed for {field}: {reason}")]
    ValidationFailed { field: String, reason: String },

    #[error("invalid address for {field}: input={input} reason={reason}")]
    InvalidAddress { field: String, input: String, reason: String },

    #[error("malformed signature: {reason}")]
    InvalidSignature { reason: String },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("signer {signer} is not an owner of safe {safe_address}")]
    NotAnOwner { signer: String, safe_address: String },

    #[error("signer {signer} already signed proposal {tx_hash}")]
    DuplicateSignature { signer: String, tx_hash: String },

    #[error("proposal {tx_hash} is not accepting signatures (status={status})")]
    ProposalNotPending { tx_hash: String, status: String },

    #[error("proposal {tx_hash} expired at {expired_at}, current time {current_time}")]
    ProposalExpired { tx_hash: String, expired_at: u64, current_time: u64 },

    #[error("proposal not found: {0}")]
    ProposalNotFound(String),

    #[error("proposal already exists: {0}")]
    ProposalExists(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("contract call {method} failed: {details}")]
    ContractCallFailed { method: String, details: String },

    #[error("timed out during {0}")]
    Timeout(String),

    #[error("storage error during {operation}: {details}")]
    StorageError { operation: String, details: String },

    #[error("{format} serialization error: {details}")]
    SerializationError { format: String, details: String },

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("abi error: {0}")]
    AbiError(String),

    #[error("no sign-in nonce issued for {address}")]
    AuthNonceMissing { address: String },

    #[error("sign-in nonce for {address} expired at {expired_at}")]
    AuthNonceExpired { address: String, expired_at: u64 },

    #[error("wallet not connected")]
    WalletNotConnected,

    #[error("connected wallet {actual} does not match requested {expected}")]
    WalletMismatch { expected: String, actual: String },

    #[error("request rejected by user: {0}")]
    UserRejected(String),

    #[error("authentication cancelled during {step}")]
    Cancelled { step: String },

    #[error("session verification failed: {0}")]
    SessionVerificationFailed(String),

    #[error("invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("{0}")]
    Message(String),
}

impl LendsafeError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        LendsafeError::ValidationFailed { field: field.into(), reason: reason.into() }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            LendsafeError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            LendsafeError::InvalidAddress { .. } => ErrorCode::InvalidAddress,
            LendsafeError::InvalidSignature { .. } => ErrorCode::InvalidSignature,
            LendsafeError::ConfigError(_) => ErrorCode::ConfigError,
            LendsafeError::NotAnOwner { .. } => ErrorCode::NotAnOwner,
            LendsafeError::DuplicateSignature { .. } => ErrorCode::DuplicateSignature,
            LendsafeError::ProposalNotPending { .. } => ErrorCode::ProposalNotPending,
            LendsafeError::ProposalExpired { .. } => ErrorCode::ProposalExpired,
            LendsafeError::ProposalNotFound(_) => ErrorCode::ProposalNotFound,
            LendsafeError::ProposalExists(_) => ErrorCode::ProposalExists,
            LendsafeError::PermissionDenied(_) => ErrorCode::PermissionDenied,
            LendsafeError::NetworkError(_) => ErrorCode::NetworkError,
            LendsafeError::ContractCallFailed { .. } => ErrorCode::ContractCallFailed,
            LendsafeError::Timeout(_) => ErrorCode::Timeout,
            LendsafeError::StorageError { .. } => ErrorCode::StorageError,
            LendsafeError::SerializationError { .. } => ErrorCode::SerializationError,
            LendsafeError::EncodingError(_) => ErrorCode::EncodingError,
            LendsafeError::AbiError(_) => ErrorCode::AbiError,
            LendsafeError::AuthNonceMissing { .. } => ErrorCode::AuthNonceMissing,
            LendsafeError::AuthNonceExpired { .. } => ErrorCode::AuthNonceExpired,
            LendsafeError::WalletNotConnected => ErrorCode::WalletNotConnected,
            LendsafeError::WalletMismatch { .. } => ErrorCode::WalletMismatch,
            LendsafeError::UserRejected(_) => ErrorCode::UserRejected,
            LendsafeError::Cancelled { .. } => ErrorCode::Cancelled,
            LendsafeError::SessionVerificationFailed(_) => ErrorCode::SessionVerificationFailed,
            LendsafeError::InvalidStateTransition { .. } => ErrorCode::InvalidStateTransition,
            LendsafeError::Message(_) => ErrorCode::Message,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self.code() {
            ErrorCode::NetworkError | ErrorCode::ContractCallFailed | ErrorCode::Timeout => ErrorKind::Transient,
            ErrorCode::NotAnOwner
            | ErrorCode::DuplicateSignature
            | ErrorCode::PermissionDenied
            | ErrorCode::AuthNonceMissing
            | ErrorCode::WalletNotConnected
            | ErrorCode::WalletMismatch
            | ErrorCode::SessionVerificationFailed => ErrorKind::Authorization,
            ErrorCode::ConfigError => ErrorKind::Configuration,
            ErrorCode::ValidationFailed | ErrorCode::InvalidAddress | ErrorCode::InvalidSignature | ErrorCode::EncodingError => {
                ErrorKind::Validation
            }
            ErrorCode::ProposalExpired | ErrorCode::ProposalNotPending | ErrorCode::AuthNonceExpired => ErrorKind::Expiration,
            ErrorCode::Cancelled => ErrorKind::Cancelled,
            ErrorCode::UserRejected => ErrorKind::UserRejected,
            ErrorCode::ProposalNotFound
            | ErrorCode::ProposalExists
            | ErrorCode::StorageError
            | ErrorCode::SerializationError
            | ErrorCode::AbiError
            | ErrorCode::InvalidStateTransition
            | ErrorCode::Message => ErrorKind::Internal,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Transient
    }
}

impl From<hex::FromHexError> for LendsafeError {
    fn from(err: hex::FromHexError) -> Self {
        LendsafeError::EncodingError(err.to_string())
    }
}

impl From<serde_json::Error> for LendsafeError {
    fn from(err: serde_json::Error) -> Self {
        LendsafeError::SerializationError { format: "json".to_string(), details: err.to_string() }
    }
}

impl From<figment::Error> for LendsafeError {
    fn from(err: figment::Error) -> Self {
        LendsafeError::ConfigError(err.to_string())
    }
}

impl From<alloy::sol_types::Error> for LendsafeError {
    fn from(err: alloy::sol_types::Error) -> Self {
        LendsafeError::AbiError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LendsafeError>;
