//! System-wide constants for wallet authentication and Safe coordination.

/// Nanoseconds per second (10^9).
pub const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Nanoseconds per day (24 * 60 * 60 * 10^9).
pub const NANOS_PER_DAY: u64 = 24 * 60 * 60 * NANOS_PER_SECOND;

/// Base delay before the first authentication retry.
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 2_000;

/// Maximum automatic retries of a transient authentication failure.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Lifetime of a Safe proposal before it can no longer collect signatures (7 days).
pub const DEFAULT_PROPOSAL_TTL_NS: u64 = 7 * NANOS_PER_DAY;

/// Lifetime of a sign-in nonce (5 minutes).
pub const DEFAULT_AUTH_NONCE_TTL_NS: u64 = 5 * 60 * NANOS_PER_SECOND;

/// ECDSA signature size as produced by wallets: r || s || v.
pub const ECDSA_SIGNATURE_SIZE: usize = 65;

/// Pool name length bounds (characters, after sanitization).
pub const MIN_POOL_NAME_LENGTH: usize = 3;
pub const MAX_POOL_NAME_LENGTH: usize = 64;

/// Maximum pool description length (characters, after sanitization).
pub const MAX_POOL_DESCRIPTION_LENGTH: usize = 500;

/// Interest rate bounds in basis points (0.01% .. 100%).
pub const MIN_INTEREST_RATE_BPS: u32 = 1;
pub const MAX_INTEREST_RATE_BPS: u32 = 10_000;

/// Loan term bounds in days.
pub const MIN_LOAN_TERM_DAYS: u32 = 1;
pub const MAX_LOAN_TERM_DAYS: u32 = 365;

/// Label recorded on proposals created by the pool factory action.
pub const ACTION_CREATE_POOL: &str = "create_pool";
