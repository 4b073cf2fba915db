use crate::foundation::constants::{
    DEFAULT_AUTH_NONCE_TTL_NS, DEFAULT_MAX_RETRIES, DEFAULT_PROPOSAL_TTL_NS, DEFAULT_RETRY_BASE_DELAY_MS,
};
use crate::foundation::NANOS_PER_SECOND;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub safe: SafeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub message_domain: String,
    pub message_statement: String,
    pub chain_id: u64,
    pub nonce_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
            message_domain: "app.lendsafe.xyz".to_string(),
            message_statement: "Sign in to Lendsafe. This request will not trigger a blockchain transaction or cost any gas."
                .to_string(),
            chain_id: 8453,
            nonce_ttl_secs: DEFAULT_AUTH_NONCE_TTL_NS / NANOS_PER_SECOND,
        }
    }
}

impl AuthConfig {
    pub fn nonce_ttl_nanos(&self) -> u64 {
        self.nonce_ttl_secs.saturating_mul(NANOS_PER_SECOND)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SafeConfig {
    /// Safe account that owns privileged platform actions.
    pub safe_address: Option<String>,
    /// Pool factory targeted by `createPool` proposals.
    pub pool_factory_address: Option<String>,
    pub proposal_ttl_secs: u64,
}

impl Default for SafeConfig {
    fn default() -> Self {
        Self { safe_address: None, pool_factory_address: None, proposal_ttl_secs: DEFAULT_PROPOSAL_TTL_NS / NANOS_PER_SECOND }
    }
}

impl SafeConfig {
    pub fn proposal_ttl_nanos(&self) -> u64 {
        self.proposal_ttl_secs.saturating_mul(NANOS_PER_SECOND)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: Option<String>,
    pub filters: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { log_dir: None, filters: "info".to_string() }
    }
}
