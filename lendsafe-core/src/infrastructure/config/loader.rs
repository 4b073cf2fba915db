//! Configuration loader using Figment for layered config management.
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. TOML config file
//! 3. Environment variables (`LENDSAFE_*` prefix, `__` separates sections)

use crate::foundation::{parse_address, LendsafeError};
use crate::infrastructure::config::types::AppConfig;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use log::{debug, info};
use std::path::Path;

/// Default config file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "lendsafe.toml";

/// Environment variable prefix for config overrides.
///
/// Example: `LENDSAFE_AUTH__MAX_RETRIES` -> `auth.max_retries`
pub const ENV_PREFIX: &str = "LENDSAFE_";

const MAX_CONFIGURABLE_RETRIES: u32 = 10;

/// Load configuration from `data_dir/lendsafe.toml`, falling back to defaults and env when the file is missing.
pub fn load_config(data_dir: &Path) -> Result<AppConfig, LendsafeError> {
    load_config_from_file(&data_dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from a specific file path.
pub fn load_config_from_file(path: &Path) -> Result<AppConfig, LendsafeError> {
    info!("loading configuration path={}", path.display());
    let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));
    if path.exists() {
        figment = figment.merge(Toml::file(path));
    } else {
        debug!("configuration file missing; using defaults and env only path={}", path.display());
    }
    let figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: AppConfig = figment.extract().map_err(|e| LendsafeError::ConfigError(format!("config extraction failed: {e}")))?;
    validate(&config)?;
    debug!(
        "configuration loaded safe_address={:?} chain_id={} max_retries={} base_delay_ms={}",
        config.safe.safe_address, config.auth.chain_id, config.auth.max_retries, config.auth.base_delay_ms
    );
    Ok(config)
}

pub fn validate(config: &AppConfig) -> Result<(), LendsafeError> {
    let auth = &config.auth;
    if auth.max_retries > MAX_CONFIGURABLE_RETRIES {
        return Err(LendsafeError::ConfigError(format!("auth.max_retries {} exceeds {MAX_CONFIGURABLE_RETRIES}", auth.max_retries)));
    }
    if auth.base_delay_ms == 0 {
        return Err(LendsafeError::ConfigError("auth.base_delay_ms must be > 0".to_string()));
    }
    if auth.chain_id == 0 {
        return Err(LendsafeError::ConfigError("auth.chain_id must be > 0".to_string()));
    }
    if auth.message_domain.trim().is_empty() {
        return Err(LendsafeError::ConfigError("auth.message_domain must not be empty".to_string()));
    }
    if auth.nonce_ttl_secs == 0 {
        return Err(LendsafeError::ConfigError("auth.nonce_ttl_secs must be > 0".to_string()));
    }

    let safe = &config.safe;
    if safe.proposal_ttl_secs == 0 {
        return Err(LendsafeError::ConfigError("safe.proposal_ttl_secs must be > 0".to_string()));
    }
    for (field, value) in [("safe.safe_address", &safe.safe_address), ("safe.pool_factory_address", &safe.pool_factory_address)] {
        if let Some(value) = value {
            parse_address(field, value).map_err(|err| LendsafeError::ConfigError(err.to_string()))?;
        }
    }
    Ok(())
}
