use crate::application::auth_flow::AuthFlow;
use crate::application::auth_lock::AuthLockCoordinator;
use crate::application::progress::AuthProgressTracker;
use crate::application::proposal_builder::SafeProposalBuilder;
use crate::application::quorum_tracker::SafeQuorumTracker;
use crate::foundation::LendsafeError;
use crate::infrastructure::chain::SafeContract;
use crate::infrastructure::config::{self, AppConfig};
use crate::infrastructure::identity::{IdentityService, WalletSigner};
use crate::infrastructure::logging::init_logger;
use crate::infrastructure::storage::Storage;
use log::info;
use std::path::Path;
use std::sync::Arc;

/// External collaborators the services are wired against.
pub struct Collaborators {
    pub wallet: Arc<dyn WalletSigner>,
    pub identity: Arc<dyn IdentityService>,
    pub safe: Arc<dyn SafeContract>,
    pub storage: Arc<dyn Storage>,
}

/// Composition root: owns one instance of every service for the process.
pub struct AppContext {
    pub config: AppConfig,
    pub auth_lock: Arc<AuthLockCoordinator>,
    pub auth_progress: Arc<AuthProgressTracker>,
    pub auth_flow: Arc<AuthFlow>,
    pub proposal_builder: Arc<SafeProposalBuilder>,
    pub quorum_tracker: Arc<SafeQuorumTracker>,
    pub storage: Arc<dyn Storage>,
}

impl AppContext {
    pub fn new(config: AppConfig, collaborators: Collaborators) -> Result<Self, LendsafeError> {
        config::loader::validate(&config)?;
        let Collaborators { wallet, identity, safe, storage } = collaborators;
        storage.health_check()?;

        let auth_lock = Arc::new(AuthLockCoordinator::new());
        let auth_progress = Arc::new(AuthProgressTracker::new());
        let auth_flow = Arc::new(AuthFlow::new(
            Arc::clone(&auth_lock),
            Arc::clone(&auth_progress),
            wallet,
            identity,
            Arc::clone(&storage),
            config.auth.clone(),
        ));
        let proposal_builder = Arc::new(SafeProposalBuilder::new(safe, config.safe.clone()));
        let quorum_tracker = Arc::new(SafeQuorumTracker::new(Arc::clone(&storage)));

        info!(
            "app context ready safe_address={:?} chain_id={} max_retries={}",
            config.safe.safe_address, config.auth.chain_id, config.auth.max_retries
        );
        Ok(Self { config, auth_lock, auth_progress, auth_flow, proposal_builder, quorum_tracker, storage })
    }

    /// Loads `lendsafe.toml` from `data_dir`, installs the logger it describes, then wires the services.
    pub fn from_data_dir(data_dir: &Path, collaborators: Collaborators) -> Result<Self, LendsafeError> {
        let config = config::load_config(data_dir)?;
        init_logger(config.logging.log_dir.as_deref(), &config.logging.filters)?;
        Self::new(config, collaborators)
    }

    /// Safe address from configuration; empty when unset so the builder reports it as a configuration error.
    pub fn safe_address(&self) -> &str {
        self.config.safe.safe_address.as_deref().unwrap_or_default()
    }
}
