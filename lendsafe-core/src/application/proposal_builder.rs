use crate::domain::{validate_pool_params, PoolParams, SafeTransactionProposal, SafeTxFields};
use crate::foundation::{now_nanos, parse_address, Address, Bytes, LendsafeError, ACTION_CREATE_POOL};
use crate::infrastructure::chain::abi::encode_create_pool;
use crate::infrastructure::chain::SafeContract;
use crate::infrastructure::config::SafeConfig;
use log::{debug, info};
use std::sync::Arc;

/// Prepares Safe proposals for privileged platform actions.
///
/// Only read-only contract queries are issued; nothing is persisted or sent on-chain.
pub struct SafeProposalBuilder {
    contract: Arc<dyn SafeContract>,
    config: SafeConfig,
}

impl SafeProposalBuilder {
    pub fn new(contract: Arc<dyn SafeContract>, config: SafeConfig) -> Self {
        Self { contract, config }
    }

    /// Builds a `createPool` proposal against the configured pool factory.
    pub async fn build(&self, params: &PoolParams, safe_address: &str) -> Result<SafeTransactionProposal, LendsafeError> {
        let validated = validate_pool_params(params)?;
        let factory = self.pool_factory()?;
        let data = encode_create_pool(&validated);
        debug!("encoded createPool name={} asset={} factory={} bytes={}", validated.name, validated.asset, factory, data.len());
        self.build_call(ACTION_CREATE_POOL, factory, data, safe_address).await
    }

    /// Builds a zero-value `CALL` proposal for arbitrary calldata.
    pub async fn build_call(
        &self,
        action: &str,
        to: Address,
        data: Bytes,
        safe_address: &str,
    ) -> Result<SafeTransactionProposal, LendsafeError> {
        let safe = self.resolve_safe(safe_address)?;

        let owners = self.contract.get_owners().await?;
        if owners.is_empty() {
            return Err(LendsafeError::ConfigError(format!("safe {safe} has no owners")));
        }
        let threshold = self.contract.get_threshold().await?;
        let required = u32::try_from(threshold)
            .map_err(|_| LendsafeError::ConfigError(format!("safe {safe} threshold {threshold} out of range")))?;
        if required == 0 {
            return Err(LendsafeError::ConfigError(format!("safe {safe} threshold is zero")));
        }
        if required as usize > owners.len() {
            return Err(LendsafeError::ConfigError(format!("safe {safe} threshold {required} exceeds owner count {}", owners.len())));
        }

        let nonce = self.contract.nonce().await?;
        let fields = SafeTxFields::call(to, data, nonce);
        let tx_hash = self.contract.get_transaction_hash(&fields).await?;

        let proposal = SafeTransactionProposal::new(
            safe,
            action,
            fields,
            tx_hash,
            owners,
            required,
            now_nanos(),
            self.config.proposal_ttl_nanos(),
        );
        info!(
            "safe proposal built action={} tx_hash={} safe={} nonce={} threshold={} owners={} expires_at_nanos={}",
            action,
            proposal.transaction_hash,
            safe,
            proposal.nonce,
            proposal.required_signatures,
            proposal.owners.len(),
            proposal.expires_at_nanos
        );
        Ok(proposal)
    }

    fn resolve_safe(&self, safe_address: &str) -> Result<Address, LendsafeError> {
        if safe_address.trim().is_empty() {
            return Err(LendsafeError::ConfigError("safe address is not configured".to_string()));
        }
        let safe = parse_address("safe_address", safe_address).map_err(|err| LendsafeError::ConfigError(err.to_string()))?;
        if safe != self.contract.address() {
            return Err(LendsafeError::ConfigError(format!(
                "safe address {safe} does not match contract binding {}",
                self.contract.address()
            )));
        }
        Ok(safe)
    }

    fn pool_factory(&self) -> Result<Address, LendsafeError> {
        let configured = self
            .config
            .pool_factory_address
            .as_deref()
            .ok_or_else(|| LendsafeError::ConfigError("safe.pool_factory_address is not configured".to_string()))?;
        parse_address("safe.pool_factory_address", configured).map_err(|err| LendsafeError::ConfigError(err.to_string()))
    }
}
