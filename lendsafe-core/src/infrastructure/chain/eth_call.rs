use crate::domain::SafeTxFields;
use crate::foundation::{Address, Bytes, LendsafeError, SafeTxHash, U256};
use crate::infrastructure::chain::abi::ISafe;
use crate::infrastructure::chain::traits::SafeContract;
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use log::{debug, warn};

/// Minimal read-only JSON-RPC surface: one `eth_call` against the latest block.
#[async_trait]
pub trait EthCallTransport: Send + Sync {
    async fn eth_call(&self, to: Address, calldata: Bytes) -> Result<Bytes, LendsafeError>;
}

/// `SafeContract` backed by raw `eth_call`s and the `ISafe` ABI.
pub struct EthCallSafeContract<T> {
    safe: Address,
    transport: T,
}

impl<T: EthCallTransport> EthCallSafeContract<T> {
    pub fn new(safe: Address, transport: T) -> Self {
        Self { safe, transport }
    }

    async fn call<C: SolCall + Send>(&self, call: C) -> Result<C::Return, LendsafeError> {
        let calldata = Bytes::from(call.abi_encode());
        debug!("eth_call start to={} method={}", self.safe, C::SIGNATURE);
        let raw = self.transport.eth_call(self.safe, calldata).await?;
        decode_returns::<C>(&raw)
    }
}

fn decode_returns<C: SolCall>(raw: &[u8]) -> Result<C::Return, LendsafeError> {
    C::abi_decode_returns(raw).map_err(|err| {
        warn!("eth_call decode failed method={} bytes={} error={}", C::SIGNATURE, raw.len(), err);
        LendsafeError::ContractCallFailed { method: C::SIGNATURE.to_string(), details: err.to_string() }
    })
}

#[async_trait]
impl<T: EthCallTransport> SafeContract for EthCallSafeContract<T> {
    fn address(&self) -> Address {
        self.safe
    }

    async fn get_owners(&self) -> Result<Vec<Address>, LendsafeError> {
        self.call(ISafe::getOwnersCall {}).await
    }

    async fn get_threshold(&self) -> Result<U256, LendsafeError> {
        self.call(ISafe::getThresholdCall {}).await
    }

    async fn nonce(&self) -> Result<U256, LendsafeError> {
        self.call(ISafe::nonceCall {}).await
    }

    async fn get_transaction_hash(&self, fields: &SafeTxFields) -> Result<SafeTxHash, LendsafeError> {
        let call = ISafe::getTransactionHashCall {
            to: fields.to,
            value: fields.value,
            data: fields.data.clone(),
            operation: fields.operation.as_u8(),
            safeTxGas: fields.safe_tx_gas,
            baseGas: fields.base_gas,
            gasPrice: fields.gas_price,
            gasToken: fields.gas_token,
            refundReceiver: fields.refund_receiver,
            _nonce: fields.nonce,
        };
        self.call(call).await
    }
}
