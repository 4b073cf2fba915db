use crate::foundation::{Address, Bytes, LendsafeError, SafeTxHash, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Operation {
    #[default]
    Call = 0,
    DelegateCall = 1,
}

impl Operation {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    #[default]
    PendingSignatures,
    ReadyForExecution,
    Expired,
    Cancelled,
}

impl ProposalStatus {
    pub fn can_transition_to(self, target: ProposalStatus) -> bool {
        use ProposalStatus::*;
        matches!((self, target), (PendingSignatures, ReadyForExecution | Expired | Cancelled))
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, ProposalStatus::PendingSignatures)
    }

    /// Ready proposals still record late signatures; expired and cancelled ones do not.
    pub fn accepts_signatures(self) -> bool {
        matches!(self, ProposalStatus::PendingSignatures | ProposalStatus::ReadyForExecution)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProposalStatus::PendingSignatures => "pending_signatures",
            ProposalStatus::ReadyForExecution => "ready_for_execution",
            ProposalStatus::Expired => "expired",
            ProposalStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The ten fields hashed by the Safe contract's `getTransactionHash`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeTxFields {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub operation: Operation,
    pub safe_tx_gas: U256,
    pub base_gas: U256,
    pub gas_price: U256,
    pub gas_token: Address,
    pub refund_receiver: Address,
    pub nonce: U256,
}

impl SafeTxFields {
    /// A plain call with zero value and gas accounting left to the executor.
    pub fn call(to: Address, data: Bytes, nonce: U256) -> Self {
        Self {
            to,
            value: U256::ZERO,
            data,
            operation: Operation::Call,
            safe_tx_gas: U256::ZERO,
            base_gas: U256::ZERO,
            gas_price: U256::ZERO,
            gas_token: Address::ZERO,
            refund_receiver: Address::ZERO,
            nonce,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeSignature {
    pub signer: Address,
    pub signature: Bytes,
    pub signed_at_nanos: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeTransactionProposal {
    pub transaction_hash: SafeTxHash,
    pub safe_address: Address,
    pub action: String,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub operation: Operation,
    pub safe_tx_gas: U256,
    pub base_gas: U256,
    pub gas_price: U256,
    pub gas_token: Address,
    pub refund_receiver: Address,
    pub nonce: U256,
    pub owners: Vec<Address>,
    pub required_signatures: u32,
    pub current_signatures: u32,
    pub signatures: Vec<SafeSignature>,
    pub status: ProposalStatus,
    pub created_at_nanos: u64,
    pub expires_at_nanos: u64,
}

impl SafeTransactionProposal {
    /// Binds `fields` to the hash the Safe contract computed for them.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        safe_address: Address,
        action: impl Into<String>,
        fields: SafeTxFields,
        transaction_hash: SafeTxHash,
        owners: Vec<Address>,
        required_signatures: u32,
        created_at_nanos: u64,
        ttl_nanos: u64,
    ) -> Self {
        let SafeTxFields { to, value, data, operation, safe_tx_gas, base_gas, gas_price, gas_token, refund_receiver, nonce } = fields;
        Self {
            transaction_hash,
            safe_address,
            action: action.into(),
            to,
            value,
            data,
            operation,
            safe_tx_gas,
            base_gas,
            gas_price,
            gas_token,
            refund_receiver,
            nonce,
            owners,
            required_signatures,
            current_signatures: 0,
            signatures: Vec::new(),
            status: ProposalStatus::PendingSignatures,
            created_at_nanos,
            expires_at_nanos: created_at_nanos.saturating_add(ttl_nanos),
        }
    }

    pub fn fields(&self) -> SafeTxFields {
        SafeTxFields {
            to: self.to,
            value: self.value,
            data: self.data.clone(),
            operation: self.operation,
            safe_tx_gas: self.safe_tx_gas,
            base_gas: self.base_gas,
            gas_price: self.gas_price,
            gas_token: self.gas_token,
            refund_receiver: self.refund_receiver,
            nonce: self.nonce,
        }
    }

    pub fn is_owner(&self, address: &Address) -> bool {
        self.owners.contains(address)
    }

    pub fn has_signed(&self, address: &Address) -> bool {
        self.signatures.iter().any(|sig| &sig.signer == address)
    }

    pub fn remaining_signatures(&self) -> u32 {
        self.required_signatures.saturating_sub(self.current_signatures)
    }

    pub fn is_past_expiry(&self, now_nanos: u64) -> bool {
        now_nanos > self.expires_at_nanos
    }

    pub fn transition_to(&mut self, target: ProposalStatus) -> Result<(), LendsafeError> {
        if !self.status.can_transition_to(target) {
            return Err(LendsafeError::InvalidStateTransition { from: self.status.to_string(), to: target.to_string() });
        }
        self.status = target;
        Ok(())
    }
}
