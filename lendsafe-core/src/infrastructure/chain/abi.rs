//! Solidity bindings for the contracts this crate talks to.
#![allow(clippy::too_many_arguments)]

use crate::domain::ValidatedPoolParams;
use crate::foundation::{Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

sol! {
    interface ISafe {
        function getOwners() external view returns (address[] memory);
        function getThreshold() external view returns (uint256);
        function nonce() external view returns (uint256);
        function getTransactionHash(
            address to,
            uint256 value,
            bytes calldata data,
            uint8 operation,
            uint256 safeTxGas,
            uint256 baseGas,
            uint256 gasPrice,
            address gasToken,
            address refundReceiver,
            uint256 _nonce
        ) external view returns (bytes32);
    }

    interface ILendingPoolFactory {
        function createPool(
            string calldata name,
            string calldata description,
            address asset,
            uint256 interestRateBps,
            uint256 minLoanAmount,
            uint256 maxLoanAmount,
            uint256 loanTermDays
        ) external returns (address pool);
    }
}

/// Calldata for `ILendingPoolFactory.createPool`.
pub fn encode_create_pool(params: &ValidatedPoolParams) -> Bytes {
    let call = ILendingPoolFactory::createPoolCall {
        name: params.name.clone(),
        description: params.description.clone(),
        asset: params.asset,
        interestRateBps: U256::from(params.interest_rate_bps),
        minLoanAmount: U256::from(params.min_loan_amount),
        maxLoanAmount: U256::from(params.max_loan_amount),
        loanTermDays: U256::from(params.loan_term_days),
    };
    Bytes::from(call.abi_encode())
}
