use crate::foundation::constants::{
    ECDSA_SIGNATURE_SIZE, MAX_INTEREST_RATE_BPS, MAX_LOAN_TERM_DAYS, MAX_POOL_DESCRIPTION_LENGTH, MAX_POOL_NAME_LENGTH,
    MIN_INTEREST_RATE_BPS, MIN_LOAN_TERM_DAYS, MIN_POOL_NAME_LENGTH,
};
use crate::foundation::{parse_address, Address, Bytes, LendsafeError};
use serde::{Deserialize, Serialize};

/// Raw pool-creation request as submitted by an admin.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolParams {
    pub name: String,
    pub description: String,
    pub asset: String,
    pub interest_rate_bps: u32,
    pub min_loan_amount: u128,
    pub max_loan_amount: u128,
    pub loan_term_days: u32,
}

/// Pool parameters after range checks and free-text sanitization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedPoolParams {
    pub name: String,
    pub description: String,
    pub asset: Address,
    pub interest_rate_bps: u32,
    pub min_loan_amount: u128,
    pub max_loan_amount: u128,
    pub loan_term_days: u32,
}

pub fn validate_pool_params(params: &PoolParams) -> Result<ValidatedPoolParams, LendsafeError> {
    let name = sanitize_text(&params.name);
    let name_len = name.chars().count();
    if !(MIN_POOL_NAME_LENGTH..=MAX_POOL_NAME_LENGTH).contains(&name_len) {
        return Err(LendsafeError::validation(
            "name",
            format!("length {name_len} outside {MIN_POOL_NAME_LENGTH}..={MAX_POOL_NAME_LENGTH}"),
        ));
    }

    let description = sanitize_text(&params.description);
    let description_len = description.chars().count();
    if description_len > MAX_POOL_DESCRIPTION_LENGTH {
        return Err(LendsafeError::validation(
            "description",
            format!("length {description_len} exceeds {MAX_POOL_DESCRIPTION_LENGTH}"),
        ));
    }

    let asset = parse_address("asset", &params.asset)?;
    if asset == Address::ZERO {
        return Err(LendsafeError::validation("asset", "zero address"));
    }

    if !(MIN_INTEREST_RATE_BPS..=MAX_INTEREST_RATE_BPS).contains(&params.interest_rate_bps) {
        return Err(LendsafeError::validation(
            "interest_rate_bps",
            format!("{} outside {MIN_INTEREST_RATE_BPS}..={MAX_INTEREST_RATE_BPS}", params.interest_rate_bps),
        ));
    }

    if params.min_loan_amount == 0 {
        return Err(LendsafeError::validation("min_loan_amount", "must be > 0"));
    }
    if params.max_loan_amount < params.min_loan_amount {
        return Err(LendsafeError::validation(
            "max_loan_amount",
            format!("{} below min_loan_amount {}", params.max_loan_amount, params.min_loan_amount),
        ));
    }

    if !(MIN_LOAN_TERM_DAYS..=MAX_LOAN_TERM_DAYS).contains(&params.loan_term_days) {
        return Err(LendsafeError::validation(
            "loan_term_days",
            format!("{} outside {MIN_LOAN_TERM_DAYS}..={MAX_LOAN_TERM_DAYS}", params.loan_term_days),
        ));
    }

    Ok(ValidatedPoolParams {
        name,
        description,
        asset,
        interest_rate_bps: params.interest_rate_bps,
        min_loan_amount: params.min_loan_amount,
        max_loan_amount: params.max_loan_amount,
        loan_term_days: params.loan_term_days,
    })
}

/// Drops control characters and markup brackets, collapses whitespace runs, trims.
pub fn sanitize_text(input: &str) -> String {
    input
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|c| !c.is_control() && !matches!(c, '<' | '>'))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Owner signatures are 65-byte `r || s || v` ECDSA signatures.
pub fn validate_signature_bytes(signature: &[u8]) -> Result<Bytes, LendsafeError> {
    if signature.len() != ECDSA_SIGNATURE_SIZE {
        return Err(LendsafeError::InvalidSignature {
            reason: format!("expected {ECDSA_SIGNATURE_SIZE} bytes, got {}", signature.len()),
        });
    }
    if signature.iter().all(|b| *b == 0) {
        return Err(LendsafeError::InvalidSignature { reason: "all-zero signature".to_string() });
    }
    Ok(Bytes::copy_from_slice(signature))
}
