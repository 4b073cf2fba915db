use crate::foundation::LendsafeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

pub use alloy::primitives::{Address, Bytes, B256, U256};

/// Safe transaction hash as returned by `getTransactionHash`.
pub type SafeTxHash = B256;

macro_rules! define_id_type {
    (string $name:ident) => {
        #[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Deserialize, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Deref for $name {
            type Target = str;
            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

define_id_type!(string RequestId);
define_id_type!(string SessionToken);

impl RequestId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// Parse a chain address. Hex casing is not significant; EIP-55 checksums are not enforced.
pub fn parse_address(field: &str, input: &str) -> Result<Address, LendsafeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LendsafeError::InvalidAddress { field: field.to_string(), input: input.to_string(), reason: "empty".to_string() });
    }
    Address::from_str(trimmed).map_err(|err| LendsafeError::InvalidAddress {
        field: field.to_string(),
        input: input.to_string(),
        reason: err.to_string(),
    })
}

/// Case-insensitive comparison for addresses that arrive as strings with mixed casing.
pub fn addresses_match(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
