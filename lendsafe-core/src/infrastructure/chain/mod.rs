pub mod abi;
pub mod eth_call;
pub mod traits;

pub use eth_call::{EthCallSafeContract, EthCallTransport};
pub use traits::SafeContract;
