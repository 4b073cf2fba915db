#![allow(dead_code)]

pub const TEST_WALLET: &str = "0x52908400098527886E0F7030069857D2E4169EE7";
pub const TEST_SAFE_ADDRESS: &str = "0x5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a";
pub const TEST_POOL_FACTORY: &str = "0xf0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0";
pub const TEST_ASSET: &str = "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913";

pub const OWNER_A: &str = "0x0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a";
pub const OWNER_B: &str = "0x0B0B0B0B0B0B0B0B0B0B0B0B0B0B0B0B0B0B0B0B";
pub const OWNER_C: &str = "0x0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c";
pub const OUTSIDER: &str = "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee";

pub const TEST_SAFE_NONCE: u64 = 7;
pub const TEST_SIGNATURE: [u8; 65] = [7u8; 65];
