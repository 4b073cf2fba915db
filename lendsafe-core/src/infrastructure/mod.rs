//! Infrastructure layer: I/O and external integrations.

pub mod chain;
pub mod config;
pub mod identity;
pub mod logging;
pub mod rpc;
pub mod storage;
