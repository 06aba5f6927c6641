//! Ethereum JSON-RPC plumbing: transport and the minimal ABI codec used by
//! the registry backend.

pub mod abi;
pub mod client;

pub use client::{JsonRpcClient, RpcError};
