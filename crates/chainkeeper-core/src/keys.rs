//! Deterministic key derivation for data-store entries and role identifiers.
//!
//! Keys are `keccak256(abi.encode(string))`, matching how the contracts
//! derive them on-chain, so the same name always maps to the same 32-byte
//! key and tables can be precomputed offline.

use std::sync::OnceLock;

use sha3::{Digest, Keccak256};

/// A 32-byte registry key.
pub type Bytes32 = [u8; 32];

/// Hash a name the way Solidity's `keccak256(abi.encode(string))` does:
/// a 0x20 offset word, a length word, then the bytes right-padded to a
/// word boundary.
pub fn hash_string(name: &str) -> Bytes32 {
    let bytes = name.as_bytes();
    let padded_len = bytes.len().div_ceil(32) * 32;
    let mut buf = Vec::with_capacity(64 + padded_len);
    buf.extend_from_slice(&encode_word(32));
    buf.extend_from_slice(&encode_word(bytes.len() as u64));
    buf.extend_from_slice(bytes);
    buf.resize(64 + padded_len, 0);
    Keccak256::digest(&buf).into()
}

fn encode_word(value: u64) -> Bytes32 {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Data-store key for the minimum number of oracle signers.
pub fn min_oracle_signers() -> Bytes32 {
    static KEY: OnceLock<Bytes32> = OnceLock::new();
    *KEY.get_or_init(|| hash_string("MIN_ORACLE_SIGNERS"))
}
