//! Word-level ABI encoding for the handful of registry calls we make.
//!
//! The registry contracts only take `address`, `uint256` and `bytes32`
//! arguments and return scalars or dynamic arrays of those, so this codec
//! stays deliberately small instead of pulling in a full ABI library.

use sha3::{Digest, Keccak256};
use thiserror::Error;

use crate::address::Address;
use crate::keys::Bytes32;

const WORD: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AbiError {
    #[error("return data too short: wanted {wanted} bytes, got {got}")]
    TooShort { wanted: usize, got: usize },
    #[error("uint value does not fit in u64")]
    Overflow,
    #[error("dynamic data offset {0} out of range")]
    BadOffset(usize),
}

/// First four bytes of `keccak256(signature)`.
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = Keccak256::digest(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Calldata builder: selector followed by 32-byte-word arguments.
pub struct CallBuilder {
    data: Vec<u8>,
}

impl CallBuilder {
    pub fn new(signature: &str) -> Self {
        let mut data = Vec::with_capacity(4 + 2 * WORD);
        data.extend_from_slice(&selector(signature));
        Self { data }
    }

    pub fn address(mut self, account: &Address) -> Self {
        let mut word = [0u8; WORD];
        word[12..].copy_from_slice(&account.to_bytes());
        self.data.extend_from_slice(&word);
        self
    }

    pub fn uint(mut self, value: u64) -> Self {
        let mut word = [0u8; WORD];
        word[24..].copy_from_slice(&value.to_be_bytes());
        self.data.extend_from_slice(&word);
        self
    }

    pub fn bytes32(mut self, value: Bytes32) -> Self {
        self.data.extend_from_slice(&value);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }
}

fn word_at(data: &[u8], offset: usize) -> Result<&[u8], AbiError> {
    data.get(offset..offset + WORD).ok_or(AbiError::TooShort {
        wanted: offset + WORD,
        got: data.len(),
    })
}

fn decode_u64_word(word: &[u8]) -> Result<u64, AbiError> {
    if word[..WORD - 8].iter().any(|b| *b != 0) {
        return Err(AbiError::Overflow);
    }
    let mut tail = [0u8; 8];
    tail.copy_from_slice(&word[WORD - 8..]);
    Ok(u64::from_be_bytes(tail))
}

/// Decode a single `uint256` return value that must fit in u64.
pub fn decode_uint(data: &[u8]) -> Result<u64, AbiError> {
    decode_u64_word(word_at(data, 0)?)
}

/// Decode a dynamic array return: head word with the data offset, then a
/// length word, then one element per word.
fn decode_array_words(data: &[u8]) -> Result<Vec<&[u8]>, AbiError> {
    let offset = decode_u64_word(word_at(data, 0)?)? as usize;
    if offset + WORD > data.len() {
        return Err(AbiError::BadOffset(offset));
    }
    let length = decode_u64_word(word_at(data, offset)?)? as usize;
    let mut words = Vec::with_capacity(length);
    for i in 0..length {
        words.push(word_at(data, offset + WORD + i * WORD)?);
    }
    Ok(words)
}

/// Decode `address[]` return data.
pub fn decode_address_array(data: &[u8]) -> Result<Vec<Address>, AbiError> {
    decode_array_words(data)?
        .into_iter()
        .map(|word| {
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(&word[12..]);
            Ok(Address::from_bytes(&bytes))
        })
        .collect()
}

/// Decode `bytes32[]` return data.
pub fn decode_bytes32_array(data: &[u8]) -> Result<Vec<Bytes32>, AbiError> {
    decode_array_words(data)?
        .into_iter()
        .map(|word| {
            let mut bytes = [0u8; WORD];
            bytes.copy_from_slice(word);
            Ok(bytes)
        })
        .collect()
}
