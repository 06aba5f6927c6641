//! Canonical account identity.
//!
//! Every address entering the system (config, registry reads, ABI decoding)
//! is normalized to its EIP-55 checksummed form before comparison. Mixing
//! representations would make set-difference computations silently wrong, so
//! the canonical form is enforced by construction.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};
use thiserror::Error;

/// Errors from parsing an account address.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("address must start with 0x: {0:?}")]
    MissingPrefix(String),
    #[error("address must be 40 hex characters, got {0}")]
    BadLength(usize),
    #[error("address contains non-hex character {0:?}")]
    BadCharacter(char),
}

/// An EIP-55 checksummed account address.
///
/// Equality and ordering operate on the canonical string, which is safe
/// because construction always checksums.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(String);

impl Address {
    /// Parse and canonicalize an address from any-case hex input.
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let hex_part = input
            .strip_prefix("0x")
            .ok_or_else(|| AddressError::MissingPrefix(input.to_string()))?;
        if hex_part.len() != 40 {
            return Err(AddressError::BadLength(hex_part.len()));
        }
        if let Some(bad) = hex_part.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(AddressError::BadCharacter(bad));
        }
        Ok(Self(checksum(&hex_part.to_ascii_lowercase())))
    }

    /// Construct from raw bytes (e.g. ABI-decoded call results).
    pub fn from_bytes(bytes: &[u8; 20]) -> Self {
        Self(checksum(&hex::encode(bytes)))
    }

    /// The canonical `0x`-prefixed checksummed string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The raw 20-byte form, for ABI encoding.
    pub fn to_bytes(&self) -> [u8; 20] {
        let mut out = [0u8; 20];
        for (i, byte) in out.iter_mut().enumerate() {
            let high = hex_nibble(self.0.as_bytes()[2 + i * 2]);
            let low = hex_nibble(self.0.as_bytes()[3 + i * 2]);
            *byte = (high << 4) | low;
        }
        out
    }
}

// The canonical string is validated hex by construction.
fn hex_nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

/// EIP-55: uppercase a hex letter when the corresponding nibble of
/// keccak256(lowercase ascii hex) is >= 8.
fn checksum(lower_hex: &str) -> String {
    let digest = Keccak256::digest(lower_hex.as_bytes());
    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower_hex.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            digest[i / 2] >> 4
        } else {
            digest[i / 2] & 0x0f
        };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Checksum vectors from the EIP-55 specification.
    const VECTORS: &[&str] = &[
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ];

    #[test]
    fn checksummed_input_roundtrips() {
        for v in VECTORS {
            assert_eq!(Address::parse(v).unwrap().as_str(), *v);
        }
    }

    #[test]
    fn lowercase_and_uppercase_normalize_to_checksum() {
        for v in VECTORS {
            let lower = v.to_ascii_lowercase();
            let upper = format!("0x{}", v[2..].to_ascii_uppercase());
            assert_eq!(Address::parse(&lower).unwrap().as_str(), *v);
            assert_eq!(Address::parse(&upper).unwrap().as_str(), *v);
        }
    }

    #[test]
    fn mixed_case_variants_compare_equal() {
        let a = Address::parse("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        let b = Address::parse("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(
            Address::parse("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"),
            Err(AddressError::MissingPrefix(
                "5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".to_string()
            ))
        );
        assert_eq!(Address::parse("0x1234"), Err(AddressError::BadLength(4)));
        assert_eq!(
            Address::parse("0xzzzeb6053f3e94c9b9a09f33669435e7ef1beaed"),
            Err(AddressError::BadCharacter('z'))
        );
    }

    #[test]
    fn byte_roundtrip() {
        let a = Address::parse(VECTORS[0]).unwrap();
        assert_eq!(Address::from_bytes(&a.to_bytes()), a);
    }
}
