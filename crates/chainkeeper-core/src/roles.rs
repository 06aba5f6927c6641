//! Role identifiers and the known-role table.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Serialize, Serializer};

use crate::keys::{self, Bytes32};

/// Role names the deployment knows about. The on-chain registry only stores
/// hashed identifiers; this table lets reports show human names, including
/// for roles that currently have no members.
pub const KNOWN_ROLE_NAMES: &[&str] = &[
    "ROLE_ADMIN",
    "TIMELOCK_ADMIN",
    "TIMELOCK_MULTISIG",
    "CONFIG_KEEPER",
    "CONTROLLER",
    "ROUTER_PLUGIN",
    "MARKET_KEEPER",
    "FEE_KEEPER",
    "ORDER_KEEPER",
    "FROZEN_ORDER_KEEPER",
    "PRICING_KEEPER",
    "LIQUIDATION_KEEPER",
    "ADL_KEEPER",
];

/// A role identifier: the hash of the role's name.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoleKey(Bytes32);

impl RoleKey {
    /// Derive the identifier for a role name. Pure: same name, same key.
    pub fn from_name(name: &str) -> Self {
        Self(keys::hash_string(name))
    }

    pub fn from_bytes(bytes: Bytes32) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &Bytes32 {
        &self.0
    }
}

impl fmt::Display for RoleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for RoleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoleKey({self})")
    }
}

impl Serialize for RoleKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Precomputed key -> name table for [`KNOWN_ROLE_NAMES`].
pub fn known_roles() -> &'static HashMap<RoleKey, &'static str> {
    static TABLE: OnceLock<HashMap<RoleKey, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| {
        KNOWN_ROLE_NAMES
            .iter()
            .map(|name| (RoleKey::from_name(name), *name))
            .collect()
    })
}
