//! Declarative desired state: `chainkeeper.toml` loading.
//!
//! Addresses are canonicalized during deserialization, so a malformed entry
//! fails the load before any plan is computed or any write issued.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::reconcile::PrincipalSet;
use crate::registry::paging::DEFAULT_PAGE_SIZE;

/// Top-level configuration file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeeperConfig {
    pub registry: RegistryConfig,
    pub oracle: OracleConfig,
    #[serde(default)]
    pub roles: Vec<RoleAssignment>,
}

/// Where the registry lives and how to talk to it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistryConfig {
    pub rpc_url: String,
    /// Account submitting state changes; the node signs for it.
    pub from: Address,
    pub oracle_store: Address,
    pub data_store: Address,
    pub role_store: Address,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// Desired oracle access-control state.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OracleConfig {
    pub signers: Vec<Address>,
    pub min_signers: u64,
}

impl OracleConfig {
    /// Desired signers as a set; duplicates in the file collapse here.
    pub fn desired_signers(&self) -> PrincipalSet {
        self.signers.iter().cloned().collect()
    }
}

/// A human label for an account, used when printing role membership.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoleAssignment {
    pub account: Address,
    pub label: String,
}

/// Account -> label lookup from the configured assignments.
pub fn label_map(assignments: &[RoleAssignment]) -> HashMap<Address, String> {
    assignments
        .iter()
        .map(|a| (a.account.clone(), a.label.clone()))
        .collect()
}

/// Default config location: `<config dir>/chainkeeper/chainkeeper.toml`.
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(dir.join("chainkeeper").join("chainkeeper.toml"))
}

/// Load and validate a config file.
pub fn load(path: &Path) -> anyhow::Result<KeeperConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
