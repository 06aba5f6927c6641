//! Registry client interfaces.
//!
//! The reconciler and reporter only depend on these traits; the Ethereum
//! JSON-RPC backend in [`eth`] is one implementation, and tests supply
//! in-memory ones.

pub mod eth;
pub mod paging;

use thiserror::Error;

use crate::address::Address;
use crate::keys::Bytes32;
use crate::roles::RoleKey;

pub use eth::EthRegistry;

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Errors from registry access.
///
/// Reads are fatal for the step that issued them (a diff over a partial
/// observed set would be wrong); writes are recoverable per operation and
/// accumulated by the apply loop.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid registry configuration: {0}")]
    Config(String),
    #[error("read of {what} failed: {source}")]
    Read {
        what: String,
        #[source]
        source: BoxedError,
    },
    #[error("write {what} failed: {source}")]
    Write {
        what: String,
        #[source]
        source: BoxedError,
    },
}

impl RegistryError {
    pub fn read(what: impl Into<String>, source: impl Into<BoxedError>) -> Self {
        Self::Read {
            what: what.into(),
            source: source.into(),
        }
    }

    pub fn write(what: impl Into<String>, source: impl Into<BoxedError>) -> Self {
        Self::Write {
            what: what.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;

/// The authorized-signer set.
pub trait SignerStore {
    fn signer_count(&self) -> Result<u64>;
    /// Signers in registry order, `offset..offset + limit`.
    fn signers(&self, offset: u64, limit: u64) -> Result<Vec<Address>>;
    fn add_signer(&self, account: &Address) -> Result<()>;
    fn remove_signer(&self, account: &Address) -> Result<()>;
}

/// Keyed scalar settings.
pub trait DataStore {
    fn get_uint(&self, key: Bytes32) -> Result<u64>;
    fn set_uint(&self, key: Bytes32, value: u64) -> Result<()>;
}

/// Role membership, read-only.
pub trait RoleStore {
    fn role_count(&self) -> Result<u64>;
    /// Roles in registry order, `offset..offset + limit`.
    fn roles(&self, offset: u64, limit: u64) -> Result<Vec<RoleKey>>;
    fn role_member_count(&self, role: RoleKey) -> Result<u64>;
    /// Members of `role` in registry order, `offset..offset + limit`.
    fn role_members(&self, role: RoleKey, offset: u64, limit: u64) -> Result<Vec<Address>>;
}
