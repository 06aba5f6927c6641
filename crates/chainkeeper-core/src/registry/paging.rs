//! Paginated registry reads.
//!
//! Registries expose count-then-page enumeration; this helper hides offsets
//! from callers by reading the count and then bounded pages, concatenated in
//! registry order. The registry is externally owned and unlocked, so a count
//! that drifts mid-read yields a best-effort snapshot with a warning, not an
//! error.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use super::{Result, RoleStore, SignerStore};
use crate::address::Address;
use crate::roles::RoleKey;

/// Default number of entries requested per page.
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// Flagged when an enumeration returned a different number of elements than
/// the registry's count call announced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsistencyWarning {
    pub what: String,
    pub expected: u64,
    pub actual: u64,
}

impl fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} changed during read: counted {}, read {}",
            self.what, self.expected, self.actual
        )
    }
}

/// Result of a full paginated enumeration.
#[derive(Debug, Clone)]
pub struct PagedRead<T> {
    pub items: Vec<T>,
    pub warning: Option<ConsistencyWarning>,
}

/// Read every element behind a count/page pair of calls.
///
/// `page_size` bounds each page request. A page returning fewer elements
/// than requested ends the read early (the registry shrank underneath us).
pub fn read_all<T, C, P>(what: &str, page_size: u64, count: C, page: P) -> Result<PagedRead<T>>
where
    C: Fn() -> Result<u64>,
    P: Fn(u64, u64) -> Result<Vec<T>>,
{
    let page_size = page_size.max(1);
    let total = count()?;
    // The count comes from an untrusted node; preallocate at most one page.
    let mut items: Vec<T> = Vec::with_capacity(total.min(page_size) as usize);
    let mut offset = 0;
    while offset < total {
        let limit = page_size.min(total - offset);
        let chunk = page(offset, limit)?;
        let got = chunk.len() as u64;
        items.extend(chunk);
        if got < limit {
            break;
        }
        offset += got;
    }

    let actual = items.len() as u64;
    let warning = (actual != total).then(|| {
        let w = ConsistencyWarning {
            what: what.to_string(),
            expected: total,
            actual,
        };
        warn!(%w, "inconsistent paginated read");
        w
    });
    Ok(PagedRead { items, warning })
}

/// Enumerate all authorized signers.
pub fn read_signers(store: &dyn SignerStore, page_size: u64) -> Result<PagedRead<Address>> {
    read_all(
        "signer set",
        page_size,
        || store.signer_count(),
        |offset, limit| store.signers(offset, limit),
    )
}

/// Enumerate all roles present in the registry.
pub fn read_roles(store: &dyn RoleStore, page_size: u64) -> Result<PagedRead<RoleKey>> {
    read_all(
        "role set",
        page_size,
        || store.role_count(),
        |offset, limit| store.roles(offset, limit),
    )
}

/// Enumerate all members of a role.
pub fn read_role_members(
    store: &dyn RoleStore,
    role: RoleKey,
    page_size: u64,
) -> Result<PagedRead<Address>> {
    read_all(
        &format!("members of {role}"),
        page_size,
        || store.role_member_count(role),
        |offset, limit| store.role_members(role, offset, limit),
    )
}
