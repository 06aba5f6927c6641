//! Role registry introspection and operator-facing rendering.

use std::collections::HashMap;
use std::fmt::Write as _;

use serde::Serialize;
use tracing::debug;

use crate::address::Address;
use crate::registry::paging::{self, ConsistencyWarning};
use crate::registry::{Result, RoleStore};
use crate::roles::{self, RoleKey};

/// A role member with its optional configured label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberEntry {
    pub account: Address,
    pub label: Option<String>,
}

/// One role as found in the registry.
#[derive(Debug, Clone, Serialize)]
pub struct RoleEntry {
    pub key: RoleKey,
    /// Human name when the key matches the known-role table.
    pub name: Option<&'static str>,
    pub members: Vec<MemberEntry>,
}

impl RoleEntry {
    /// Known name, or the raw key for roles we have no name for.
    pub fn display_name(&self) -> String {
        match self.name {
            Some(name) => name.to_string(),
            None => self.key.to_string(),
        }
    }
}

/// Snapshot of the role registry, in registry iteration order.
#[derive(Debug, Clone, Serialize)]
pub struct RoleReport {
    pub roles: Vec<RoleEntry>,
    pub warnings: Vec<ConsistencyWarning>,
}

/// Walk the role registry: every role, every member, labels resolved from
/// the configured account assignments.
///
/// Ordering preserves registry iteration order exactly; it reflects
/// on-chain insertion history, which is what an auditor wants to see.
/// Unknown role keys are reported by raw key, not treated as errors.
pub fn build_role_report(
    store: &dyn RoleStore,
    labels: &HashMap<Address, String>,
    page_size: u64,
) -> Result<RoleReport> {
    let known = roles::known_roles();
    let mut warnings = Vec::new();

    let roles_read = paging::read_roles(store, page_size)?;
    warnings.extend(roles_read.warning);
    debug!(count = roles_read.items.len(), "enumerated roles");

    let mut entries = Vec::with_capacity(roles_read.items.len());
    for key in roles_read.items {
        let members_read = paging::read_role_members(store, key, page_size)?;
        warnings.extend(members_read.warning);
        let members = members_read
            .items
            .into_iter()
            .map(|account| MemberEntry {
                label: labels.get(&account).cloned(),
                account,
            })
            .collect();
        entries.push(RoleEntry {
            key,
            name: known.get(&key).copied(),
            members,
        });
    }

    Ok(RoleReport {
        roles: entries,
        warnings,
    })
}

/// The offline name -> key table, one role per line.
pub fn render_known_roles() -> String {
    let mut out = String::new();
    for name in roles::KNOWN_ROLE_NAMES {
        let _ = writeln!(out, "{} {}", name, RoleKey::from_name(name));
    }
    out
}

/// Indented text rendering: role name line, one member per indented line,
/// labelled members as `address (label)`.
pub fn render_text(report: &RoleReport) -> String {
    let mut out = String::new();
    for role in &report.roles {
        let _ = writeln!(out, "{}:", role.display_name());
        for member in &role.members {
            match &member.label {
                Some(label) => {
                    let _ = writeln!(out, "\t{} ({})", member.account, label);
                }
                None => {
                    let _ = writeln!(out, "\t{}", member.account);
                }
            }
        }
    }
    for warning in &report.warnings {
        let _ = writeln!(out, "warning: {warning}");
    }
    out
}
