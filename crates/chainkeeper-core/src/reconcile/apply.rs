//! Plan application against a live registry.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::plan::{Operation, ReconciliationPlan, reconcile_uint};
use crate::keys::Bytes32;
use crate::registry::{DataStore, RegistryError, Result, SignerStore};

/// An operation whose submission failed.
#[derive(Debug)]
pub struct FailedOperation {
    pub operation: Operation,
    pub error: RegistryError,
}

/// What the apply loop actually did.
#[derive(Debug, Default)]
pub struct ApplyOutcome {
    pub applied: Vec<Operation>,
    pub failed: Vec<FailedOperation>,
}

impl ApplyOutcome {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Apply a plan one operation at a time, in plan order.
///
/// Operations target disjoint accounts and are submitted independently.
/// A failed submission is recorded and the loop continues, so one bad
/// operation cannot block unrelated ones; the caller gets the full list
/// of failures to decide whether to rerun.
pub fn apply_plan(store: &dyn SignerStore, plan: &ReconciliationPlan) -> ApplyOutcome {
    let mut outcome = ApplyOutcome::default();
    for operation in plan.iter() {
        info!(%operation, "applying");
        let result = match operation {
            Operation::Add(account) => store.add_signer(account),
            Operation::Remove(account) => store.remove_signer(account),
        };
        match result {
            Ok(()) => outcome.applied.push(operation.clone()),
            Err(error) => {
                warn!(%operation, %error, "operation failed");
                outcome.failed.push(FailedOperation {
                    operation: operation.clone(),
                    error,
                });
            }
        }
    }
    outcome
}

/// Result of a compare-and-set over a named scalar.
#[derive(Debug, Clone, Serialize)]
pub struct ScalarOutcome {
    pub label: String,
    pub current: u64,
    pub desired: u64,
    pub updated: bool,
    /// Rendered write error when the set was attempted and failed.
    pub error: Option<String>,
}

impl ScalarOutcome {
    pub fn in_sync(&self) -> bool {
        self.current == self.desired
    }

    pub fn is_clean(&self) -> bool {
        self.error.is_none()
    }
}

/// Write `desired` under `key` only when the stored value differs.
///
/// With `dry_run` the read still happens and the outcome reports the
/// pending change, but nothing is written.
///
/// A failed read propagates (no safe decision without the current value);
/// a failed write is carried in the outcome like any other operation
/// failure, so the caller's report survives.
pub fn sync_uint(
    store: &dyn DataStore,
    key: Bytes32,
    desired: u64,
    label: &str,
    dry_run: bool,
) -> Result<ScalarOutcome> {
    let current = store.get_uint(key)?;
    let mut error = None;
    let updated = match reconcile_uint(current, desired) {
        Some(value) if !dry_run => {
            info!(label, current, desired = value, "updating uint");
            match store.set_uint(key, value) {
                Ok(()) => true,
                Err(e) => {
                    warn!(label, %e, "uint write failed");
                    error = Some(e.to_string());
                    false
                }
            }
        }
        Some(value) => {
            info!(label, current, desired = value, "uint differs, not written (dry run)");
            false
        }
        None => {
            debug!(label, current, "uint already at desired value");
            false
        }
    };
    Ok(ScalarOutcome {
        label: label.to_string(),
        current,
        desired,
        updated,
        error,
    })
}
