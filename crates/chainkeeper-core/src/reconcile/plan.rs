//! Plan computation: the minimal change set between two signer sets.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::address::Address;

/// A set of canonicalized account addresses.
///
/// `BTreeSet` keeps iteration deterministic, so generated plans are
/// reproducible across runs.
pub type PrincipalSet = BTreeSet<Address>;

/// A single registry state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Add(Address),
    Remove(Address),
}

impl Operation {
    pub fn account(&self) -> &Address {
        match self {
            Operation::Add(account) | Operation::Remove(account) => account,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add(account) => write!(f, "add signer {account}"),
            Operation::Remove(account) => write!(f, "remove signer {account}"),
        }
    }
}

impl Serialize for Operation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Ordered sequence of operations that moves the observed set to the
/// desired set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationPlan {
    pub operations: Vec<Operation>,
}

impl ReconciliationPlan {
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }
}

/// Compute the minimal plan: add what is desired but absent, remove what is
/// present but undesired. Adds come before removes; the two groups target
/// disjoint accounts, so the ordering is a reproducibility convention, not a
/// correctness requirement.
pub fn reconcile(desired: &PrincipalSet, observed: &PrincipalSet) -> ReconciliationPlan {
    let mut operations = Vec::new();
    for account in desired.difference(observed) {
        operations.push(Operation::Add(account.clone()));
    }
    for account in observed.difference(desired) {
        operations.push(Operation::Remove(account.clone()));
    }
    ReconciliationPlan { operations }
}

/// Scalar reconciliation: the value to write, or `None` when the stored
/// value already matches and the write should be skipped.
pub fn reconcile_uint(current: u64, desired: u64) -> Option<u64> {
    (current != desired).then_some(desired)
}
