//! Desired-vs-observed reconciliation.
//!
//! The diff computation is a pure function over two sets; applying the
//! resulting plan is a separate pass so the diff logic is testable without
//! a live registry.

pub mod apply;
pub mod plan;

pub use apply::{ApplyOutcome, FailedOperation, ScalarOutcome, apply_plan, sync_uint};
pub use plan::{Operation, PrincipalSet, ReconciliationPlan, reconcile, reconcile_uint};
