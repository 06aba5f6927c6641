//! Chainkeeper Core Library
//!
//! Provides the domain logic for synchronizing on-chain access-control
//! state (oracle signers, scalar settings, role memberships) against a
//! declarative configuration.

pub mod address;
pub mod commands;
pub mod config;
pub mod keys;
pub mod reconcile;
pub mod registry;
pub mod report;
pub mod roles;
pub mod rpc;

/// Re-exports of commonly used types
pub mod prelude {
    // Identity
    pub use crate::address::{Address, AddressError};

    // Reconciliation
    pub use crate::reconcile::{
        ApplyOutcome, FailedOperation, Operation, PrincipalSet, ReconciliationPlan, ScalarOutcome,
        apply_plan, reconcile, reconcile_uint, sync_uint,
    };

    // Registry
    pub use crate::registry::paging::{ConsistencyWarning, PagedRead, read_all};
    pub use crate::registry::{DataStore, RegistryError, RoleStore, SignerStore};

    // Reporting
    pub use crate::report::{MemberEntry, RoleEntry, RoleReport, build_role_report};
    pub use crate::roles::{KNOWN_ROLE_NAMES, RoleKey, known_roles};

    // Configuration
    pub use crate::config::{KeeperConfig, OracleConfig, RegistryConfig, RoleAssignment};
}
