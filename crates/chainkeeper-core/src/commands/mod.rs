//! High-level commands for chainkeeper operations.
//!
//! This module provides the public API for orchestrating signer
//! synchronization and role reporting. These commands are designed to be
//! called by CLI frontends.

pub mod roles;
pub mod sync_signers;

pub use roles::RolesCommand;
pub use sync_signers::{SyncReport, SyncSignersCommand, SyncSignersOptions};
