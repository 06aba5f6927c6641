//! Roles command implementation.

use crate::config::{self, KeeperConfig};
use crate::registry::RoleStore;
use crate::report::{RoleReport, build_role_report};

/// Builds the role registry report with labels from the configuration.
pub struct RolesCommand<'a> {
    role_store: &'a dyn RoleStore,
}

impl<'a> RolesCommand<'a> {
    pub fn new(role_store: &'a dyn RoleStore) -> Self {
        Self { role_store }
    }

    pub fn execute(&self, config: &KeeperConfig) -> anyhow::Result<RoleReport> {
        let labels = config::label_map(&config.roles);
        Ok(build_role_report(
            self.role_store,
            &labels,
            config.registry.page_size,
        )?)
    }
}
