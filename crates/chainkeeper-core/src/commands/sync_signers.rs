//! Sync-signers command implementation.
//!
//! Reads the observed signer set, reconciles it against the configured one,
//! applies the plan, then compare-and-sets the minimum-signer threshold.

use serde_json::{Value, json};
use tracing::info;

use crate::config::KeeperConfig;
use crate::keys;
use crate::reconcile::{
    ApplyOutcome, FailedOperation, Operation, ReconciliationPlan, ScalarOutcome, apply_plan,
    reconcile, sync_uint,
};
use crate::registry::paging::{self, ConsistencyWarning};
use crate::registry::{DataStore, SignerStore};

/// Options for the sync-signers command
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncSignersOptions {
    /// Compute and report the plan without submitting anything.
    pub dry_run: bool,
}

/// What a sync run decided and did.
#[derive(Debug)]
pub struct SyncReport {
    pub dry_run: bool,
    pub plan: ReconciliationPlan,
    pub applied: Vec<Operation>,
    pub failed: Vec<FailedOperation>,
    pub min_signers: ScalarOutcome,
    pub warnings: Vec<ConsistencyWarning>,
}

impl SyncReport {
    /// True when every submitted operation, including the threshold
    /// write, succeeded.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.min_signers.is_clean()
    }

    /// Number of failed submissions across signer operations and the
    /// threshold write.
    pub fn failure_count(&self) -> usize {
        self.failed.len() + usize::from(self.min_signers.error.is_some())
    }

    /// True when the registry already matched the configuration.
    pub fn in_sync(&self) -> bool {
        self.plan.is_empty() && self.min_signers.in_sync()
    }

    /// JSON view for machine-readable output. Failures carry the rendered
    /// error, which is all a caller deciding whether to rerun needs.
    pub fn to_json(&self) -> Value {
        json!({
            "dry_run": self.dry_run,
            "plan": self.plan,
            "applied": self.applied,
            "failed": self
                .failed
                .iter()
                .map(|f| json!({ "operation": f.operation, "error": f.error.to_string() }))
                .collect::<Vec<_>>(),
            "min_signers": self.min_signers,
            "warnings": self.warnings,
        })
    }
}

/// Orchestrates one reconciliation run against a signer store and a data
/// store (typically the same [`crate::registry::EthRegistry`]).
pub struct SyncSignersCommand<'a> {
    signer_store: &'a dyn SignerStore,
    data_store: &'a dyn DataStore,
}

impl<'a> SyncSignersCommand<'a> {
    pub fn new(signer_store: &'a dyn SignerStore, data_store: &'a dyn DataStore) -> Self {
        Self {
            signer_store,
            data_store,
        }
    }

    pub fn execute(
        &self,
        config: &KeeperConfig,
        options: SyncSignersOptions,
    ) -> anyhow::Result<SyncReport> {
        let desired = config.oracle.desired_signers();
        info!(count = desired.len(), "desired oracle signers");

        let read = paging::read_signers(self.signer_store, config.registry.page_size)?;
        let observed = read.items.iter().cloned().collect();
        info!(count = read.items.len(), "existing oracle signers");
        let warnings: Vec<ConsistencyWarning> = read.warning.into_iter().collect();

        let plan = reconcile(&desired, &observed);
        if plan.is_empty() {
            info!("signer set already matches configuration");
        } else {
            info!(operations = plan.len(), "computed reconciliation plan");
        }

        let ApplyOutcome { applied, failed } = if options.dry_run {
            for operation in plan.iter() {
                info!(%operation, "planned (dry run)");
            }
            ApplyOutcome::default()
        } else {
            apply_plan(self.signer_store, &plan)
        };

        let min_signers = sync_uint(
            self.data_store,
            keys::min_oracle_signers(),
            config.oracle.min_signers,
            "min oracle signers",
            options.dry_run,
        )?;

        Ok(SyncReport {
            dry_run: options.dry_run,
            plan,
            applied,
            failed,
            min_signers,
            warnings,
        })
    }
}
