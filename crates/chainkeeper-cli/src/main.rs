//! Chainkeeper - on-chain access-control sync
//!
//! Usage:
//!   chainkeeper sync-signers            # reconcile oracle signers + threshold
//!   chainkeeper sync-signers --dry-run  # print the plan without submitting
//!   chainkeeper roles                   # print the role registry

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chainkeeper_core::commands::{RolesCommand, SyncSignersCommand, SyncSignersOptions};
use chainkeeper_core::config;
use chainkeeper_core::registry::EthRegistry;
use chainkeeper_core::report;

#[derive(Parser)]
#[command(name = "chainkeeper")]
#[command(about = "On-chain access-control reconciliation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile on-chain oracle signers and threshold with the config
    SyncSigners {
        /// Path to chainkeeper.toml (defaults to the user config dir)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Compute and print the plan without submitting transactions
        #[arg(long)]
        dry_run: bool,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Print the role registry with known-role names and account labels
    Roles {
        /// Path to chainkeeper.toml (defaults to the user config dir)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable text
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chainkeeper=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::SyncSigners {
            config,
            dry_run,
            format,
        } => run_sync_signers(config, dry_run, format),
        Commands::Roles { config, format } => run_roles(config, format),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<chainkeeper_core::config::KeeperConfig> {
    let path = match path {
        Some(path) => path,
        None => config::default_config_path()?,
    };
    config::load(&path)
}

fn run_sync_signers(config_path: Option<PathBuf>, dry_run: bool, format: OutputFormat) -> Result<()> {
    let config = load_config(config_path)?;
    let registry = EthRegistry::from_config(&config.registry);

    let command = SyncSignersCommand::new(&registry, &registry);
    let report = command.execute(&config, SyncSignersOptions { dry_run })?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report.to_json())?),
        OutputFormat::Table => {
            if report.in_sync() {
                println!("{} signer set and threshold already in sync", style("✓").green());
            }
            for operation in report.plan.iter() {
                if dry_run {
                    println!("{} would {}", style("•").cyan(), operation);
                }
            }
            for operation in &report.applied {
                println!("{} {}", style("✓").green(), operation);
            }
            for failure in &report.failed {
                println!(
                    "{} {} failed: {}",
                    style("✗").red(),
                    failure.operation,
                    failure.error
                );
            }
            let min = &report.min_signers;
            if let Some(error) = &min.error {
                println!(
                    "{} set {} {} -> {} failed: {}",
                    style("✗").red(),
                    min.label,
                    min.current,
                    min.desired,
                    error
                );
            } else if min.updated {
                println!(
                    "{} {} {} -> {}",
                    style("✓").green(),
                    min.label,
                    min.current,
                    min.desired
                );
            } else if !min.in_sync() {
                println!(
                    "{} would set {} {} -> {}",
                    style("•").cyan(),
                    min.label,
                    min.current,
                    min.desired
                );
            }
            for warning in &report.warnings {
                println!("{} {}", style("⚠").yellow(), warning);
            }
        }
    }

    if !report.is_clean() {
        anyhow::bail!("{} operation(s) failed", report.failure_count());
    }
    Ok(())
}

fn run_roles(config_path: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let config = load_config(config_path)?;
    let registry = EthRegistry::from_config(&config.registry);

    let roles = RolesCommand::new(&registry).execute(&config)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&roles)?),
        OutputFormat::Table => {
            print!("{}", report::render_known_roles());
            println!();
            print!("{}", report::render_text(&roles));
        }
    }
    Ok(())
}
