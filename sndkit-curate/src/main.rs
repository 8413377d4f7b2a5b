//! sndkit-curate - sample tree curation tool
//!
//! Filters a tree of note samples down to one best recording per note and
//! writes a `details.json` manifest into each directory.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sndkit_common::CurateConfig;
use sndkit_curate::services::{DiskRemover, DryRunRemover, FileRemover};
use sndkit_curate::workflow::manifest_stage;
use sndkit_curate::{Pipeline, Stage};

/// Command-line arguments for sndkit-curate
#[derive(Parser, Debug)]
#[command(name = "sndkit-curate")]
#[command(about = "Deduplicate note samples and write per-directory manifests")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, global = true, env = "SNDKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Root folder of the sample tree
    #[arg(short, long, global = true, env = "SNDKIT_ROOT_FOLDER")]
    root: Option<PathBuf>,

    /// Report what would be deleted or written without touching the tree
    #[arg(long, global = true)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Delete rejected and superseded samples
    Filter,
    /// Write a manifest into every directory below the root
    Manifest,
    /// Filter, then write manifests from the surviving files
    Run,
    /// Write the manifest of a single directory with fixed metadata
    Single {
        /// Directory to describe
        #[arg(long)]
        dir: Option<PathBuf>,
        #[arg(long)]
        instrument: Option<String>,
        #[arg(long)]
        organization: Option<String>,
        #[arg(long)]
        performer: Option<String>,
    },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let (config, source) = CurateConfig::resolve(args.config.as_deref(), args.root.as_deref())
        .context("Failed to load configuration")?;

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting sndkit-curate {}", env!("CARGO_PKG_VERSION"));
    if source.is_fallback() {
        warn!("No configuration file loaded, using {}", source);
    } else {
        info!("Configuration: {}", source);
    }

    let remover: Box<dyn FileRemover> = if args.dry_run {
        Box::new(DryRunRemover::new())
    } else {
        Box::new(DiskRemover)
    };

    let stages = match args.command {
        Command::Filter => vec![Stage::Filter],
        Command::Manifest => vec![Stage::Manifest],
        Command::Run => vec![Stage::Filter, Stage::Manifest],
        Command::Single {
            dir,
            instrument,
            organization,
            performer,
        } => {
            let mut settings = config.single_directory.clone();
            if let Some(dir) = dir {
                settings.directory = dir;
            }
            if let Some(instrument) = instrument {
                settings.instrument = instrument;
            }
            if let Some(organization) = organization {
                settings.organization = organization;
            }
            if let Some(performer) = performer {
                settings.performer = performer;
            }

            let report = manifest_stage::single_directory(&config, &settings, args.dry_run)
                .context("Failed to write manifest")?;
            return Ok(if report.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            });
        }
    };

    info!("Root folder: {}", config.root_folder.display());
    let mut pipeline = Pipeline::new(config, stages, remover).context("Invalid pipeline")?;
    let summary = pipeline.run().context("Pipeline failed")?;

    Ok(if summary.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
