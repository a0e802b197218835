// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// MedicNote: prescription rendering from the command line.
//
// Entry point. Initialises logging, loads the render config and the settings
// store, and runs one render through the shared coordinator. `preview` writes
// the artifact to stdout; `download` saves it under its suggested filename.

mod data_dir;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use medicnote_core::config::{JsonSettingsStore, RenderConfig};
use medicnote_core::types::PrescriptionDraft;
use medicnote_document::RenderCoordinator;

#[derive(Parser)]
#[command(name = "medicnote")]
#[command(about = "Render prescriptions to printable PDF")]
struct Cli {
    /// Doctor/clinic settings document (defaults to the data directory)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
    /// Render config (defaults to the data directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a draft and write the PDF to stdout
    Preview {
        /// Prescription draft as JSON
        draft: PathBuf,
    },
    /// Render a draft and save it as prescription_<patient>_<date>.pdf
    Download {
        /// Prescription draft as JSON
        draft: PathBuf,
        /// Output directory
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so preview output stays a clean PDF stream.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(data_dir::default_config_path);
    let config = RenderConfig::load(&config_path)
        .with_context(|| format!("reading render config {}", config_path.display()))?;
    let settings_path = cli
        .settings
        .unwrap_or_else(data_dir::default_settings_path);
    tracing::info!(settings = %settings_path.display(), "MedicNote starting");

    let coordinator = RenderCoordinator::new(Arc::new(JsonSettingsStore::new(settings_path)), config);

    match cli.command {
        Commands::Preview { draft } => {
            let draft = read_draft(&draft)?;
            let artifact = coordinator.preview(&draft).await?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(artifact.bytes())?;
            stdout.flush()?;
        }
        Commands::Download { draft, dir } => {
            let draft = read_draft(&draft)?;
            let path = coordinator.download(&draft, &dir).await?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

fn read_draft(path: &Path) -> anyhow::Result<PrescriptionDraft> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading draft {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing draft {}", path.display()))
}
