mod inspect;
mod replay;

use anyhow::{Context, Result};
use cadence_core::scheduler::SyncSnapshot;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Inspect and replay scheduler snapshots", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every pending entry of a snapshot
    Inspect {
        /// Snapshot JSON file
        snapshot: PathBuf,
    },
    /// Restore a snapshot into a headless scene and step it
    Replay(replay::ReplayArgs),
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Inspect { snapshot } => {
            let snapshot = load_snapshot(snapshot)?;
            print!("{}", inspect::describe(&snapshot));
        }
        Commands::Replay(args) => {
            let outcome = replay::run(args)?;
            print!("{}", outcome.report());
        }
    }

    Ok(())
}

pub(crate) fn load_snapshot(path: &Path) -> Result<SyncSnapshot> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    SyncSnapshot::from_json(&json).with_context(|| format!("Invalid snapshot {}", path.display()))
}
