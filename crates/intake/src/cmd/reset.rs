//! `intake reset-checkpoint` - explicit operator reset
//!
//! The only way a checkpoint is ever deleted. The next run starts from
//! the configured starting offset instead of resuming.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use intake_checkpoint::{CheckpointStore, FileCheckpointStore};
use intake_config::Config;
use intake_transport::StreamId;

/// Arguments for the reset-checkpoint command
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "configs/intake.toml")]
    pub config: PathBuf,

    /// Stream to reset (defaults to the configured stream)
    #[arg(long)]
    pub stream: Option<String>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,
}

pub async fn run(args: ResetArgs) -> Result<()> {
    let config = Config::from_file(&args.config)
        .with_context(|| format!("loading config from {}", args.config.display()))?;

    let stream = StreamId::new(args.stream.unwrap_or(config.stream.name));
    let store = FileCheckpointStore::new(&config.ingest.checkpoint_location);

    let previous = store.load(&stream).await?;
    store.reset(&stream).await?;

    match previous {
        Some(position) => {
            tracing::info!(stream = %stream, position = %position, "checkpoint removed");
            println!("removed checkpoint for '{stream}' (was at position {position})");
        }
        None => {
            println!("no checkpoint for '{stream}', nothing to remove");
        }
    }

    Ok(())
}
