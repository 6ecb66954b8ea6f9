//! Intake - Checkpointed stream-ingestion pipeline
//!
//! # Usage
//!
//! ```bash
//! # Run the end-to-end pipeline (default)
//! intake
//! intake run --config configs/intake.toml
//!
//! # Discard a stream's checkpoint (operator reset)
//! intake reset-checkpoint
//! intake reset-checkpoint --stream user_events
//! ```

mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Intake - Checkpointed stream-ingestion pipeline
#[derive(Parser, Debug)]
#[command(name = "intake")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    // Global args that apply to run when no subcommand given
    /// Path to configuration file
    #[arg(short, long, default_value = "configs/intake.toml", global = true)]
    config: std::path::PathBuf,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run generator and ingestion loop end to end
    Run(cmd::run::RunArgs),

    /// Remove the durable checkpoint for a stream
    ResetCheckpoint(cmd::reset::ResetArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Run(args)) => cmd::run::run(args).await,
        Some(Command::ResetCheckpoint(args)) => {
            init_logging(args.log_level.as_deref().unwrap_or("info"))?;
            cmd::reset::run(args).await
        }
        // No subcommand = run the pipeline (default behavior)
        None => {
            let args = cmd::run::RunArgs {
                config: cli.config,
                log_level: cli.log_level,
            };
            cmd::run::run(args).await
        }
    }
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();

    Ok(())
}
