//! `intake run` - generator and ingestion loop in one process
//!
//! Wires the synthetic generator, the in-process log, the parquet sink,
//! the file checkpoint store and the ingestion loop together. Ctrl-C
//! cancels both sides; the pipeline drains its partial batch before the
//! process exits. The exit code reflects the loop's final state.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use intake_checkpoint::FileCheckpointStore;
use intake_config::{CompressionCodec, Config, ParseErrorPolicy, StartingOffsetPolicy};
use intake_generator::{EventGenerator, GeneratorOptions};
use intake_pipeline::{IngestOptions, IngestionLoop, OnParseError, RetryPolicy};
use intake_sinks::{Compression, ParquetConfig, ParquetSink};
use intake_transport::{LogTransport, MemoryLog, Position, StartPosition, StreamId};
use tokio_util::sync::CancellationToken;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "configs/intake.toml")]
    pub config: PathBuf,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,
}

pub async fn run(args: RunArgs) -> Result<()> {
    let config = Config::from_file(&args.config)
        .with_context(|| format!("loading config from {}", args.config.display()))?;

    let level = args.log_level.as_deref().unwrap_or(&config.log.level);
    crate::init_logging(level)?;

    tracing::info!(
        config = %args.config.display(),
        stream = %config.stream.name,
        endpoint = %config.stream.bootstrap_endpoint,
        "intake starting"
    );

    let stream = StreamId::new(config.stream.name.clone());
    let log = MemoryLog::new();
    let transport: Arc<dyn LogTransport> = Arc::new(log.clone());

    let sink = Arc::new(ParquetSink::new(
        ParquetConfig::default()
            .with_path(&config.ingest.output_location)
            .with_compression(map_compression(config.ingest.compression)),
    ));
    let checkpoints = Arc::new(FileCheckpointStore::new(&config.ingest.checkpoint_location));

    let pipeline = IngestionLoop::new(
        transport.clone(),
        sink,
        checkpoints,
        stream.clone(),
        ingest_options(&config),
    );

    let generator = EventGenerator::new(
        transport,
        stream,
        GeneratorOptions {
            events_per_second: config.generator.events_per_second,
            duration: config.generator.duration(),
            content_pool: config.generator.content_pool,
            user_population: config.generator.user_population,
        },
    );

    let ct = CancellationToken::new();
    spawn_signal_handler(ct.clone());

    let generator_task = tokio::spawn(generator.run(ct.clone()));
    let pipeline_task = tokio::spawn(pipeline.run(ct.clone()));

    // When the generator is done the log closes, so the pipeline drains
    // whatever is left and stops at end-of-log
    let generator_failed = match generator_task.await? {
        Ok(summary) => {
            tracing::info!(
                events = summary.events_published,
                elapsed_ms = summary.elapsed.as_millis() as u64,
                "generator finished"
            );
            false
        }
        Err(e) => {
            tracing::error!(error = %e, "generator failed");
            true
        }
    };
    log.close();

    let summary = pipeline_task
        .await?
        .context("ingestion loop failed; restart resumes from the last checkpoint")?;

    tracing::info!(
        state = %summary.state,
        last_committed = ?summary.last_committed,
        events = summary.metrics.events_committed,
        batches = summary.metrics.batches_committed,
        parse_failures = summary.metrics.parse_failures,
        "intake finished"
    );

    if generator_failed {
        anyhow::bail!("generator terminated with an error");
    }
    Ok(())
}

/// Map config settings onto loop options
fn ingest_options(config: &Config) -> IngestOptions {
    let starting_offset = match config.ingest.starting_offset_policy {
        StartingOffsetPolicy::Earliest => StartPosition::Earliest,
        StartingOffsetPolicy::Latest => StartPosition::Latest,
        StartingOffsetPolicy::Explicit => {
            // Validation guarantees the position is present
            StartPosition::At(Position::new(config.ingest.starting_position.unwrap_or(0)))
        }
    };

    let on_parse_error = match config.ingest.on_parse_error {
        ParseErrorPolicy::Skip => OnParseError::Skip,
        ParseErrorPolicy::FailBatch => OnParseError::FailBatch,
    };

    IngestOptions {
        starting_offset,
        batch_interval: config.ingest.batch_interval(),
        max_batch_events: config.ingest.max_batch_events,
        on_parse_error,
        advance_on_empty: config.ingest.advance_on_empty,
        read_timeout: config.ingest.read_timeout(),
        run_duration: config.ingest.run_duration(),
        retry: RetryPolicy::new(config.ingest.max_retries, config.ingest.retry_backoff()),
    }
}

fn map_compression(codec: CompressionCodec) -> Compression {
    match codec {
        CompressionCodec::None => Compression::None,
        CompressionCodec::Snappy => Compression::Snappy,
        CompressionCodec::Lz4 => Compression::Lz4,
        CompressionCodec::Zstd => Compression::Zstd,
    }
}

fn spawn_signal_handler(ct: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown signal received");
            ct.cancel();
        }
    });
}
