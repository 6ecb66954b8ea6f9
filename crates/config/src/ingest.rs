//! Consumer loop configuration
//!
//! Durations are plain integers (`*_ms`, `*_secs`) in the file; the
//! accessor methods hand out `Duration`s.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Where a fresh stream (no checkpoint) starts reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartingOffsetPolicy {
    /// Replay the stream from the beginning
    Earliest,
    /// Only records published after startup
    #[default]
    Latest,
    /// Start at `starting_position`
    Explicit,
}

/// What to do with records that fail to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorPolicy {
    /// Count and drop the record, keep going
    #[default]
    Skip,
    /// Fail the in-progress batch and stop
    FailBatch,
}

/// Parquet compression codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionCodec {
    /// No compression
    None,
    /// Snappy (fast, moderate ratio)
    #[default]
    Snappy,
    /// LZ4 (very fast, lower ratio)
    Lz4,
    /// Zstd (slower, best ratio)
    Zstd,
}

/// Settings for the ingestion loop
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Base directory for sink output
    pub output_location: PathBuf,

    /// Directory for checkpoint files
    pub checkpoint_location: PathBuf,

    /// Total running-time budget in seconds; absent = run until cancelled
    pub run_duration_secs: Option<u64>,

    /// Batch window in milliseconds
    pub batch_interval_ms: u64,

    /// Optional per-batch event count bound
    pub max_batch_events: Option<usize>,

    /// Where to start when no checkpoint exists
    pub starting_offset_policy: StartingOffsetPolicy,

    /// Start position, required when the policy is `explicit`
    pub starting_position: Option<u64>,

    /// Policy for unparseable records
    pub on_parse_error: ParseErrorPolicy,

    /// Advance the checkpoint past windows where every record was skipped
    pub advance_on_empty: bool,

    /// Cap on a single blocking read, in milliseconds
    pub read_timeout_ms: u64,

    /// Maximum retries for sink commits and transport reads
    pub max_retries: u32,

    /// Base backoff delay between retries, in milliseconds
    pub retry_backoff_ms: u64,

    /// Compression codec for the parquet sink
    pub compression: CompressionCodec,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            output_location: PathBuf::from("datalake/events"),
            checkpoint_location: PathBuf::from("checkpoints"),
            run_duration_secs: None,
            batch_interval_ms: 300_000,
            max_batch_events: None,
            starting_offset_policy: StartingOffsetPolicy::default(),
            starting_position: None,
            on_parse_error: ParseErrorPolicy::default(),
            advance_on_empty: true,
            read_timeout_ms: 1000,
            max_retries: 3,
            retry_backoff_ms: 500,
            compression: CompressionCodec::default(),
        }
    }
}

impl IngestConfig {
    /// Batch window as a Duration
    pub fn batch_interval(&self) -> Duration {
        Duration::from_millis(self.batch_interval_ms)
    }

    /// Per-read timeout as a Duration
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Retry backoff base as a Duration
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Run duration budget as a Duration, if bounded
    pub fn run_duration(&self) -> Option<Duration> {
        self.run_duration_secs.map(Duration::from_secs)
    }
}
