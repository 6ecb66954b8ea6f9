//! Parquet sink - time-partitioned columnar storage
//!
//! Writes committed batches to Parquet files organized by event time:
//!
//! ```text
//! {output_location}/
//! └── date=2025-06-01/
//!     └── hour=12/
//!         └── events-00000000000000001023.parquet
//! ```
//!
//! # Idempotent commits
//!
//! The file name carries the batch's high-water position. A batch
//! replayed after a crash lands on the same partition paths with the
//! same names and overwrites files with identical content, so the
//! persisted state after a replay equals the state after a single
//! commit. Distinct batches always have distinct high-water positions,
//! so no two batches ever share a file.
//!
//! Partition directories use Hive-style `key=value` names, readable by
//! Spark, DuckDB, ClickHouse, Pandas and Polars without configuration.

mod schema;
mod writer;

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{Datelike, Timelike};
use intake_events::Event;
use intake_pipeline::{Batch, SinkError, SinkWriter};

pub use schema::Compression;
use writer::write_events;

/// Configuration for the Parquet sink
#[derive(Debug, Clone)]
pub struct ParquetConfig {
    /// Base output directory
    pub path: PathBuf,

    /// Compression codec
    pub compression: Compression,
}

impl Default for ParquetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("datalake/events"),
            compression: Compression::Snappy,
        }
    }
}

impl ParquetConfig {
    /// Create config with a custom output path
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// Create config with a specific compression codec
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }
}

/// Key for one date/hour partition (UTC, from `event_time`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct PartitionKey {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
}

impl PartitionKey {
    fn for_event(event: &Event) -> Self {
        let t = event.event_time;
        Self {
            year: t.year(),
            month: t.month(),
            day: t.day(),
            hour: t.hour(),
        }
    }

    fn dir(&self, base: &std::path::Path) -> PathBuf {
        base.join(format!(
            "date={:04}-{:02}-{:02}",
            self.year, self.month, self.day
        ))
        .join(format!("hour={:02}", self.hour))
    }
}

/// Sink writing batches as partitioned Parquet files
pub struct ParquetSink {
    config: ParquetConfig,
}

impl ParquetSink {
    /// Create a sink with the given configuration
    pub fn new(config: ParquetConfig) -> Self {
        Self { config }
    }

    /// Get reference to config
    pub fn config(&self) -> &ParquetConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl SinkWriter for ParquetSink {
    async fn commit(&self, batch: &Batch) -> Result<(), SinkError> {
        // Group by partition; BTreeMap keeps output ordering stable
        let mut partitions: BTreeMap<PartitionKey, Vec<&Event>> = BTreeMap::new();
        for event in &batch.events {
            partitions
                .entry(PartitionKey::for_event(event))
                .or_default()
                .push(event);
        }

        let file_name = format!("events-{:020}.parquet", batch.high_water.offset());

        for (key, events) in partitions {
            let dir = key.dir(&self.config.path);
            std::fs::create_dir_all(&dir)?;

            let path = dir.join(&file_name);
            let bytes = write_events(&path, &events, self.config.compression)?;

            tracing::debug!(
                path = %path.display(),
                rows = events.len(),
                bytes,
                "wrote events parquet file"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "parquet_test.rs"]
mod parquet_test;
