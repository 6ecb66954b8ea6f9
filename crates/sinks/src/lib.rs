//! Intake - Sinks
//!
//! [`SinkWriter`](intake_pipeline::SinkWriter) implementations:
//!
//! - [`ParquetSink`] — time-partitioned columnar storage. One file per
//!   batch per partition, named by the batch's high-water position, so
//!   re-committing a batch overwrites the same files instead of
//!   appending duplicates.
//! - [`MemorySink`] — in-process sink keyed by `event_id`, idempotent by
//!   construction. Used by tests and for pipeline benchmarking, like a
//!   null sink that remembers what it saw.

mod memory;
mod parquet;

pub use memory::MemorySink;
pub use parquet::{Compression, ParquetConfig, ParquetSink};
