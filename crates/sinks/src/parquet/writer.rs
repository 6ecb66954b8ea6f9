//! Parquet file writer
//!
//! Converts events to an Arrow RecordBatch and writes one Parquet file.
//! Creating the file truncates any previous content at the same path,
//! which is what makes a batch replay an overwrite.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use intake_events::Event;
use intake_pipeline::SinkError;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use super::schema::{event_schema, events_to_record_batch, Compression};

/// Write events to a Parquet file, returning the bytes written
pub fn write_events(
    path: &Path,
    events: &[&Event],
    compression: Compression,
) -> Result<u64, SinkError> {
    if events.is_empty() {
        return Ok(0);
    }

    let schema = event_schema();
    let record_batch = events_to_record_batch(events, Arc::clone(&schema))
        .map_err(|e| SinkError::storage(format!("arrow conversion failed: {e}")))?;

    let file = File::create(path)?;
    let props = WriterProperties::builder()
        .set_compression(compression.to_parquet())
        .build();

    let mut writer = ArrowWriter::try_new(file, schema, Some(props))
        .map_err(|e| SinkError::storage(format!("parquet writer failed: {e}")))?;
    writer
        .write(&record_batch)
        .map_err(|e| SinkError::storage(format!("parquet write failed: {e}")))?;
    writer
        .close()
        .map_err(|e| SinkError::storage(format!("parquet close failed: {e}")))?;

    let bytes = std::fs::metadata(path)?.len();
    Ok(bytes)
}
