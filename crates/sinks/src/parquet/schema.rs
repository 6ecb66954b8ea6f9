//! Arrow schema for the events table
//!
//! Field order puts the common filter columns first and keeps
//! `event_time` as epoch milliseconds (UTC), which every downstream
//! reader handles without timezone configuration.

use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use intake_events::Event;

/// Parquet compression codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// No compression
    None,
    /// Snappy compression (fast, moderate ratio)
    #[default]
    Snappy,
    /// LZ4 compression (very fast, lower ratio)
    Lz4,
    /// Zstd compression (slower, best ratio)
    Zstd,
}

impl Compression {
    /// Convert to parquet compression type
    pub fn to_parquet(self) -> parquet::basic::Compression {
        match self {
            Self::None => parquet::basic::Compression::UNCOMPRESSED,
            Self::Snappy => parquet::basic::Compression::SNAPPY,
            Self::Lz4 => parquet::basic::Compression::LZ4,
            Self::Zstd => parquet::basic::Compression::ZSTD(Default::default()),
        }
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" | "uncompressed" => Some(Self::None),
            "snappy" => Some(Self::Snappy),
            "lz4" => Some(Self::Lz4),
            "zstd" => Some(Self::Zstd),
            _ => None,
        }
    }
}

/// Create the Arrow schema for events
pub fn event_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("event_time", DataType::Int64, false),
        Field::new("event_type", DataType::Utf8, false),
        Field::new("device", DataType::Utf8, false),
        Field::new("region", DataType::Utf8, false),
        Field::new("user_id", DataType::Utf8, false),
        Field::new("content_id", DataType::Utf8, false),
        Field::new("event_id", DataType::Utf8, false),
    ]))
}

/// Convert events to an Arrow RecordBatch
pub fn events_to_record_batch(
    events: &[&Event],
    schema: Arc<Schema>,
) -> Result<RecordBatch, arrow::error::ArrowError> {
    let len = events.len();

    let mut event_times = Vec::with_capacity(len);
    let mut event_types = Vec::with_capacity(len);
    let mut devices = Vec::with_capacity(len);
    let mut regions = Vec::with_capacity(len);
    let mut user_ids = Vec::with_capacity(len);
    let mut content_ids = Vec::with_capacity(len);
    let mut event_ids = Vec::with_capacity(len);

    for event in events {
        event_times.push(event.event_time.timestamp_millis());
        event_types.push(event.event_type.as_str());
        devices.push(event.device.as_str());
        regions.push(event.region.as_str());
        user_ids.push(event.user_id.as_str());
        content_ids.push(event.content_id.as_str());
        event_ids.push(event.event_id.as_str());
    }

    // Arrays must match schema field order
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(event_times)),
        Arc::new(StringArray::from(event_types)),
        Arc::new(StringArray::from(devices)),
        Arc::new(StringArray::from(regions)),
        Arc::new(StringArray::from(user_ids)),
        Arc::new(StringArray::from(content_ids)),
        Arc::new(StringArray::from(event_ids)),
    ];

    RecordBatch::try_new(schema, columns)
}
