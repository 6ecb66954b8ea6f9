//! Tests for the Parquet sink

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use intake_events::{Device, Event, EventType};
use intake_pipeline::{Batch, SinkWriter};
use intake_transport::Position;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tempfile::tempdir;

use super::{Compression, ParquetConfig, ParquetSink};

fn event_at(n: u64, hour: u32) -> Event {
    Event {
        event_id: format!("e-{n}"),
        user_id: format!("u_{n}"),
        content_id: "m_1".into(),
        event_type: EventType::Play,
        device: Device::Tv,
        region: "US".into(),
        event_time: Utc.with_ymd_and_hms(2025, 6, 1, hour, 30, 0).unwrap(),
    }
}

fn batch(events: Vec<Event>, high_water: u64) -> Batch {
    Batch {
        events,
        high_water: Position::new(high_water),
        parse_failures: 0,
    }
}

fn sink_at(path: &Path) -> ParquetSink {
    ParquetSink::new(ParquetConfig::default().with_path(path))
}

/// All parquet files under a directory, sorted
fn parquet_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(current) = stack.pop() {
        let Ok(entries) = std::fs::read_dir(&current) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().is_some_and(|e| e == "parquet") {
                files.push(path);
            }
        }
    }
    files.sort();
    files
}

/// Total rows across all record batches in one file
fn row_count(path: &Path) -> usize {
    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(path).unwrap())
        .unwrap()
        .build()
        .unwrap();
    reader.map(|batch| batch.unwrap().num_rows()).sum()
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_defaults() {
    let config = ParquetConfig::default();
    assert_eq!(config.path, PathBuf::from("datalake/events"));
    assert_eq!(config.compression, Compression::Snappy);
}

#[test]
fn test_config_builders() {
    let config = ParquetConfig::default()
        .with_path("/data/events")
        .with_compression(Compression::Zstd);
    assert_eq!(config.path, PathBuf::from("/data/events"));
    assert_eq!(config.compression, Compression::Zstd);
}

// =============================================================================
// Commit
// =============================================================================

#[tokio::test]
async fn test_commit_writes_partitioned_file() {
    let dir = tempdir().unwrap();
    let sink = sink_at(dir.path());

    let events: Vec<Event> = (0..5).map(|n| event_at(n, 12)).collect();
    sink.commit(&batch(events, 4)).await.unwrap();

    let expected = dir
        .path()
        .join("date=2025-06-01")
        .join("hour=12")
        .join("events-00000000000000000004.parquet");
    assert!(expected.exists(), "missing {}", expected.display());
    assert_eq!(row_count(&expected), 5);
}

#[tokio::test]
async fn test_commit_round_trips_field_values() {
    let dir = tempdir().unwrap();
    let sink = sink_at(dir.path());

    let event = event_at(7, 9);
    sink.commit(&batch(vec![event.clone()], 7)).await.unwrap();

    let files = parquet_files(dir.path());
    assert_eq!(files.len(), 1);

    let mut reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&files[0]).unwrap())
        .unwrap()
        .build()
        .unwrap();
    let record_batch = reader.next().unwrap().unwrap();

    let column = |name: &str| {
        record_batch
            .column_by_name(name)
            .unwrap_or_else(|| panic!("missing column {name}"))
            .clone()
    };

    use arrow::array::{Int64Array, StringArray};
    let strings = |name: &str| {
        column(name)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap()
            .value(0)
            .to_string()
    };

    assert_eq!(strings("event_id"), "e-7");
    assert_eq!(strings("user_id"), "u_7");
    assert_eq!(strings("content_id"), "m_1");
    assert_eq!(strings("event_type"), "play");
    assert_eq!(strings("device"), "tv");
    assert_eq!(strings("region"), "US");

    let times = column("event_time");
    let times = times.as_any().downcast_ref::<Int64Array>().unwrap();
    assert_eq!(times.value(0), event.event_time.timestamp_millis());
}

#[tokio::test]
async fn test_recommit_overwrites_instead_of_appending() {
    let dir = tempdir().unwrap();
    let sink = sink_at(dir.path());

    let events: Vec<Event> = (0..8).map(|n| event_at(n, 15)).collect();
    let b = batch(events, 7);

    sink.commit(&b).await.unwrap();
    sink.commit(&b).await.unwrap();

    // Same file set, same row counts: exactly-once effect
    let files = parquet_files(dir.path());
    assert_eq!(files.len(), 1);
    assert_eq!(row_count(&files[0]), 8);
}

#[tokio::test]
async fn test_batch_spanning_hours_splits_partitions() {
    let dir = tempdir().unwrap();
    let sink = sink_at(dir.path());

    let events = vec![event_at(0, 10), event_at(1, 10), event_at(2, 11)];
    sink.commit(&batch(events, 2)).await.unwrap();

    let files = parquet_files(dir.path());
    assert_eq!(files.len(), 2);
    assert!(files[0].to_string_lossy().contains("hour=10"));
    assert!(files[1].to_string_lossy().contains("hour=11"));
    assert_eq!(row_count(&files[0]), 2);
    assert_eq!(row_count(&files[1]), 1);
}

#[tokio::test]
async fn test_distinct_batches_get_distinct_files() {
    let dir = tempdir().unwrap();
    let sink = sink_at(dir.path());

    sink.commit(&batch(vec![event_at(0, 8)], 0)).await.unwrap();
    sink.commit(&batch(vec![event_at(1, 8)], 1)).await.unwrap();

    let files = parquet_files(dir.path());
    assert_eq!(files.len(), 2, "each batch gets its own file");
}

#[tokio::test]
async fn test_empty_batch_writes_nothing() {
    let dir = tempdir().unwrap();
    let sink = sink_at(dir.path());

    sink.commit(&batch(Vec::new(), 3)).await.unwrap();
    assert!(parquet_files(dir.path()).is_empty());
}

#[tokio::test]
async fn test_compression_variants_produce_readable_files() {
    for compression in [
        Compression::None,
        Compression::Snappy,
        Compression::Lz4,
        Compression::Zstd,
    ] {
        let dir = tempdir().unwrap();
        let sink = ParquetSink::new(
            ParquetConfig::default()
                .with_path(dir.path())
                .with_compression(compression),
        );

        let events: Vec<Event> = (0..3).map(|n| event_at(n, 6)).collect();
        sink.commit(&batch(events, 2)).await.unwrap();

        let files = parquet_files(dir.path());
        assert_eq!(files.len(), 1, "compression {compression:?}");
        assert_eq!(row_count(&files[0]), 3, "compression {compression:?}");
    }
}
