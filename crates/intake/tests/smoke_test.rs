//! End-to-end smoke test
//!
//! Generator → in-process log → ingestion loop → parquet sink, with a
//! file checkpoint store. Verifies the exactly-once contract at the
//! edges: every published event lands in the lake exactly once and the
//! checkpoint matches the stream head.

use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use arrow::array::Array;
use intake_checkpoint::{CheckpointStore, FileCheckpointStore};
use intake_generator::{EventGenerator, GeneratorOptions};
use intake_pipeline::{IngestOptions, IngestionLoop, RetryPolicy};
use intake_sinks::{ParquetConfig, ParquetSink};
use intake_transport::{LogReader, LogTransport, MemoryLog, Position, StartPosition, StreamId};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

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

fn event_ids_in_file(path: &Path) -> Vec<String> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(path).unwrap())
        .unwrap()
        .build()
        .unwrap();

    let mut ids = Vec::new();
    for batch in reader {
        let batch = batch.unwrap();
        let column = batch
            .column_by_name("event_id")
            .expect("event_id column")
            .clone();
        let strings = column
            .as_any()
            .downcast_ref::<arrow::array::StringArray>()
            .expect("event_id is a string column");
        for i in 0..strings.len() {
            ids.push(strings.value(i).to_string());
        }
    }
    ids
}

#[tokio::test]
async fn test_generate_ingest_and_materialize() {
    let output = TempDir::new().unwrap();
    let checkpoints_dir = TempDir::new().unwrap();

    let stream = StreamId::new("user_events");
    let log = MemoryLog::new();
    let transport: Arc<dyn LogTransport> = Arc::new(log.clone());

    // Produce a bounded burst of synthetic events
    let generator = EventGenerator::new(
        transport.clone(),
        stream.clone(),
        GeneratorOptions {
            events_per_second: 200.0,
            duration: Some(Duration::from_millis(300)),
            ..GeneratorOptions::default()
        },
    );
    let produced = generator
        .run(CancellationToken::new())
        .await
        .unwrap()
        .events_published;
    assert!(produced > 0);
    log.close();

    // Published ids, straight from the log
    let mut published_ids = HashSet::new();
    {
        let mut reader = log
            .subscribe(&stream, StartPosition::Earliest)
            .await
            .unwrap();
        while let Some(record) = reader.next().await.unwrap() {
            let event = intake_events::parse(&record.payload).unwrap();
            published_ids.insert(event.event_id);
        }
    }
    assert_eq!(published_ids.len() as u64, produced);

    // Consume everything into the lake
    let checkpoints = Arc::new(FileCheckpointStore::new(checkpoints_dir.path()));
    let pipeline = IngestionLoop::new(
        transport,
        Arc::new(ParquetSink::new(
            ParquetConfig::default().with_path(output.path()),
        )),
        checkpoints.clone(),
        stream.clone(),
        IngestOptions {
            starting_offset: StartPosition::Earliest,
            batch_interval: Duration::from_millis(50),
            read_timeout: Duration::from_millis(20),
            retry: RetryPolicy::new(3, Duration::from_millis(1)),
            ..IngestOptions::default()
        },
    );
    let summary = pipeline.run(CancellationToken::new()).await.unwrap();

    assert_eq!(summary.metrics.events_committed, produced);
    assert_eq!(summary.metrics.parse_failures, 0);

    // Exactly-once effect: the lake's id set equals the published set
    let files = parquet_files(output.path());
    assert!(!files.is_empty(), "no parquet output written");

    let mut materialized_ids = HashSet::new();
    for file in &files {
        for id in event_ids_in_file(file) {
            assert!(
                materialized_ids.insert(id),
                "duplicate event in lake: {}",
                file.display()
            );
        }
    }
    assert_eq!(materialized_ids, published_ids);

    // Partition layout is hive-style date=/hour=
    for file in &files {
        let path = file.to_string_lossy();
        assert!(path.contains("date="), "unpartitioned file {path}");
        assert!(path.contains("hour="), "unpartitioned file {path}");
    }

    // Checkpoint sits at the stream head
    assert_eq!(
        checkpoints.load(&stream).await.unwrap(),
        Some(Position::new(produced - 1))
    );
}
