//! Tests for the in-process log

use std::time::Duration;

use bytes::Bytes;

use super::MemoryLog;
use crate::{LogReader, LogTransport, Position, StartPosition, StreamId, TransportError};

fn stream() -> StreamId {
    StreamId::new("user_events")
}

async fn publish_n(log: &MemoryLog, stream: &StreamId, n: usize) {
    for i in 0..n {
        log.publish(stream, Bytes::from(format!("record-{i}")))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_publish_assigns_monotonic_positions() {
    let log = MemoryLog::new();
    let stream = stream();

    let first = log.publish(&stream, Bytes::from_static(b"a")).await.unwrap();
    let second = log.publish(&stream, Bytes::from_static(b"b")).await.unwrap();

    assert_eq!(first, Position::new(0));
    assert_eq!(second, Position::new(1));
    assert_eq!(log.len(&stream), 2);
}

#[tokio::test]
async fn test_earliest_replays_from_start() {
    let log = MemoryLog::new();
    let stream = stream();
    publish_n(&log, &stream, 3).await;

    let mut reader = log.subscribe(&stream, StartPosition::Earliest).await.unwrap();

    for expected in 0..3u64 {
        let record = reader.next().await.unwrap().unwrap();
        assert_eq!(record.position, Position::new(expected));
        assert_eq!(record.payload, Bytes::from(format!("record-{expected}")));
    }
}

#[tokio::test]
async fn test_latest_sees_only_new_records() {
    let log = MemoryLog::new();
    let stream = stream();
    publish_n(&log, &stream, 5).await;

    let mut reader = log.subscribe(&stream, StartPosition::Latest).await.unwrap();
    log.publish(&stream, Bytes::from_static(b"fresh")).await.unwrap();

    let record = reader.next().await.unwrap().unwrap();
    assert_eq!(record.position, Position::new(5));
    assert_eq!(record.payload, Bytes::from_static(b"fresh"));
}

#[tokio::test]
async fn test_explicit_start_position() {
    let log = MemoryLog::new();
    let stream = stream();
    publish_n(&log, &stream, 4).await;

    let mut reader = log
        .subscribe(&stream, StartPosition::At(Position::new(2)))
        .await
        .unwrap();

    let record = reader.next().await.unwrap().unwrap();
    assert_eq!(record.position, Position::new(2));
}

#[tokio::test]
async fn test_subscribe_beyond_head_is_rejected() {
    let log = MemoryLog::new();
    let stream = stream();
    publish_n(&log, &stream, 2).await;

    let result = log
        .subscribe(&stream, StartPosition::At(Position::new(10)))
        .await;

    assert!(matches!(
        result.err(),
        Some(TransportError::PositionOutOfRange { .. })
    ));
}

#[tokio::test]
async fn test_subscribe_at_head_waits_for_next_publish() {
    let log = MemoryLog::new();
    let stream = stream();
    publish_n(&log, &stream, 2).await;

    // Position 2 == head: valid, reader waits
    let mut reader = log
        .subscribe(&stream, StartPosition::At(Position::new(2)))
        .await
        .unwrap();

    let pending = tokio::time::timeout(Duration::from_millis(50), reader.next()).await;
    assert!(pending.is_err(), "reader should block at head");

    log.publish(&stream, Bytes::from_static(b"c")).await.unwrap();
    let record = reader.next().await.unwrap().unwrap();
    assert_eq!(record.position, Position::new(2));
}

#[tokio::test]
async fn test_blocked_reader_wakes_on_publish() {
    let log = MemoryLog::new();
    let stream = stream();
    let mut reader = log.subscribe(&stream, StartPosition::Earliest).await.unwrap();

    let publisher = {
        let log = log.clone();
        let stream = stream.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            log.publish(&stream, Bytes::from_static(b"late")).await.unwrap();
        })
    };

    let record = tokio::time::timeout(Duration::from_secs(1), reader.next())
        .await
        .expect("reader should wake")
        .unwrap()
        .unwrap();
    assert_eq!(record.payload, Bytes::from_static(b"late"));

    publisher.await.unwrap();
}

#[tokio::test]
async fn test_close_drains_then_ends() {
    let log = MemoryLog::new();
    let stream = stream();
    publish_n(&log, &stream, 2).await;

    let mut reader = log.subscribe(&stream, StartPosition::Earliest).await.unwrap();
    log.close();

    // Remaining records are still delivered
    assert!(reader.next().await.unwrap().is_some());
    assert!(reader.next().await.unwrap().is_some());

    // Then end-of-log
    assert!(reader.next().await.unwrap().is_none());
}

#[tokio::test]
async fn test_publish_after_close_fails() {
    let log = MemoryLog::new();
    let stream = stream();
    publish_n(&log, &stream, 1).await;
    log.close();

    let result = log.publish(&stream, Bytes::from_static(b"x")).await;
    assert!(matches!(result.err(), Some(TransportError::Closed(_))));
}

#[tokio::test]
async fn test_streams_are_independent() {
    let log = MemoryLog::new();
    let a = StreamId::new("a");
    let b = StreamId::new("b");

    publish_n(&log, &a, 3).await;
    publish_n(&log, &b, 1).await;

    assert_eq!(log.len(&a), 3);
    assert_eq!(log.len(&b), 1);

    // Positions restart per stream
    let mut reader = log.subscribe(&b, StartPosition::Earliest).await.unwrap();
    assert_eq!(reader.next().await.unwrap().unwrap().position, Position::new(0));
}
