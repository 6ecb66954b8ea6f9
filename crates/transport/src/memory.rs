//! In-process log
//!
//! An append-only, per-stream log that implements both sides of the
//! transport seam. Used by tests and by the single-process demo where
//! generator and pipeline share one process instead of a broker.
//!
//! Readers are woken through a `tokio::sync::watch` channel carrying the
//! stream head, so a blocked `next()` observes every append exactly once
//! and sees the close flag without polling.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::RwLock;
use tokio::sync::watch;

use crate::error::{Result, TransportError};
use crate::position::{Position, StreamId};
use crate::{LogReader, LogTransport, RawRecord, StartPosition};

/// Head of one stream, broadcast to blocked readers
#[derive(Debug, Clone, Copy, Default)]
struct Head {
    /// Number of records appended so far
    len: u64,
    /// Set once the log is closed; readers drain and then end
    closed: bool,
}

/// State of one stream
struct StreamState {
    records: RwLock<Vec<Bytes>>,
    head_tx: watch::Sender<Head>,
}

impl StreamState {
    fn new() -> Self {
        let (head_tx, _) = watch::channel(Head::default());
        Self {
            records: RwLock::new(Vec::new()),
            head_tx,
        }
    }
}

/// In-process log transport
///
/// Cheap to clone; clones share the same underlying streams.
#[derive(Clone, Default)]
pub struct MemoryLog {
    streams: Arc<RwLock<HashMap<StreamId, Arc<StreamState>>>>,
}

impl MemoryLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in a stream (0 if the stream does not exist)
    pub fn len(&self, stream: &StreamId) -> u64 {
        match self.streams.read().get(stream) {
            Some(state) => state.head_tx.borrow().len,
            None => 0,
        }
    }

    /// Whether a stream has no records
    pub fn is_empty(&self, stream: &StreamId) -> bool {
        self.len(stream) == 0
    }

    /// Close every stream
    ///
    /// Publishing afterwards fails; blocked readers drain whatever is
    /// left and then see end-of-log.
    pub fn close(&self) {
        for state in self.streams.read().values() {
            state.head_tx.send_modify(|head| head.closed = true);
        }
    }

    /// Get or create the state for a stream
    fn stream(&self, stream: &StreamId) -> Arc<StreamState> {
        if let Some(state) = self.streams.read().get(stream) {
            return Arc::clone(state);
        }

        let mut streams = self.streams.write();
        let state = streams
            .entry(stream.clone())
            .or_insert_with(|| Arc::new(StreamState::new()));
        Arc::clone(state)
    }
}

#[async_trait::async_trait]
impl LogTransport for MemoryLog {
    async fn publish(&self, stream: &StreamId, payload: Bytes) -> Result<Position> {
        let state = self.stream(stream);

        let mut records = state.records.write();
        if state.head_tx.borrow().closed {
            return Err(TransportError::Closed(stream.clone()));
        }

        let position = Position::new(records.len() as u64);
        records.push(payload);
        state.head_tx.send_modify(|head| head.len = records.len() as u64);

        Ok(position)
    }

    async fn subscribe(
        &self,
        stream: &StreamId,
        start: StartPosition,
    ) -> Result<Box<dyn LogReader>> {
        let state = self.stream(stream);
        let head = *state.head_tx.borrow();

        let cursor = match start {
            StartPosition::Earliest => 0,
            StartPosition::Latest => head.len,
            StartPosition::At(position) => {
                if position.offset() > head.len {
                    return Err(TransportError::PositionOutOfRange {
                        stream: stream.clone(),
                        position,
                    });
                }
                position.offset()
            }
        };

        Ok(Box::new(MemoryLogReader {
            head_rx: state.head_tx.subscribe(),
            state,
            cursor,
        }))
    }
}

/// Cursor over one in-process stream
struct MemoryLogReader {
    state: Arc<StreamState>,
    head_rx: watch::Receiver<Head>,
    cursor: u64,
}

#[async_trait::async_trait]
impl LogReader for MemoryLogReader {
    async fn next(&mut self) -> Result<Option<RawRecord>> {
        loop {
            let head = *self.head_rx.borrow_and_update();

            if self.cursor < head.len {
                let payload = {
                    let records = self.state.records.read();
                    records[self.cursor as usize].clone()
                };
                let record = RawRecord {
                    position: Position::new(self.cursor),
                    payload,
                };
                self.cursor += 1;
                return Ok(Some(record));
            }

            if head.closed {
                return Ok(None);
            }

            // Sender gone means the log itself was dropped
            if self.head_rx.changed().await.is_err() {
                return Ok(None);
            }
        }
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;
