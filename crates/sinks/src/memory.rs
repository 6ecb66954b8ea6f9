//! In-memory sink
//!
//! Keeps committed events in a map keyed by `event_id`, which makes
//! re-committing a batch a natural no-op. The commit counter still moves
//! on every call, so tests can distinguish "replayed" from "never sent".

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use intake_events::Event;
use intake_pipeline::{Batch, SinkError, SinkWriter};
use parking_lot::Mutex;

#[derive(Default)]
struct MemorySinkState {
    events: Vec<Event>,
    seen: HashSet<String>,
}

/// Sink that persists into process memory, deduplicating by event id
#[derive(Default)]
pub struct MemorySink {
    state: Mutex<MemorySinkState>,
    commits: AtomicU64,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Unique events committed so far, in first-seen order
    pub fn events(&self) -> Vec<Event> {
        self.state.lock().events.clone()
    }

    /// Unique event ids committed so far, in first-seen order
    pub fn event_ids(&self) -> Vec<String> {
        self.state
            .lock()
            .events
            .iter()
            .map(|e| e.event_id.clone())
            .collect()
    }

    /// Number of unique events
    pub fn len(&self) -> usize {
        self.state.lock().events.len()
    }

    /// Whether no events were committed
    pub fn is_empty(&self) -> bool {
        self.state.lock().events.is_empty()
    }

    /// Number of commit calls, including replays
    pub fn commits(&self) -> u64 {
        self.commits.load(Ordering::Relaxed)
    }
}

#[async_trait::async_trait]
impl SinkWriter for MemorySink {
    async fn commit(&self, batch: &Batch) -> Result<(), SinkError> {
        self.commits.fetch_add(1, Ordering::Relaxed);

        let mut state = self.state.lock();
        for event in &batch.events {
            if state.seen.insert(event.event_id.clone()) {
                state.events.push(event.clone());
            }
        }
        Ok(())
    }
}
