//! Micro-batch accumulation
//!
//! Groups parsed events into time-bounded batches with an optional
//! count bound. Time is the primary boundary; the count bound is a
//! memory safety valve. Skipped records do not enter a batch but still
//! advance its high-water mark, so their positions are checkpointed
//! with the window they were read in.

use std::time::{Duration, Instant};

use intake_events::Event;
use intake_transport::Position;

use crate::batch::Batch;

/// State of the batch currently being filled
struct OpenBatch {
    events: Vec<Event>,
    high_water: Position,
    parse_failures: u64,
    opened_at: Instant,
}

impl OpenBatch {
    fn new(opened_at: Instant) -> Self {
        Self {
            events: Vec::new(),
            high_water: Position::ZERO,
            parse_failures: 0,
            opened_at,
        }
    }

    fn close(self) -> Batch {
        Batch {
            events: self.events,
            high_water: self.high_water,
            parse_failures: self.parse_failures,
        }
    }
}

/// Accumulates events into interval- or count-bounded batches
///
/// A batch opens when the first record of a window arrives, not when the
/// previous batch closes, so an idle stream produces no empty batches.
pub struct MicroBatchAccumulator {
    interval: Duration,
    max_events: Option<usize>,
    open: Option<OpenBatch>,
}

impl MicroBatchAccumulator {
    /// Create an accumulator with the given window and optional count bound
    pub fn new(interval: Duration, max_events: Option<usize>) -> Self {
        Self {
            interval,
            max_events,
            open: None,
        }
    }

    /// Admit an event read at the given position
    ///
    /// Returns the closed batch when this admission reaches the count
    /// bound.
    pub fn accept(&mut self, event: Event, position: Position) -> Option<Batch> {
        let open = self
            .open
            .get_or_insert_with(|| OpenBatch::new(Instant::now()));

        open.events.push(event);
        open.high_water = position;
        let full = self
            .max_events
            .is_some_and(|max| open.events.len() >= max);

        if full {
            self.open.take().map(OpenBatch::close)
        } else {
            None
        }
    }

    /// Note a record that was read but not admitted (parse failure)
    ///
    /// Opens a window if none is open: even a window of only skipped
    /// records must eventually close so its positions can be
    /// checkpointed past.
    pub fn record_skip(&mut self, position: Position) {
        let open = self
            .open
            .get_or_insert_with(|| OpenBatch::new(Instant::now()));
        open.parse_failures += 1;
        open.high_water = position;
    }

    /// Close the open batch if its interval has elapsed
    pub fn close_if_due(&mut self, now: Instant) -> Option<Batch> {
        let due = match &self.open {
            Some(open) => now.duration_since(open.opened_at) >= self.interval,
            None => false,
        };

        if due {
            self.open.take().map(OpenBatch::close)
        } else {
            None
        }
    }

    /// When the open batch becomes due, if one is open
    pub fn next_deadline(&self) -> Option<Instant> {
        self.open.as_ref().map(|open| open.opened_at + self.interval)
    }

    /// Close the open batch regardless of its age (shutdown flush)
    pub fn drain(&mut self) -> Option<Batch> {
        self.open.take().map(OpenBatch::close)
    }

    /// Whether a batch is currently open
    pub fn has_open_batch(&self) -> bool {
        self.open.is_some()
    }
}

#[cfg(test)]
#[path = "accumulator_test.rs"]
mod accumulator_test;
