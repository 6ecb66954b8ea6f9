//! Intake - Log transport seam
//!
//! Abstracts the durable log the pipeline reads from and the generator
//! publishes to. The pipeline only depends on the traits here; the
//! broker itself is an external collaborator.
//!
//! # Contract
//!
//! - [`LogTransport::publish`] appends a payload to a named stream and
//!   returns the [`Position`] it was assigned.
//! - [`LogTransport::subscribe`] opens a [`LogReader`] at a
//!   [`StartPosition`]; the reader yields records in non-decreasing
//!   position order within the stream. That ordering guarantee is what
//!   makes positions usable as checkpoints.
//!
//! [`MemoryLog`] implements both sides in-process and backs tests and
//! the single-process `intake run` demo.

mod error;
mod memory;
mod position;

use bytes::Bytes;

pub use error::{Result, TransportError};
pub use memory::MemoryLog;
pub use position::{Position, StreamId};

/// A raw payload plus the position the transport assigned to it
#[derive(Debug, Clone)]
pub struct RawRecord {
    /// Monotonic cursor within the stream
    pub position: Position,

    /// Opaque payload bytes
    pub payload: Bytes,
}

/// Where a subscription starts when no checkpoint exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPosition {
    /// Replay the stream from the beginning
    Earliest,
    /// Only records published after the subscription
    Latest,
    /// Resume at an explicit position
    At(Position),
}

/// Read side of the log: a cursor over one stream
///
/// `next` waits until a record is available and returns `None` only when
/// the log has been closed and fully drained. Callers bound the wait
/// with their own timeout.
#[async_trait::async_trait]
pub trait LogReader: Send {
    /// Pull the next record at or after the reader's cursor
    async fn next(&mut self) -> Result<Option<RawRecord>>;
}

/// The durable log collaborator
#[async_trait::async_trait]
pub trait LogTransport: Send + Sync {
    /// Append a payload to a stream, returning its assigned position
    async fn publish(&self, stream: &StreamId, payload: Bytes) -> Result<Position>;

    /// Open a reader over a stream starting at the given position
    async fn subscribe(&self, stream: &StreamId, start: StartPosition)
        -> Result<Box<dyn LogReader>>;
}
