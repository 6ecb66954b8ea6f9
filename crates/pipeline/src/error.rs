//! Pipeline error types
//!
//! The loop's error taxonomy and how each class is handled:
//! transport errors are retried with backoff, parse errors follow the
//! per-record policy, sink errors are retried up to a bound and then
//! fail the batch, checkpoint errors are immediately fatal.

use std::io;

use intake_checkpoint::CheckpointError;
use intake_events::ParseError;
use intake_transport::{Position, TransportError};
use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, IngestError>;

/// Errors from a sink commit
#[derive(Debug, Error)]
pub enum SinkError {
    /// Filesystem failure while persisting the batch
    #[error("sink I/O error: {0}")]
    Io(#[from] io::Error),

    /// Storage-layer failure (encoding, remote store, ...)
    #[error("sink storage error: {0}")]
    Storage(String),
}

impl SinkError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

/// Errors that terminate the ingestion loop
#[derive(Debug, Error)]
pub enum IngestError {
    /// Transport failure that outlived the read retry budget
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A record failed to parse while `on_parse_error = "fail_batch"`
    #[error("record at position {position} failed to parse: {source}")]
    Parse {
        /// Position of the offending record
        position: Position,
        /// The underlying parse failure
        #[source]
        source: ParseError,
    },

    /// Batch commit failed after all retries
    #[error("batch commit failed after {attempts} attempts: {source}")]
    Sink {
        /// Attempts made, including the first
        attempts: u32,
        /// Last commit failure
        #[source]
        source: SinkError,
    },

    /// Checkpoint could not be persisted (fatal immediately)
    #[error("checkpoint persist failed: {0}")]
    Checkpoint(#[from] CheckpointError),
}
