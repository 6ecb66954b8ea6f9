//! Transport error types

use thiserror::Error;

use crate::position::{Position, StreamId};

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors from the log transport
///
/// Transport errors are treated as transient by the pipeline: reads are
/// retried with backoff and the checkpoint is never advanced past them.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The log was closed while the operation was in flight
    #[error("log closed for stream '{0}'")]
    Closed(StreamId),

    /// Subscription start position is beyond the stream head
    #[error("position {position} is beyond the head of stream '{stream}'")]
    PositionOutOfRange {
        /// Stream being subscribed
        stream: StreamId,
        /// Requested start position
        position: Position,
    },

    /// Broker-side failure, carried through from the implementation
    #[error("transport failure: {0}")]
    Broker(String),
}

impl TransportError {
    /// Create a broker failure error
    pub fn broker(msg: impl Into<String>) -> Self {
        Self::Broker(msg.into())
    }
}
