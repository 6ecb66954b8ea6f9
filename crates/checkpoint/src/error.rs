//! Checkpoint error types

use std::io;

use thiserror::Error;

/// Result type for checkpoint operations
pub type Result<T> = std::result::Result<T, CheckpointError>;

/// Errors from checkpoint storage
///
/// Any failure to persist a checkpoint is fatal to the ingestion loop:
/// without a durable position, correctness across restarts cannot be
/// guaranteed, so the loop stops instead of proceeding unsaved.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Filesystem failure while reading or writing a checkpoint file
    #[error("checkpoint I/O failed for '{path}': {source}")]
    Io {
        /// File involved
        path: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Checkpoint file exists but does not decode
    #[error("corrupt checkpoint file '{path}': {reason}")]
    Corrupt {
        /// File involved
        path: String,
        /// What failed to decode
        reason: String,
    },

    /// Checkpoint file was written by an incompatible version
    #[error("unsupported checkpoint format version {found} in '{path}' (expected {expected})")]
    UnsupportedVersion {
        /// File involved
        path: String,
        /// Version found in the file
        found: u32,
        /// Version this build writes
        expected: u32,
    },
}

impl CheckpointError {
    /// Create an Io error
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a Corrupt error
    pub fn corrupt(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
