//! Intake - Checkpoint storage
//!
//! Durable record of the last successfully committed position per
//! stream. The pipeline saves a checkpoint only after the sink has
//! confirmed the corresponding batch, so the stored position is always
//! less than or equal to what the sink actually holds; on restart the
//! loop re-reads from the checkpoint and idempotent sink writes absorb
//! the overlap.
//!
//! A checkpoint is created on the first successful commit, overwritten
//! atomically on each subsequent commit, and removed only by an explicit
//! operator reset.

mod error;
mod file;
mod memory;

use intake_transport::{Position, StreamId};

pub use error::{CheckpointError, Result};
pub use file::FileCheckpointStore;
pub use memory::MemoryCheckpointStore;

/// Durable position store, keyed by stream
#[async_trait::async_trait]
pub trait CheckpointStore: Send + Sync {
    /// Last committed position, or `None` if no checkpoint exists yet
    async fn load(&self, stream: &StreamId) -> Result<Option<Position>>;

    /// Persist a new position, atomically with respect to process crash
    ///
    /// A crash during `save` must leave either the previous value or the
    /// new one, never a torn write.
    async fn save(&self, stream: &StreamId, position: Position) -> Result<()>;

    /// Remove the checkpoint for a stream (operator reset)
    async fn reset(&self, stream: &StreamId) -> Result<()>;
}
