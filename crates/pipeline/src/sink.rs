//! The sink collaborator seam

use crate::batch::Batch;
use crate::error::SinkError;

/// Durable, idempotent destination for committed batches
///
/// # Required property: idempotent re-application
///
/// The loop checkpoints only after `commit` returns `Ok`. If the process
/// dies between the two, the same batch is re-derived and re-committed
/// on restart, so an implementation must make re-committing a batch that
/// was already durably written a no-op or an overwrite — never an
/// append that accumulates duplicates. Content-addressed or
/// position-addressed naming (one file per batch position range) and
/// keying by `event_id` both satisfy this.
#[async_trait::async_trait]
pub trait SinkWriter: Send + Sync {
    /// Durably persist a batch
    ///
    /// Returning `Ok` means the data survives a process crash. The loop
    /// retries failed commits with bounded backoff before giving up on
    /// the batch.
    async fn commit(&self, batch: &Batch) -> Result<(), SinkError>;
}
