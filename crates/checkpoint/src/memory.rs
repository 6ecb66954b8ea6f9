//! In-memory checkpoint store
//!
//! Not durable. Backs tests that exercise the commit protocol without
//! touching the filesystem.

use std::collections::HashMap;

use intake_transport::{Position, StreamId};
use parking_lot::RwLock;

use crate::error::Result;
use crate::CheckpointStore;

/// Checkpoint store backed by a process-local map
#[derive(Debug, Default)]
pub struct MemoryCheckpointStore {
    positions: RwLock<HashMap<StreamId, Position>>,
}

impl MemoryCheckpointStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of streams with a checkpoint
    pub fn len(&self) -> usize {
        self.positions.read().len()
    }

    /// Whether no stream has a checkpoint
    pub fn is_empty(&self) -> bool {
        self.positions.read().is_empty()
    }
}

#[async_trait::async_trait]
impl CheckpointStore for MemoryCheckpointStore {
    async fn load(&self, stream: &StreamId) -> Result<Option<Position>> {
        Ok(self.positions.read().get(stream).copied())
    }

    async fn save(&self, stream: &StreamId, position: Position) -> Result<()> {
        self.positions.write().insert(stream.clone(), position);
        Ok(())
    }

    async fn reset(&self, stream: &StreamId) -> Result<()> {
        self.positions.write().remove(stream);
        Ok(())
    }
}
