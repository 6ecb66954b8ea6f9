//! File-backed checkpoint store
//!
//! One JSON file per stream under the checkpoint directory. Saves go
//! through a temp file, are flushed and fsynced, then renamed over the
//! target, so a crash at any point leaves either the previous checkpoint
//! or the new one on disk.
//!
//! # File Format
//!
//! ```json
//! {"version": 1, "stream_id": "user_events", "position": 1024}
//! ```

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use intake_transport::{Position, StreamId};
use serde::{Deserialize, Serialize};

use crate::error::{CheckpointError, Result};
use crate::CheckpointStore;

/// Checkpoint file format version
const FORMAT_VERSION: u32 = 1;

/// On-disk checkpoint record
#[derive(Debug, Serialize, Deserialize)]
struct CheckpointFile {
    version: u32,
    stream_id: StreamId,
    position: Position,
}

/// Checkpoint store keeping one file per stream
#[derive(Debug, Clone)]
pub struct FileCheckpointStore {
    dir: PathBuf,
}

impl FileCheckpointStore {
    /// Create a store rooted at the given directory
    ///
    /// The directory is created lazily on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the checkpoint file for a stream
    pub fn path_for(&self, stream: &StreamId) -> PathBuf {
        self.dir.join(format!("{}.json", stream.as_str()))
    }

    fn read_file(&self, path: &Path) -> Result<CheckpointFile> {
        let file =
            File::open(path).map_err(|e| CheckpointError::io(path.display().to_string(), e))?;

        let checkpoint: CheckpointFile = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| CheckpointError::corrupt(path.display().to_string(), e.to_string()))?;

        if checkpoint.version != FORMAT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                path: path.display().to_string(),
                found: checkpoint.version,
                expected: FORMAT_VERSION,
            });
        }

        Ok(checkpoint)
    }

    fn write_file(&self, path: &Path, checkpoint: &CheckpointFile) -> Result<()> {
        let display = path.display().to_string();
        let io_err = |e| CheckpointError::io(display.clone(), e);

        fs::create_dir_all(&self.dir).map_err(io_err)?;

        // Write to temp file first, fsync, then atomic rename
        let temp_path = path.with_extension("tmp");
        let file = File::create(&temp_path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer(&mut writer, checkpoint)
            .map_err(|e| CheckpointError::corrupt(display.clone(), e.to_string()))?;
        writer.flush().map_err(io_err)?;
        writer
            .into_inner()
            .map_err(|e| CheckpointError::io(display.clone(), e.into_error()))?
            .sync_all()
            .map_err(io_err)?;

        fs::rename(&temp_path, path).map_err(io_err)?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl CheckpointStore for FileCheckpointStore {
    async fn load(&self, stream: &StreamId) -> Result<Option<Position>> {
        let path = self.path_for(stream);
        if !path.exists() {
            return Ok(None);
        }

        let checkpoint = self.read_file(&path)?;
        Ok(Some(checkpoint.position))
    }

    async fn save(&self, stream: &StreamId, position: Position) -> Result<()> {
        let path = self.path_for(stream);
        let checkpoint = CheckpointFile {
            version: FORMAT_VERSION,
            stream_id: stream.clone(),
            position,
        };

        self.write_file(&path, &checkpoint)?;

        tracing::debug!(stream = %stream, position = %position, "checkpoint saved");
        Ok(())
    }

    async fn reset(&self, stream: &StreamId) -> Result<()> {
        let path = self.path_for(stream);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(stream = %stream, "checkpoint reset");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CheckpointError::io(path.display().to_string(), e)),
        }
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod file_test;
