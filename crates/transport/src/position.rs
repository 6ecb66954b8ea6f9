//! Stream identity and position types
//!
//! `Position` is the unit of checkpoint progress: a monotonic cursor
//! into one stream, totally ordered within that stream.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Monotonic cursor into a log stream
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Position(u64);

impl Position {
    /// First position of any stream
    pub const ZERO: Position = Position(0);

    /// Create a position from a raw offset
    #[inline]
    #[must_use]
    pub const fn new(offset: u64) -> Self {
        Self(offset)
    }

    /// Get the raw offset
    #[inline]
    #[must_use]
    pub const fn offset(self) -> u64 {
        self.0
    }

    /// The position immediately after this one
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Position {
    #[inline]
    fn from(offset: u64) -> Self {
        Self::new(offset)
    }
}

impl From<Position> for u64 {
    #[inline]
    fn from(position: Position) -> Self {
        position.0
    }
}

/// Name of a log stream (one checkpoint key per stream)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamId(String);

impl StreamId {
    /// Create a stream id
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the stream name
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StreamId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for StreamId {
    fn from(name: String) -> Self {
        Self(name)
    }
}
