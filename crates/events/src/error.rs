//! Parse error types

use thiserror::Error;

/// Result type for event parsing
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur when decoding a raw record into an event
#[derive(Debug, Error)]
pub enum ParseError {
    /// Payload is not valid JSON
    #[error("invalid json: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A required field is absent or null
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A field is present but empty
    #[error("empty field: {0}")]
    EmptyField(&'static str),

    /// Unknown event type value
    #[error("invalid event_type: '{value}'")]
    InvalidEventType { value: String },

    /// Unknown device value
    #[error("invalid device: '{value}'")]
    InvalidDevice { value: String },

    /// Region is not a two-letter uppercase code
    #[error("invalid region: '{value}'")]
    InvalidRegion { value: String },

    /// Timestamp does not parse as an ISO-8601 instant
    #[error("invalid timestamp: '{value}'")]
    InvalidTimestamp { value: String },
}

impl ParseError {
    /// Create an InvalidEventType error
    #[inline]
    pub fn invalid_event_type(value: impl Into<String>) -> Self {
        Self::InvalidEventType {
            value: value.into(),
        }
    }

    /// Create an InvalidDevice error
    #[inline]
    pub fn invalid_device(value: impl Into<String>) -> Self {
        Self::InvalidDevice {
            value: value.into(),
        }
    }

    /// Create an InvalidRegion error
    #[inline]
    pub fn invalid_region(value: impl Into<String>) -> Self {
        Self::InvalidRegion {
            value: value.into(),
        }
    }

    /// Create an InvalidTimestamp error
    #[inline]
    pub fn invalid_timestamp(value: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError::MissingField("event_id");
        assert!(err.to_string().contains("event_id"));

        let err = ParseError::invalid_event_type("rewind");
        assert!(err.to_string().contains("rewind"));

        let err = ParseError::invalid_timestamp("yesterday");
        assert!(err.to_string().contains("yesterday"));
    }
}
