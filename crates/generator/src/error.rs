//! Generator error types

use intake_transport::TransportError;
use thiserror::Error;

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Errors that stop the generator
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Publish failed; there is no retry at this layer
    #[error("publish failed: {0}")]
    Transport(#[from] TransportError),

    /// Rate is zero, negative or not a number
    #[error("invalid emission rate: {rate}")]
    InvalidRate {
        /// The offending rate
        rate: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeneratorError::InvalidRate { rate: -1.0 };
        assert!(err.to_string().contains("-1"));

        let err = GeneratorError::Transport(TransportError::broker("gone"));
        assert!(err.to_string().contains("gone"));
    }
}
