//! Intake Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! Minimal config should just work - only specify what you need to change.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use intake_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[stream]\nname = \"user_events\"").unwrap();
//! assert_eq!(config.stream.name, "user_events");
//! ```
//!
//! # Example Full Config
//!
//! ```toml
//! [stream]
//! bootstrap_endpoint = "localhost:9092"
//! name = "user_events"
//!
//! [ingest]
//! output_location = "datalake/events"
//! checkpoint_location = "checkpoints"
//! batch_interval_ms = 300000
//! starting_offset_policy = "latest"
//! on_parse_error = "skip"
//!
//! [generator]
//! events_per_second = 50.0
//!
//! [log]
//! level = "info"
//! ```

mod error;
mod generator;
mod ingest;
mod logging;
mod stream;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

pub use error::{ConfigError, Result};
pub use generator::GeneratorConfig;
pub use ingest::{CompressionCodec, IngestConfig, ParseErrorPolicy, StartingOffsetPolicy};
pub use logging::LogConfig;
pub use stream::StreamConfig;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Stream identity and transport endpoint
    pub stream: StreamConfig,

    /// Consumer loop settings (batching, checkpointing, policies)
    pub ingest: IngestConfig,

    /// Synthetic event generator settings
    pub generator: GeneratorConfig,

    /// Logging configuration
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or contains invalid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
