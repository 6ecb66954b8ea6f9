//! Configuration validation
//!
//! Runs after parsing, before any component sees the config. Catches
//! cross-field constraints that serde cannot express.

use crate::error::{ConfigError, Result};
use crate::ingest::StartingOffsetPolicy;
use crate::Config;

/// Validate the full configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.stream.name.is_empty() {
        return Err(ConfigError::invalid_value(
            "stream",
            "name",
            "must not be empty",
        ));
    }

    if config.ingest.batch_interval_ms == 0 {
        return Err(ConfigError::invalid_value(
            "ingest",
            "batch_interval_ms",
            "must be greater than zero",
        ));
    }

    if config.ingest.read_timeout_ms == 0 {
        return Err(ConfigError::invalid_value(
            "ingest",
            "read_timeout_ms",
            "must be greater than zero",
        ));
    }

    if config.ingest.max_batch_events == Some(0) {
        return Err(ConfigError::invalid_value(
            "ingest",
            "max_batch_events",
            "must be greater than zero when set",
        ));
    }

    if config.ingest.starting_offset_policy == StartingOffsetPolicy::Explicit
        && config.ingest.starting_position.is_none()
    {
        return Err(ConfigError::missing_field(
            "ingest",
            "starting_position",
            "required when starting_offset_policy is 'explicit'",
        ));
    }

    if !(config.generator.events_per_second.is_finite()
        && config.generator.events_per_second > 0.0)
    {
        return Err(ConfigError::invalid_value(
            "generator",
            "events_per_second",
            "must be a positive number",
        ));
    }

    if config.generator.content_pool == 0 {
        return Err(ConfigError::invalid_value(
            "generator",
            "content_pool",
            "must be greater than zero",
        ));
    }

    if config.generator.user_population == 0 {
        return Err(ConfigError::invalid_value(
            "generator",
            "user_population",
            "must be greater than zero",
        ));
    }

    Ok(())
}
