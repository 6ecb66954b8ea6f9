//! Stream identity configuration

use serde::Deserialize;

/// Which stream to consume and where the transport lives
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Transport bootstrap endpoint
    ///
    /// Recorded for transport wiring; the in-process transport ignores
    /// it but a broker-backed one dials it.
    pub bootstrap_endpoint: String,

    /// Stream (topic) name; also the checkpoint key
    pub name: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            bootstrap_endpoint: "localhost:9092".into(),
            name: "user_events".into(),
        }
    }
}
