//! Generator configuration

use std::time::Duration;

use serde::Deserialize;

/// Settings for the synthetic event generator
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Target emission rate
    pub events_per_second: f64,

    /// How long to generate, in seconds; absent = until cancelled
    pub duration_secs: Option<u64>,

    /// Size of the synthetic content id pool (`m_0..m_{N-1}`)
    pub content_pool: usize,

    /// Size of the synthetic user population (`u_1..u_P`)
    pub user_population: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            events_per_second: 50.0,
            duration_secs: None,
            content_pool: 200,
            user_population: 5000,
        }
    }
}

impl GeneratorConfig {
    /// Generation budget as a Duration, if bounded
    pub fn duration(&self) -> Option<Duration> {
        self.duration_secs.map(Duration::from_secs)
    }
}
