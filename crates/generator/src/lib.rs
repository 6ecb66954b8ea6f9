//! Intake - Synthetic event generator
//!
//! Emits playback events at a target rate and publishes them to the log
//! transport. The producer side of the end-to-end contract: the field
//! distributions here are what the consumer must tolerate.
//!
//! Pacing is best-effort: each emission is followed by a fixed
//! `1/rate` sleep, with no compensation for publish latency, so the
//! achieved rate drifts slightly below the target under load. That
//! drift is accepted.

mod error;
mod synth;

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use intake_transport::{LogTransport, StreamId};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

pub use error::{GeneratorError, Result};
use synth::EventSynthesizer;

/// Tunables for the generator
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Target emission rate
    pub events_per_second: f64,

    /// Generation budget; `None` runs until cancelled
    pub duration: Option<Duration>,

    /// Size of the synthetic content id pool (`m_0..m_{N-1}`)
    pub content_pool: usize,

    /// Size of the synthetic user population (`u_1..u_P`)
    pub user_population: u64,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            events_per_second: 50.0,
            duration: None,
            content_pool: 200,
            user_population: 5000,
        }
    }
}

/// Final report of a generator run
#[derive(Debug, Clone, Copy)]
pub struct GeneratorSummary {
    /// Events successfully published
    pub events_published: u64,

    /// Wall-clock time spent emitting
    pub elapsed: Duration,
}

/// Rate-shaped synthetic event producer
///
/// Owns its transport handle; one instance per stream.
pub struct EventGenerator {
    transport: Arc<dyn LogTransport>,
    stream: StreamId,
    options: GeneratorOptions,
}

impl EventGenerator {
    /// Create a generator publishing to one stream
    pub fn new(
        transport: Arc<dyn LogTransport>,
        stream: StreamId,
        options: GeneratorOptions,
    ) -> Self {
        Self {
            transport,
            stream,
            options,
        }
    }

    /// Emit until the duration budget elapses or the token is cancelled
    ///
    /// Publish failures are not retried here: the error propagates and
    /// the caller decides whether to terminate or restart.
    pub async fn run(self, ct: CancellationToken) -> Result<GeneratorSummary> {
        let rate = self.options.events_per_second;
        if !(rate.is_finite() && rate > 0.0) {
            return Err(GeneratorError::InvalidRate { rate });
        }
        let interval = Duration::from_secs_f64(1.0 / rate);

        tracing::info!(
            stream = %self.stream,
            events_per_second = rate,
            duration = ?self.options.duration,
            "generator starting"
        );

        let mut synth =
            EventSynthesizer::new(self.options.content_pool, self.options.user_population);
        let started = Instant::now();
        let deadline = self.options.duration.map(|d| started + d);
        let mut published = 0u64;

        loop {
            let now = Instant::now();
            if ct.is_cancelled() {
                tracing::info!(stream = %self.stream, "generator cancelled");
                break;
            }
            if deadline.is_some_and(|d| now >= d) {
                tracing::info!(stream = %self.stream, "generator duration budget reached");
                break;
            }

            let event = synth.next_event();
            self.transport
                .publish(&self.stream, Bytes::from(event.to_wire()))
                .await?;
            published += 1;

            tokio::select! {
                _ = ct.cancelled() => {
                    tracing::info!(stream = %self.stream, "generator cancelled");
                    break;
                }
                _ = tokio::time::sleep(interval) => {}
            }
        }

        let summary = GeneratorSummary {
            events_published: published,
            elapsed: started.elapsed(),
        };
        tracing::info!(
            stream = %self.stream,
            events = summary.events_published,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "generator stopped"
        );
        Ok(summary)
    }
}
