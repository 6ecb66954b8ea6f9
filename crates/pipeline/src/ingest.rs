//! The ingestion loop
//!
//! Orchestrates read → parse → accumulate → commit → checkpoint for one
//! stream, with failure recovery.
//!
//! # State machine
//!
//! ```text
//! Starting ──→ Running ──→ Draining ──→ Stopped
//!                 │                        ▲
//!                 └──────→ Failed ─────────┘ (process exit, non-zero)
//! ```
//!
//! Running pulls records under a per-read timeout, closes due batches,
//! and commits them through the sink with bounded retry before saving
//! the checkpoint. Draining is entered on cancellation, on an elapsed
//! run-duration budget, or at end-of-log, and flushes the partial batch
//! through the same commit path so graceful shutdown loses nothing.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use intake_checkpoint::CheckpointStore;
use intake_events::parse;
use intake_transport::{LogReader, LogTransport, Position, RawRecord, StartPosition, StreamId};
use tokio_util::sync::CancellationToken;

use crate::accumulator::MicroBatchAccumulator;
use crate::batch::Batch;
use crate::error::{IngestError, Result};
use crate::metrics::{MetricsSnapshot, PipelineMetrics};
use crate::retry::RetryPolicy;
use crate::sink::SinkWriter;

/// Policy for records that fail to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnParseError {
    /// Count and drop the record; its position still advances the batch
    #[default]
    Skip,
    /// Fail the whole in-progress batch and stop the loop
    FailBatch,
}

/// Lifecycle state of the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Loading the checkpoint and opening the reader
    Starting,
    /// Pulling, parsing and committing
    Running,
    /// Flushing the partial batch before stopping
    Draining,
    /// Terminated on an unrecoverable error
    Failed,
    /// Terminal clean state
    Stopped,
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Failed => "failed",
            Self::Stopped => "stopped",
        };
        write!(f, "{s}")
    }
}

/// Tunables for one ingestion loop
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Where to start when no checkpoint exists
    pub starting_offset: StartPosition,

    /// Wall-clock window after which an open batch closes
    pub batch_interval: Duration,

    /// Optional count bound per batch (memory safety valve)
    pub max_batch_events: Option<usize>,

    /// Policy for unparseable records
    pub on_parse_error: OnParseError,

    /// Advance the checkpoint past windows where every record was
    /// skipped, so unparseable records are not re-read forever
    pub advance_on_empty: bool,

    /// Cap on a single blocking read; an idle transport still lets due
    /// batches close and cancellation be observed
    pub read_timeout: Duration,

    /// Total running-time budget; `None` runs until cancelled
    pub run_duration: Option<Duration>,

    /// Retry policy shared by sink commits and transport reads
    pub retry: RetryPolicy,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            starting_offset: StartPosition::Latest,
            batch_interval: Duration::from_secs(300),
            max_batch_events: None,
            on_parse_error: OnParseError::default(),
            advance_on_empty: true,
            read_timeout: Duration::from_secs(1),
            run_duration: None,
            retry: RetryPolicy::default(),
        }
    }
}

/// Final report of a completed loop
#[derive(Debug, Clone)]
pub struct IngestSummary {
    /// Terminal state (always `Stopped` on the `Ok` path)
    pub state: LoopState,

    /// Last checkpointed position, if any batch was committed
    pub last_committed: Option<Position>,

    /// Final counters
    pub metrics: MetricsSnapshot,
}

/// The read-parse-batch-commit loop for one stream
///
/// Owns all mutable state of the pipeline: the in-flight batch, the
/// cursor, and the retry counters. Never shares it.
pub struct IngestionLoop {
    transport: Arc<dyn LogTransport>,
    sink: Arc<dyn SinkWriter>,
    checkpoints: Arc<dyn CheckpointStore>,
    stream: StreamId,
    options: IngestOptions,
    metrics: Arc<PipelineMetrics>,
    state: LoopState,
    last_committed: Option<Position>,
}

impl IngestionLoop {
    /// Create a loop for one stream
    pub fn new(
        transport: Arc<dyn LogTransport>,
        sink: Arc<dyn SinkWriter>,
        checkpoints: Arc<dyn CheckpointStore>,
        stream: StreamId,
        options: IngestOptions,
    ) -> Self {
        Self {
            transport,
            sink,
            checkpoints,
            stream,
            options,
            metrics: Arc::new(PipelineMetrics::new()),
            state: LoopState::Starting,
            last_committed: None,
        }
    }

    /// Handle to the loop's counters
    ///
    /// Remains valid after `run` consumes the loop.
    pub fn metrics(&self) -> Arc<PipelineMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Current lifecycle state
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Run until cancellation, an elapsed run-duration budget,
    /// end-of-log, or an unrecoverable error
    ///
    /// On success the loop has drained and the summary's state is
    /// `Stopped`. On error the checkpoint is left at the last good
    /// position, so a restart resumes exactly there.
    pub async fn run(mut self, ct: CancellationToken) -> Result<IngestSummary> {
        match self.run_inner(&ct).await {
            Ok(()) => {
                self.state = LoopState::Stopped;
                let summary = self.summary();
                tracing::info!(
                    stream = %self.stream,
                    events = summary.metrics.events_committed,
                    batches = summary.metrics.batches_committed,
                    last_committed = ?self.last_committed,
                    "ingestion stopped"
                );
                Ok(summary)
            }
            Err(e) => {
                self.state = LoopState::Failed;
                tracing::error!(
                    stream = %self.stream,
                    error = %e,
                    last_committed = ?self.last_committed,
                    "ingestion failed"
                );
                Err(e)
            }
        }
    }

    async fn run_inner(&mut self, ct: &CancellationToken) -> Result<()> {
        // Starting: resume from the checkpoint, or fall back to the
        // configured starting offset for a fresh stream
        let start = match self.checkpoints.load(&self.stream).await? {
            Some(position) => StartPosition::At(position.next()),
            None => self.options.starting_offset,
        };
        let mut reader = self.transport.subscribe(&self.stream, start).await?;

        tracing::info!(
            stream = %self.stream,
            start = ?start,
            batch_interval_ms = self.options.batch_interval.as_millis() as u64,
            "ingestion running"
        );
        self.state = LoopState::Running;

        let mut accumulator = MicroBatchAccumulator::new(
            self.options.batch_interval,
            self.options.max_batch_events,
        );
        let run_deadline = self.options.run_duration.map(|d| Instant::now() + d);
        let mut read_failures: u32 = 0;

        loop {
            let now = Instant::now();

            if let Some(batch) = accumulator.close_if_due(now) {
                self.commit(batch).await?;
            }

            if ct.is_cancelled() {
                tracing::info!(stream = %self.stream, "cancellation observed");
                break;
            }
            if run_deadline.is_some_and(|deadline| now >= deadline) {
                tracing::info!(stream = %self.stream, "run duration budget reached");
                break;
            }

            // Wait no longer than the nearest of: read timeout, batch
            // deadline, run deadline
            let mut wait = self.options.read_timeout;
            if let Some(deadline) = accumulator.next_deadline() {
                wait = wait.min(deadline.saturating_duration_since(now));
            }
            if let Some(deadline) = run_deadline {
                wait = wait.min(deadline.saturating_duration_since(now));
            }

            tokio::select! {
                _ = ct.cancelled() => {
                    tracing::info!(stream = %self.stream, "cancellation observed");
                    break;
                }
                read = tokio::time::timeout(wait, reader.next()) => match read {
                    // Idle tick: deadlines are re-checked at the top
                    Err(_elapsed) => {}
                    Ok(Ok(Some(record))) => {
                        read_failures = 0;
                        if let Some(batch) = self.handle_record(record, &mut accumulator)? {
                            self.commit(batch).await?;
                        }
                    }
                    Ok(Ok(None)) => {
                        tracing::info!(stream = %self.stream, "end of log");
                        break;
                    }
                    Ok(Err(e)) => {
                        if read_failures >= self.options.retry.max_retries {
                            return Err(IngestError::Transport(e));
                        }
                        let delay = self.options.retry.delay(read_failures);
                        read_failures += 1;
                        self.metrics.record_read_retry();
                        tracing::warn!(
                            stream = %self.stream,
                            error = %e,
                            attempt = read_failures,
                            delay_ms = delay.as_millis() as u64,
                            "read failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        // Draining: flush the partial batch through the normal commit
        // path so a graceful stop loses nothing
        self.state = LoopState::Draining;
        tracing::info!(stream = %self.stream, "draining");
        if let Some(batch) = accumulator.drain() {
            self.commit(batch).await?;
        }

        Ok(())
    }

    /// Parse one record and feed the accumulator per policy
    fn handle_record(
        &mut self,
        record: RawRecord,
        accumulator: &mut MicroBatchAccumulator,
    ) -> Result<Option<Batch>> {
        self.metrics.record_read();

        match parse(&record.payload) {
            Ok(event) => {
                self.metrics.record_parsed();
                Ok(accumulator.accept(event, record.position))
            }
            Err(e) => match self.options.on_parse_error {
                OnParseError::Skip => {
                    self.metrics.record_parse_failure();
                    tracing::warn!(
                        stream = %self.stream,
                        position = %record.position,
                        error = %e,
                        "dropping unparseable record"
                    );
                    accumulator.record_skip(record.position);
                    Ok(None)
                }
                OnParseError::FailBatch => Err(IngestError::Parse {
                    position: record.position,
                    source: e,
                }),
            },
        }
    }

    /// Commit a closed batch: sink with bounded retry, then checkpoint
    async fn commit(&mut self, batch: Batch) -> Result<()> {
        if batch.is_empty() {
            // Nothing for the sink. Advance the checkpoint only when
            // records were consumed and the policy says not to re-read
            // them forever.
            if batch.parse_failures > 0 && self.options.advance_on_empty {
                self.save_checkpoint(batch.high_water).await?;
            }
            return Ok(());
        }

        let mut attempt: u32 = 0;
        loop {
            match self.sink.commit(&batch).await {
                Ok(()) => break,
                Err(e) => {
                    if attempt >= self.options.retry.max_retries {
                        return Err(IngestError::Sink {
                            attempts: attempt + 1,
                            source: e,
                        });
                    }
                    let delay = self.options.retry.delay(attempt);
                    attempt += 1;
                    self.metrics.record_commit_retry();
                    tracing::warn!(
                        stream = %self.stream,
                        error = %e,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "commit failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }

        self.metrics.record_commit(batch.len() as u64);
        self.save_checkpoint(batch.high_water).await?;

        tracing::debug!(
            stream = %self.stream,
            events = batch.len(),
            parse_failures = batch.parse_failures,
            high_water = %batch.high_water,
            "batch committed"
        );
        Ok(())
    }

    /// Persist the checkpoint; any failure here is fatal
    async fn save_checkpoint(&mut self, position: Position) -> Result<()> {
        self.checkpoints.save(&self.stream, position).await?;
        self.metrics.record_checkpoint_save();
        self.last_committed = Some(position);
        Ok(())
    }

    fn summary(&self) -> IngestSummary {
        IngestSummary {
            state: self.state,
            last_committed: self.last_committed,
            metrics: self.metrics.snapshot(),
        }
    }
}

#[cfg(test)]
#[path = "ingest_test.rs"]
mod ingest_test;
