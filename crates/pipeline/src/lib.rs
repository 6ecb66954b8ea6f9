//! Intake - Ingestion pipeline
//!
//! The checkpointed read → parse → batch → commit loop.
//!
//! # Architecture
//!
//! ```text
//! [LogReader] ──→ parse ──→ [MicroBatchAccumulator] ──→ [SinkWriter.commit]
//!      ↑                          (interval/count)              │ ok
//!      │                                                        ▼
//!      └────────── resume from ────────────── [CheckpointStore.save]
//! ```
//!
//! # Key Design
//!
//! - **One sequential path per stream**: the loop is the only mutator of
//!   the in-flight batch and the checkpoint cursor; parallelism is
//!   across independent loop instances over independent streams.
//! - **Commit-then-checkpoint**: the checkpoint is saved only after the
//!   sink confirms the batch. A crash between the two replays the batch
//!   on restart; idempotent sink writes make the replay a no-op, which
//!   is what turns at-least-once delivery into exactly-once effect.
//! - **Bounded blocking**: the read is capped by a per-read timeout so
//!   an idle transport still lets due batches close and cancellation be
//!   observed; the commit is capped by a bounded retry policy.
//! - **Cooperative shutdown**: cancellation is checked between records,
//!   never mid-parse, so draining always starts at a record boundary.

mod accumulator;
mod batch;
mod error;
mod ingest;
mod metrics;
mod retry;
mod sink;

pub use accumulator::MicroBatchAccumulator;
pub use batch::Batch;
pub use error::{IngestError, Result, SinkError};
pub use ingest::{IngestOptions, IngestSummary, IngestionLoop, LoopState, OnParseError};
pub use metrics::{MetricsSnapshot, PipelineMetrics};
pub use retry::RetryPolicy;
pub use sink::SinkWriter;
