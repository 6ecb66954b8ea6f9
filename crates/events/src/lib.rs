//! Intake - Event model and wire codec
//!
//! Defines the playback event that flows through the pipeline and the
//! JSON wire format used on the log transport.
//!
//! # Wire Format
//!
//! Events travel as JSON objects with a fixed set of keys:
//!
//! ```json
//! {
//!   "event_id": "4a1f...",
//!   "user_id": "u_42",
//!   "content_id": "m_7",
//!   "event_type": "play",
//!   "device": "tv",
//!   "region": "DE",
//!   "ts": "2025-06-01T12:00:00.000000+00:00"
//! }
//! ```
//!
//! `parse` validates every field; a record that does not decode into a
//! well-formed [`Event`] is rejected with a [`ParseError`] and never
//! enters a batch.

mod error;
mod event;
mod parse;
mod types;

pub use error::{ParseError, Result};
pub use event::Event;
pub use parse::parse;
pub use types::{Device, EventType};
