//! The event value type

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::types::{Device, EventType};

/// A single user-interaction event
///
/// `event_id` is the idempotence key: the sink deduplicates on it, so
/// replaying a batch after a crash produces no duplicate rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Unique opaque identifier for this emission
    pub event_id: String,

    /// User that produced the interaction
    pub user_id: String,

    /// Content item the interaction refers to
    pub content_id: String,

    /// Interaction type
    pub event_type: EventType,

    /// Originating device class
    pub device: Device,

    /// Two-letter country code
    pub region: String,

    /// When the interaction happened (UTC)
    pub event_time: DateTime<Utc>,
}

/// Wire shape of an event, used for serialization
#[derive(Serialize)]
struct WireEvent<'a> {
    event_id: &'a str,
    user_id: &'a str,
    content_id: &'a str,
    event_type: &'a str,
    device: &'a str,
    region: &'a str,
    ts: String,
}

impl Event {
    /// Serialize to the JSON wire format
    ///
    /// The timestamp is emitted as ISO-8601 with microsecond precision
    /// and a `+00:00` offset, matching what producers put on the log.
    pub fn to_wire(&self) -> Vec<u8> {
        let wire = WireEvent {
            event_id: &self.event_id,
            user_id: &self.user_id,
            content_id: &self.content_id,
            event_type: self.event_type.as_str(),
            device: self.device.as_str(),
            region: &self.region,
            ts: self
                .event_time
                .to_rfc3339_opts(SecondsFormat::Micros, false),
        };

        // A struct of strings cannot fail to serialize
        serde_json::to_vec(&wire).unwrap_or_default()
    }
}
