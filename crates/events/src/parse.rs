//! Record parsing
//!
//! Decodes a raw log payload into a typed [`Event`]. Parsing is pure and
//! side-effect-free; every validation failure maps to a distinct
//! [`ParseError`] variant so callers can log what actually went wrong.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{ParseError, Result};
use crate::event::Event;
use crate::types::{Device, EventType};

/// Raw wire fields before validation
#[derive(Deserialize)]
struct RawEvent {
    event_id: Option<String>,
    user_id: Option<String>,
    content_id: Option<String>,
    event_type: Option<String>,
    device: Option<String>,
    region: Option<String>,
    ts: Option<String>,
}

/// Parse a raw payload into an event
///
/// Fails when the payload is not JSON, when any of the seven wire fields
/// is absent or empty, when `event_type`/`device` are outside their
/// vocabularies, when `region` is not a two-letter uppercase code, or
/// when `ts` does not parse as an ISO-8601 instant.
pub fn parse(raw: &[u8]) -> Result<Event> {
    let raw: RawEvent = serde_json::from_slice(raw)?;

    let event_id = required(raw.event_id, "event_id")?;
    let user_id = required(raw.user_id, "user_id")?;
    let content_id = required(raw.content_id, "content_id")?;
    let event_type = required(raw.event_type, "event_type")?.parse::<EventType>()?;
    let device = required(raw.device, "device")?.parse::<Device>()?;
    let region = validate_region(required(raw.region, "region")?)?;
    let ts = required(raw.ts, "ts")?;

    let event_time = DateTime::parse_from_rfc3339(&ts)
        .map_err(|_| ParseError::invalid_timestamp(&ts))?
        .with_timezone(&Utc);

    Ok(Event {
        event_id,
        user_id,
        content_id,
        event_type,
        device,
        region,
        event_time,
    })
}

/// Reject absent or empty fields
fn required(value: Option<String>, field: &'static str) -> Result<String> {
    match value {
        None => Err(ParseError::MissingField(field)),
        Some(s) if s.is_empty() => Err(ParseError::EmptyField(field)),
        Some(s) => Ok(s),
    }
}

/// Region must be exactly two uppercase ASCII letters
fn validate_region(region: String) -> Result<String> {
    let valid = region.len() == 2 && region.bytes().all(|b| b.is_ascii_uppercase());
    if valid {
        Ok(region)
    } else {
        Err(ParseError::invalid_region(region))
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod parse_test;
