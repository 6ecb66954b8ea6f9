//! Tests for record parsing

use chrono::{TimeZone, Utc};

use super::parse;
use crate::error::ParseError;
use crate::event::Event;
use crate::types::{Device, EventType};

/// Helper to build a well-formed event with second precision
fn sample_event() -> Event {
    Event {
        event_id: "550e8400-e29b-41d4-a716-446655440000".into(),
        user_id: "u_1234".into(),
        content_id: "m_42".into(),
        event_type: EventType::Seek,
        device: Device::Web,
        region: "FR".into(),
        event_time: Utc.with_ymd_and_hms(2025, 3, 15, 8, 30, 45).unwrap(),
    }
}

fn wire_with(field: &str, value: serde_json::Value) -> Vec<u8> {
    let mut json: serde_json::Value = serde_json::from_slice(&sample_event().to_wire()).unwrap();
    json[field] = value;
    serde_json::to_vec(&json).unwrap()
}

fn wire_without(field: &str) -> Vec<u8> {
    let mut json: serde_json::Value = serde_json::from_slice(&sample_event().to_wire()).unwrap();
    json.as_object_mut().unwrap().remove(field);
    serde_json::to_vec(&json).unwrap()
}

// ============================================================================
// Round-trip
// ============================================================================

#[test]
fn test_round_trip_all_fields() {
    let event = sample_event();
    let parsed = parse(&event.to_wire()).unwrap();
    assert_eq!(parsed, event);
}

#[test]
fn test_round_trip_every_event_type() {
    for event_type in EventType::ALL {
        let mut event = sample_event();
        event.event_type = event_type;
        assert_eq!(parse(&event.to_wire()).unwrap(), event);
    }
}

#[test]
fn test_round_trip_every_device() {
    for device in Device::ALL {
        let mut event = sample_event();
        event.device = device;
        assert_eq!(parse(&event.to_wire()).unwrap(), event);
    }
}

#[test]
fn test_round_trip_microsecond_timestamp() {
    let mut event = sample_event();
    event.event_time = Utc.timestamp_micros(1_750_000_000_123_456).unwrap();
    assert_eq!(parse(&event.to_wire()).unwrap(), event);
}

#[test]
fn test_parse_normalizes_offset_to_utc() {
    let payload = wire_with("ts", "2025-03-15T10:30:45+02:00".into());
    let parsed = parse(&payload).unwrap();
    assert_eq!(
        parsed.event_time,
        Utc.with_ymd_and_hms(2025, 3, 15, 8, 30, 45).unwrap()
    );
}

#[test]
fn test_parse_accepts_zulu_suffix() {
    let payload = wire_with("ts", "2025-03-15T08:30:45Z".into());
    assert!(parse(&payload).is_ok());
}

// ============================================================================
// Rejection
// ============================================================================

#[test]
fn test_rejects_non_json() {
    assert!(matches!(
        parse(b"not json at all"),
        Err(ParseError::InvalidJson(_))
    ));
}

#[test]
fn test_rejects_missing_fields() {
    for field in [
        "event_id",
        "user_id",
        "content_id",
        "event_type",
        "device",
        "region",
        "ts",
    ] {
        let result = parse(&wire_without(field));
        assert!(
            matches!(result, Err(ParseError::MissingField(f)) if f == field),
            "expected MissingField({field}), got {result:?}"
        );
    }
}

#[test]
fn test_rejects_null_field() {
    let result = parse(&wire_with("user_id", serde_json::Value::Null));
    assert!(matches!(result, Err(ParseError::MissingField("user_id"))));
}

#[test]
fn test_rejects_empty_field() {
    let result = parse(&wire_with("event_id", "".into()));
    assert!(matches!(result, Err(ParseError::EmptyField("event_id"))));
}

#[test]
fn test_rejects_wrongly_typed_field() {
    let result = parse(&wire_with("user_id", 42.into()));
    assert!(matches!(result, Err(ParseError::InvalidJson(_))));
}

#[test]
fn test_rejects_unknown_event_type() {
    let result = parse(&wire_with("event_type", "rewind".into()));
    assert!(matches!(
        result,
        Err(ParseError::InvalidEventType { value }) if value == "rewind"
    ));
}

#[test]
fn test_rejects_unknown_device() {
    let result = parse(&wire_with("device", "console".into()));
    assert!(matches!(result, Err(ParseError::InvalidDevice { .. })));
}

#[test]
fn test_rejects_bad_region() {
    for bad in ["", "D", "DEU", "de", "1A"] {
        let result = parse(&wire_with("region", bad.into()));
        assert!(
            matches!(result, Err(ParseError::InvalidRegion { .. }) | Err(ParseError::EmptyField(_))),
            "region '{bad}' should be rejected, got {result:?}"
        );
    }
}

#[test]
fn test_rejects_unparseable_timestamp() {
    for bad in ["yesterday", "2025-13-01T00:00:00Z", "1718000000"] {
        let result = parse(&wire_with("ts", bad.into()));
        assert!(
            matches!(result, Err(ParseError::InvalidTimestamp { .. })),
            "ts '{bad}' should be rejected, got {result:?}"
        );
    }
}
