//! Decoding of the events API payloads.
//!
//! The API answers with an envelope `{ "ok": true, "events": [...] }`, or
//! `{ "ok": false, "message": "..." }` on failure. Some endpoints (and saved
//! exports) are a bare array of events; both shapes are accepted.
//!
//! Entries are decoded one at a time: an entry that cannot be read as an
//! event is skipped with a warning and its siblings are kept.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::event::Event;
use crate::core::joined::JoinedEvent;
use crate::error::{Error, Result};
use crate::utils::constants::DEFAULT_FEED_ERROR;

/// Response envelope of the events API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventFeed {
    /// Whether the server handled the request
    #[serde(default)]
    pub ok: bool,
    /// Raw entries (`joinedEvents` on the joined-events endpoint)
    #[serde(default, alias = "joinedEvents")]
    pub events: Vec<Value>,
    /// Error or status message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl EventFeed {
    /// Unwrap the raw entries, turning a failed envelope into an error
    pub fn into_entries(self) -> Result<Vec<Value>> {
        if !self.ok {
            let message = self
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FEED_ERROR.to_string());
            return Err(Error::FeedRejected(message));
        }
        Ok(self.events)
    }
}

/// Decode a JSON payload into events
pub fn parse_feed(json: &str) -> Result<Vec<Event>> {
    let events: Vec<Event> = decode_feed(json)?;

    let malformed = events.iter().filter(|e| e.event_date.is_malformed()).count();
    if malformed > 0 {
        tracing::warn!("{} of {} events have no parseable date", malformed, events.len());
    }
    tracing::debug!("Decoded {} events", events.len());

    Ok(events)
}

/// Decode a joined-events payload (`{ok, joinedEvents}` or a bare array)
pub fn parse_joined_feed(json: &str) -> Result<Vec<JoinedEvent>> {
    let joined: Vec<JoinedEvent> = decode_feed(json)?;
    tracing::debug!("Decoded {} joined events", joined.len());
    Ok(joined)
}

fn decode_feed<T: DeserializeOwned>(json: &str) -> Result<Vec<T>> {
    let payload: Value =
        serde_json::from_str(json).map_err(|e| Error::Deserialization(e.to_string()))?;

    let entries = match payload {
        Value::Array(entries) => entries,
        Value::Object(map) => serde_json::from_value::<EventFeed>(Value::Object(map))
            .map_err(|e| Error::Deserialization(e.to_string()))?
            .into_entries()?,
        other => {
            return Err(Error::Deserialization(format!(
                "expected an array or an envelope object, found {}",
                json_kind(&other)
            )))
        }
    };

    Ok(decode_entries(entries))
}

fn decode_entries<T: DeserializeOwned>(entries: Vec<Value>) -> Vec<T> {
    let total = entries.len();
    let decoded: Vec<T> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!("Skipping feed entry {}: {}", index, e);
                None
            }
        })
        .collect();

    if decoded.len() < total {
        tracing::warn!("Skipped {} of {} feed entries", total - decoded.len(), total);
    }
    decoded
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_parse_envelope() {
        let json = r#"{"ok": true, "events": [
            {"_id": "a", "title": "Beach Cleanup", "eventType": "Cleanup"},
            {"_id": "b", "title": "Book Drive", "eventType": "Donation"}
        ]}"#;

        let events = parse_feed(json).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].id, "b");
    }

    #[test]
    fn test_parse_bare_array() {
        let events = parse_feed(r#"[{"id": "x", "title": "Tree Planting"}]"#).unwrap();
        assert_eq!(events.len(), 1);
        assert!(parse_feed("[]").unwrap().is_empty());
    }

    #[test]
    fn test_numeric_date_keeps_siblings() {
        let json = r#"{"ok": true, "events": [
            {"_id": "a", "title": "Beach Cleanup", "eventDate": "2029-12-01T10:00:00Z"},
            {"_id": "b", "title": "Winter Fair", "eventDate": 1893456000000},
            {"_id": "c", "title": "Book Drive", "eventDate": true}
        ]}"#;

        let events = parse_feed(json).unwrap();
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(
            events[1].starts_at(),
            Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap())
        );
        assert!(events[2].event_date.is_malformed());
    }

    #[test]
    fn test_undecodable_entries_are_skipped() {
        let json = r#"[
            {"id": "1", "title": "River Cleanup"},
            {"id": "2", "description": "no title"},
            "not an event",
            {"id": "4", "title": "Canal Cleanup"}
        ]"#;

        let events = parse_feed(json).unwrap();
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["1", "4"]);
    }

    #[test]
    fn test_parse_joined_feed() {
        let json = r#"{"ok": true, "joinedEvents": [
            {"_id": "j1", "eventTitle": "Tree Planting", "joinedAt": "2025-02-10T08:00:00Z"},
            {"eventTitle": "missing id"}
        ]}"#;

        let joined = parse_joined_feed(json).unwrap();
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].event_title, "Tree Planting");
    }

    #[test]
    fn test_rejected_feed_uses_message() {
        let err = parse_feed(r#"{"ok": false, "message": "Database offline"}"#).unwrap_err();
        assert_eq!(err, Error::FeedRejected("Database offline".into()));
    }

    #[test]
    fn test_rejected_feed_default_message() {
        let err = EventFeed::default().into_entries().unwrap_err();
        assert_eq!(err, Error::FeedRejected(DEFAULT_FEED_ERROR.into()));
    }

    #[test]
    fn test_garbage_payload() {
        assert!(matches!(parse_feed("not json"), Err(Error::Deserialization(_))));

        let err = parse_feed("42").unwrap_err();
        assert_eq!(
            err,
            Error::Deserialization("expected an array or an envelope object, found a number".into())
        );
    }
}
