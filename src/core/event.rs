//! Event records as delivered by the events API.
//!
//! Events are read-only to this crate. Dates are kept both as the raw text
//! the API sent and as a parsed instant, so that an unparsable date never
//! drops the event from a listing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::{Error, Result};

/// Naive date-time layouts accepted in addition to RFC 3339 (read as UTC)
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

// ═══════════════════════════════════════════════════════════════════════════════
// EVENT DATE
// ═══════════════════════════════════════════════════════════════════════════════

/// An event's scheduled start, tolerant of malformed input.
///
/// Deserializes from any JSON value: strings are parsed, integers are epoch
/// milliseconds, and anything else is kept as an unparsed date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct EventDate {
    raw: String,
    instant: Option<DateTime<Utc>>,
}

impl EventDate {
    /// Parse a date as sent by the API; never fails
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let instant = parse_instant(&raw);
        Self { raw, instant }
    }

    /// Parse a date, rejecting anything that is not a recognised layout
    pub fn parse_strict(raw: &str) -> Result<DateTime<Utc>> {
        parse_instant(raw).ok_or_else(|| Error::MalformedDate(raw.to_string()))
    }

    /// Build from a known instant
    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        Self {
            raw: instant.to_rfc3339(),
            instant: Some(instant),
        }
    }

    /// Build from an arbitrary JSON value; never fails
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::default(),
            Value::String(raw) => Self::parse(raw.as_str()),
            Value::Number(n) => Self {
                raw: n.to_string(),
                instant: n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
            },
            other => Self {
                raw: other.to_string(),
                instant: None,
            },
        }
    }

    /// The parsed instant, if the raw text was well-formed
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.instant
    }

    /// The raw text as received
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// True when the date could not be parsed (including missing dates)
    pub fn is_malformed(&self) -> bool {
        self.instant.is_none()
    }
}

impl<'de> Deserialize<'de> for EventDate {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.map(|v| Self::from_json(&v)).unwrap_or_default())
    }
}

impl From<String> for EventDate {
    fn from(raw: String) -> Self {
        Self::parse(raw)
    }
}

impl From<EventDate> for String {
    fn from(date: EventDate) -> Self {
        date.raw
    }
}

impl From<DateTime<Utc>> for EventDate {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::from_instant(instant)
    }
}

impl fmt::Display for EventDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.instant {
            Some(instant) => write!(f, "{}", instant.format("%Y-%m-%d %H:%M UTC")),
            None if self.raw.is_empty() => write!(f, "(no date)"),
            None => write!(f, "{} (unparsed)", self.raw),
        }
    }
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for layout in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, layout) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// ═══════════════════════════════════════════════════════════════════════════════
// EVENT
// ═══════════════════════════════════════════════════════════════════════════════

/// A community event (clean-up, plantation, donation drive, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Opaque unique identifier
    #[serde(alias = "_id")]
    pub id: String,
    /// Display title
    pub title: String,
    /// Free-text description, searched
    #[serde(default)]
    pub description: String,
    /// Category such as "Cleanup" or "Donation"
    #[serde(default)]
    pub event_type: String,
    /// Free-text location, searched and faceted
    #[serde(default)]
    pub location: String,
    /// Scheduled start
    #[serde(default)]
    pub event_date: EventDate,
    /// Image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Email of the creating user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_email: Option<String>,
}

impl Event {
    /// Create an event with the identifying fields set
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        event_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            event_type: event_type.into(),
            location: String::new(),
            event_date: EventDate::default(),
            thumbnail: None,
            creator_email: None,
        }
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the date from raw API text
    pub fn with_raw_date(mut self, raw: impl Into<String>) -> Self {
        self.event_date = EventDate::parse(raw);
        self
    }

    /// Set the date from an instant
    pub fn starting_at(mut self, instant: DateTime<Utc>) -> Self {
        self.event_date = EventDate::from_instant(instant);
        self
    }

    /// Set thumbnail
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Set creator email
    pub fn with_creator(mut self, email: impl Into<String>) -> Self {
        self.creator_email = Some(email.into());
        self
    }

    /// Parsed start instant, if any
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        self.event_date.instant()
    }

    /// True if the event has a well-formed date after `now`
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.starts_at().is_some_and(|start| start > now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339() {
        let date = EventDate::parse("2025-06-01T09:30:00.000Z");
        assert_eq!(
            date.instant(),
            Some(Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap())
        );

        let offset = EventDate::parse("2025-06-01T11:30:00+02:00");
        assert_eq!(offset.instant(), date.instant());
    }

    #[test]
    fn test_parse_naive_layouts() {
        let expected = Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();
        assert_eq!(EventDate::parse("2025-06-01T09:30:00").instant(), Some(expected));
        assert_eq!(EventDate::parse("2025-06-01 09:30").instant(), Some(expected));
        assert_eq!(
            EventDate::parse("2025-06-01").instant(),
            Some(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_malformed_dates_are_kept() {
        let date = EventDate::parse("next saturday");
        assert!(date.is_malformed());
        assert_eq!(date.raw(), "next saturday");
        assert!(EventDate::default().is_malformed());
        assert!(EventDate::parse_strict("next saturday").is_err());
    }

    #[test]
    fn test_event_deserialize_api_shape() {
        let json = r#"{
            "_id": "65f0c1",
            "title": "River Cleanup",
            "description": "Bring gloves",
            "eventType": "Cleanup",
            "location": "Dhaka",
            "eventDate": "2025-06-01T09:30:00.000Z",
            "thumbnail": "https://img.example/1.png",
            "creatorEmail": "host@example.org"
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, "65f0c1");
        assert_eq!(event.event_type, "Cleanup");
        assert!(!event.event_date.is_malformed());
        assert_eq!(event.creator_email.as_deref(), Some("host@example.org"));
    }

    #[test]
    fn test_event_missing_optional_fields() {
        let event: Event = serde_json::from_str(r#"{"id":"1","title":"Tree planting"}"#).unwrap();
        assert!(event.event_date.is_malformed());
        assert!(event.thumbnail.is_none());
        assert_eq!(event.location, "");

        let nulled: Event =
            serde_json::from_str(r#"{"id":"2","title":"Blood camp","eventDate":null}"#).unwrap();
        assert!(nulled.event_date.is_malformed());
    }

    #[test]
    fn test_non_string_dates_keep_the_event() {
        let millis: Event =
            serde_json::from_str(r#"{"id":"1","title":"Fair","eventDate":1893456000000}"#).unwrap();
        assert_eq!(
            millis.starts_at(),
            Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(millis.event_date.raw(), "1893456000000");

        let nested: Event =
            serde_json::from_str(r#"{"id":"2","title":"Camp","eventDate":{"day":3}}"#).unwrap();
        assert!(nested.event_date.is_malformed());
        assert_eq!(nested.event_date.raw(), r#"{"day":3}"#);

        let fractional = EventDate::from_json(&serde_json::json!(1.5));
        assert!(fractional.is_malformed());
    }

    #[test]
    fn test_event_date_serializes_raw_text() {
        let event = Event::new("1", "Food drive", "Donation").with_raw_date("soon");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["eventDate"], "soon");
        assert_eq!(json["eventType"], "Donation");
    }

    #[test]
    fn test_is_upcoming() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let future = Event::new("1", "a", "Other").starting_at(now + chrono::Duration::hours(1));
        let past = Event::new("2", "b", "Other").starting_at(now - chrono::Duration::hours(1));
        let unknown = Event::new("3", "c", "Other").with_raw_date("tbd");

        assert!(future.is_upcoming(now));
        assert!(!past.is_upcoming(now));
        assert!(!unknown.is_upcoming(now));
    }
}
