//! Event drafts submitted from the create/update forms.
//!
//! A draft is checked locally before it is sent to the events API: every
//! field is required, the start must lie in the future and the creator must
//! look like an email address.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::event::{Event, EventDate};
use crate::error::{Error, Result};
use crate::utils::validation::{validate_email, validate_required};

/// Unvalidated event form contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDraft {
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Category
    pub event_type: String,
    /// Image URL
    pub thumbnail: String,
    /// Location
    pub location: String,
    /// Requested start, as entered
    pub event_date: Option<String>,
    /// Email of the signed-in user creating the event
    pub creator_email: Option<String>,
}

impl EventDraft {
    /// Check the draft against `now`; returns the parsed start on success
    pub fn validate(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        validate_required(Some(self.title.as_str()), "title")?;
        validate_required(Some(self.description.as_str()), "description")?;
        validate_required(Some(self.event_type.as_str()), "eventType")?;
        validate_required(Some(self.thumbnail.as_str()), "thumbnail")?;
        validate_required(Some(self.location.as_str()), "location")?;
        validate_required(self.event_date.as_deref(), "eventDate")?;

        let raw_date = self.event_date.as_deref().unwrap_or_default();
        let starts_at = EventDate::parse_strict(raw_date)?;
        if starts_at <= now {
            return Err(Error::EventDateNotInFuture {
                date: starts_at.to_rfc3339(),
                now: now.to_rfc3339(),
            });
        }

        validate_required(self.creator_email.as_deref(), "creatorEmail")?;
        validate_email(self.creator_email.as_deref().unwrap_or_default())?;

        Ok(starts_at)
    }

    /// Validate and convert into an event record under the given id
    pub fn into_event(self, id: impl Into<String>, now: DateTime<Utc>) -> Result<Event> {
        let starts_at = self.validate(now)?;

        Ok(Event {
            id: id.into(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            event_type: self.event_type,
            location: self.location.trim().to_string(),
            event_date: EventDate::from_instant(starts_at),
            thumbnail: Some(self.thumbnail),
            creator_email: self.creator_email.map(|e| e.trim().to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn valid_draft() -> EventDraft {
        EventDraft {
            title: "Lake Cleanup".into(),
            description: "Collect plastic along the shore".into(),
            event_type: "Cleanup".into(),
            thumbnail: "https://img.example/lake.png".into(),
            location: "Gulshan Lake".into(),
            event_date: Some("2025-03-08T08:00:00Z".into()),
            creator_email: Some("host@example.org".into()),
        }
    }

    #[test]
    fn test_valid_draft() {
        let starts_at = valid_draft().validate(now()).unwrap();
        assert_eq!(starts_at, Utc.with_ymd_and_hms(2025, 3, 8, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_missing_fields() {
        let mut draft = valid_draft();
        draft.location = "  ".into();
        assert_eq!(draft.validate(now()), Err(Error::MissingField("location".into())));

        let mut draft = valid_draft();
        draft.event_date = None;
        assert_eq!(draft.validate(now()), Err(Error::MissingField("eventDate".into())));
    }

    #[test]
    fn test_date_must_be_future() {
        let mut draft = valid_draft();
        draft.event_date = Some("2025-03-01T12:00:00Z".into());
        assert!(matches!(
            draft.validate(now()),
            Err(Error::EventDateNotInFuture { .. })
        ));

        draft.event_date = Some("someday".into());
        assert_eq!(draft.validate(now()), Err(Error::MalformedDate("someday".into())));
    }

    #[test]
    fn test_creator_email_checked() {
        let mut draft = valid_draft();
        draft.creator_email = Some("not-an-email".into());
        assert!(matches!(draft.validate(now()), Err(Error::InvalidEmail(_))));
    }

    #[test]
    fn test_into_event() {
        let event = valid_draft().into_event("evt-1", now()).unwrap();
        assert_eq!(event.id, "evt-1");
        assert_eq!(event.event_type, "Cleanup");
        assert!(event.is_upcoming(now()));
        assert_eq!(event.event_date.raw(), "2025-03-08T08:00:00+00:00");
    }

    #[test]
    fn test_deserialize_form_payload() {
        let draft: EventDraft = serde_json::from_str(
            r#"{"title": "Food Drive", "eventType": "Donation", "eventDate": "2025-04-01"}"#,
        )
        .unwrap();
        assert_eq!(draft.event_type, "Donation");
        assert_eq!(draft.validate(now()), Err(Error::MissingField("description".into())));
    }
}
