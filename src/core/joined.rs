//! Records of events a user has joined.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::event::{Event, EventDate};

/// An event joined by a user, as returned by the joined-events endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedEvent {
    /// Identifier of the join record
    #[serde(alias = "_id")]
    pub id: String,
    /// Joined event's id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// Joined event's title
    #[serde(default, alias = "title")]
    pub event_title: String,
    /// Joined event's type
    #[serde(default)]
    pub event_type: String,
    /// Joined event's location
    #[serde(default)]
    pub location: String,
    /// Joined event's scheduled start
    #[serde(default)]
    pub event_date: EventDate,
    /// Image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Email of the participant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    /// When the user joined
    #[serde(default)]
    pub joined_at: EventDate,
}

impl JoinedEvent {
    /// Record `email` joining `event` at `joined_at`
    pub fn new(
        id: impl Into<String>,
        event: &Event,
        email: impl Into<String>,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            event_id: Some(event.id.clone()),
            event_title: event.title.clone(),
            event_type: event.event_type.clone(),
            location: event.location.clone(),
            event_date: event.event_date.clone(),
            thumbnail: event.thumbnail.clone(),
            user_email: Some(email.into()),
            joined_at: EventDate::from_instant(joined_at),
        }
    }

    /// Instant the record is charted under: the join time, or the event's
    /// start when the join time is missing or unparseable
    pub fn activity_date(&self) -> Option<DateTime<Utc>> {
        self.joined_at.instant().or_else(|| self.event_date.instant())
    }
}
