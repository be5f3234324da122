//! Event filtering: text search, type and location.
//!
//! All three criteria combine with AND. An empty criterion matches
//! everything.

use crate::core::event::Event;
use crate::query::state::QueryState;

/// Compiled filter criteria
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Lowercased, trimmed search needle
    search: Option<String>,
    /// Exact event type
    event_type: Option<String>,
    /// Exact location
    location: Option<String>,
}

impl EventFilter {
    /// Create a filter that matches all events
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile the criteria of a query
    pub fn from_query(query: &QueryState) -> Self {
        Self::new()
            .search(query.search_text())
            .event_type(query.type_filter())
            .location(query.location_filter())
    }

    /// Case-insensitive substring over title, description and location
    pub fn search(mut self, text: &str) -> Self {
        let needle = text.trim();
        self.search = (!needle.is_empty()).then(|| needle.to_lowercase());
        self
    }

    /// Exact event type match
    pub fn event_type(mut self, event_type: &str) -> Self {
        self.event_type = (!event_type.is_empty()).then(|| event_type.to_string());
        self
    }

    /// Exact location match
    pub fn location(mut self, location: &str) -> Self {
        self.location = (!location.is_empty()).then(|| location.to_string());
        self
    }

    /// True if no criterion is set
    pub fn is_all_inclusive(&self) -> bool {
        self.search.is_none() && self.event_type.is_none() && self.location.is_none()
    }

    /// Check if an event matches this filter
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(ref event_type) = self.event_type {
            if &event.event_type != event_type {
                return false;
            }
        }

        if let Some(ref location) = self.location {
            if &event.location != location {
                return false;
            }
        }

        if let Some(ref needle) = self.search {
            let hit = [&event.title, &event.description, &event.location]
                .iter()
                .any(|field| field.to_lowercase().contains(needle.as_str()));
            if !hit {
                return false;
            }
        }

        true
    }
}

/// Events matching the query's criteria, in input order
pub fn filter_events<'a>(events: &'a [Event], query: &QueryState) -> Vec<&'a Event> {
    let filter = EventFilter::from_query(query);
    events.iter().filter(|e| filter.matches(e)).collect()
}
