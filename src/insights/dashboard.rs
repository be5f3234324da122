//! Dashboard aggregates over an event collection.

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::event::Event;
use crate::core::joined::JoinedEvent;
use crate::utils::constants::MONTH_NAMES;

/// Upcoming, past and running counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStats {
    /// All events, malformed dates included
    pub total: usize,
    /// Start is after `now`
    pub upcoming: usize,
    /// Start is before `now`
    pub past: usize,
    /// Started, and still inside the running window
    pub running: usize,
    /// Events whose date could not be parsed
    pub undated: usize,
}

/// Count events relative to `now`.
///
/// An event is running from its start until `window_hours` later. Events
/// without a parseable date only count toward `total` and `undated`.
pub fn event_stats(events: &[Event], now: DateTime<Utc>, window_hours: u32) -> EventStats {
    let window = Duration::hours(i64::from(window_hours));
    let mut stats = EventStats {
        total: events.len(),
        ..EventStats::default()
    };

    for event in events {
        let Some(start) = event.starts_at() else {
            stats.undated += 1;
            continue;
        };

        if start > now {
            stats.upcoming += 1;
        }
        if start < now {
            stats.past += 1;
        }
        if start <= now && now <= start + window {
            stats.running += 1;
        }
    }

    tracing::debug!(
        "Stats: {} total, {} upcoming, {} past, {} running, {} undated",
        stats.total,
        stats.upcoming,
        stats.past,
        stats.running,
        stats.undated
    );
    stats
}

/// `(eventType, count)` pairs in order of first appearance
pub fn type_distribution(events: &[Event]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for event in events {
        match counts.iter_mut().find(|(t, _)| *t == event.event_type) {
            Some((_, count)) => *count += 1,
            None => counts.push((event.event_type.clone(), 1)),
        }
    }
    counts
}

/// `(month, count)` in order of first appearance; undated events are skipped
pub fn events_by_month(events: &[Event]) -> Vec<(&'static str, usize)> {
    let mut counts: Vec<(&'static str, usize)> = Vec::new();
    for start in events.iter().filter_map(Event::starts_at) {
        let month = MONTH_NAMES[start.month0() as usize];
        match counts.iter_mut().find(|(m, _)| *m == month) {
            Some((_, count)) => *count += 1,
            None => counts.push((month, 1)),
        }
    }
    counts
}

/// Joined records per month of [`JoinedEvent::activity_date`], in calendar
/// order; months without activity are left out
pub fn joined_by_month(joined: &[JoinedEvent]) -> Vec<(&'static str, usize)> {
    let mut counts = [0usize; 12];
    for date in joined.iter().filter_map(JoinedEvent::activity_date) {
        counts[date.month0() as usize] += 1;
    }

    MONTH_NAMES
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(name, count)| (*name, count))
        .collect()
}

/// Events created by `email` (ASCII case-insensitive), in collection order
pub fn events_by_creator(events: &[Event], email: &str) -> Vec<Event> {
    let email = email.trim();
    events
        .iter()
        .filter(|event| {
            event
                .creator_email
                .as_deref()
                .is_some_and(|creator| creator.trim().eq_ignore_ascii_case(email))
        })
        .cloned()
        .collect()
}

/// The first `limit` events, as listed
pub fn recent_events(events: &[Event], limit: usize) -> &[Event] {
    &events[..limit.min(events.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap()
    }

    fn sample() -> Vec<Event> {
        vec![
            Event::new("1", "Tree planting", "Plantation").starting_at(now() + Duration::days(2)),
            Event::new("2", "Beach cleanup", "Cleanup").starting_at(now() - Duration::hours(3)),
            Event::new("3", "Food drive", "Donation").starting_at(now() - Duration::days(40)),
            Event::new("4", "Park cleanup", "Cleanup").with_raw_date("someday"),
            Event::new("5", "Canal cleanup", "Cleanup").starting_at(now() - Duration::hours(5)),
        ]
    }

    #[test]
    fn test_event_stats() {
        let stats = event_stats(&sample(), now(), 4);
        assert_eq!(
            stats,
            EventStats {
                total: 5,
                upcoming: 1,
                past: 3,
                running: 1,
                undated: 1,
            }
        );
    }

    #[test]
    fn test_event_starting_now_is_running() {
        let events = [Event::new("1", "Now", "Other").starting_at(now())];
        let stats = event_stats(&events, now(), 4);
        assert_eq!((stats.upcoming, stats.past, stats.running), (0, 0, 1));
    }

    #[test]
    fn test_type_distribution_first_seen_order() {
        assert_eq!(
            type_distribution(&sample()),
            [
                ("Plantation".to_string(), 1),
                ("Cleanup".to_string(), 3),
                ("Donation".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_events_by_month() {
        // March seen first; the undated event is skipped
        assert_eq!(events_by_month(&sample()), [("Mar", 3), ("Feb", 1)]);
        assert!(events_by_month(&[]).is_empty());
    }

    #[test]
    fn test_recent_events() {
        let events = sample();
        assert_eq!(recent_events(&events, 2).len(), 2);
        assert_eq!(recent_events(&events, 50).len(), 5);
        assert_eq!(recent_events(&events, 2)[0].id, "1");
    }

    #[test]
    fn test_joined_by_month_calendar_order() {
        let event = Event::new("1", "Tree planting", "Plantation").starting_at(now());
        let at = |m: u32| Utc.with_ymd_and_hms(2025, m, 5, 10, 0, 0).unwrap();

        let mut undated_join = JoinedEvent::new("j4", &event, "v@example.org", at(1));
        undated_join.joined_at = Default::default();

        let joined = [
            JoinedEvent::new("j1", &event, "v@example.org", at(11)),
            JoinedEvent::new("j2", &event, "v@example.org", at(2)),
            JoinedEvent::new("j3", &event, "v@example.org", at(11)),
            undated_join,
        ];

        // j4 falls back to the event date (March)
        assert_eq!(joined_by_month(&joined), [("Feb", 1), ("Mar", 1), ("Nov", 2)]);
        assert!(joined_by_month(&[]).is_empty());
    }

    #[test]
    fn test_events_by_creator() {
        let events = vec![
            Event::new("1", "Tree planting", "Plantation").with_creator("host@example.org"),
            Event::new("2", "Food drive", "Donation").with_creator("other@example.org"),
            Event::new("3", "Beach cleanup", "Cleanup").with_creator("Host@Example.org"),
            Event::new("4", "Canal cleanup", "Cleanup"),
        ];

        let mine = events_by_creator(&events, "host@example.org");
        let ids: Vec<&str> = mine.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert!(events_by_creator(&events, "nobody@example.org").is_empty());
    }
}
