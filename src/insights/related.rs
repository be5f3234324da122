//! Event suggestions for detail and home pages.

use crate::core::event::Event;

/// Up to `limit` other events of the same type, in collection order
pub fn related_events<'a>(events: &'a [Event], event: &Event, limit: usize) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|other| other.id != event.id && other.event_type == event.event_type)
        .take(limit)
        .collect()
}

/// Look up an event by id
pub fn find_event<'a>(events: &'a [Event], id: &str) -> Option<&'a Event> {
    events.iter().find(|event| event.id == id)
}

/// The first `limit` events, for the home page gallery
pub fn featured_events(events: &[Event], limit: usize) -> &[Event] {
    &events[..limit.min(events.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Event> {
        vec![
            Event::new("a", "River Cleanup", "Cleanup"),
            Event::new("b", "Blood Camp", "Health"),
            Event::new("c", "Park Cleanup", "Cleanup"),
            Event::new("d", "Canal Cleanup", "Cleanup"),
            Event::new("e", "Beach Cleanup", "Cleanup"),
            Event::new("f", "Lake Cleanup", "Cleanup"),
        ]
    }

    #[test]
    fn test_related_excludes_self_and_other_types() {
        let events = sample();
        let river = find_event(&events, "a").unwrap();

        let related = related_events(&events, river, 3);
        let ids: Vec<&str> = related.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["c", "d", "e"]);
    }

    #[test]
    fn test_related_none_of_same_type() {
        let events = sample();
        let camp = find_event(&events, "b").unwrap();
        assert!(related_events(&events, camp, 3).is_empty());
    }

    #[test]
    fn test_featured_events() {
        let events = sample();
        assert_eq!(featured_events(&events, 4).len(), 4);
        assert_eq!(featured_events(&events, 10).len(), 6);
        assert!(featured_events(&[], 6).is_empty());
        assert!(find_event(&events, "zz").is_none());
    }
}
