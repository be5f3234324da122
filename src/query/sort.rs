//! Sort keys and the stable event ordering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::core::event::Event;
use crate::error::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// SORT KEY
// ═══════════════════════════════════════════════════════════════════════════════

/// Ordering applied to the filtered events before pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Earliest start first
    #[default]
    DateAsc,
    /// Latest start first
    DateDesc,
    /// Title A to Z
    TitleAsc,
    /// Title Z to A
    TitleDesc,
}

impl SortKey {
    /// Every key, in menu order
    pub const ALL: [SortKey; 4] = [
        SortKey::DateAsc,
        SortKey::DateDesc,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
    ];

    /// Wire name
    pub fn name(&self) -> &'static str {
        match self {
            SortKey::DateAsc => "dateAsc",
            SortKey::DateDesc => "dateDesc",
            SortKey::TitleAsc => "titleAsc",
            SortKey::TitleDesc => "titleDesc",
        }
    }

    /// Human-readable label for a sort menu
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::DateAsc => "Date (soonest first)",
            SortKey::DateDesc => "Date (latest first)",
            SortKey::TitleAsc => "Title (A-Z)",
            SortKey::TitleDesc => "Title (Z-A)",
        }
    }

    /// Compare two events under this key
    pub fn compare(&self, a: &Event, b: &Event) -> Ordering {
        match self {
            SortKey::DateAsc => compare_dates(a.starts_at(), b.starts_at(), false),
            SortKey::DateDesc => compare_dates(a.starts_at(), b.starts_at(), true),
            SortKey::TitleAsc => a.title.cmp(&b.title),
            SortKey::TitleDesc => b.title.cmp(&a.title),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = Error;

    /// Accepts the wire names and their kebab or snake forms, in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dateasc" | "date-asc" | "date_asc" => Ok(SortKey::DateAsc),
            "datedesc" | "date-desc" | "date_desc" => Ok(SortKey::DateDesc),
            "titleasc" | "title-asc" | "title_asc" => Ok(SortKey::TitleAsc),
            "titledesc" | "title-desc" | "title_desc" => Ok(SortKey::TitleDesc),
            _ => Err(Error::InvalidSortKey(s.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ORDERING
// ═══════════════════════════════════════════════════════════════════════════════

/// Events without a parseable date go last in both directions
fn compare_dates(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if descending => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable in-place sort; ties keep their input order
pub fn sort_events(events: &mut [&Event], key: SortKey) {
    events.sort_by(|a, b| key.compare(a, b));
}
