//! Crate-wide constants.
//!
//! All defaults and time units are defined here for easy auditing and modification.

// ═══════════════════════════════════════════════════════════════════════════════
// LISTING CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Events shown per page of the upcoming-events list
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Events shown in the home page gallery
pub const DEFAULT_FEATURED_LIMIT: usize = 6;

/// "Other events you might be interested in" on an event page
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Recent events listed on the dashboard
pub const DEFAULT_RECENT_LIMIT: usize = 5;

// ═══════════════════════════════════════════════════════════════════════════════
// TIME CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Milliseconds per second
pub const MS_PER_SECOND: u64 = 1_000;

/// Milliseconds per minute
pub const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;

/// Milliseconds per hour
pub const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Milliseconds per day
pub const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

/// Countdown tick period in milliseconds
pub const TICK_INTERVAL_MS: u64 = MS_PER_SECOND;

/// Assumed duration of an event, used to decide whether it is running
pub const DEFAULT_RUNNING_WINDOW_HOURS: u32 = 4;

// ═══════════════════════════════════════════════════════════════════════════════
// DISPLAY CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Indicator shown instead of digits once an event has begun
pub const EVENT_STARTED_LABEL: &str = "Event started";

/// Fallback message when a feed reports failure without one
pub const DEFAULT_FEED_ERROR: &str = "Failed to load events";

/// Short month names in calendar order
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
