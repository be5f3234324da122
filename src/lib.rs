//! # eventboard
//!
//! Client-side core of a community events board: the query engine behind the
//! upcoming-events list and the live countdown shown on every event card.
//!
//! ## Architecture
//!
//! - **Core**: event records, feed decoding, drafts and configuration
//! - **Query**: search, type and location filters, stable sort, pagination
//!   and facets
//! - **Countdown**: `Pending` / `Expired` state machine, 1-second tick task
//!   and compact or full rendering
//! - **Insights**: dashboard counts, monthly charts and related-event
//!   suggestions
//! - **CLI**: command implementations for the `eventboard` binary
//!
//! ## Example
//!
//! ```rust
//! use eventboard::prelude::*;
//!
//! let events = vec![
//!     Event::new("1", "River Cleanup", "Cleanup").with_location("Dhaka"),
//!     Event::new("2", "Book Drive", "Donation").with_location("Sylhet"),
//!     Event::new("3", "Canal Cleanup", "Cleanup").with_location("Dhaka"),
//! ];
//!
//! let query = QueryState::new()
//!     .with_type("Cleanup")
//!     .with_sort(SortKey::TitleAsc);
//!
//! let page = run_query(&events, &query)?;
//! assert_eq!(page.filtered_count, 2);
//! assert_eq!(page.page_items[0].title, "Canal Cleanup");
//! # Ok::<(), eventboard::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    trivial_casts,
    unused_lifetimes,
    unused_qualifications
)]

pub mod cli;
pub mod core;
pub mod countdown;
pub mod error;
pub mod insights;
pub mod query;
pub mod utils;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        config::EngineConfig,
        draft::EventDraft,
        event::{Event, EventDate},
        feed::{parse_feed, parse_joined_feed, EventFeed},
        joined::JoinedEvent,
    };
    pub use crate::countdown::{
        clock::{CountdownClock, ManualClock, SystemClock, TimeSource},
        remaining::{compute_state, CountdownState, Remaining},
        render::{compact, full, FullCountdown},
    };
    #[cfg(feature = "async-timer")]
    pub use crate::countdown::timer::{
        create_countdown, create_countdown_with_clock, CountdownHandle, MonotonicClock,
    };
    pub use crate::error::{Error, Result};
    pub use crate::insights::{
        dashboard::{
            event_stats, events_by_creator, events_by_month, joined_by_month, recent_events,
            type_distribution, EventStats,
        },
        related::{featured_events, find_event, related_events},
    };
    pub use crate::query::{
        engine::{facets, run_query, Facets, QueryResult},
        sort::SortKey,
        state::QueryState,
    };
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
