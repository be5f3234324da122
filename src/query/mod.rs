//! Event list query engine.
//!
//! Search, type and location filters, stable sorting and pagination over an
//! in-memory event collection, plus the facet lists for filter controls.
//!
//! ## Usage
//!
//! ```rust
//! use eventboard::core::Event;
//! use eventboard::query::{run_query, QueryState, SortKey};
//!
//! let events = vec![
//!     Event::new("1", "River Cleanup", "Cleanup").with_location("Dhaka"),
//!     Event::new("2", "Book Drive", "Donation").with_location("Sylhet"),
//! ];
//!
//! let mut query = QueryState::new();
//! query.set_type_filter("Cleanup");
//! query.set_sort_key(SortKey::TitleAsc);
//!
//! let result = run_query(&events, &query).unwrap();
//! assert_eq!(result.filtered_count, 1);
//! assert_eq!(result.available_types, ["Cleanup", "Donation"]);
//! ```

pub mod engine;
pub mod filter;
pub mod sort;
pub mod state;

pub use engine::*;
pub use filter::*;
pub use sort::*;
pub use state::*;
