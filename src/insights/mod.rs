//! Dashboard statistics and event suggestions.

pub mod dashboard;
pub mod related;

pub use dashboard::*;
pub use related::*;
