//! Utility modules for eventboard.
//!
//! This module contains shared utilities used across the crate:
//! - Validation helpers
//! - Constants

pub mod constants;
pub mod validation;

pub use constants::*;
pub use validation::*;
