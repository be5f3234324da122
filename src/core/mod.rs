//! Core modules for eventboard.
//!
//! This module contains the fundamental building blocks:
//! - Event records and tolerant date handling
//! - Engine configuration
//! - Events API payload decoding
//! - Event drafts from the create/update forms
//! - Joined-event records for the dashboard

pub mod config;
pub mod draft;
pub mod event;
pub mod feed;
pub mod joined;

pub use config::*;
pub use draft::*;
pub use event::*;
pub use feed::*;
pub use joined::*;
