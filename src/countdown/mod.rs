//! Countdown to an event's start.
//!
//! - [`remaining`]: the `Pending` / `Expired` state machine and unit breakdown
//! - [`clock`]: time sources and the synchronous [`CountdownClock`]
//! - [`timer`]: live countdowns ticking once per second on tokio
//! - [`render`]: compact and full text forms

pub mod clock;
pub mod remaining;
pub mod render;
#[cfg(feature = "async-timer")]
pub mod timer;

pub use clock::*;
pub use remaining::*;
pub use render::*;
#[cfg(feature = "async-timer")]
pub use timer::*;
