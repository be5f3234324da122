//! Text renderings of a countdown state.
//!
//! Both forms read the same [`CountdownState`]; they only differ in layout.

use serde::Serialize;
use std::fmt;

use crate::countdown::remaining::CountdownState;
use crate::utils::constants::EVENT_STARTED_LABEL;

/// Single line for event cards: `"2d 05h 07m"`, `"05h 07m"` or `"Event started"`
pub fn compact(state: &CountdownState) -> String {
    match state {
        CountdownState::Expired => EVENT_STARTED_LABEL.to_string(),
        CountdownState::Pending(r) if r.days > 0 => {
            format!("{}d {:02}h {:02}m", r.days, r.hours, r.minutes)
        }
        CountdownState::Pending(r) => format!("{:02}h {:02}m", r.hours, r.minutes),
    }
}

/// One unit of the full countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountdownBlock {
    /// Displayed digits
    pub value: String,
    /// Unit label
    pub label: &'static str,
}

impl CountdownBlock {
    fn padded(value: u64, label: &'static str) -> Self {
        Self {
            value: format!("{:02}", value),
            label,
        }
    }
}

/// Full countdown for an event page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FullCountdown {
    /// The event has begun
    Started,
    /// Days (when non-zero), hours, minutes and seconds
    Blocks(Vec<CountdownBlock>),
}

/// Block layout: days unpadded and omitted at zero, the rest two digits
pub fn full(state: &CountdownState) -> FullCountdown {
    let CountdownState::Pending(r) = state else {
        return FullCountdown::Started;
    };

    let mut blocks = Vec::with_capacity(4);
    if r.days > 0 {
        blocks.push(CountdownBlock {
            value: r.days.to_string(),
            label: "Days",
        });
    }
    blocks.push(CountdownBlock::padded(r.hours, "Hours"));
    blocks.push(CountdownBlock::padded(r.minutes, "Mins"));
    blocks.push(CountdownBlock::padded(r.seconds, "Secs"));

    FullCountdown::Blocks(blocks)
}

impl fmt::Display for FullCountdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FullCountdown::Started => write!(f, "{}", EVENT_STARTED_LABEL),
            FullCountdown::Blocks(blocks) => {
                let parts: Vec<String> = blocks
                    .iter()
                    .map(|b| format!("{} {}", b.value, b.label))
                    .collect();
                write!(f, "{}", parts.join("  "))
            }
        }
    }
}
