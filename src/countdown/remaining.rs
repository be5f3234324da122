//! Countdown state and the duration breakdown.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::constants::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};

/// Time left until a target instant, split into display units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Remaining {
    /// Whole milliseconds left
    pub total_ms: u64,
    /// Whole days
    pub days: u64,
    /// Hours past the last whole day (0-23)
    pub hours: u64,
    /// Minutes past the last whole hour (0-59)
    pub minutes: u64,
    /// Seconds past the last whole minute (0-59)
    pub seconds: u64,
}

impl Remaining {
    /// Break a millisecond duration into days, hours, minutes and seconds
    pub fn from_millis(total_ms: u64) -> Self {
        Self {
            total_ms,
            days: total_ms / MS_PER_DAY,
            hours: (total_ms % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (total_ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (total_ms % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }
}

/// Countdown state machine: `Pending` until the target passes, then `Expired` for good
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "remaining", rename_all = "camelCase")]
pub enum CountdownState {
    /// Target still ahead
    Pending(Remaining),
    /// Target reached or passed (terminal)
    Expired,
}

impl CountdownState {
    /// True once the target has passed
    pub fn is_expired(&self) -> bool {
        matches!(self, CountdownState::Expired)
    }

    /// Remaining time while pending
    pub fn remaining(&self) -> Option<&Remaining> {
        match self {
            CountdownState::Pending(remaining) => Some(remaining),
            CountdownState::Expired => None,
        }
    }
}

/// State for `target` observed at `now`; zero or negative distance is `Expired`
pub fn compute_state(target: DateTime<Utc>, now: DateTime<Utc>) -> CountdownState {
    let delta_ms = target.signed_duration_since(now).num_milliseconds();
    if delta_ms <= 0 {
        CountdownState::Expired
    } else {
        CountdownState::Pending(Remaining::from_millis(delta_ms.unsigned_abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 15, 9, 26).unwrap()
    }

    #[test]
    fn test_breakdown_one_of_each() {
        let state = compute_state(now() + Duration::milliseconds(90_061_000), now());
        let remaining = state.remaining().copied().unwrap();
        assert_eq!(
            (remaining.days, remaining.hours, remaining.minutes, remaining.seconds),
            (1, 1, 1, 1)
        );
        assert_eq!(remaining.total_ms, 90_061_000);
    }

    #[test]
    fn test_breakdown_truncates() {
        let remaining = Remaining::from_millis(59_999);
        assert_eq!((remaining.minutes, remaining.seconds), (0, 59));

        let remaining = Remaining::from_millis(3 * MS_PER_DAY + 23 * MS_PER_HOUR + 999);
        assert_eq!((remaining.days, remaining.hours, remaining.seconds), (3, 23, 0));
    }

    #[test]
    fn test_past_and_exact_targets_expire() {
        assert_eq!(compute_state(now() - Duration::seconds(1), now()), CountdownState::Expired);
        assert_eq!(compute_state(now(), now()), CountdownState::Expired);
    }

    #[test]
    fn test_sub_second_target_is_pending() {
        let state = compute_state(now() + Duration::milliseconds(400), now());
        assert!(!state.is_expired());
        assert_eq!(state.remaining().map(|r| r.seconds), Some(0));
    }

    #[test]
    fn test_state_serde_shape() {
        let json = serde_json::to_value(CountdownState::Expired).unwrap();
        assert_eq!(json["state"], "expired");

        let pending = CountdownState::Pending(Remaining::from_millis(61_000));
        let json = serde_json::to_value(pending).unwrap();
        assert_eq!(json["state"], "pending");
        assert_eq!(json["remaining"]["minutes"], 1);
    }
}
