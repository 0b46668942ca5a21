//! Time window used to pick which events make it into a feed.

use chrono::{DateTime, Duration, Utc};

/// How far back from the reference time events are still listed.
pub const LOOKBACK_DAYS: i64 = 30;
/// How far ahead of the reference time events are listed.
pub const LOOKAHEAD_DAYS: i64 = 365;

/// Inclusive range of start times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl EventWindow {
    /// The feed window: `LOOKBACK_DAYS` before `reference` through
    /// `LOOKAHEAD_DAYS` after it.
    pub fn around(reference: DateTime<Utc>) -> Self {
        EventWindow {
            from: reference - Duration::days(LOOKBACK_DAYS),
            to: reference + Duration::days(LOOKAHEAD_DAYS),
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant <= self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_bounds_are_inclusive() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let window = EventWindow::around(now);

        assert!(window.contains(now - Duration::days(30)));
        assert!(window.contains(now + Duration::days(365)));
        assert!(!window.contains(now - Duration::days(30) - Duration::seconds(1)));
        assert!(!window.contains(now + Duration::days(365) + Duration::seconds(1)));
    }
}
