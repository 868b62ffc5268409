use chrono::{Duration, NaiveDate};
use std::sync::Mutex;

use crate::ports::Clock;

/// Mock implementation of the Clock port
///
/// Holds a settable "today" so tests can pin dates and move time forward
/// deterministically.
pub struct FixedClock {
    today: Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Mutex::new(today),
        }
    }

    /// Pin the clock to a specific date
    pub fn set_today(&self, today: NaiveDate) {
        *self.today.lock().unwrap() = today;
    }

    /// Move the clock forward by whole days
    pub fn advance_days(&self, days: i64) {
        let mut today = self.today.lock().unwrap();
        *today = *today + Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fixed_clock_returns_pinned_date() {
        let clock = FixedClock::new(date(2024, 3, 1));
        assert_eq!(clock.today(), date(2024, 3, 1));
    }

    #[test]
    fn test_fixed_clock_advances_by_days() {
        let clock = FixedClock::new(date(2024, 2, 28));
        clock.advance_days(2);
        assert_eq!(clock.today(), date(2024, 3, 1));
    }
}
