#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use memo_core::Clock;
use std::cell::Cell;

/// Clock that advances one minute on every read, starting at 2024-01-01.
pub struct SteppingClock {
    next: Cell<DateTime<Utc>>,
}

impl SteppingClock {
    pub fn new() -> Self {
        Self {
            next: Cell::new(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let current = self.next.get();
        self.next.set(current + Duration::minutes(1));
        current
    }
}

impl Clock for &SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
