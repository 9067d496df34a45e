use kernel::interface::clock::Clock;
use time::{Date, OffsetDateTime};

/// Today's date in UTC.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().date()
    }
}

/// Always answers the same date. Used for back-dated settlement and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(Date);

impl FixedClock {
    pub fn new(date: Date) -> Self {
        Self(date)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}
