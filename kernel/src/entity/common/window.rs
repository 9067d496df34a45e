use serde::{Deserialize, Serialize};
use time::macros::date;
use time::Date;
use vodca::References;

/// Inclusive range of rent dates.
///
/// A missing lower bound falls back to [`DateWindow::EARLIEST`]. The upper
/// bound is optional for listings; aggregate queries always carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, References)]
pub struct DateWindow {
    since: Date,
    until: Option<Date>,
}

impl DateWindow {
    pub const EARLIEST: Date = date!(1900 - 01 - 01);
    pub const LATEST: Date = date!(2100 - 12 - 31);

    /// Window with a lower bound only.
    pub fn starting(since: Option<Date>) -> Self {
        Self {
            since: since.unwrap_or(Self::EARLIEST),
            until: None,
        }
    }

    /// Window closed on both ends, defaulting each missing end.
    pub fn bounded(since: Option<Date>, until: Option<Date>) -> Self {
        Self {
            since: since.unwrap_or(Self::EARLIEST),
            until: Some(until.unwrap_or(Self::LATEST)),
        }
    }

    pub fn contains(&self, day: &Date) -> bool {
        self.since <= *day && self.until.map_or(true, |until| *day <= until)
    }
}

impl Default for DateWindow {
    fn default() -> Self {
        Self::starting(None)
    }
}
