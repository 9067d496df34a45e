use serde::{Deserialize, Serialize};
use time::Date;
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize, Fromln, AsRefln)]
pub struct RentDate(Date);

impl RentDate {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }

    /// Whole days from the rent date to `day`. Negative when `day` is earlier.
    pub fn days_until(&self, day: &Date) -> i64 {
        (*day - self.0).whole_days()
    }
}
