use serde::{Deserialize, Serialize};
use time::Date;
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize, Fromln, AsRefln)]
pub struct ReturnDate(Date);

impl ReturnDate {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }
}
