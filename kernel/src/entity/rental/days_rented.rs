use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Contracted rental duration in days.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct DaysRented(i32);

impl DaysRented {
    pub fn new(days: impl Into<i32>) -> Self {
        Self(days.into())
    }
}
