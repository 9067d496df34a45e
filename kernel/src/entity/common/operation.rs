use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Maximum number of rows a listing returns. Built from an unsigned value so
/// a negative limit cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct SelectLimit(i64);

impl SelectLimit {
    pub fn new(value: u32) -> Self {
        SelectLimit(i64::from(value))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct SelectOffset(i64);

impl SelectOffset {
    pub fn new(value: u32) -> Self {
        SelectOffset(i64::from(value))
    }
}
