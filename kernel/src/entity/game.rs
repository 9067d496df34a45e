mod id;
mod price;

pub use self::{id::*, price::*};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

/// The part of a catalog item a rental needs.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct Game {
    id: GameId,
    price_per_day: PricePerDay,
}

impl Game {
    pub fn new(id: GameId, price_per_day: PricePerDay) -> Self {
        Self { id, price_per_day }
    }
}
