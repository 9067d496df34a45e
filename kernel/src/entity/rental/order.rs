use serde::{Deserialize, Serialize};
use vodca::References;

/// Columns a listing may be sorted by.
///
/// This is the only path from caller input into query text, so anything not
/// listed here is rejected by [`RentalColumn::parse`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum RentalColumn {
    Id,
    CustomerId,
    GameId,
    RentDate,
    DaysRented,
    ReturnDate,
    OriginalPrice,
    DelayFee,
}

impl RentalColumn {
    pub const ALL: [RentalColumn; 8] = [
        RentalColumn::Id,
        RentalColumn::CustomerId,
        RentalColumn::GameId,
        RentalColumn::RentDate,
        RentalColumn::DaysRented,
        RentalColumn::ReturnDate,
        RentalColumn::OriginalPrice,
        RentalColumn::DelayFee,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RentalColumn::Id => "id",
            RentalColumn::CustomerId => "customerId",
            RentalColumn::GameId => "gameId",
            RentalColumn::RentDate => "rentDate",
            RentalColumn::DaysRented => "daysRented",
            RentalColumn::ReturnDate => "returnDate",
            RentalColumn::OriginalPrice => "originalPrice",
            RentalColumn::DelayFee => "delayFee",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.name() == name)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, References)]
pub struct RentalOrder {
    column: RentalColumn,
    desc: bool,
}

impl RentalOrder {
    pub fn new(column: RentalColumn, desc: bool) -> Self {
        Self { column, desc }
    }

    /// Resolves a caller supplied column name. Unknown names yield `None`, in
    /// which case the direction is dropped as well.
    pub fn parse(name: &str, desc: bool) -> Option<Self> {
        RentalColumn::parse(name).map(|column| Self::new(column, desc))
    }
}
