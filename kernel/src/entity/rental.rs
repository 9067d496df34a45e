mod aggregate;
mod customer_id;
mod days_rented;
mod filter;
mod id;
mod order;
mod price;
mod rent_date;
mod return_date;
mod search;
mod status;

pub use self::{
    aggregate::*, customer_id::*, days_rented::*, filter::*, id::*, order::*, price::*,
    rent_date::*, return_date::*, search::*, status::*,
};
use crate::entity::{Game, GameId};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use time::Date;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct Rental {
    id: RentalId,
    customer_id: CustomerId,
    game_id: GameId,
    rent_date: RentDate,
    days_rented: DaysRented,
    return_date: Option<ReturnDate>,
    original_price: OriginalPrice,
    delay_fee: Option<DelayFee>,
}

impl Rental {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: RentalId,
        customer_id: CustomerId,
        game_id: GameId,
        rent_date: RentDate,
        days_rented: DaysRented,
        return_date: Option<ReturnDate>,
        original_price: OriginalPrice,
        delay_fee: Option<DelayFee>,
    ) -> Self {
        Self {
            id,
            customer_id,
            game_id,
            rent_date,
            days_rented,
            return_date,
            original_price,
            delay_fee,
        }
    }

    pub fn status(&self) -> RentalStatus {
        match (&self.return_date, &self.delay_fee) {
            (_, Some(_)) => RentalStatus::FeeSettled,
            (Some(_), None) => RentalStatus::Returned,
            (None, None) => RentalStatus::Open,
        }
    }

    /// Day the delay is counted up to: the return date once the rental is
    /// closed, otherwise `today`.
    pub fn settlement_date(&self, today: Date) -> Date {
        self.return_date.map_or(today, Date::from)
    }

    pub fn calculate_delay_fee(&self, today: Date) -> DelayFee {
        DelayFee::calculate(
            &self.rent_date,
            &self.days_rented,
            &self.original_price,
            &self.settlement_date(today),
        )
    }
}

/// A rental about to be inserted; the store assigns its id.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct NewRental {
    customer_id: CustomerId,
    game_id: GameId,
    rent_date: RentDate,
    days_rented: DaysRented,
    original_price: OriginalPrice,
}

impl NewRental {
    pub fn new(
        customer_id: CustomerId,
        game_id: GameId,
        rent_date: RentDate,
        days_rented: DaysRented,
        original_price: OriginalPrice,
    ) -> Self {
        Self {
            customer_id,
            game_id,
            rent_date,
            days_rented,
            original_price,
        }
    }

    /// Opens a rental of `game` on `rent_date`, pricing it from the game's
    /// current daily price.
    pub fn open(
        customer_id: CustomerId,
        game: &Game,
        days_rented: DaysRented,
        rent_date: RentDate,
    ) -> Self {
        let original_price = OriginalPrice::calculate(&days_rented, game.price_per_day());
        Self::new(
            customer_id,
            *game.id(),
            rent_date,
            days_rented,
            original_price,
        )
    }
}
