use serde::{Deserialize, Serialize};
use time::Date;
use vodca::References;

use crate::entity::{CustomerId, DateWindow, GameId};

/// A single WHERE condition on the rentals table, carrying the value it binds.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum RentalPredicate {
    Customer(CustomerId),
    Game(GameId),
    RentedSince(Date),
    RentedUntil(Date),
}

impl RentalPredicate {
    /// Bounds on `rentDate` for `window`. The upper one is omitted when open.
    pub fn within(window: &DateWindow) -> Vec<RentalPredicate> {
        let mut predicates = vec![RentalPredicate::RentedSince(*window.since())];
        if let Some(until) = window.until() {
            predicates.push(RentalPredicate::RentedUntil(*until));
        }
        predicates
    }
}

/// Optional equality filters plus a rent date window.
///
/// Filters left as `None` add no predicate at all.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize, References)]
pub struct RentalFilter {
    customer_id: Option<CustomerId>,
    game_id: Option<GameId>,
    window: DateWindow,
}

impl RentalFilter {
    pub fn new(
        customer_id: Option<CustomerId>,
        game_id: Option<GameId>,
        window: DateWindow,
    ) -> Self {
        Self {
            customer_id,
            game_id,
            window,
        }
    }

    /// Predicates to AND together, in bind order.
    pub fn predicates(&self) -> Vec<RentalPredicate> {
        let mut predicates = RentalPredicate::within(&self.window);
        if let Some(customer_id) = self.customer_id {
            predicates.push(RentalPredicate::Customer(customer_id));
        }
        if let Some(game_id) = self.game_id {
            predicates.push(RentalPredicate::Game(game_id));
        }
        predicates
    }
}
