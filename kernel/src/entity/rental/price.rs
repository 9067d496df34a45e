use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;
use vodca::{AsRefln, Fromln};

use crate::entity::{DaysRented, PricePerDay, RentDate};

/// Price agreed when the rental is created. Never recomputed afterwards.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct OriginalPrice(Decimal);

impl OriginalPrice {
    pub fn new(price: impl Into<Decimal>) -> Self {
        Self(price.into())
    }

    pub fn calculate(days_rented: &DaysRented, price_per_day: &PricePerDay) -> Self {
        Self(Decimal::from(i32::from(*days_rented)) * Decimal::from(*price_per_day))
    }

    /// Daily rate implied by this price. `None` for a zero-day rental.
    pub fn per_day(&self, days_rented: &DaysRented) -> Option<Decimal> {
        let days = i32::from(*days_rented);
        (days != 0).then(|| self.0 / Decimal::from(days))
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct DelayFee(Decimal);

impl DelayFee {
    pub fn new(fee: impl Into<Decimal>) -> Self {
        Self(fee.into())
    }

    /// Charge for the days held past the contracted duration, at the daily
    /// rate derived from the original price.
    pub fn calculate(
        rent_date: &RentDate,
        days_rented: &DaysRented,
        original_price: &OriginalPrice,
        settled_on: &Date,
    ) -> Self {
        let days_of_delay = rent_date.days_until(settled_on) - i64::from(i32::from(*days_rented));
        match original_price.per_day(days_rented) {
            Some(per_day) if days_of_delay > 0 => Self(Decimal::from(days_of_delay) * per_day),
            _ => Self(Decimal::ZERO),
        }
    }
}
