use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Original prices plus delay fees over a window.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Revenue(Decimal);

impl Revenue {
    pub fn new(amount: impl Into<Decimal>) -> Self {
        Self(amount.into())
    }

    pub fn combine(original_prices: Decimal, delay_fees: Decimal) -> Self {
        Self(original_prices + delay_fees)
    }
}

/// Number of rentals matching a filter.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct RentalAmount(i64);

impl RentalAmount {
    pub fn new(amount: impl Into<i64>) -> Self {
        Self(amount.into())
    }
}
