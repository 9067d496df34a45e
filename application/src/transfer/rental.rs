use kernel::prelude::entity::{
    CustomerId, DateWindow, DestructRental, GameId, Rental, RentalFilter, RentalOrder,
    RentalSearch, RentalStatus, SelectLimit, SelectOffset,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RentalDto {
    pub id: i32,
    pub customer_id: i32,
    pub game_id: i32,
    pub rent_date: Date,
    pub days_rented: i32,
    pub return_date: Option<Date>,
    pub original_price: Decimal,
    pub delay_fee: Option<Decimal>,
    pub status: RentalStatus,
}

impl From<Rental> for RentalDto {
    fn from(value: Rental) -> Self {
        let status = value.status();
        let DestructRental {
            id,
            customer_id,
            game_id,
            rent_date,
            days_rented,
            return_date,
            original_price,
            delay_fee,
        } = value.into_destruct();
        Self {
            id: id.into(),
            customer_id: customer_id.into(),
            game_id: game_id.into(),
            rent_date: rent_date.into(),
            days_rented: days_rented.into(),
            return_date: return_date.map(Into::into),
            original_price: original_price.into(),
            delay_fee: delay_fee.map(Into::into),
            status,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateRentalDto {
    pub customer_id: i32,
    pub game_id: i32,
    pub days_rented: i32,
}

#[derive(Debug, Clone)]
pub struct GetRentalDto {
    pub id: i32,
}

/// Listing input as it arrives from the request layer. `order` is an
/// arbitrary column name; only names on the allow-list take effect.
#[derive(Debug, Clone, Default)]
pub struct GetRentalsDto {
    pub customer_id: Option<i32>,
    pub game_id: Option<i32>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub order: Option<String>,
    pub desc: bool,
    pub start_date: Option<Date>,
}

impl From<GetRentalsDto> for RentalSearch {
    fn from(value: GetRentalsDto) -> Self {
        let filter = RentalFilter::new(
            value.customer_id.map(CustomerId::new),
            value.game_id.map(GameId::new),
            DateWindow::starting(value.start_date),
        );
        let order = value
            .order
            .as_deref()
            .and_then(|name| RentalOrder::parse(name, value.desc));
        RentalSearch::new(
            filter,
            order,
            value.offset.map(SelectOffset::new).unwrap_or_default(),
            value.limit.map(SelectLimit::new),
        )
    }
}

#[derive(Debug, Clone)]
pub struct ReturnRentalDto {
    pub id: i32,
}

#[derive(Debug, Clone)]
pub struct SettleDelayFeeDto {
    pub id: i32,
}

#[derive(Debug, Clone)]
pub struct DeleteRentalDto {
    pub id: i32,
}

#[derive(Debug, Clone, Default)]
pub struct GetRevenueDto {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl From<GetRevenueDto> for DateWindow {
    fn from(value: GetRevenueDto) -> Self {
        DateWindow::bounded(value.start_date, value.end_date)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetRentalsAmountDto {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub game: Option<i32>,
    pub customer: Option<i32>,
}

impl From<GetRentalsAmountDto> for RentalFilter {
    fn from(value: GetRentalsAmountDto) -> Self {
        RentalFilter::new(
            value.customer.map(CustomerId::new),
            value.game.map(GameId::new),
            DateWindow::bounded(value.start_date, value.end_date),
        )
    }
}
