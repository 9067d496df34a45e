use error_stack::Report;
use rust_decimal::Decimal;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnGameQuery, DependOnRentalQuery, GameQuery, RentalQuery};
use kernel::interface::update::{DependOnRentalModifier, RentalModifier};
use kernel::prelude::entity::{
    CustomerId, DateWindow, DaysRented, GameId, NewRental, RentDate, RentalFilter, RentalId,
    RentalSearch, ReturnDate,
};
use kernel::KernelError;

use crate::transfer::{
    CreateRentalDto, DeleteRentalDto, GetRentalDto, GetRentalsAmountDto, GetRentalsDto,
    GetRevenueDto, RentalDto, ReturnRentalDto, SettleDelayFeeDto,
};

#[async_trait::async_trait]
pub trait CreateRentalService:
    'static + Sync + Send + DependOnGameQuery + DependOnRentalModifier + DependOnClock
{
    /// Prices the rental from the game's current daily price and stores it as
    /// open. Fails with [`KernelError::NotFound`] when the game is unknown.
    #[tracing::instrument(skip(self))]
    async fn create_rental(&self, dto: CreateRentalDto) -> error_stack::Result<i32, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let game_id = GameId::new(dto.game_id);
        let game = self
            .game_query()
            .find_by_id(&mut connection, &game_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("Game {} does not exist", dto.game_id))
            })?;

        let rental = NewRental::open(
            CustomerId::new(dto.customer_id),
            &game,
            DaysRented::new(dto.days_rented),
            RentDate::new(self.clock().today()),
        );
        let id = self
            .rental_modifier()
            .create(&mut connection, &rental)
            .await?;
        connection.commit().await?;

        tracing::debug!(rental_id = *id.as_ref(), "Rental created");
        Ok(id.into())
    }
}

impl<T> CreateRentalService for T where
    T: DependOnGameQuery + DependOnRentalModifier + DependOnClock
{
}

#[async_trait::async_trait]
pub trait GetRentalService: 'static + Sync + Send + DependOnRentalQuery {
    async fn get_rental(
        &self,
        dto: GetRentalDto,
    ) -> error_stack::Result<Option<RentalDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = RentalId::new(dto.id);
        let rental = self.rental_query().find_by_id(&mut connection, &id).await?;
        connection.commit().await?;

        Ok(rental.map(RentalDto::from))
    }

    #[tracing::instrument(skip(self))]
    async fn get_rentals(
        &self,
        dto: GetRentalsDto,
    ) -> error_stack::Result<Vec<RentalDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let search = RentalSearch::from(dto);
        let rentals = self
            .rental_query()
            .find_all(&mut connection, &search)
            .await?;
        connection.commit().await?;

        Ok(rentals.into_iter().map(RentalDto::from).collect())
    }
}

impl<T> GetRentalService for T where T: DependOnRentalQuery {}

#[async_trait::async_trait]
pub trait ReturnRentalService:
    'static + Sync + Send + DependOnRentalModifier + DependOnClock
{
    /// Stamps today's date as the return date. Returns the rows touched, so
    /// `0` means the id did not exist.
    #[tracing::instrument(skip(self))]
    async fn return_rental(&self, dto: ReturnRentalDto) -> error_stack::Result<u64, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = RentalId::new(dto.id);
        let return_date = ReturnDate::new(self.clock().today());
        let affected = self
            .rental_modifier()
            .update_return_date(&mut connection, &id, &return_date)
            .await?;
        connection.commit().await?;

        Ok(affected)
    }
}

impl<T> ReturnRentalService for T where T: DependOnRentalModifier + DependOnClock {}

#[async_trait::async_trait]
pub trait SettleDelayFeeService:
    'static + Sync + Send + DependOnRentalQuery + DependOnRentalModifier + DependOnClock
{
    /// Computes and stores the delay fee. The rental row stays locked between
    /// the read and the write. Returns `None` when the id is unknown.
    #[tracing::instrument(skip(self))]
    async fn settle_delay_fee(
        &self,
        dto: SettleDelayFeeDto,
    ) -> error_stack::Result<Option<Decimal>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = RentalId::new(dto.id);
        let Some(rental) = self
            .rental_query()
            .find_by_id_for_update(&mut connection, &id)
            .await?
        else {
            connection.roll_back().await?;
            return Ok(None);
        };

        let delay_fee = rental.calculate_delay_fee(self.clock().today());
        self.rental_modifier()
            .update_delay_fee(&mut connection, &id, &delay_fee)
            .await?;
        connection.commit().await?;

        let delay_fee = Decimal::from(delay_fee);
        tracing::info!(rental_id = dto.id, %delay_fee, "Delay fee settled");
        Ok(Some(delay_fee))
    }
}

impl<T> SettleDelayFeeService for T where
    T: DependOnRentalQuery + DependOnRentalModifier + DependOnClock
{
}

#[async_trait::async_trait]
pub trait DeleteRentalService: 'static + Sync + Send + DependOnRentalModifier {
    #[tracing::instrument(skip(self))]
    async fn delete_rental(&self, dto: DeleteRentalDto) -> error_stack::Result<u64, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = RentalId::new(dto.id);
        let affected = self.rental_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;

        Ok(affected)
    }
}

impl<T> DeleteRentalService for T where T: DependOnRentalModifier {}

#[async_trait::async_trait]
pub trait RentalStatisticsService: 'static + Sync + Send + DependOnRentalQuery {
    async fn get_total_revenue(
        &self,
        dto: GetRevenueDto,
    ) -> error_stack::Result<Decimal, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let window = DateWindow::from(dto);
        let revenue = self
            .rental_query()
            .total_revenue(&mut connection, &window)
            .await?;
        connection.commit().await?;

        Ok(revenue.into())
    }

    async fn get_rentals_amount(
        &self,
        dto: GetRentalsAmountDto,
    ) -> error_stack::Result<i64, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let filter = RentalFilter::from(dto);
        let amount = self.rental_query().count(&mut connection, &filter).await?;
        connection.commit().await?;

        Ok(amount.into())
    }
}

impl<T> RentalStatisticsService for T where T: DependOnRentalQuery {}
