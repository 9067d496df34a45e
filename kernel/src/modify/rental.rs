use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{DelayFee, NewRental, RentalId, ReturnDate};
use crate::KernelError;

/// Writes to the rentals table. Updates and deletes report the number of rows
/// they touched; none of them check that the rental exists first.
#[async_trait::async_trait]
pub trait RentalModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        rental: &NewRental,
    ) -> error_stack::Result<RentalId, KernelError>;
    async fn update_return_date(
        &self,
        con: &mut Self::Transaction,
        id: &RentalId,
        return_date: &ReturnDate,
    ) -> error_stack::Result<u64, KernelError>;
    async fn update_delay_fee(
        &self,
        con: &mut Self::Transaction,
        id: &RentalId,
        delay_fee: &DelayFee,
    ) -> error_stack::Result<u64, KernelError>;
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        id: &RentalId,
    ) -> error_stack::Result<u64, KernelError>;
}

pub trait DependOnRentalModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type RentalModifier: RentalModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn rental_modifier(&self) -> &Self::RentalModifier;
}
