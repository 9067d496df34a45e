use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{
    DateWindow, Rental, RentalAmount, RentalFilter, RentalId, RentalSearch, Revenue,
};
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError>;

    /// Same as [`RentalQuery::find_by_id`], but holds the row until `con` ends
    /// so a read-compute-write on it cannot interleave with other writers.
    async fn find_by_id_for_update(
        &self,
        con: &mut Self::Transaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError>;

    async fn find_all(
        &self,
        con: &mut Self::Transaction,
        search: &RentalSearch,
    ) -> error_stack::Result<Vec<Rental>, KernelError>;

    async fn total_revenue(
        &self,
        con: &mut Self::Transaction,
        window: &DateWindow,
    ) -> error_stack::Result<Revenue, KernelError>;

    async fn count(
        &self,
        con: &mut Self::Transaction,
        filter: &RentalFilter,
    ) -> error_stack::Result<RentalAmount, KernelError>;
}

pub trait DependOnRentalQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type RentalQuery: RentalQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn rental_query(&self) -> &Self::RentalQuery;
}
