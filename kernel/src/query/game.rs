use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Game, GameId};
use crate::KernelError;

/// Read access to the catalog, limited to what pricing a rental needs.
#[async_trait::async_trait]
pub trait GameQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &GameId,
    ) -> error_stack::Result<Option<Game>, KernelError>;
}

pub trait DependOnGameQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type GameQuery: GameQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn game_query(&self) -> &Self::GameQuery;
}
