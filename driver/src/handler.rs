use std::ops::Deref;
use std::sync::Arc;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{DependOnGameQuery, DependOnRentalQuery};
use kernel::interface::update::DependOnRentalModifier;
use kernel::KernelError;

use crate::clock::SystemClock;
use crate::database::{
    PostgresConnection, PostgresDatabase, PostgresGameRepository, PostgresRentalRepository,
};

#[derive(Clone)]
pub struct AppModule<C: Clock = SystemClock>(Arc<Handler<C>>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Self::with_clock(SystemClock).await
    }
}

impl<C: Clock> AppModule<C> {
    pub async fn with_clock(clock: C) -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init(clock).await?)))
    }
}

impl<C: Clock> Deref for AppModule<C> {
    type Target = Handler<C>;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

/// Everything the rental services depend on, backed by Postgres.
///
/// Implements each `DependOn*` accessor, so the application service traits
/// are available on it directly.
pub struct Handler<C: Clock = SystemClock> {
    pgpool: PostgresDatabase,
    rental_repository: PostgresRentalRepository,
    game_repository: PostgresGameRepository,
    clock: C,
}

impl<C: Clock> Handler<C> {
    pub async fn init(clock: C) -> error_stack::Result<Self, KernelError> {
        let pgpool = PostgresDatabase::new().await?;
        pgpool.migrate().await?;

        Ok(Self {
            pgpool,
            rental_repository: PostgresRentalRepository,
            game_repository: PostgresGameRepository,
            clock,
        })
    }
}

#[async_trait::async_trait]
impl<C: Clock> DatabaseConnection for Handler<C> {
    type Transaction = PostgresConnection;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        self.pgpool.transact().await
    }
}

impl<C: Clock> DependOnRentalQuery for Handler<C> {
    type RentalQuery = PostgresRentalRepository;
    fn rental_query(&self) -> &Self::RentalQuery {
        &self.rental_repository
    }
}

impl<C: Clock> DependOnRentalModifier for Handler<C> {
    type RentalModifier = PostgresRentalRepository;
    fn rental_modifier(&self) -> &Self::RentalModifier {
        &self.rental_repository
    }
}

impl<C: Clock> DependOnGameQuery for Handler<C> {
    type GameQuery = PostgresGameRepository;
    fn game_query(&self) -> &Self::GameQuery {
        &self.game_repository
    }
}

impl<C: Clock> DependOnClock for Handler<C> {
    type Clock = C;
    fn clock(&self) -> &Self::Clock {
        &self.clock
    }
}
