use std::ops::{Deref, DerefMut};

use error_stack::{Report, ResultExt};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Error, PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::KernelError;

use crate::error::ConvertError;
use crate::{env, env_or};

pub use self::{game::*, rental::*};

mod game;
mod rental;

static POSTGRES_URL: &str = "POSTGRES_URL";
static POSTGRES_MAX_CONNECTIONS: &str = "POSTGRES_MAX_CONNECTIONS";

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        let max_connections = env_or(POSTGRES_MAX_CONNECTIONS, 5u32)?;
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(&url)
            .await
            .convert_error()
            .attach_printable("Failed to connect to postgres")?;
        Ok(Self { pool })
    }

    /// Applies the bundled schema migrations.
    pub async fn migrate(&self) -> error_stack::Result<(), KernelError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable("Failed to run migrations")
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresConnection;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let transaction = self.pool.begin().await.convert_error()?;
        Ok(PostgresConnection(transaction))
    }
}

pub struct PostgresConnection(sqlx::Transaction<'static, Postgres>);

#[async_trait::async_trait]
impl Transaction for PostgresConnection {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

impl Deref for PostgresConnection {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| match error {
            Error::PoolTimedOut => Report::from(error).change_context(KernelError::Timeout),
            Error::RowNotFound => Report::from(error).change_context(KernelError::NotFound),
            _ => Report::from(error).change_context(KernelError::Internal),
        })
    }
}

#[cfg(test)]
pub(in crate::database) mod test {
    use rust_decimal::Decimal;
    use sqlx::PgConnection;

    use kernel::prelude::entity::GameId;
    use kernel::KernelError;

    use crate::error::ConvertError;

    fn context_of(error: sqlx::Error) -> Option<String> {
        Err::<(), _>(error)
            .convert_error()
            .err()
            .map(|report| format!("{:?}", report.current_context()))
    }

    #[test]
    fn sqlx_errors_map_to_kernel_errors() {
        assert_eq!(context_of(sqlx::Error::PoolTimedOut).as_deref(), Some("Timeout"));
        assert_eq!(context_of(sqlx::Error::RowNotFound).as_deref(), Some("NotFound"));
        assert_eq!(
            context_of(sqlx::Error::Protocol("unexpected frame".to_string())).as_deref(),
            Some("Internal")
        );
        assert!(matches!(Ok::<_, sqlx::Error>(3).convert_error(), Ok(3)));
    }

    /// Adds a catalog entry with a unique name and returns its id.
    pub async fn insert_game(
        con: &mut PgConnection,
        price_per_day: i32,
    ) -> error_stack::Result<GameId, KernelError> {
        let (id,) = sqlx::query_as::<_, (i32,)>(
            // language=postgresql
            r#"
            INSERT INTO games (name, "pricePerDay")
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(format!("game-{}", rand::random::<u64>()))
        .bind(Decimal::from(price_per_day))
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(GameId::new(id))
    }
}
