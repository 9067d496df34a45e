use rust_decimal::Decimal;
use sqlx::PgConnection;

use kernel::interface::query::GameQuery;
use kernel::prelude::entity::{Game, GameId, PricePerDay};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

/// Catalog lookup backed by the `games` table. Only the daily price is read.
pub struct PostgresGameRepository;

#[async_trait::async_trait]
impl GameQuery for PostgresGameRepository {
    type Transaction = PostgresConnection;

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &GameId,
    ) -> error_stack::Result<Option<Game>, KernelError> {
        PgGameInternal::find_by_id(con, id).await
    }
}

#[derive(sqlx::FromRow)]
struct GameRow {
    id: i32,
    price_per_day: Decimal,
}

impl From<GameRow> for Game {
    fn from(value: GameRow) -> Self {
        Game::new(GameId::new(value.id), PricePerDay::new(value.price_per_day))
    }
}

pub(in crate::database) struct PgGameInternal;

impl PgGameInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &GameId,
    ) -> error_stack::Result<Option<Game>, KernelError> {
        let row = sqlx::query_as::<_, GameRow>(
            // language=postgresql
            r#"
            SELECT id, "pricePerDay"::NUMERIC AS price_per_day
            FROM games
            WHERE id = $1
            "#,
        )
        .bind(i32::from(*id))
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Game::from))
    }
}
