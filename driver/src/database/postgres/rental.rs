use rust_decimal::Decimal;
use sqlx::{PgConnection, Postgres, QueryBuilder};
use time::Date;

use kernel::interface::query::RentalQuery;
use kernel::interface::update::RentalModifier;
use kernel::prelude::entity::{
    CustomerId, DateWindow, DaysRented, DelayFee, GameId, NewRental, OriginalPrice, RentDate,
    Rental, RentalAmount, RentalColumn, RentalFilter, RentalId, RentalOrder, RentalPredicate,
    RentalSearch, ReturnDate, Revenue, SelectLimit, SelectOffset,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresRentalRepository;

#[async_trait::async_trait]
impl RentalQuery for PostgresRentalRepository {
    type Transaction = PostgresConnection;

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::find_by_id(con, id, false).await
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut PostgresConnection,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::find_by_id(con, id, true).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresConnection,
        search: &RentalSearch,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        PgRentalInternal::find_all(con, search).await
    }

    async fn total_revenue(
        &self,
        con: &mut PostgresConnection,
        window: &DateWindow,
    ) -> error_stack::Result<Revenue, KernelError> {
        PgRentalInternal::total_revenue(con, window).await
    }

    async fn count(
        &self,
        con: &mut PostgresConnection,
        filter: &RentalFilter,
    ) -> error_stack::Result<RentalAmount, KernelError> {
        PgRentalInternal::count(con, filter).await
    }
}

#[async_trait::async_trait]
impl RentalModifier for PostgresRentalRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        rental: &NewRental,
    ) -> error_stack::Result<RentalId, KernelError> {
        PgRentalInternal::create(con, rental).await
    }

    async fn update_return_date(
        &self,
        con: &mut PostgresConnection,
        id: &RentalId,
        return_date: &ReturnDate,
    ) -> error_stack::Result<u64, KernelError> {
        PgRentalInternal::update_return_date(con, id, return_date).await
    }

    async fn update_delay_fee(
        &self,
        con: &mut PostgresConnection,
        id: &RentalId,
        delay_fee: &DelayFee,
    ) -> error_stack::Result<u64, KernelError> {
        PgRentalInternal::update_delay_fee(con, id, delay_fee).await
    }

    async fn delete(
        &self,
        con: &mut PostgresConnection,
        id: &RentalId,
    ) -> error_stack::Result<u64, KernelError> {
        PgRentalInternal::delete(con, id).await
    }
}

#[derive(sqlx::FromRow)]
struct RentalRow {
    id: i32,
    customer_id: i32,
    game_id: i32,
    rent_date: Date,
    days_rented: i32,
    return_date: Option<Date>,
    original_price: Decimal,
    delay_fee: Option<Decimal>,
}

impl From<RentalRow> for Rental {
    fn from(value: RentalRow) -> Self {
        Rental::new(
            RentalId::new(value.id),
            CustomerId::new(value.customer_id),
            GameId::new(value.game_id),
            RentDate::new(value.rent_date),
            DaysRented::new(value.days_rented),
            value.return_date.map(ReturnDate::new),
            OriginalPrice::new(value.original_price),
            value.delay_fee.map(DelayFee::new),
        )
    }
}

// language=postgresql
const SELECT_RENTALS: &str = r#"
    SELECT
        id,
        "customerId" AS customer_id,
        "gameId" AS game_id,
        "rentDate" AS rent_date,
        "daysRented" AS days_rented,
        "returnDate" AS return_date,
        "originalPrice" AS original_price,
        "delayFee" AS delay_fee
    FROM
        rentals
"#;

fn column_identifier(column: &RentalColumn) -> &'static str {
    match column {
        RentalColumn::Id => "id",
        RentalColumn::CustomerId => r#""customerId""#,
        RentalColumn::GameId => r#""gameId""#,
        RentalColumn::RentDate => r#""rentDate""#,
        RentalColumn::DaysRented => r#""daysRented""#,
        RentalColumn::ReturnDate => r#""returnDate""#,
        RentalColumn::OriginalPrice => r#""originalPrice""#,
        RentalColumn::DelayFee => r#""delayFee""#,
    }
}

/// Appends ` WHERE p1 AND p2 ...`, binding one value per predicate.
fn push_predicates(builder: &mut QueryBuilder<'_, Postgres>, predicates: &[RentalPredicate]) {
    for (index, predicate) in predicates.iter().enumerate() {
        builder.push(if index == 0 { " WHERE " } else { " AND " });
        match predicate {
            RentalPredicate::Customer(customer_id) => {
                builder
                    .push(r#""customerId" = "#)
                    .push_bind(i32::from(*customer_id));
            }
            RentalPredicate::Game(game_id) => {
                builder
                    .push(r#""gameId" = "#)
                    .push_bind(i32::from(*game_id));
            }
            RentalPredicate::RentedSince(since) => {
                builder.push(r#""rentDate" >= "#).push_bind(*since);
            }
            RentalPredicate::RentedUntil(until) => {
                builder.push(r#""rentDate" <= "#).push_bind(*until);
            }
        }
    }
}

/// Appends ORDER BY. Only allow-listed identifiers reach the query text; `id`
/// always comes last so pages never overlap.
fn push_order(builder: &mut QueryBuilder<'_, Postgres>, order: Option<&RentalOrder>) {
    let Some(order) = order else {
        builder.push(" ORDER BY id ASC");
        return;
    };
    let direction = if *order.desc() { " DESC" } else { " ASC" };
    builder
        .push(" ORDER BY ")
        .push(column_identifier(order.column()))
        .push(direction);
    if *order.column() != RentalColumn::Id {
        builder.push(", id").push(direction);
    }
}

fn push_page(
    builder: &mut QueryBuilder<'_, Postgres>,
    offset: &SelectOffset,
    limit: Option<&SelectLimit>,
) {
    match limit {
        Some(limit) => {
            builder.push(" LIMIT ").push_bind(i64::from(*limit));
        }
        None => {
            builder.push(" LIMIT ALL");
        }
    }
    builder.push(" OFFSET ").push_bind(i64::from(*offset));
}

fn search_query(search: &RentalSearch) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SELECT_RENTALS);
    push_predicates(&mut builder, &search.filter().predicates());
    push_order(&mut builder, search.order().as_ref());
    push_page(&mut builder, search.offset(), search.limit().as_ref());
    builder
}

fn revenue_query(window: &DateWindow) -> QueryBuilder<'static, Postgres> {
    // language=postgresql
    let mut builder = QueryBuilder::new(
        r#"
        SELECT
            COALESCE(SUM("originalPrice"), 0),
            COALESCE(SUM("delayFee"), 0)
        FROM
            rentals
        "#,
    );
    push_predicates(&mut builder, &RentalPredicate::within(window));
    builder
}

fn count_query(filter: &RentalFilter) -> QueryBuilder<'static, Postgres> {
    // language=postgresql
    let mut builder = QueryBuilder::new(
        r#"
        SELECT
            COUNT(id)
        FROM
            rentals
        "#,
    );
    push_predicates(&mut builder, &filter.predicates());
    builder
}

pub(in crate::database) struct PgRentalInternal;

impl PgRentalInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &RentalId,
        lock: bool,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let mut builder = QueryBuilder::new(SELECT_RENTALS);
        builder.push(" WHERE id = ").push_bind(i32::from(*id));
        if lock {
            builder.push(" FOR UPDATE");
        }
        let row = builder
            .build_query_as::<RentalRow>()
            .fetch_optional(con)
            .await
            .convert_error()?;
        Ok(row.map(Rental::from))
    }

    async fn find_all(
        con: &mut PgConnection,
        search: &RentalSearch,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let mut builder = search_query(search);
        let rows = builder
            .build_query_as::<RentalRow>()
            .fetch_all(con)
            .await
            .convert_error()?;
        Ok(rows.into_iter().map(Rental::from).collect())
    }

    async fn total_revenue(
        con: &mut PgConnection,
        window: &DateWindow,
    ) -> error_stack::Result<Revenue, KernelError> {
        let mut builder = revenue_query(window);
        let (original_prices, delay_fees) = builder
            .build_query_as::<(Decimal, Decimal)>()
            .fetch_one(con)
            .await
            .convert_error()?;
        Ok(Revenue::combine(original_prices, delay_fees))
    }

    async fn count(
        con: &mut PgConnection,
        filter: &RentalFilter,
    ) -> error_stack::Result<RentalAmount, KernelError> {
        let mut builder = count_query(filter);
        let (amount,) = builder
            .build_query_as::<(i64,)>()
            .fetch_one(con)
            .await
            .convert_error()?;
        Ok(RentalAmount::new(amount))
    }

    async fn create(
        con: &mut PgConnection,
        rental: &NewRental,
    ) -> error_stack::Result<RentalId, KernelError> {
        let (id,) = sqlx::query_as::<_, (i32,)>(
            // language=postgresql
            r#"
            INSERT INTO rentals
                ("customerId", "gameId", "rentDate", "daysRented",
                 "returnDate", "originalPrice", "delayFee")
            VALUES
                ($1, $2, $3, $4, NULL, $5, NULL)
            RETURNING id
            "#,
        )
        .bind(i32::from(*rental.customer_id()))
        .bind(i32::from(*rental.game_id()))
        .bind(Date::from(*rental.rent_date()))
        .bind(i32::from(*rental.days_rented()))
        .bind(Decimal::from(*rental.original_price()))
        .fetch_one(con)
        .await
        .convert_error()?;
        tracing::debug!(rental_id = id, "Inserted rental");
        Ok(RentalId::new(id))
    }

    async fn update_return_date(
        con: &mut PgConnection,
        id: &RentalId,
        return_date: &ReturnDate,
    ) -> error_stack::Result<u64, KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE rentals
            SET "returnDate" = $1
            WHERE id = $2
            "#,
        )
        .bind(Date::from(*return_date))
        .bind(i32::from(*id))
        .execute(con)
        .await
        .convert_error()?;
        tracing::debug!(
            rental_id = i32::from(*id),
            affected = result.rows_affected(),
            "Updated return date"
        );
        Ok(result.rows_affected())
    }

    async fn update_delay_fee(
        con: &mut PgConnection,
        id: &RentalId,
        delay_fee: &DelayFee,
    ) -> error_stack::Result<u64, KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE rentals
            SET "delayFee" = $1
            WHERE id = $2
            "#,
        )
        .bind(Decimal::from(*delay_fee))
        .bind(i32::from(*id))
        .execute(con)
        .await
        .convert_error()?;
        tracing::debug!(
            rental_id = i32::from(*id),
            affected = result.rows_affected(),
            "Updated delay fee"
        );
        Ok(result.rows_affected())
    }

    async fn delete(
        con: &mut PgConnection,
        id: &RentalId,
    ) -> error_stack::Result<u64, KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            DELETE FROM rentals
            WHERE id = $1
            "#,
        )
        .bind(i32::from(*id))
        .execute(con)
        .await
        .convert_error()?;
        tracing::debug!(
            rental_id = i32::from(*id),
            affected = result.rows_affected(),
            "Deleted rental"
        );
        Ok(result.rows_affected())
    }
}
