use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use rust_decimal::Decimal;
use time::Date;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnGameQuery, DependOnRentalQuery, GameQuery, RentalQuery};
use kernel::interface::update::{DependOnRentalModifier, RentalModifier};
use kernel::prelude::entity::{
    DateWindow, DelayFee, Game, GameId, NewRental, Rental, RentalAmount, RentalColumn,
    RentalFilter, RentalId, RentalPredicate, RentalSearch, ReturnDate, Revenue,
};
use kernel::KernelError;

#[derive(Default)]
struct State {
    next_id: i32,
    games: HashMap<GameId, Game>,
    rentals: BTreeMap<i32, Rental>,
}

pub struct InMemoryTransaction(Arc<Mutex<State>>);

impl InMemoryTransaction {
    fn state(&self) -> MutexGuard<'_, State> {
        self.0.lock().expect("in-memory state poisoned")
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

/// Store and clock in one value, shaped like the Postgres-backed handler.
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
    today: Mutex<Date>,
}

impl InMemoryStore {
    pub fn new(today: Date) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            today: Mutex::new(today),
        }
    }

    pub fn put_game(&self, game: Game) {
        let mut state = self.state.lock().expect("in-memory state poisoned");
        state.games.insert(*game.id(), game);
    }

    pub fn set_today(&self, today: Date) {
        *self.today.lock().expect("in-memory clock poisoned") = today;
    }
}

impl Clock for InMemoryStore {
    fn today(&self) -> Date {
        *self.today.lock().expect("in-memory clock poisoned")
    }
}

impl DependOnClock for InMemoryStore {
    type Clock = Self;
    fn clock(&self) -> &Self::Clock {
        self
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryStore {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        Ok(InMemoryTransaction(Arc::clone(&self.state)))
    }
}

#[async_trait::async_trait]
impl GameQuery for InMemoryStore {
    type Transaction = InMemoryTransaction;
    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &GameId,
    ) -> error_stack::Result<Option<Game>, KernelError> {
        Ok(con.state().games.get(id).cloned())
    }
}

impl DependOnGameQuery for InMemoryStore {
    type GameQuery = Self;
    fn game_query(&self) -> &Self::GameQuery {
        self
    }
}

fn satisfies(predicate: &RentalPredicate, rental: &Rental) -> bool {
    let rent_date = Date::from(*rental.rent_date());
    match predicate {
        RentalPredicate::Customer(id) => rental.customer_id() == id,
        RentalPredicate::Game(id) => rental.game_id() == id,
        RentalPredicate::RentedSince(since) => rent_date >= *since,
        RentalPredicate::RentedUntil(until) => rent_date <= *until,
    }
}

/// Ranks `None` after every value, as Postgres sorts NULLs in ascending order.
fn nulls_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare(column: &RentalColumn, a: &Rental, b: &Rental) -> Ordering {
    let fee = |rental: &Rental| rental.delay_fee().map(Decimal::from);
    match column {
        RentalColumn::Id => i32::from(*a.id()).cmp(&i32::from(*b.id())),
        RentalColumn::CustomerId => i32::from(*a.customer_id()).cmp(&i32::from(*b.customer_id())),
        RentalColumn::GameId => i32::from(*a.game_id()).cmp(&i32::from(*b.game_id())),
        RentalColumn::RentDate => a.rent_date().cmp(b.rent_date()),
        RentalColumn::DaysRented => i32::from(*a.days_rented()).cmp(&i32::from(*b.days_rented())),
        RentalColumn::ReturnDate => nulls_last(*a.return_date(), *b.return_date()),
        RentalColumn::OriginalPrice => {
            Decimal::from(*a.original_price()).cmp(&Decimal::from(*b.original_price()))
        }
        RentalColumn::DelayFee => nulls_last(fee(a), fee(b)),
    }
}

#[async_trait::async_trait]
impl RentalQuery for InMemoryStore {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        Ok(con.state().rentals.get(&i32::from(*id)).cloned())
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut InMemoryTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        RentalQuery::find_by_id(self, con, id).await
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
        search: &RentalSearch,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let predicates = search.filter().predicates();
        let mut rentals = con
            .state()
            .rentals
            .values()
            .filter(|rental| predicates.iter().all(|p| satisfies(p, rental)))
            .cloned()
            .collect::<Vec<_>>();
        if let Some(order) = search.order() {
            rentals.sort_by(|a, b| {
                let ordering = compare(order.column(), a, b)
                    .then_with(|| compare(&RentalColumn::Id, a, b));
                if *order.desc() {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }
        let offset = usize::try_from(i64::from(*search.offset())).unwrap_or(0);
        let limit = search
            .limit()
            .map_or(usize::MAX, |limit| usize::try_from(i64::from(limit)).unwrap_or(0));
        Ok(rentals.into_iter().skip(offset).take(limit).collect())
    }

    async fn total_revenue(
        &self,
        con: &mut InMemoryTransaction,
        window: &DateWindow,
    ) -> error_stack::Result<Revenue, KernelError> {
        let state = con.state();
        let matching = state
            .rentals
            .values()
            .filter(|rental| window.contains(&Date::from(*rental.rent_date())));
        let (original, delay) = matching.fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(original, delay), rental| {
                (
                    original + Decimal::from(*rental.original_price()),
                    delay + rental.delay_fee().map_or(Decimal::ZERO, Decimal::from),
                )
            },
        );
        Ok(Revenue::combine(original, delay))
    }

    async fn count(
        &self,
        con: &mut InMemoryTransaction,
        filter: &RentalFilter,
    ) -> error_stack::Result<RentalAmount, KernelError> {
        let predicates = filter.predicates();
        let amount = con
            .state()
            .rentals
            .values()
            .filter(|rental| predicates.iter().all(|p| satisfies(p, rental)))
            .count();
        Ok(RentalAmount::new(amount as i64))
    }
}

impl DependOnRentalQuery for InMemoryStore {
    type RentalQuery = Self;
    fn rental_query(&self) -> &Self::RentalQuery {
        self
    }
}

#[async_trait::async_trait]
impl RentalModifier for InMemoryStore {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        rental: &NewRental,
    ) -> error_stack::Result<RentalId, KernelError> {
        let mut state = con.state();
        state.next_id += 1;
        let id = state.next_id;
        let created = Rental::new(
            RentalId::new(id),
            *rental.customer_id(),
            *rental.game_id(),
            *rental.rent_date(),
            *rental.days_rented(),
            None,
            *rental.original_price(),
            None,
        );
        state.rentals.insert(id, created);
        Ok(RentalId::new(id))
    }

    async fn update_return_date(
        &self,
        con: &mut InMemoryTransaction,
        id: &RentalId,
        return_date: &ReturnDate,
    ) -> error_stack::Result<u64, KernelError> {
        let mut state = con.state();
        let key = i32::from(*id);
        let Some(rental) = state.rentals.remove(&key) else {
            return Ok(0);
        };
        let rental = rental.reconstruct(|r| r.return_date = Some(*return_date));
        state.rentals.insert(key, rental);
        Ok(1)
    }

    async fn update_delay_fee(
        &self,
        con: &mut InMemoryTransaction,
        id: &RentalId,
        delay_fee: &DelayFee,
    ) -> error_stack::Result<u64, KernelError> {
        let mut state = con.state();
        let key = i32::from(*id);
        let Some(rental) = state.rentals.remove(&key) else {
            return Ok(0);
        };
        let rental = rental.reconstruct(|r| r.delay_fee = Some(*delay_fee));
        state.rentals.insert(key, rental);
        Ok(1)
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        id: &RentalId,
    ) -> error_stack::Result<u64, KernelError> {
        let removed = con.state().rentals.remove(&i32::from(*id));
        Ok(u64::from(removed.is_some()))
    }
}

impl DependOnRentalModifier for InMemoryStore {
    type RentalModifier = Self;
    fn rental_modifier(&self) -> &Self::RentalModifier {
        self
    }
}
