use time::Date;

/// Source of the current calendar date.
///
/// Rental creation, closing and fee settlement all stamp "today"; taking it
/// from here instead of the wall clock lets callers pin the date.
pub trait Clock: 'static + Sync + Send {
    fn today(&self) -> Date;
}

pub trait DependOnClock: 'static + Sync + Send {
    type Clock: Clock;
    fn clock(&self) -> &Self::Clock;
}
