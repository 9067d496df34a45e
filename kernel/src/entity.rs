mod common;
mod game;
mod rental;

pub use self::{common::*, game::*, rental::*};
