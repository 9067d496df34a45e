mod game;
mod rental;

pub use self::{game::*, rental::*};
