mod operation;
mod window;

pub use self::{operation::*, window::*};
