mod rental;

#[cfg(test)]
mod in_memory;

pub use self::rental::*;
