#![forbid(unsafe_code)]

mod names;
mod supply;
mod types;

pub use names::*;
pub use supply::*;
pub use types::*;

#[cfg(test)]
mod tests;
