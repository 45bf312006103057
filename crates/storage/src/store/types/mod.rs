#![forbid(unsafe_code)]

mod attach;
mod keywords;
mod tree;

pub use attach::*;
pub use keywords::*;
pub use tree::*;
