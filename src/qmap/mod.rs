mod parser;
mod writer;

pub use parser::{parse, parse_named};
pub use writer::{write, Dialect};
