mod parser;
mod repr;

pub use parser::{parse, parse_named};
pub use repr::{group_by_type, Node};

#[cfg(test)]
mod parser_test;
