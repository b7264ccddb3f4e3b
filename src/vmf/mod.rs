mod convert;
pub mod defaults;
mod repr;

pub use convert::{
    brush_from_node, brush_node, entity_from_node, entity_node,
    side_from_node, side_node,
};
pub use repr::Vmf;

#[cfg(test)]
mod convert_test;
