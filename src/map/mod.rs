mod repr;

pub use repr::{
    Attributes, Brush, BrushSide, Entity, MapFile, ProjectionAxis,
    TextureVector, ValidationResult, Validates, CLASSNAME, DEFAULT_SCALE,
    DEFAULT_SHADER,
};

#[cfg(test)]
mod repr_test;
