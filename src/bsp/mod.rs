mod decompile;
mod parser;
mod repr;

pub use decompile::Decompiler;
pub use parser::{parse_entities, parse_entities_named};
pub use repr::{
    Bsp, BrushRecord, BrushSideProperties, EntityLump, GeoSet, Grid,
    GridCell, PlaneRecord, Primitive, PrimitiveKind, ProjectionRecord,
    TextureData, TextureVectorRecord, BRUSH_PRIMITIVE,
};



#[cfg(test)]
mod repr_test;
