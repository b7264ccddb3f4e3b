use crate::map::Attributes;
use std::string::String;
use std::vec::Vec;

pub const BRUSH_PRIMITIVE: u8 = 0x00;

/// Collision brush: an AABB plus a run of extra planes
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BrushRecord {
    pub origin: [f32; 3],
    pub extents: [f32; 3],
    pub brush_side_offset: u32,
    pub num_plane_offsets: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlaneRecord {
    pub normal: [f32; 3],
    pub distance: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BrushSideProperties {
    pub texture_data: u16,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextureData {
    pub name_index: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProjectionRecord {
    pub axis: [f32; 3],
    pub offset: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextureVectorRecord {
    pub s: ProjectionRecord,
    pub t: ProjectionRecord,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    pub first_brush_plane: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridCell {
    pub first_geo_set: u16,
    pub num_geo_sets: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveKind {
    Brush,
    Other(u8),
}

impl From<u8> for PrimitiveKind {
    fn from(tag: u8) -> Self {
        match tag {
            BRUSH_PRIMITIVE => PrimitiveKind::Brush,
            other => PrimitiveKind::Other(other),
        }
    }
}

impl From<PrimitiveKind> for u8 {
    fn from(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Brush => BRUSH_PRIMITIVE,
            PrimitiveKind::Other(tag) => tag,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub index: u32,
}

/// One primitive directly when `num_primitives` is 1, otherwise a run of
/// the primitive table starting at `primitive.index`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeoSet {
    pub num_primitives: u16,
    pub primitive: Primitive,
}

/// Entities from a per-category side file (`env`, `fx`, `script`, ...)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntityLump {
    pub category: String,
    pub entities: Vec<Attributes>,
}

/// The decoded tables of a compiled map that brushes are rebuilt from
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bsp {
    pub entities: Vec<Attributes>,
    pub entity_lumps: Vec<EntityLump>,
    pub brushes: Vec<BrushRecord>,
    pub planes: Vec<PlaneRecord>,
    pub brush_side_properties: Vec<BrushSideProperties>,
    pub brush_side_plane_offsets: Vec<u16>,
    pub brush_side_texture_vectors: Vec<TextureVectorRecord>,
    pub texture_data: Vec<TextureData>,
    pub texture_strings: Vec<String>,
    pub grid: Grid,
    pub grid_cells: Vec<GridCell>,
    pub geo_sets: Vec<GeoSet>,
    pub primitives: Vec<Primitive>,
    /// The last `model_count` grid cells belong to models, in model order
    pub model_count: usize,
}
