#[cfg(feature = "hashbrown")]
use hashbrown::HashSet;

#[cfg(not(feature = "hashbrown"))]
use std::collections::HashSet;

use super::{Bsp, GridCell, PrimitiveKind};
use crate::error::{Decompile, DecompileResult};
use crate::geom::{Aabb, Plane, Vec3};
use crate::map::{
    Attributes, Brush, BrushSide, Entity, MapFile, TextureVector,
};
use crate::map::{CLASSNAME, DEFAULT_SHADER};
use std::string::{String, ToString};
use std::vec::Vec;

const WORLDSPAWN: &str = "worldspawn";
const MODEL_KEY: &str = "model";
const MODEL_PREFIX: char = '*';
const BOX_SIDES: usize = 6;

/// Rebuilds editable brushes from the collision tables of a `Bsp`
pub struct Decompiler<'a> {
    bsp: &'a Bsp,
}

impl<'a> Decompiler<'a> {
    pub fn new(bsp: &'a Bsp) -> Self {
        Self { bsp }
    }

    /// The brush's bounding box, then one side per plane offset; every side
    /// gets its shader and texture axes from the brush side tables
    pub fn decompile_brush(
        &self,
        brush_index: usize,
    ) -> DecompileResult<Brush> {
        let bsp = self.bsp;
        let record = lookup(&bsp.brushes, "brushes", brush_index)?;
        let bounds = Aabb::from_origin_extents(
            to_vec3(record.origin),
            to_vec3(record.extents),
        );
        let mut brush = Brush::from_bounds(&bounds, DEFAULT_SHADER);
        let side_offset = record.brush_side_offset as usize;
        let plane_offsets_end = side_offset + record.num_plane_offsets as usize;

        for offset in side_offset..plane_offsets_end {
            let correction = lookup(
                &bsp.brush_side_plane_offsets,
                "brush side plane offsets",
                offset,
            )?;
            let brush_plane_offset = offset
                .checked_sub(usize::from(*correction))
                .ok_or(Decompile::Index {
                    table: "brush side plane offsets",
                    index: offset,
                })?;
            let plane_index =
                bsp.grid.first_brush_plane as usize + brush_plane_offset;
            let plane = lookup(&bsp.planes, "planes", plane_index)?;
            let plane =
                Plane::new(to_vec3(plane.normal), f64::from(plane.distance))?;

            brush.sides.push(BrushSide::new(plane));
        }

        let first_brush_side = brush_index * BOX_SIDES + side_offset;

        for (i, side) in brush.sides.iter_mut().enumerate() {
            let index = first_brush_side + i;
            let properties = lookup(
                &bsp.brush_side_properties,
                "brush side properties",
                index,
            )?;
            let texture_data = lookup(
                &bsp.texture_data,
                "texture data",
                usize::from(properties.texture_data),
            )?;
            let name = lookup(
                &bsp.texture_strings,
                "texture strings",
                texture_data.name_index as usize,
            )?;
            side.shader = name.replace('\\', "/").to_lowercase();

            let texture_vector = lookup(
                &bsp.brush_side_texture_vectors,
                "brush side texture vectors",
                index,
            )?;
            let TextureVector { s, t, .. } = &mut side.texture_vector;
            s.axis = to_vec3(texture_vector.s.axis);
            s.offset = f64::from(texture_vector.s.offset);
            t.axis = to_vec3(texture_vector.t.axis);
            t.offset = f64::from(texture_vector.t.offset);
        }

        Ok(brush)
    }

    /// Indices of the brushes referenced by geo sets `start..end`
    pub fn geosets_range_brush_indices(
        &self,
        start: usize,
        end: usize,
    ) -> DecompileResult<HashSet<usize>> {
        let geo_sets = self.bsp.geo_sets.get(start..end).ok_or(
            Decompile::Index {
                table: "geo sets",
                index: end,
            },
        )?;
        let mut brush_indices = HashSet::new();
        let mut primitive_indices = HashSet::new();

        for geo_set in geo_sets {
            let primitive = geo_set.primitive;

            if geo_set.num_primitives == 1 {
                if primitive.kind == PrimitiveKind::Brush {
                    brush_indices.insert(primitive.index as usize);
                }
            } else {
                let first = primitive.index as usize;
                let count = usize::from(geo_set.num_primitives);
                primitive_indices.extend(first..first + count);
            }
        }

        for index in primitive_indices {
            let primitive = lookup(&self.bsp.primitives, "primitives", index)?;

            if primitive.kind == PrimitiveKind::Brush {
                brush_indices.insert(primitive.index as usize);
            }
        }

        Ok(brush_indices)
    }

    /// Rebuild a worldspawn or `*N` model entity with its brushes, in
    /// ascending brush index order. The `model` key is dropped from models.
    pub fn decompile_brush_entity(
        &self,
        attributes: &Attributes,
    ) -> DecompileResult<Entity> {
        let mut entity = Entity {
            attributes: attributes.clone(),
            brushes: Vec::new(),
        };
        let cells = &self.bsp.grid_cells;
        let first_model_cell = cells
            .len()
            .checked_sub(self.bsp.model_count)
            .ok_or(Decompile::Index {
                table: "grid cells",
                index: self.bsp.model_count,
            })?;

        let (start, end) = if entity.classname() == Some(WORLDSPAWN) {
            // every geo set up to the end of the first model's cell
            let cell = lookup(cells, "grid cells", first_model_cell)?;
            (0, geo_set_range(cell).1)
        } else if let Some(model) = model_number(&entity) {
            let model = model?;
            let index = first_model_cell.checked_add(model).ok_or(
                Decompile::Index {
                    table: "grid cells",
                    index: model,
                },
            )?;
            let cell = lookup(cells, "grid cells", index)?;
            entity.remove(MODEL_KEY);
            geo_set_range(cell)
        } else {
            return Err(Decompile::NotBrushEntity(
                entity.classname().unwrap_or_default().to_string(),
            ));
        };

        let mut brush_indices: Vec<usize> = self
            .geosets_range_brush_indices(start, end)?
            .into_iter()
            .collect();
        brush_indices.sort_unstable();

        if let (Some(min), Some(max)) =
            (brush_indices.first(), brush_indices.last())
        {
            log::debug!(
                "{}: geo sets {}..{}, brushes {}..={}",
                entity.classname().unwrap_or_default(),
                start,
                end,
                min,
                max
            );
        }

        entity.brushes = brush_indices
            .into_iter()
            .map(|index| self.decompile_brush(index))
            .collect::<DecompileResult<_>>()?;

        Ok(entity)
    }

    /// Worldspawn followed by every other brush model entity, from the main
    /// entity list and then each entity lump. Point entities are skipped.
    pub fn decompile_map(&self) -> DecompileResult<MapFile> {
        let worldspawn = self
            .bsp
            .entities
            .first()
            .ok_or_else(|| Decompile::NotWorldspawn(String::new()))?;

        match worldspawn.get(CLASSNAME) {
            Some(classname) if classname == WORLDSPAWN => {}
            classname => {
                return Err(Decompile::NotWorldspawn(
                    classname.cloned().unwrap_or_default(),
                ))
            }
        }

        let mut map = MapFile::new();
        map.entities.push(self.decompile_brush_entity(worldspawn)?);

        let lump_entities = self
            .bsp
            .entity_lumps
            .iter()
            .flat_map(|lump| lump.entities.iter());

        for attributes in self.bsp.entities.iter().skip(1).chain(lump_entities)
        {
            if is_brush_model(attributes) {
                map.entities.push(self.decompile_brush_entity(attributes)?);
            }
        }

        log::debug!(
            "Decompiled {} brush entities ({} brushes)",
            map.entities.len(),
            map.brush_count()
        );

        Ok(map)
    }
}

fn lookup<'t, T>(
    table: &'t [T],
    name: &'static str,
    index: usize,
) -> DecompileResult<&'t T> {
    table.get(index).ok_or(Decompile::Index { table: name, index })
}

fn to_vec3(v: [f32; 3]) -> Vec3 {
    Vec3::new(f64::from(v[0]), f64::from(v[1]), f64::from(v[2]))
}

fn geo_set_range(cell: &GridCell) -> (usize, usize) {
    let start = usize::from(cell.first_geo_set);
    (start, start + usize::from(cell.num_geo_sets))
}

fn is_brush_model(attributes: &Attributes) -> bool {
    attributes
        .get(MODEL_KEY)
        .map_or(false, |model| model.starts_with(MODEL_PREFIX))
}

/// `N` of a `*N` model key, if the entity has one
fn model_number(entity: &Entity) -> Option<DecompileResult<usize>> {
    let model = entity.get(MODEL_KEY)?;
    let number = model.strip_prefix(MODEL_PREFIX)?;

    Some(
        number
            .parse()
            .map_err(|_| Decompile::BadModel(model.to_string())),
    )
}
