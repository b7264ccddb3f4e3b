#[cfg(feature = "hashbrown")]
use hashbrown::HashSet;

#[cfg(not(feature = "hashbrown"))]
use std::collections::HashSet;

use crate::geom::{Aabb, Plane, Vec3};
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::string::String;
use std::vec::Vec;

pub type ValidationResult = Result<(), String>;

pub const DEFAULT_SHADER: &str = "tools/toolsnodraw";
pub const DEFAULT_SCALE: f64 = 0.25;

pub const CLASSNAME: &str = "classname";

// Quake's base texture axes: (normal, s, t) for floor, ceiling, west, east,
// south and north facing surfaces
const BASE_AXES: [[[f64; 3]; 3]; 6] = [
    [[0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, -1.0, 0.0]],
    [[0.0, 0.0, -1.0], [1.0, 0.0, 0.0], [0.0, -1.0, 0.0]],
    [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, -1.0]],
    [[-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, -1.0]],
    [[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]],
    [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]],
];

pub trait Validates {
    fn validate(&self) -> ValidationResult;
}

/// A map document: entities plus comments keyed by their 1-based source line
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapFile {
    pub entities: Vec<Entity>,
    pub comments: BTreeMap<u64, String>,
}

impl MapFile {
    pub fn new() -> MapFile {
        MapFile::default()
    }

    pub fn worldspawn(&self) -> Option<&Entity> {
        self.entities.first()
    }

    pub fn brush_count(&self) -> usize {
        self.entities.iter().map(|ent| ent.brushes.len()).sum()
    }
}

impl Validates for MapFile {
    fn validate(&self) -> ValidationResult {
        for ent in &self.entities {
            ent.validate()?;
        }

        Ok(())
    }
}

/// Insertion-ordered attributes; setting an existing key keeps its position
pub type Attributes = IndexMap<String, String>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Entity {
    pub attributes: Attributes,
    pub brushes: Vec<Brush>,
}

impl Entity {
    pub fn new() -> Entity {
        Entity::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Entity
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entity = Entity::new();

        for (key, value) in pairs {
            entity.set(key, value);
        }

        entity
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.attributes.shift_remove(key)
    }

    pub fn classname(&self) -> Option<&str> {
        self.get(CLASSNAME)
    }
}

impl Validates for Entity {
    fn validate(&self) -> ValidationResult {
        for (key, value) in &self.attributes {
            validate_keyvalue(key)?;
            validate_keyvalue(value)?;
        }

        for brush in &self.brushes {
            brush.validate()?;
        }

        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Brush {
    pub sides: Vec<BrushSide>,
}

impl Brush {
    pub fn new(sides: Vec<BrushSide>) -> Brush {
        Brush { sides }
    }

    /// The six axis-aligned faces of `bounds`, min face before max face for
    /// each of x, y and z
    pub fn from_bounds(bounds: &Aabb, shader: &str) -> Brush {
        let (mins, maxs) = (bounds.mins(), bounds.maxs());
        let mut sides = Vec::with_capacity(6);

        for axis in 0..3 {
            let mut normal = Vec3::zeros();
            normal[axis] = 1.0;

            for (normal, distance) in
                [(-normal, -mins[axis]), (normal, maxs[axis])]
            {
                let plane = Plane::unit(normal, distance);
                let mut side = BrushSide::new(plane);
                side.shader = shader.to_string();
                sides.push(side);
            }
        }

        Brush { sides }
    }
}

impl Validates for Brush {
    fn validate(&self) -> ValidationResult {
        for side in &self.sides {
            side.validate()?;
        }

        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BrushSide {
    pub plane: Plane,
    pub shader: String,
    pub texture_vector: TextureVector,
}

impl BrushSide {
    /// A side with the default shader and the plane's default projection
    pub fn new(plane: Plane) -> BrushSide {
        BrushSide {
            texture_vector: TextureVector::from_normal(plane.normal()),
            shader: DEFAULT_SHADER.to_string(),
            plane,
        }
    }

    pub fn rotation(&self) -> f64 {
        self.texture_vector.rotation
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.texture_vector.rotation = rotation;
    }
}

impl Validates for BrushSide {
    fn validate(&self) -> ValidationResult {
        validate_vec(&self.plane.normal())?;
        self.plane.distance().validate()?;

        for point in self.plane.triangle() {
            validate_vec(&point)?;
        }

        validate_texture(&self.shader)?;
        self.texture_vector.validate()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextureVector {
    pub s: ProjectionAxis,
    pub t: ProjectionAxis,
    pub rotation: f64,
}

impl TextureVector {
    pub fn new(s: ProjectionAxis, t: ProjectionAxis) -> TextureVector {
        TextureVector {
            s,
            t,
            rotation: 0.0,
        }
    }

    /// Default projection for a surface facing `normal`, picked from the
    /// base axis it is closest to
    pub fn from_normal(normal: Vec3) -> TextureVector {
        let mut best = 0;
        let mut best_dot = 0.0;

        for (index, [base, _, _]) in BASE_AXES.iter().enumerate() {
            let dot = normal.dot(&Vec3::from(*base));

            if dot > best_dot {
                best_dot = dot;
                best = index;
            }
        }

        let [_, s, t] = BASE_AXES[best];

        TextureVector::new(
            ProjectionAxis::new(Vec3::from(s)),
            ProjectionAxis::new(Vec3::from(t)),
        )
    }
}

impl Validates for TextureVector {
    fn validate(&self) -> ValidationResult {
        self.s.validate()?;
        self.t.validate()?;
        self.rotation.validate()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectionAxis {
    pub axis: Vec3,
    pub offset: f64,
    pub scale: f64,
}

impl ProjectionAxis {
    pub fn new(axis: Vec3) -> ProjectionAxis {
        ProjectionAxis {
            axis,
            offset: 0.0,
            scale: DEFAULT_SCALE,
        }
    }
}

impl Validates for ProjectionAxis {
    fn validate(&self) -> ValidationResult {
        validate_vec(&self.axis)?;
        self.offset.validate()?;
        self.scale.validate()
    }
}

impl Validates for f64 {
    fn validate(&self) -> ValidationResult {
        if self.is_finite() {
            Ok(())
        } else {
            Err(format!("Non-finite number ({})", *self))
        }
    }
}

fn validate_vec(vec: &Vec3) -> ValidationResult {
    for num in vec.iter() {
        num.validate()?;
    }

    Ok(())
}

fn validate_keyvalue(s: &str) -> ValidationResult {
    #[cfg(feature = "hashbrown")]
    let bad_chars: HashSet<char> = ['"', '\r', '\n'].iter().cloned().collect();
    #[cfg(not(feature = "hashbrown"))]
    let bad_chars = HashSet::from(['"', '\r', '\n']);
    validate_str(s, "Key/value", bad_chars)
}

fn validate_texture(s: &str) -> ValidationResult {
    #[cfg(feature = "hashbrown")]
    let bad_chars: HashSet<char> =
        [' ', '\t', '\r', '\n'].iter().cloned().collect();
    #[cfg(not(feature = "hashbrown"))]
    let bad_chars = HashSet::from([' ', '\t', '\r', '\n']);

    if s.is_empty() {
        return Err(String::from("Empty shader name"));
    }

    validate_str(s, "Shader", bad_chars)
}

fn validate_str(
    s: &str,
    what: &str,
    bad_chars: HashSet<char>,
) -> ValidationResult {
    for ch in s.chars() {
        if bad_chars.contains(&ch) {
            return Err(format!("{} has illegal character ({:?})", what, ch));
        }
    }

    Ok(())
}
