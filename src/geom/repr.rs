use crate::error::{Geometry, GeometryResult};
use nalgebra::Vector3;
use std::string::String;

pub type Vec3 = Vector3<f64>;
pub type Point = Vector3<f64>;

const MIN_NORM: f64 = 1e-12;

// Edge length of the triangles synthesised by `Plane::as_triangle`
const TRIANGLE_SIZE: f64 = 128.0;

/// The exact points (and their spelling) a plane was parsed from
#[derive(Clone, Debug, PartialEq)]
pub struct CachedTriangle {
    points: [Point; 3],
    text: String,
}

impl CachedTriangle {
    pub fn new(points: [Point; 3], text: impl Into<String>) -> Self {
        Self {
            points,
            text: text.into(),
        }
    }

    pub fn points(&self) -> &[Point; 3] {
        &self.points
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Clone, Debug)]
pub struct Plane {
    normal: Vec3,
    distance: f64,
    cached_triangle: Option<CachedTriangle>,
}

impl Plane {
    /// Build a plane from a normal (normalised here) and its signed distance
    /// from the origin
    pub fn new(normal: Vec3, distance: f64) -> GeometryResult<Plane> {
        let normal =
            normal.try_normalize(MIN_NORM).ok_or(Geometry::ZeroNormal)?;

        Ok(Plane {
            normal,
            distance,
            cached_triangle: None,
        })
    }

    /// Build a plane from a normal already known to have unit length
    pub(crate) fn unit(normal: Vec3, distance: f64) -> Plane {
        Plane {
            normal,
            distance,
            cached_triangle: None,
        }
    }

    pub fn from_triangle(
        a: Point,
        b: Point,
        c: Point,
    ) -> GeometryResult<Plane> {
        let normal = (b - a)
            .cross(&(c - a))
            .try_normalize(MIN_NORM)
            .ok_or(Geometry::DegenerateTriangle([a, b, c]))?;

        Ok(Plane {
            normal,
            distance: normal.dot(&a),
            cached_triangle: None,
        })
    }

    /// Three points on the plane which reproduce it through `from_triangle`.
    /// Not necessarily the points the plane was built from.
    pub fn as_triangle(&self) -> [Point; 3] {
        let origin = self.normal * self.distance;
        let axis = least_aligned_axis(&self.normal);
        let u = self.normal.cross(&axis).normalize();
        let v = self.normal.cross(&u);

        [origin, origin + u * TRIANGLE_SIZE, origin + v * TRIANGLE_SIZE]
    }

    /// The cached points when present, otherwise `as_triangle`
    pub fn triangle(&self) -> [Point; 3] {
        match &self.cached_triangle {
            Some(cached) => cached.points,
            None => self.as_triangle(),
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn cached_triangle(&self) -> Option<&CachedTriangle> {
        self.cached_triangle.as_ref()
    }

    pub fn with_cached_triangle(mut self, cached: CachedTriangle) -> Plane {
        self.cached_triangle = Some(cached);
        self
    }

    pub fn clear_cached_triangle(&mut self) {
        self.cached_triangle = None;
    }
}

impl PartialEq for Plane {
    fn eq(&self, other: &Plane) -> bool {
        self.normal == other.normal && self.distance == other.distance
    }
}

fn least_aligned_axis(normal: &Vec3) -> Vec3 {
    let mut index = 0;

    for i in 1..3 {
        if normal[i].abs() < normal[index].abs() {
            index = i;
        }
    }

    let mut axis = Vec3::zeros();
    axis[index] = 1.0;
    axis
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    mins: Point,
    maxs: Point,
}

impl Aabb {
    pub fn from_mins_maxs(mins: Point, maxs: Point) -> Aabb {
        Aabb {
            mins: mins.inf(&maxs),
            maxs: mins.sup(&maxs),
        }
    }

    pub fn from_origin_extents(origin: Point, extents: Vec3) -> Aabb {
        Aabb::from_mins_maxs(origin - extents, origin + extents)
    }

    pub fn mins(&self) -> Point {
        self.mins
    }

    pub fn maxs(&self) -> Point {
        self.maxs
    }

    pub fn origin(&self) -> Point {
        (self.mins + self.maxs) * 0.5
    }

    pub fn extents(&self) -> Vec3 {
        (self.maxs - self.mins) * 0.5
    }
}
