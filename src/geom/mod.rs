mod repr;

pub use repr::{Aabb, CachedTriangle, Plane, Point, Vec3};
