use crate::geom::{Aabb, Plane, Vec3};
use crate::map::{
    Brush, BrushSide, Entity, MapFile, ProjectionAxis, TextureVector,
    Validates, DEFAULT_SCALE, DEFAULT_SHADER,
};
use rstest::rstest;

fn bounds() -> Aabb {
    Aabb::from_mins_maxs(Vec3::new(-3.0, -2.0, -1.0), Vec3::new(4.0, 5.0, 6.0))
}

#[test]
fn brush_from_bounds() {
    let brush = Brush::from_bounds(&bounds(), "tools/toolsnodraw");
    assert_eq!(brush.sides.len(), 6);

    let expected = [
        (Vec3::new(-1.0, 0.0, 0.0), 3.0),
        (Vec3::new(1.0, 0.0, 0.0), 4.0),
        (Vec3::new(0.0, -1.0, 0.0), 2.0),
        (Vec3::new(0.0, 1.0, 0.0), 5.0),
        (Vec3::new(0.0, 0.0, -1.0), 1.0),
        (Vec3::new(0.0, 0.0, 1.0), 6.0),
    ];

    for (side, (normal, distance)) in brush.sides.iter().zip(expected) {
        assert_eq!(side.shader, "tools/toolsnodraw");
        assert_eq!(side.plane.normal(), normal);
        assert_eq!(side.plane.distance(), distance);
        assert!(side.plane.cached_triangle().is_none());
    }
}

#[test]
fn brush_from_bounds_custom_shader() {
    let brush = Brush::from_bounds(&bounds(), "world/dev/dev_grey");
    assert!(brush.sides.iter().all(|side| side.shader == "world/dev/dev_grey"));
    assert!(brush.validate().is_ok());
}

#[rstest]
#[case::floor(Vec3::new(0.0, 0.0, 1.0), [1.0, 0.0, 0.0], [0.0, -1.0, 0.0])]
#[case::ceiling(Vec3::new(0.0, 0.0, -1.0), [1.0, 0.0, 0.0], [0.0, -1.0, 0.0])]
#[case::west(Vec3::new(1.0, 0.0, 0.0), [0.0, 1.0, 0.0], [0.0, 0.0, -1.0])]
#[case::east(Vec3::new(-1.0, 0.0, 0.0), [0.0, 1.0, 0.0], [0.0, 0.0, -1.0])]
#[case::south(Vec3::new(0.0, 1.0, 0.0), [1.0, 0.0, 0.0], [0.0, 0.0, -1.0])]
#[case::north(Vec3::new(0.0, -1.0, 0.0), [1.0, 0.0, 0.0], [0.0, 0.0, -1.0])]
#[case::steep_slope(
    Vec3::new(0.8, 0.0, 0.6),
    [0.0, 1.0, 0.0],
    [0.0, 0.0, -1.0]
)]
fn texture_vector_from_normal(
    #[case] normal: Vec3,
    #[case] s: [f64; 3],
    #[case] t: [f64; 3],
) {
    let texture_vector = TextureVector::from_normal(normal);

    assert_eq!(texture_vector.s.axis, Vec3::from(s));
    assert_eq!(texture_vector.t.axis, Vec3::from(t));
    assert_eq!(texture_vector.s.offset, 0.0);
    assert_eq!(texture_vector.t.scale, DEFAULT_SCALE);
    assert_eq!(texture_vector.rotation, 0.0);
}

#[test]
fn brush_side_defaults() {
    let plane = Plane::new(Vec3::new(0.0, 0.0, 1.0), 8.0).unwrap();
    let mut side = BrushSide::new(plane);

    assert_eq!(side.shader, DEFAULT_SHADER);
    assert_eq!(side.rotation(), 0.0);

    side.set_rotation(45.0);
    assert_eq!(side.rotation(), 45.0);
    assert_eq!(side.texture_vector.rotation, 45.0);
}

#[test]
fn entity_attributes_keep_order() {
    let mut entity = Entity::from_pairs([
        ("classname", "func_door"),
        ("speed", "100"),
        ("targetname", "door_1"),
    ]);

    entity.set("speed", "250");
    assert_eq!(entity.get("speed"), Some("250"));
    assert_eq!(entity.classname(), Some("func_door"));

    let keys: Vec<&str> =
        entity.attributes.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, ["classname", "speed", "targetname"]);

    assert_eq!(entity.remove("speed"), Some("250".to_string()));
    assert_eq!(entity.remove("speed"), None);

    let keys: Vec<&str> =
        entity.attributes.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, ["classname", "targetname"]);
}

#[test]
fn map_file_summary() {
    let mut map = MapFile::new();
    assert!(map.worldspawn().is_none());

    let mut world = Entity::from_pairs([("classname", "worldspawn")]);
    world.brushes.push(Brush::from_bounds(&bounds(), DEFAULT_SHADER));
    world.brushes.push(Brush::from_bounds(&bounds(), DEFAULT_SHADER));
    map.entities.push(world);
    map.entities.push(Entity::from_pairs([("classname", "light")]));

    assert_eq!(map.brush_count(), 2);
    assert_eq!(map.worldspawn().unwrap().classname(), Some("worldspawn"));
    assert!(map.validate().is_ok());
}

#[rstest]
#[case::quote_in_value("message", "say \"hi\"")]
#[case::newline_in_key("a\nb", "value")]
#[case::carriage_return("key", "line\r")]
fn validation_rejects_bad_keyvalues(#[case] key: &str, #[case] value: &str) {
    let entity = Entity::from_pairs([(key, value)]);
    assert!(entity.validate().is_err());
}

#[rstest]
#[case::space("base/floor 01")]
#[case::tab("base/floor\t01")]
#[case::empty("")]
fn validation_rejects_bad_shaders(#[case] shader: &str) {
    let mut brush = Brush::from_bounds(&bounds(), DEFAULT_SHADER);
    brush.sides[3].shader = shader.to_string();
    assert!(brush.validate().is_err());
}

#[test]
fn validation_rejects_non_finite() {
    let mut brush = Brush::from_bounds(&bounds(), DEFAULT_SHADER);
    brush.sides[0].texture_vector.t = ProjectionAxis {
        axis: Vec3::new(0.0, 0.0, -1.0),
        offset: f64::NAN,
        scale: 1.0,
    };

    assert!(brush.validate().is_err());
}
