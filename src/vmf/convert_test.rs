use crate::error::Document;
use crate::grammar::Grammar;
use crate::geom::{Plane, Vec3};
use crate::map::{Brush, BrushSide, Entity};
use crate::node::Node;
use crate::tokens::QUAKE_SIDE;
use crate::vmf::{
    brush_from_node, brush_node, entity_from_node, entity_node,
    side_from_node, side_node,
};

fn side() -> Node {
    let mut node = Node::new("side");
    node.push("id", "1");
    node.push("plane", "(-64 64 64) (64 64 64) (64 -64 64)");
    node.push("material", "BRICK/BRICKWALL001A");
    node.push("uaxis", "[1 0 0 16] 0.25");
    node.push("vaxis", "[0 -1 0 -8] 0.5");
    node.push("rotation", "30");
    node.push("lightmapscale", "16");
    node
}

#[test]
fn side_from_node_reads_keys() {
    let side = side_from_node(&side()).unwrap();

    assert_eq!(side.plane.normal(), Vec3::new(0.0, 0.0, -1.0));
    assert_eq!(side.plane.distance(), -64.0);
    assert_eq!(side.shader, "BRICK/BRICKWALL001A");
    assert_eq!(side.texture_vector.s.offset, 16.0);
    assert_eq!(side.texture_vector.t.scale, 0.5);
    assert_eq!(side.rotation(), 30.0);
}

#[test]
fn side_node_writes_keys() {
    let node = side_node(&side_from_node(&side()).unwrap()).unwrap();

    assert_eq!(node.node_type, "side");
    assert_eq!(
        node.keys(),
        ["plane", "material", "uaxis", "vaxis", "rotation"]
    );
    assert_eq!(
        node.values(),
        [
            "(-64 64 64) (64 64 64) (64 -64 64)",
            "BRICK/BRICKWALL001A",
            "[1 0 0 16] 0.25",
            "[0 -1 0 -8] 0.5",
            "30",
        ]
    );
}

#[test]
fn side_missing_key() {
    let mut node = side();
    node.remove("material");

    match side_from_node(&node).unwrap_err() {
        Document::MissingKey { node_type, key } => {
            assert_eq!(node_type, "side");
            assert_eq!(key, "material");
        }
        other => panic!("Unexpected error {}", other),
    }
}

#[test]
fn side_bad_value() {
    let mut node = side();
    node.set("uaxis", "[1 0 0] 0.25");

    assert!(matches!(
        side_from_node(&node).unwrap_err(),
        Document::Grammar(_)
    ));
}

#[test]
fn wrong_node_type() {
    match brush_from_node(&side()).unwrap_err() {
        Document::NodeType { expected, found } => {
            assert_eq!(expected, "solid");
            assert_eq!(found, "side");
        }
        other => panic!("Unexpected error {}", other),
    }

    assert!(matches!(
        entity_from_node(&Node::new("solid")).unwrap_err(),
        Document::NodeType { .. }
    ));
}

#[test]
fn brush_skips_other_children() {
    let mut solid = Node::new("solid");
    solid.push("id", "2");
    solid.nodes.push(side());
    solid.nodes.push(Node::new("editor"));
    solid.nodes.push(side());

    let brush = brush_from_node(&solid).unwrap();
    assert_eq!(brush.sides.len(), 2);

    let node = brush_node(&brush).unwrap();
    assert_eq!(node.nodes.len(), 2);
    assert!(node.pairs().is_empty());
}

#[test]
fn entity_round_trip() {
    let plane = Plane::new(Vec3::new(0.0, 0.0, -1.0), 0.0).unwrap();
    let mut entity = Entity::from_pairs([
        ("classname", "func_detail"),
        ("spawnflags", "0"),
    ]);
    entity.brushes.push(Brush::new(vec![BrushSide::new(plane)]));

    let node = entity_node(&entity).unwrap();
    assert_eq!(node.node_type, "entity");
    assert_eq!(node.keys(), ["classname", "spawnflags"]);
    assert_eq!(node.nodes[0].nodes[0].get("uaxis"), Some("[1 0 0 0] 0.25"));

    assert_eq!(entity_from_node(&node).unwrap(), entity);
}

#[test]
fn entity_from_world_node() {
    let mut world = Node::new("world");
    world.push("classname", "worldspawn");
    world.push("skyname", "sky_a");
    world.push("skyname", "sky_b");

    let entity = entity_from_node(&world).unwrap();
    assert_eq!(entity.get("skyname"), Some("sky_b"));
    assert_eq!(entity.attributes.len(), 2);
}

#[test]
fn side_node_keeps_map_plane_spelling() {
    let side = QUAKE_SIDE
        .parse("( 0 0 0 ) ( 0 1 0 ) ( 1 0 0 ) sky 0 0 0 1 1")
        .unwrap();
    let node = side_node(&side).unwrap();

    assert_eq!(node.get("plane"), Some("( 0 0 0 ) ( 0 1 0 ) ( 1 0 0 )"));
    assert_eq!(side_from_node(&node).unwrap().plane, side.plane);
}
