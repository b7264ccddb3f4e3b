use super::defaults::{ENTITY_TYPE, SIDE_TYPE, SOLID_TYPE, WORLD};
use crate::error::{Document, DocumentResult};
use crate::grammar::Grammar;
use crate::map::{Brush, BrushSide, Entity, TextureVector};
use crate::node::Node;
use crate::tokens::{FLOAT, PLANE, PROJECTION_AXIS};
use std::string::ToString;

const PLANE_KEY: &str = "plane";
const MATERIAL_KEY: &str = "material";
const UAXIS_KEY: &str = "uaxis";
const VAXIS_KEY: &str = "vaxis";
const ROTATION_KEY: &str = "rotation";

pub fn side_node(side: &BrushSide) -> DocumentResult<Node> {
    let TextureVector { s, t, rotation } = &side.texture_vector;
    let mut node = Node::new(SIDE_TYPE);

    // a parsed plane keeps its source spelling, `( 0 0 0 )` from a .map too
    node.push(PLANE_KEY, PLANE.unparse(&side.plane)?);
    node.push(MATERIAL_KEY, side.shader.as_str());
    node.push(UAXIS_KEY, PROJECTION_AXIS.unparse(s)?);
    node.push(VAXIS_KEY, PROJECTION_AXIS.unparse(t)?);
    node.push(ROTATION_KEY, FLOAT.unparse(rotation)?);

    Ok(node)
}

pub fn side_from_node(node: &Node) -> DocumentResult<BrushSide> {
    expect_type(node, &[SIDE_TYPE])?;

    Ok(BrushSide {
        plane: PLANE.parse(node.require(PLANE_KEY)?)?,
        shader: node.require(MATERIAL_KEY)?.to_string(),
        texture_vector: TextureVector {
            s: PROJECTION_AXIS.parse(node.require(UAXIS_KEY)?)?,
            t: PROJECTION_AXIS.parse(node.require(VAXIS_KEY)?)?,
            rotation: FLOAT.parse(node.require(ROTATION_KEY)?)?,
        },
    })
}

pub fn brush_node(brush: &Brush) -> DocumentResult<Node> {
    let mut node = Node::new(SOLID_TYPE);

    for side in &brush.sides {
        node.nodes.push(side_node(side)?);
    }

    Ok(node)
}

pub fn brush_from_node(node: &Node) -> DocumentResult<Brush> {
    expect_type(node, &[SOLID_TYPE])?;

    let sides = node
        .nodes
        .iter()
        .filter(|child| child.node_type == SIDE_TYPE)
        .map(side_from_node)
        .collect::<DocumentResult<_>>()?;

    Ok(Brush::new(sides))
}

pub fn entity_node(entity: &Entity) -> DocumentResult<Node> {
    let mut node = Node::new(ENTITY_TYPE);

    for (key, value) in &entity.attributes {
        node.push(key.as_str(), value.as_str());
    }

    for brush in &entity.brushes {
        node.nodes.push(brush_node(brush)?);
    }

    Ok(node)
}

/// Accepts both `entity` and `world` nodes; repeated keys keep their last
/// value
pub fn entity_from_node(node: &Node) -> DocumentResult<Entity> {
    expect_type(node, &[ENTITY_TYPE, WORLD.node_type])?;

    let mut entity = Entity::from_pairs(node.pairs().iter().cloned());
    entity.brushes = node
        .nodes
        .iter()
        .filter(|child| child.node_type == SOLID_TYPE)
        .map(brush_from_node)
        .collect::<DocumentResult<_>>()?;

    Ok(entity)
}

fn expect_type(node: &Node, expected: &[&str]) -> DocumentResult<()> {
    if expected.contains(&node.node_type.as_str()) {
        Ok(())
    } else {
        Err(Document::NodeType {
            expected: expected.join(" or "),
            found: node.node_type.clone(),
        })
    }
}
