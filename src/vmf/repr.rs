use super::convert::{entity_from_node, entity_node};
use super::defaults::{
    Section, CAMERAS, CORDON, ENTITY_TYPE, VERSION_INFO, VIEW_SETTINGS,
    VISGROUPS, WORLD,
};
use crate::common::Writes;
use crate::error::{Document, DocumentResult, WriteAttempt};
use crate::map::{Entity, MapFile};
use crate::node::{self, group_by_type, Node};
use std::collections::BTreeMap;
use std::io;
use std::string::ToString;
use std::vec::Vec;

type NodeGroups<'a> = BTreeMap<&'a str, Vec<&'a Node>>;

/// A Source engine map: the entities it describes, plus the nodes it was
/// loaded from (or last rebuilt into)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vmf {
    pub entities: Vec<Entity>,
    pub nodes: Vec<Node>,
}

impl Vmf {
    pub fn new() -> Vmf {
        Vmf::default()
    }

    pub fn parse<R: io::Read>(reader: R) -> DocumentResult<Vmf> {
        Vmf::parse_named(reader, "VMF")
    }

    pub fn parse_named<R: io::Read>(
        reader: R,
        name: &str,
    ) -> DocumentResult<Vmf> {
        Vmf::from_nodes(node::parse_named(reader, name)?)
    }

    /// Read the entities out of a document's top-level nodes: the single
    /// `world` node first, then every `entity` node
    pub fn from_nodes(nodes: Vec<Node>) -> DocumentResult<Vmf> {
        let groups = group_by_type(&nodes);

        let world = match groups.get(WORLD.node_type) {
            Some(worlds) if worlds.len() == 1 => worlds[0],
            other => {
                return Err(Document::SectionCount {
                    node_type: WORLD.node_type.to_string(),
                    count: other.map_or(0, Vec::len),
                })
            }
        };

        let mut entities = vec![entity_from_node(world)?];

        for node in groups.get(ENTITY_TYPE).into_iter().flatten() {
            entities.push(entity_from_node(node)?);
        }

        log::debug!("Read {} entities from VMF nodes", entities.len());

        Ok(Vmf { entities, nodes })
    }

    pub fn nodes_by_type(&self) -> NodeGroups<'_> {
        group_by_type(&self.nodes)
    }

    /// The top-level nodes in write order: version info, visgroups, view
    /// settings, world, the remaining entities, cameras and cordon.
    ///
    /// Sections other than the world and entities are taken from `nodes`
    /// when present there exactly once and synthesised from their defaults
    /// when absent. The world is rebuilt from the first entity, keeping the
    /// `WORLD` settings of any loaded world node.
    pub fn canonical_nodes(&self) -> DocumentResult<Vec<Node>> {
        let groups = self.nodes_by_type();
        let mut nodes = Vec::with_capacity(self.entities.len() + 5);

        for section in [&VERSION_INFO, &VISGROUPS, &VIEW_SETTINGS] {
            nodes.push(merge_or_default(&groups, section)?);
        }

        let loaded_world = single(&groups, WORLD.node_type)?;
        let mut world = match self.entities.first() {
            Some(worldspawn) => entity_node(worldspawn)?,
            None => entity_node(&Entity::new())?,
        };
        world.node_type = WORLD.node_type.to_string();

        for &(key, default) in WORLD.defaults {
            let value = loaded_world
                .and_then(|node| node.get(key))
                .unwrap_or(default);
            world.set(key, value);
        }

        nodes.push(world);

        for entity in self.entities.iter().skip(1) {
            nodes.push(entity_node(entity)?);
        }

        for section in [&CAMERAS, &CORDON] {
            nodes.push(merge_or_default(&groups, section)?);
        }

        Ok(nodes)
    }

    /// Replace `nodes` with `canonical_nodes`
    pub fn rebuild_nodes(&mut self) -> DocumentResult<()> {
        self.nodes = self.canonical_nodes()?;
        Ok(())
    }
}

fn single<'a>(
    groups: &NodeGroups<'a>,
    node_type: &str,
) -> DocumentResult<Option<&'a Node>> {
    match groups.get(node_type).map(Vec::as_slice) {
        None | Some([]) => Ok(None),
        Some([node]) => Ok(Some(*node)),
        Some(nodes) => Err(Document::SectionCount {
            node_type: node_type.to_string(),
            count: nodes.len(),
        }),
    }
}

fn merge_or_default(
    groups: &NodeGroups,
    section: &Section,
) -> DocumentResult<Node> {
    match single(groups, section.node_type)? {
        Some(node) => Ok(node.clone()),
        None => {
            log::debug!("Using default `{}` section", section.node_type);
            Ok(section.node())
        }
    }
}

impl From<MapFile> for Vmf {
    fn from(map: MapFile) -> Vmf {
        Vmf {
            entities: map.entities,
            nodes: Vec::new(),
        }
    }
}

impl From<Vmf> for MapFile {
    fn from(vmf: Vmf) -> MapFile {
        MapFile {
            entities: vmf.entities,
            ..MapFile::default()
        }
    }
}

impl<W: io::Write> Writes<W> for Vmf {
    fn write_to(&self, writer: &mut W) -> WriteAttempt {
        for node in self.canonical_nodes()? {
            node.write_to(writer)?;
        }

        Ok(())
    }
}
