//! Default payloads for the top-level sections of a VMF document, used when
//! a document doesn't provide the section itself.

use crate::node::Node;

pub struct Section {
    pub node_type: &'static str,
    pub defaults: &'static [(&'static str, &'static str)],
}

impl Section {
    /// A fresh node holding this section's defaults
    pub fn node(&self) -> Node {
        let mut node = Node::new(self.node_type);
        node.update(self.defaults.iter().copied());
        node
    }
}

pub const VERSION_INFO: Section = Section {
    node_type: "versioninfo",
    defaults: &[
        ("editorversion", "400"),
        ("formatversion", "100"),
        ("mapversion", "1"),
        ("prefab", "0"),
    ],
};

pub const VISGROUPS: Section = Section {
    node_type: "visgroups",
    defaults: &[],
};

pub const VIEW_SETTINGS: Section = Section {
    node_type: "viewsettings",
    defaults: &[
        ("bShow3DGrid", "0"),
        ("bShowGrid", "1"),
        ("bShowLogicalGrid", "0"),
        ("bSnapToGrid", "1"),
        ("nGridSpacing", "16"),
    ],
};

/// Only these keys are carried over from a previously loaded world node; the
/// rest of the world is rebuilt from the worldspawn entity
pub const WORLD: Section = Section {
    node_type: "world",
    defaults: &[
        ("id", "1"),
        ("mapversion", "1"),
        ("classname", "worldspawn"),
        ("maxpropscreenwidth", "-1"),
    ],
};

pub const CAMERAS: Section = Section {
    node_type: "cameras",
    defaults: &[("activecamera", "-1")],
};

pub const CORDON: Section = Section {
    node_type: "cordon",
    defaults: &[
        ("mins", "(-1024 -1024 -1024)"),
        ("maxs", "(1024 1024 1024)"),
        ("active", "0"),
    ],
};

pub const ENTITY_TYPE: &str = "entity";
pub const SOLID_TYPE: &str = "solid";
pub const SIDE_TYPE: &str = "side";
