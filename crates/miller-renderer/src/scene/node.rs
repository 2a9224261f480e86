//! Scene node definitions.

use uuid::Uuid;

use miller_core::{ReferenceCell, TransientNode};

/// Which list a node lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeClass {
    /// Created once at initialization, never removed by updates.
    Persistent,
    /// The replaceable visualization.
    Transient,
}

/// Content of a persistent node.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistentKind {
    /// X/Y/Z axes indicator at the origin.
    Axes { length: f32 },
    /// Square grid in the z = 0 plane.
    Grid {
        /// Half extent.
        size: f32,
        spacing: f32,
        color: [f32; 3],
    },
    /// Outline of the reference cell.
    UnitCell(ReferenceCell),
}

impl PersistentKind {
    pub fn name(&self) -> &'static str {
        match self {
            PersistentKind::Axes { .. } => "axes",
            PersistentKind::Grid { .. } => "grid",
            PersistentKind::UnitCell(_) => "unit_cell",
        }
    }
}

/// A node that stays for the lifetime of the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistentNode {
    pub id: Uuid,
    pub kind: PersistentKind,
    pub visible: bool,
}

impl PersistentNode {
    pub fn new(kind: PersistentKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            visible: true,
        }
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// The transient node once attached to a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct TransientEntry {
    pub id: Uuid,
    pub node: TransientNode,
}

/// Borrowed view of any node with its class tag.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Persistent(&'a PersistentNode),
    Transient(&'a TransientEntry),
}

impl NodeRef<'_> {
    pub fn id(&self) -> Uuid {
        match self {
            NodeRef::Persistent(node) => node.id,
            NodeRef::Transient(entry) => entry.id,
        }
    }

    pub fn class(&self) -> NodeClass {
        match self {
            NodeRef::Persistent(_) => NodeClass::Persistent,
            NodeRef::Transient(_) => NodeClass::Transient,
        }
    }
}
