//! Scene management for renderable nodes.
//!
//! The scene keeps two disjoint lists: persistent nodes (axes, grid, unit
//! cell) that live as long as the scene, and a single optional transient slot
//! holding the current plane or arrow. Replacing the visualization only ever
//! touches the slot.

mod node;

pub use node::*;

use uuid::Uuid;

use miller_core::{ReferenceCell, TransientNode};

use crate::config::SceneConfig;

/// Scene containing all renderable nodes.
///
/// The scene is the single source of truth for what is drawn; sub-renderers
/// read it every frame and rebuild their buffers when [`Scene::revision`]
/// changes.
#[derive(Debug, Default)]
pub struct Scene {
    persistent: Vec<PersistentNode>,
    transient: Option<TransientEntry>,
    revision: u64,
}

impl Scene {
    /// Creates a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scene with axes, grid and the reference cell outline.
    pub fn with_reference_content(config: &SceneConfig, cell: ReferenceCell) -> Self {
        let mut scene = Self::new();
        scene.add_persistent(
            PersistentNode::new(PersistentKind::Grid {
                size: config.grid.size,
                spacing: config.grid.spacing,
                color: config.grid.line_color,
            })
            .with_visible(config.show_grid),
        );
        scene.add_persistent(
            PersistentNode::new(PersistentKind::Axes {
                length: config.axes_length,
            })
            .with_visible(config.show_axes),
        );
        scene.add_persistent(PersistentNode::new(PersistentKind::UnitCell(cell)));
        scene
    }

    /// Monotonic counter bumped on every content change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Adds a persistent node.
    pub fn add_persistent(&mut self, node: PersistentNode) -> Uuid {
        let id = node.id;
        self.persistent.push(node);
        self.revision += 1;
        id
    }

    pub fn persistent(&self) -> &[PersistentNode] {
        &self.persistent
    }

    /// Shows or hides every persistent node with the given name.
    pub fn set_persistent_visible(&mut self, name: &str, visible: bool) {
        for node in self.persistent.iter_mut().filter(|n| n.kind.name() == name) {
            if node.visible != visible {
                node.visible = visible;
                self.revision += 1;
            }
        }
    }

    pub fn transient(&self) -> Option<&TransientEntry> {
        self.transient.as_ref()
    }

    pub fn transient_node(&self) -> Option<&TransientNode> {
        self.transient.as_ref().map(|entry| &entry.node)
    }

    /// Swaps the transient slot, returning the previous node.
    ///
    /// Persistent nodes are never touched.
    pub fn replace_transient(&mut self, node: Option<TransientNode>) -> Option<TransientNode> {
        let previous = std::mem::replace(
            &mut self.transient,
            node.map(|node| TransientEntry {
                id: Uuid::new_v4(),
                node,
            }),
        );
        self.revision += 1;
        previous.map(|entry| entry.node)
    }

    /// All nodes, persistent first.
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.persistent
            .iter()
            .map(NodeRef::Persistent)
            .chain(self.transient.iter().map(NodeRef::Transient))
    }

    /// Number of nodes in the given class.
    pub fn count(&self, class: NodeClass) -> usize {
        match class {
            NodeClass::Persistent => self.persistent.len(),
            NodeClass::Transient => usize::from(self.transient.is_some()),
        }
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.persistent.len() + usize::from(self.transient.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use miller_core::{GeometryMapper, IndexRecord};

    fn arrow() -> TransientNode {
        GeometryMapper::default()
            .map(&IndexRecord::direction(Vec3::ONE))
            .unwrap()
    }

    fn plane() -> TransientNode {
        GeometryMapper::default()
            .map(&IndexRecord::plane(Vec3::X, Vec3::X))
            .unwrap()
    }

    #[test]
    fn test_reference_content() {
        let scene = Scene::with_reference_content(&SceneConfig::default(), ReferenceCell::unit());
        assert_eq!(scene.count(NodeClass::Persistent), 3);
        assert_eq!(scene.count(NodeClass::Transient), 0);
        let names: Vec<_> = scene.persistent().iter().map(|n| n.kind.name()).collect();
        assert_eq!(names, vec!["grid", "axes", "unit_cell"]);
    }

    #[test]
    fn test_replace_keeps_single_transient() {
        let mut scene = Scene::with_reference_content(&SceneConfig::default(), ReferenceCell::unit());
        let persistent_ids: Vec<_> = scene.persistent().iter().map(|n| n.id).collect();

        assert!(scene.replace_transient(Some(plane())).is_none());
        assert_eq!(scene.len(), 4);

        let previous = scene.replace_transient(Some(arrow()));
        assert!(previous.unwrap().as_plane().is_some());
        assert_eq!(scene.count(NodeClass::Transient), 1);
        assert!(scene.transient_node().unwrap().as_arrow().is_some());

        let ids: Vec<_> = scene.persistent().iter().map(|n| n.id).collect();
        assert_eq!(ids, persistent_ids);
    }

    #[test]
    fn test_clear_transient() {
        let mut scene = Scene::with_reference_content(&SceneConfig::default(), ReferenceCell::unit());
        scene.replace_transient(Some(arrow()));
        scene.replace_transient(None);
        assert_eq!(scene.count(NodeClass::Transient), 0);
        assert_eq!(scene.count(NodeClass::Persistent), 3);
    }

    #[test]
    fn test_nodes_are_tagged() {
        let mut scene = Scene::with_reference_content(&SceneConfig::default(), ReferenceCell::unit());
        scene.replace_transient(Some(arrow()));
        let classes: Vec<_> = scene.nodes().map(|n| n.class()).collect();
        assert_eq!(
            classes,
            vec![
                NodeClass::Persistent,
                NodeClass::Persistent,
                NodeClass::Persistent,
                NodeClass::Transient
            ]
        );
    }

    #[test]
    fn test_revision_tracks_changes() {
        let mut scene = Scene::with_reference_content(&SceneConfig::default(), ReferenceCell::unit());
        let before = scene.revision();
        scene.replace_transient(Some(plane()));
        assert!(scene.revision() > before);

        let before = scene.revision();
        scene.set_persistent_visible("grid", true);
        assert_eq!(scene.revision(), before);
        scene.set_persistent_visible("grid", false);
        assert!(scene.revision() > before);
    }
}
