//! Parent-child transform hierarchy
//!
//! Nodes live in an arena. A child can only be added under a node that
//! already exists, so arena order is always topological (every parent sits
//! before its children) and one forward pass propagates world matrices.

use std::ops::Index;
use thiserror::Error;

use crate::foundation::math::Mat4;
use crate::scene::transform::WorldTransform;

/// Index of a node in a [`TransformHierarchy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index
    pub fn index(self) -> usize {
        self.0
    }
}

/// Hierarchy construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    /// Parent id does not belong to this hierarchy
    #[error("Unknown parent node {0:?}")]
    UnknownParent(NodeId),

    /// A node with this name already exists
    #[error("Duplicate node name: {0}")]
    DuplicateName(String),
}

/// A named transform with an optional parent
///
/// Name and parent are fixed when the node is added; only the transform is
/// mutable.
#[derive(Debug, Clone)]
pub struct HierarchyNode {
    name: String,
    parent: Option<NodeId>,
    /// Local transform and cached world matrix
    pub transform: WorldTransform,
}

impl HierarchyNode {
    /// Node name, unique within the hierarchy
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent node, `None` for roots
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Arena of parent-child transforms
///
/// Only transforms can be edited once a node is added:
///
/// ```compile_fail
/// use scene_engine::scene::{TransformHierarchy, WorldTransform};
///
/// let mut hierarchy = TransformHierarchy::new();
/// let root = hierarchy.add_root("root", WorldTransform::new()).unwrap();
/// hierarchy[root] = hierarchy[root].clone();
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransformHierarchy {
    nodes: Vec<HierarchyNode>,
}

impl TransformHierarchy {
    /// Create an empty hierarchy
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node without a parent
    pub fn add_root(
        &mut self,
        name: impl Into<String>,
        transform: WorldTransform,
    ) -> Result<NodeId, HierarchyError> {
        self.push(name.into(), None, transform)
    }

    /// Add a node under an existing parent
    pub fn add_child(
        &mut self,
        name: impl Into<String>,
        parent: NodeId,
        transform: WorldTransform,
    ) -> Result<NodeId, HierarchyError> {
        if parent.0 >= self.nodes.len() {
            return Err(HierarchyError::UnknownParent(parent));
        }
        self.push(name.into(), Some(parent), transform)
    }

    fn push(
        &mut self,
        name: String,
        parent: Option<NodeId>,
        transform: WorldTransform,
    ) -> Result<NodeId, HierarchyError> {
        if self.find(&name).is_some() {
            return Err(HierarchyError::DuplicateName(name));
        }
        let id = NodeId(self.nodes.len());
        log::trace!("Hierarchy node {} -> {:?} (parent {:?})", name, id, parent);
        self.nodes.push(HierarchyNode { name, parent, transform });
        Ok(id)
    }

    /// Look a node up by name
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|node| node.name == name).map(NodeId)
    }

    /// Borrow a node
    pub fn get(&self, id: NodeId) -> Option<&HierarchyNode> {
        self.nodes.get(id.0)
    }

    /// Mutably borrow a node's transform
    ///
    /// Panics if `id` came from another hierarchy.
    pub fn transform_mut(&mut self, id: NodeId) -> &mut WorldTransform {
        &mut self.nodes[id.0].transform
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    /// Direct children of a node, in insertion order
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent == Some(id))
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    /// World matrix from the last update
    pub fn world_matrix(&self, id: NodeId) -> Option<&Mat4> {
        self.get(id).map(|node| &node.transform.mat_world)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when no nodes were added
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes in topological order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &HierarchyNode)> {
        self.nodes.iter().enumerate().map(|(index, node)| (NodeId(index), node))
    }

    /// Recompute every world matrix top-down
    pub fn update_matrices(&mut self) {
        for index in 0..self.nodes.len() {
            match self.nodes[index].parent {
                Some(parent) => {
                    let parent_world = self.nodes[parent.0].transform.mat_world;
                    self.nodes[index].transform.update_matrix_with_parent(&parent_world);
                }
                None => self.nodes[index].transform.update_matrix(),
            }
        }
    }
}

/// Panics if `id` came from another hierarchy
impl Index<NodeId> for TransformHierarchy {
    type Output = HierarchyNode;

    fn index(&self, id: NodeId) -> &HierarchyNode {
        &self.nodes[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{constants::HALF_PI, Vec3};
    use approx::assert_relative_eq;

    fn chain() -> (TransformHierarchy, NodeId, NodeId, NodeId) {
        let mut hierarchy = TransformHierarchy::new();
        let root = hierarchy.add_root("root", WorldTransform::new()).unwrap();
        let mid = hierarchy
            .add_child("mid", root, WorldTransform::new().with_translation(Vec3::new(0.0, 2.0, 0.0)))
            .unwrap();
        let tip = hierarchy
            .add_child("tip", mid, WorldTransform::new().with_translation(Vec3::new(1.0, 0.0, 0.0)))
            .unwrap();
        hierarchy.update_matrices();
        (hierarchy, root, mid, tip)
    }

    #[test]
    fn test_propagates_translation_down_the_chain() {
        let (mut hierarchy, root, _, tip) = chain();
        assert_relative_eq!(
            hierarchy.get(tip).unwrap().transform.world_position(),
            Vec3::new(1.0, 2.0, 0.0),
            epsilon = 1e-6
        );

        hierarchy.transform_mut(root).translation.x = 5.0;
        hierarchy.update_matrices();
        assert_relative_eq!(
            hierarchy.get(tip).unwrap().transform.world_position(),
            Vec3::new(6.0, 2.0, 0.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_rotation_of_middle_node_swings_tip_only() {
        let (mut hierarchy, root, mid, tip) = chain();
        hierarchy.transform_mut(mid).rotation.y = HALF_PI;
        hierarchy.update_matrices();

        // Y rotation by 90 degrees takes +X to -Z
        assert_relative_eq!(
            hierarchy.get(tip).unwrap().transform.world_position(),
            Vec3::new(0.0, 2.0, -1.0),
            epsilon = 1e-5
        );
        assert_relative_eq!(
            hierarchy.get(root).unwrap().transform.world_position(),
            Vec3::zeros(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_child_world_is_parent_times_local() {
        let (hierarchy, _, mid, tip) = chain();
        let expected = hierarchy.world_matrix(mid).unwrap()
            * hierarchy.get(tip).unwrap().transform.local_matrix();
        assert_relative_eq!(*hierarchy.world_matrix(tip).unwrap(), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_rejects_unknown_parent_and_duplicates() {
        let (mut hierarchy, root, _, _) = chain();
        assert_eq!(
            hierarchy.add_child("ghost", NodeId(42), WorldTransform::new()),
            Err(HierarchyError::UnknownParent(NodeId(42)))
        );
        assert_eq!(
            hierarchy.add_child("mid", root, WorldTransform::new()),
            Err(HierarchyError::DuplicateName("mid".to_string()))
        );
        assert_eq!(hierarchy.len(), 3);
    }

    #[test]
    fn test_children_and_lookup() {
        let (hierarchy, root, mid, tip) = chain();
        assert_eq!(hierarchy.children(root), vec![mid]);
        assert_eq!(hierarchy.children(tip), Vec::<NodeId>::new());
        assert_eq!(hierarchy.find("tip"), Some(tip));
        assert_eq!(hierarchy.parent(tip), Some(mid));
        assert_eq!(hierarchy.parent(root), None);
        assert_eq!(hierarchy[mid].name(), "mid");
        assert_eq!(hierarchy[tip].parent(), Some(mid));
    }

    #[test]
    fn test_editing_transforms_keeps_names_and_parents() {
        let (mut hierarchy, root, mid, tip) = chain();
        for id in [root, mid, tip] {
            let transform = hierarchy.transform_mut(id);
            *transform = WorldTransform::new()
                .with_translation(Vec3::new(3.0, -1.0, 7.0))
                .with_rotation(Vec3::new(0.3, 1.2, -0.4));
        }
        hierarchy.update_matrices();

        let names: Vec<&str> = hierarchy.iter().map(|(_, node)| node.name()).collect();
        assert_eq!(names, ["root", "mid", "tip"]);
        assert_eq!(hierarchy.parent(root), None);
        assert_eq!(hierarchy.parent(mid), Some(root));
        assert_eq!(hierarchy.parent(tip), Some(mid));
        for (id, node) in hierarchy.iter() {
            if let Some(parent) = node.parent() {
                assert!(parent < id);
            }
        }
    }
}
