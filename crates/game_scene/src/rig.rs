//! Parent-child character rig
//!
//! Nine body parts on a [`TransformHierarchy`]. The root carries the whole
//! character; the spine is the joint the chest and hip hang from.
//!
//! ```text
//! Root
//! └── Spine
//!     ├── Chest
//!     │   ├── Head
//!     │   ├── ArmL
//!     │   └── ArmR
//!     └── Hip
//!         ├── LegL
//!         └── LegR
//! ```

use scene_engine::foundation::math::{Mat4, Vec3};
use scene_engine::scene::{HierarchyError, NodeId, TransformHierarchy, WorldTransform};

/// Body parts of the rig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyPart {
    /// Character origin
    Root,
    /// Upper body joint
    Spine,
    /// Chest
    Chest,
    /// Head
    Head,
    /// Left arm
    ArmL,
    /// Right arm
    ArmR,
    /// Hip
    Hip,
    /// Left leg
    LegL,
    /// Right leg
    LegR,
}

impl BodyPart {
    /// Every part, parents before children
    pub const ALL: [BodyPart; 9] = [
        BodyPart::Root,
        BodyPart::Spine,
        BodyPart::Chest,
        BodyPart::Head,
        BodyPart::ArmL,
        BodyPart::ArmR,
        BodyPart::Hip,
        BodyPart::LegL,
        BodyPart::LegR,
    ];

    /// Parent part, `None` for the root
    pub fn parent(self) -> Option<BodyPart> {
        match self {
            BodyPart::Root => None,
            BodyPart::Spine => Some(BodyPart::Root),
            BodyPart::Chest | BodyPart::Hip => Some(BodyPart::Spine),
            BodyPart::Head | BodyPart::ArmL | BodyPart::ArmR => Some(BodyPart::Chest),
            BodyPart::LegL | BodyPart::LegR => Some(BodyPart::Hip),
        }
    }

    /// Rest translation relative to the parent
    pub fn local_offset(self, unit: f32) -> Vec3 {
        match self {
            BodyPart::Root | BodyPart::Chest => Vec3::zeros(),
            BodyPart::Spine | BodyPart::Head => Vec3::new(0.0, unit, 0.0),
            BodyPart::ArmL => Vec3::new(-unit, 0.0, 0.0),
            BodyPart::ArmR => Vec3::new(unit, 0.0, 0.0),
            BodyPart::Hip => Vec3::new(0.0, -unit, 0.0),
            BodyPart::LegL => Vec3::new(-unit, -unit, 0.0),
            BodyPart::LegR => Vec3::new(unit, -unit, 0.0),
        }
    }

    /// Node name in the hierarchy
    pub fn name(self) -> &'static str {
        match self {
            BodyPart::Root => "Root",
            BodyPart::Spine => "Spine",
            BodyPart::Chest => "Chest",
            BodyPart::Head => "Head",
            BodyPart::ArmL => "ArmL",
            BodyPart::ArmR => "ArmR",
            BodyPart::Hip => "Hip",
            BodyPart::LegL => "LegL",
            BodyPart::LegR => "LegR",
        }
    }

    /// Root and spine are joints only and have no mesh
    pub fn is_drawn(self) -> bool {
        !matches!(self, BodyPart::Root | BodyPart::Spine)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// The character rig
#[derive(Debug, Clone)]
pub struct Rig {
    hierarchy: TransformHierarchy,
    nodes: Vec<NodeId>,
    unit: f32,
}

impl Rig {
    /// Build the rig at rest pose with world matrices computed
    pub fn new(unit: f32) -> Result<Self, HierarchyError> {
        let mut hierarchy = TransformHierarchy::new();
        let mut nodes = Vec::with_capacity(BodyPart::ALL.len());

        for part in BodyPart::ALL {
            let transform = WorldTransform::new().with_translation(part.local_offset(unit));
            let id = match part.parent() {
                Some(parent) => hierarchy.add_child(part.name(), nodes[parent.index()], transform)?,
                None => hierarchy.add_root(part.name(), transform)?,
            };
            nodes.push(id);
        }

        let mut rig = Self { hierarchy, nodes, unit };
        rig.update_matrices();
        log::debug!("Built rig with {} parts (unit {})", rig.hierarchy.len(), unit);
        Ok(rig)
    }

    /// Joint spacing the rig was built with
    pub fn unit(&self) -> f32 {
        self.unit
    }

    /// Transform of a part
    pub fn part(&self, part: BodyPart) -> &WorldTransform {
        &self.hierarchy[self.nodes[part.index()]].transform
    }

    /// Mutable transform of a part; call [`Rig::update_matrices`] afterwards
    pub fn part_mut(&mut self, part: BodyPart) -> &mut WorldTransform {
        self.hierarchy.transform_mut(self.nodes[part.index()])
    }

    /// Recompute every world matrix, parents first
    pub fn update_matrices(&mut self) {
        self.hierarchy.update_matrices();
    }

    /// World matrix of a part from the last update
    pub fn world_matrix(&self, part: BodyPart) -> &Mat4 {
        &self.part(part).mat_world
    }

    /// World position of a part from the last update
    pub fn world_position(&self, part: BodyPart) -> Vec3 {
        self.part(part).world_position()
    }

    /// Underlying hierarchy
    pub fn hierarchy(&self) -> &TransformHierarchy {
        &self.hierarchy
    }
}
