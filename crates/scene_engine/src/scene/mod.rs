//! Scene module - transforms, the parent-child hierarchy and the camera
//!
//! - **Transform**: per-object scale/rotation/translation and world matrix
//! - **Hierarchy**: arena of parent-child transforms updated top-down
//! - **Camera**: eye/target/up view projection

pub mod transform;
pub mod hierarchy;
pub mod camera;

pub use transform::{WorldTransform, WorldConstants};
pub use hierarchy::{TransformHierarchy, HierarchyNode, HierarchyError, NodeId};
pub use camera::{ViewProjection, ViewConstants};
