//! World transform
//!
//! Scale, Euler rotation and translation for one object, plus the cached
//! world matrix that a model draw uploads.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};

/// Constant-buffer image of a world matrix
///
/// Column-major, laid out exactly as a shader would read it.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct WorldConstants {
    /// World matrix columns
    pub mat_world: [[f32; 4]; 4],
}

impl WorldConstants {
    /// Raw bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Position/rotation/scale of an object and its computed world matrix
///
/// `mat_world` is only refreshed by [`update_matrix`](Self::update_matrix)
/// or [`update_matrix_with_parent`](Self::update_matrix_with_parent); editing
/// the fields alone does not change it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldTransform {
    /// Local scale
    pub scale: Vec3,
    /// Local rotation as Euler angles in radians (applied Z, X, then Y)
    pub rotation: Vec3,
    /// Local translation
    pub translation: Vec3,
    /// World matrix from the last update
    #[serde(skip, default = "Mat4::identity")]
    pub mat_world: Mat4,
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self {
            scale: Vec3::new(1.0, 1.0, 1.0),
            rotation: Vec3::zeros(),
            translation: Vec3::zeros(),
            mat_world: Mat4::identity(),
        }
    }
}

impl WorldTransform {
    /// Identity transform
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform with only a translation; the world matrix is computed immediately
    pub fn from_translation(translation: Vec3) -> Self {
        let mut transform = Self {
            translation,
            ..Self::default()
        };
        transform.update_matrix();
        transform
    }

    /// Builder: set scale
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder: set rotation
    #[must_use]
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder: set translation
    #[must_use]
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// `T · Ry · Rx · Rz · S`
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::translation(&self.translation)
            * Mat4::euler_zxy(&self.rotation)
            * Mat4::scaling(&self.scale)
    }

    /// Recompute the world matrix for an object without a parent
    pub fn update_matrix(&mut self) {
        self.mat_world = self.local_matrix();
    }

    /// Recompute the world matrix relative to a parent's world matrix
    pub fn update_matrix_with_parent(&mut self, parent_world: &Mat4) {
        self.mat_world = parent_world * self.local_matrix();
    }

    /// World-space position from the last update
    pub fn world_position(&self) -> Vec3 {
        self.mat_world.translation_part()
    }

    /// Constant-buffer contents for the current world matrix
    pub fn transfer_matrix(&self) -> WorldConstants {
        WorldConstants {
            mat_world: self.mat_world.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::HALF_PI;
    use crate::foundation::math::Point3;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_identity() {
        let mut transform = WorldTransform::new();
        transform.update_matrix();
        assert_eq!(transform.mat_world, Mat4::identity());
    }

    #[test]
    fn test_scale_applied_before_rotation_and_translation() {
        let mut transform = WorldTransform::new()
            .with_scale(Vec3::new(2.0, 1.0, 1.0))
            .with_rotation(Vec3::new(0.0, 0.0, HALF_PI))
            .with_translation(Vec3::new(10.0, 0.0, 0.0));
        transform.update_matrix();

        // (1,0,0) -> scale (2,0,0) -> rotZ (0,2,0) -> translate (10,2,0)
        let p = transform.mat_world.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.coords, Vec3::new(10.0, 2.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_parent_composition() {
        let parent = WorldTransform::from_translation(Vec3::new(0.0, 5.0, 0.0));
        let mut child = WorldTransform::new().with_translation(Vec3::new(1.0, 0.0, 0.0));
        child.update_matrix_with_parent(&parent.mat_world);

        assert_relative_eq!(child.world_position(), Vec3::new(1.0, 5.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_transfer_matrix_is_column_major() {
        let transform = WorldTransform::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let constants = transform.transfer_matrix();

        assert_eq!(constants.mat_world[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(constants.as_bytes().len(), 64);
    }
}
