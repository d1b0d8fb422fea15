//! # View projection
//!
//! Eye/target/up camera with a left-handed perspective projection.
//!
//! Fields are edited directly by scenes; call [`ViewProjection::update_matrix`]
//! afterwards to refresh the cached matrices.

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::{utils, Mat4, Mat4Ext, Point3, Vec3};

/// Constant-buffer image of the camera
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ViewConstants {
    /// View matrix columns
    pub view: [[f32; 4]; 4],
    /// Projection matrix columns
    pub projection: [[f32; 4]; 4],
    /// Eye position (w unused)
    pub camera_pos: [f32; 4],
}

/// Camera state and its view/projection matrices
#[derive(Debug, Clone, PartialEq)]
pub struct ViewProjection {
    /// Eye position in world space
    pub eye: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Up direction
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov_angle_y: f32,
    /// Width / height
    pub aspect_ratio: f32,
    /// Near clip distance
    pub near_z: f32,
    /// Far clip distance
    pub far_z: f32,
    /// View matrix from the last update
    pub mat_view: Mat4,
    /// Projection matrix from the last update
    pub mat_projection: Mat4,
}

impl Default for ViewProjection {
    fn default() -> Self {
        let mut view_projection = Self {
            eye: Vec3::new(0.0, 0.0, -50.0),
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov_angle_y: utils::deg_to_rad(45.0),
            aspect_ratio: 16.0 / 9.0,
            near_z: 0.1,
            far_z: 1000.0,
            mat_view: Mat4::identity(),
            mat_projection: Mat4::identity(),
        };
        view_projection.update_matrix();
        view_projection
    }
}

impl ViewProjection {
    /// Camera with default placement and up-to-date matrices
    pub fn new() -> Self {
        Self::default()
    }

    /// Camera whose aspect ratio matches a viewport
    pub fn with_viewport(width: u32, height: u32) -> Self {
        let mut view_projection = Self::default();
        if height > 0 {
            view_projection.aspect_ratio = width as f32 / height as f32;
        }
        view_projection.update_matrix();
        view_projection
    }

    /// Whether eye, target and up fail to define a view
    ///
    /// True when the eye sits on the target or up is parallel to the
    /// viewing direction.
    pub fn is_degenerate(&self) -> bool {
        let forward = self.target - self.eye;
        forward.norm_squared() <= f32::EPSILON
            || self.up.cross(&forward.normalize()).norm_squared() <= f32::EPSILON
    }

    /// Recompute view and projection matrices
    ///
    /// A degenerate camera keeps its previous view matrix.
    pub fn update_matrix(&mut self) {
        if self.is_degenerate() {
            log::warn!(
                "Degenerate camera (eye {:?}, target {:?}, up {:?}); keeping previous view",
                self.eye, self.target, self.up
            );
        } else {
            self.mat_view =
                Mat4::look_at_lh(&Point3::from(self.eye), &Point3::from(self.target), &self.up);
        }
        self.mat_projection =
            Mat4::perspective_fov_lh(self.fov_angle_y, self.aspect_ratio, self.near_z, self.far_z);
        log::trace!(
            "View projection updated - eye: {:?}, target: {:?}, up: {:?}",
            self.eye, self.target, self.up
        );
    }

    /// `projection · view`
    pub fn view_projection(&self) -> Mat4 {
        self.mat_projection * self.mat_view
    }

    /// Constant-buffer contents for the current matrices
    pub fn transfer_matrix(&self) -> ViewConstants {
        ViewConstants {
            view: self.mat_view.into(),
            projection: self.mat_projection.into(),
            camera_pos: [self.eye.x, self.eye.y, self.eye.z, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec4;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let camera = ViewProjection::new();
        assert_eq!(camera.eye, Vec3::new(0.0, 0.0, -50.0));
        assert_relative_eq!(camera.fov_angle_y, 45.0_f32.to_radians(), epsilon = 1e-6);
        assert_relative_eq!(camera.far_z, 1000.0);
    }

    #[test]
    fn test_origin_projects_to_screen_center() {
        let camera = ViewProjection::with_viewport(1280, 720);
        let clip = camera.view_projection() * Vec4::new(0.0, 0.0, 0.0, 1.0);

        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-6);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-6);
        let depth = clip.z / clip.w;
        assert!(depth > 0.0 && depth < 1.0);
    }

    #[test]
    fn test_update_matrix_follows_eye() {
        let mut camera = ViewProjection::new();
        let before = camera.mat_view;
        camera.eye.z += 0.2;
        assert_eq!(camera.mat_view, before);

        camera.update_matrix();
        assert_ne!(camera.mat_view, before);
        assert_relative_eq!(camera.transfer_matrix().camera_pos[2], -49.8, epsilon = 1e-5);
    }

    #[test]
    fn test_eye_on_target_keeps_previous_view() {
        let mut camera = ViewProjection::new();
        camera.eye.z = -0.2;
        camera.update_matrix();
        let before = camera.mat_view;

        camera.eye.z = 0.0;
        assert!(camera.is_degenerate());
        camera.update_matrix();
        assert_eq!(camera.mat_view, before);
        assert!(camera.mat_view.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_up_along_view_direction_keeps_previous_view() {
        let mut camera = ViewProjection::new();
        let before = camera.mat_view;

        camera.up = Vec3::new(0.0, 0.0, 1.0);
        assert!(camera.is_degenerate());
        camera.update_matrix();
        assert_eq!(camera.mat_view, before);

        camera.up = Vec3::new(1.0, 0.0, 0.0);
        assert!(!camera.is_degenerate());
        camera.update_matrix();
        assert_ne!(camera.mat_view, before);
        assert!(camera.mat_view.iter().all(|v| v.is_finite()));
    }
}
