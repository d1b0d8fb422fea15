//! 3D models
//!
//! `Model::create` builds the engine's stock model: a cube of edge length 2
//! centred on the origin, with per-face normals and UVs.

use bytemuck::{Pod, Zeroable};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::assets::TextureHandle;
use crate::scene::{ViewProjection, WorldTransform};

use super::commands::{CommandList, ModelDraw, RenderError};

static NEXT_MESH_ID: AtomicU32 = AtomicU32::new(0);

/// Mesh vertex
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Object-space position
    pub position: [f32; 3],
    /// Face normal
    pub normal: [f32; 3],
    /// Texture coordinate
    pub uv: [f32; 2],
}

/// Triangle mesh with a draw entry point
#[derive(Debug, Clone)]
pub struct Model {
    mesh_id: u32,
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
}

impl Model {
    /// Create the stock cube model
    pub fn create() -> Self {
        // (normal, u axis, v axis) for each face
        let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([0.0, 0.0, -1.0], [1.0, 0.0, 0.0], [0.0, -1.0, 0.0]),
            ([0.0, 0.0, 1.0], [-1.0, 0.0, 0.0], [0.0, -1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, -1.0, 0.0]),
            ([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, -1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, u_axis, v_axis) in faces {
            let base = vertices.len() as u16;
            for (u, v) in [(0.0_f32, 0.0_f32), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
                let (su, sv) = (u * 2.0 - 1.0, v * 2.0 - 1.0);
                let position = [
                    normal[0] + su * u_axis[0] + sv * v_axis[0],
                    normal[1] + su * u_axis[1] + sv * v_axis[1],
                    normal[2] + su * u_axis[2] + sv * v_axis[2],
                ];
                vertices.push(Vertex { position, normal, uv: [u, v] });
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 1, base + 3]);
        }

        let mesh_id = NEXT_MESH_ID.fetch_add(1, Ordering::Relaxed);
        log::debug!("Created cube model {} ({} vertices)", mesh_id, vertices.len());

        Self { mesh_id, vertices, indices }
    }

    /// Mesh id recorded in draws
    pub fn mesh_id(&self) -> u32 {
        self.mesh_id
    }

    /// Vertex data
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Index data
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Record a draw into an open model batch
    ///
    /// The world transform's matrix is used as-is; update it first.
    pub fn draw(
        &self,
        cmd: &mut CommandList,
        world_transform: &WorldTransform,
        view_projection: &ViewProjection,
        texture: TextureHandle,
    ) -> Result<(), RenderError> {
        cmd.draw_model(ModelDraw {
            mesh_id: self.mesh_id,
            texture,
            index_count: self.indices.len() as u32,
            world: world_transform.transfer_matrix(),
            view: view_projection.transfer_matrix(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TextureManager;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_cube_geometry() {
        let model = Model::create();
        assert_eq!(model.vertices().len(), 24);
        assert_eq!(model.indices().len(), 36);

        for vertex in model.vertices() {
            for axis in 0..3 {
                assert!((vertex.position[axis].abs() - 1.0).abs() < 1e-6);
            }
        }
        assert!(model.indices().iter().all(|&i| (i as usize) < 24));
    }

    #[test]
    fn test_draw_uploads_world_matrix() {
        let model = Model::create();
        let textures = TextureManager::new("resources");
        let transform = WorldTransform::from_translation(Vec3::new(0.0, 4.5, 0.0));
        let camera = ViewProjection::new();

        let mut cmd = CommandList::new(0);
        cmd.begin_models().unwrap();
        model.draw(&mut cmd, &transform, &camera, textures.default_texture()).unwrap();
        cmd.end_models().unwrap();

        let frame = cmd.finish().unwrap();
        let draw = frame.models().next().unwrap();
        assert_eq!(draw.index_count, 36);
        assert_eq!(draw.mesh_id, model.mesh_id());
        assert_eq!(draw.world.mat_world[3], [0.0, 4.5, 0.0, 1.0]);
    }

    #[test]
    fn test_draw_outside_batch_fails() {
        let model = Model::create();
        let textures = TextureManager::new("resources");
        let mut cmd = CommandList::new(0);
        assert!(model
            .draw(&mut cmd, &WorldTransform::new(), &ViewProjection::new(), textures.default_texture())
            .is_err());
    }
}
