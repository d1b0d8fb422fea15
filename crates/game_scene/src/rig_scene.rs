//! Parent-child rig scene
//!
//! Left/Right walk the character, U/I twist the chest and J/K twist the hip.
//! Every part follows its parent.

use scene_engine::assets::TextureHandle;
use scene_engine::input::{InputManager, KeyCode};
use scene_engine::render::{CommandList, Model};
use scene_engine::scene::ViewProjection;
use scene_engine::{AppError, Engine, Scene};

use crate::config::RigSceneConfig;
use crate::rig::{BodyPart, Rig};

/// Parent-child rig scene
pub struct RigScene {
    config: RigSceneConfig,
    texture: TextureHandle,
    model: Model,
    rig: Rig,
    view_projection: ViewProjection,
}

impl RigScene {
    /// Create the scene with the rig at rest pose
    pub fn new(config: RigSceneConfig) -> Result<Self, AppError> {
        let rig = Rig::new(config.unit)?;
        Ok(Self {
            config,
            texture: TextureHandle::default(),
            model: Model::create(),
            rig,
            view_projection: ViewProjection::new(),
        })
    }

    /// The character rig
    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    fn pose(&mut self, input: &InputManager) {
        let root = self.rig.part_mut(BodyPart::Root);
        if input.push_key(KeyCode::Left) {
            root.translation.x -= self.config.character_speed;
        } else if input.push_key(KeyCode::Right) {
            root.translation.x += self.config.character_speed;
        }

        let chest = self.rig.part_mut(BodyPart::Chest);
        if input.push_key(KeyCode::U) {
            chest.rotation.y -= self.config.chest_rot_speed;
        } else if input.push_key(KeyCode::I) {
            chest.rotation.y += self.config.chest_rot_speed;
        }

        let hip = self.rig.part_mut(BodyPart::Hip);
        if input.push_key(KeyCode::J) {
            hip.rotation.y -= self.config.hip_rot_speed;
        } else if input.push_key(KeyCode::K) {
            hip.rotation.y += self.config.hip_rot_speed;
        }

        self.rig.update_matrices();
    }
}

impl Scene for RigScene {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        log::info!("Initializing rig scene...");

        self.texture = engine.textures.load(&self.config.texture)?;
        let window = &engine.config().window;
        self.view_projection = ViewProjection::with_viewport(window.width, window.height);
        self.rig.update_matrices();
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        self.pose(&engine.input);

        let root = self.rig.part(BodyPart::Root).translation;
        engine.debug_text.print_fmt(
            format_args!("Root:({:.2},{:.2},{:.2})", root.x, root.y, root.z),
            50.0,
            50.0,
            1.0,
        );
        Ok(())
    }

    fn draw(&mut self, engine: &mut Engine, cmd: &mut CommandList) -> Result<(), AppError> {
        cmd.begin_sprites()?;
        cmd.end_sprites()?;
        cmd.clear_depth()?;

        cmd.begin_models()?;
        for part in BodyPart::ALL.into_iter().filter(|part| part.is_drawn()) {
            self.model.draw(cmd, self.rig.part(part), &self.view_projection, self.texture)?;
        }
        cmd.end_models()?;

        cmd.begin_sprites()?;
        engine.debug_text.draw_all(cmd)?;
        cmd.end_sprites()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use scene_engine::foundation::math::Vec3;

    fn held(keys: &[KeyCode]) -> InputManager {
        let mut input = InputManager::new();
        for key in keys {
            input.handle_key_input(*key, true);
        }
        input
    }

    #[test]
    fn test_walking_moves_every_part_equally() {
        let mut scene = RigScene::new(RigSceneConfig::default()).unwrap();
        let before: Vec<Vec3> = BodyPart::ALL.iter().map(|p| scene.rig().world_position(*p)).collect();

        for _ in 0..10 {
            scene.pose(&held(&[KeyCode::Right]));
        }

        for (part, start) in BodyPart::ALL.iter().zip(before) {
            assert_relative_eq!(
                scene.rig().world_position(*part) - start,
                Vec3::new(2.0, 0.0, 0.0),
                epsilon = 1e-4
            );
        }
    }

    #[test]
    fn test_hip_twist_leaves_upper_body() {
        let mut scene = RigScene::new(RigSceneConfig::default()).unwrap();
        let head = scene.rig().world_position(BodyPart::Head);
        let arm = scene.rig().world_position(BodyPart::ArmL);
        let leg = scene.rig().world_position(BodyPart::LegL);

        for _ in 0..20 {
            scene.pose(&held(&[KeyCode::K]));
        }

        assert_relative_eq!(scene.rig().part(BodyPart::Hip).rotation.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(scene.rig().world_position(BodyPart::Head), head, epsilon = 1e-5);
        assert_relative_eq!(scene.rig().world_position(BodyPart::ArmL), arm, epsilon = 1e-5);
        assert!((scene.rig().world_position(BodyPart::LegL) - leg).norm() > 1.0);
    }

    #[test]
    fn test_opposite_keys_prefer_first() {
        let mut scene = RigScene::new(RigSceneConfig::default()).unwrap();
        scene.pose(&held(&[KeyCode::U, KeyCode::I]));
        assert_relative_eq!(scene.rig().part(BodyPart::Chest).rotation.y, -0.05);
    }
}
