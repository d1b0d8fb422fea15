//! Free camera scene
//!
//! A cloud of cubes and a camera driven from the keyboard: W/S dolly the
//! eye, Left/Right pan the target, Space rolls the up vector, Up/Down
//! change the field of view and Z/X move the near clip plane.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{FRAC_PI_2, PI};

use scene_engine::assets::TextureHandle;
use scene_engine::foundation::math::{utils, Vec3};
use scene_engine::input::{InputManager, KeyCode};
use scene_engine::render::{CommandList, Model};
use scene_engine::scene::{ViewProjection, WorldTransform};
use scene_engine::{AppError, Engine, Scene};

use crate::config::CameraSceneConfig;

const MIN_FOV: f32 = 0.01;
const MIN_NEAR_Z: f32 = 0.1;

/// Free camera scene
pub struct CameraScene {
    config: CameraSceneConfig,
    texture: TextureHandle,
    model: Model,
    transforms: Vec<WorldTransform>,
    view_projection: ViewProjection,
    view_angle: f32,
}

impl CameraScene {
    /// Create the scene; cubes are scattered in `initialize`
    pub fn new(config: CameraSceneConfig) -> Self {
        Self {
            config,
            texture: TextureHandle::default(),
            model: Model::create(),
            transforms: Vec::new(),
            view_projection: ViewProjection::new(),
            view_angle: FRAC_PI_2,
        }
    }

    /// Scattered cube transforms
    pub fn transforms(&self) -> &[WorldTransform] {
        &self.transforms
    }

    /// Current camera
    pub fn view_projection(&self) -> &ViewProjection {
        &self.view_projection
    }

    /// Up vector roll angle in radians
    pub fn view_angle(&self) -> f32 {
        self.view_angle
    }

    fn scatter(&mut self) {
        let mut rng = StdRng::seed_from_u64(self.config.scatter_seed);
        let extent = self.config.scatter_extent;

        self.transforms = (0..self.config.scatter_count)
            .map(|_| {
                let rotation = Vec3::new(rng.gen_range(0.0..=PI), rng.gen_range(0.0..=PI), rng.gen_range(0.0..=PI));
                let translation = Vec3::new(
                    rng.gen_range(-extent..=extent),
                    rng.gen_range(-extent..=extent),
                    rng.gen_range(-extent..=extent),
                );
                let mut transform = WorldTransform::new().with_rotation(rotation).with_translation(translation);
                transform.update_matrix();
                transform
            })
            .collect();

        log::debug!(
            "Scattered {} cubes (seed {}, extent {})",
            self.transforms.len(),
            self.config.scatter_seed,
            extent
        );
    }

    fn move_camera(&mut self, input: &InputManager) {
        let camera = &mut self.view_projection;

        if input.push_key(KeyCode::W) {
            camera.eye.z += self.config.eye_speed;
        } else if input.push_key(KeyCode::S) {
            camera.eye.z -= self.config.eye_speed;
        }

        if input.push_key(KeyCode::Left) {
            camera.target.x -= self.config.target_speed;
        } else if input.push_key(KeyCode::Right) {
            camera.target.x += self.config.target_speed;
        }

        if input.push_key(KeyCode::Space) {
            self.view_angle = utils::wrap_angle(self.view_angle + self.config.up_rot_speed);
            camera.up = Vec3::new(self.view_angle.cos(), self.view_angle.sin(), 0.0);
        }

        if input.push_key(KeyCode::Up) {
            camera.fov_angle_y += self.config.fov_speed;
        } else if input.push_key(KeyCode::Down) {
            camera.fov_angle_y -= self.config.fov_speed;
        }
        camera.fov_angle_y = camera.fov_angle_y.clamp(MIN_FOV, PI);

        if input.push_key(KeyCode::Z) {
            camera.near_z += self.config.near_speed;
        } else if input.push_key(KeyCode::X) {
            camera.near_z -= self.config.near_speed;
        }
        camera.near_z = camera.near_z.clamp(MIN_NEAR_Z, (camera.far_z - 1.0).max(MIN_NEAR_Z));

        camera.update_matrix();
    }
}

impl Scene for CameraScene {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        log::info!("Initializing camera scene...");

        self.texture = engine.textures.load(&self.config.texture)?;
        self.scatter();

        let window = &engine.config().window;
        self.view_projection = ViewProjection::with_viewport(window.width, window.height);
        self.view_angle = FRAC_PI_2;
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        self.move_camera(&engine.input);

        let camera = &self.view_projection;
        let text = &mut engine.debug_text;
        text.print_fmt(
            format_args!("eye:({:.2},{:.2},{:.2})", camera.eye.x, camera.eye.y, camera.eye.z),
            50.0,
            50.0,
            1.0,
        );
        text.print_fmt(
            format_args!("target:({:.2},{:.2},{:.2})", camera.target.x, camera.target.y, camera.target.z),
            50.0,
            70.0,
            1.0,
        );
        text.print_fmt(
            format_args!("up:({:.2},{:.2},{:.2})", camera.up.x, camera.up.y, camera.up.z),
            50.0,
            90.0,
            1.0,
        );
        text.print_fmt(
            format_args!("fovAngleY(Degree):{:.2}", utils::rad_to_deg(camera.fov_angle_y)),
            50.0,
            110.0,
            1.0,
        );
        text.print_fmt(format_args!("nearZ:{:.2}", camera.near_z), 50.0, 130.0, 1.0);
        Ok(())
    }

    fn draw(&mut self, engine: &mut Engine, cmd: &mut CommandList) -> Result<(), AppError> {
        cmd.begin_sprites()?;
        cmd.end_sprites()?;
        cmd.clear_depth()?;

        cmd.begin_models()?;
        for transform in &self.transforms {
            self.model.draw(cmd, transform, &self.view_projection, self.texture)?;
        }
        cmd.end_models()?;

        cmd.begin_sprites()?;
        engine.debug_text.draw_all(cmd)?;
        cmd.end_sprites()?;
        Ok(())
    }
}
