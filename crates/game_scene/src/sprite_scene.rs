//! Sprite movement scene
//!
//! A sprite drifts diagonally across the screen over a cube, with a looping
//! background sound that Space stops and a frame counter in the corner.

use scene_engine::assets::TextureHandle;
use scene_engine::audio::VoiceHandle;
use scene_engine::foundation::math::Vec2;
use scene_engine::input::KeyCode;
use scene_engine::render::{CommandList, Model, Sprite};
use scene_engine::scene::{ViewProjection, WorldTransform};
use scene_engine::{AppError, Engine, Scene};

use crate::config::SpriteSceneConfig;

/// Sprite movement scene
pub struct SpriteScene {
    config: SpriteSceneConfig,
    texture: TextureHandle,
    sprite: Option<Sprite>,
    model: Model,
    world_transform: WorldTransform,
    view_projection: ViewProjection,
    voice: Option<VoiceHandle>,
    value: u32,
}

impl SpriteScene {
    /// Create the scene; assets are loaded in `initialize`
    pub fn new(config: SpriteSceneConfig) -> Self {
        Self {
            config,
            texture: TextureHandle::default(),
            sprite: None,
            model: Model::create(),
            world_transform: WorldTransform::new(),
            view_projection: ViewProjection::new(),
            voice: None,
            value: 0,
        }
    }

    /// Frames updated so far
    pub fn value(&self) -> u32 {
        self.value
    }

    /// The moving sprite, once initialized
    pub fn sprite(&self) -> Option<&Sprite> {
        self.sprite.as_ref()
    }

    /// Background sound voice while it is playing
    pub fn voice(&self) -> Option<VoiceHandle> {
        self.voice
    }

    /// Cube transform
    pub fn world_transform(&self) -> &WorldTransform {
        &self.world_transform
    }
}

impl Scene for SpriteScene {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        log::info!("Initializing sprite scene...");

        self.texture = engine.textures.load(&self.config.texture)?;
        let [x, y] = self.config.start_position;
        self.sprite = Some(Sprite::create(&engine.textures, self.texture, Vec2::new(x, y)));

        self.world_transform.update_matrix();
        let window = &engine.config().window;
        self.view_projection = ViewProjection::with_viewport(window.width, window.height);

        let sound = engine.audio.load_wave(&self.config.sound)?;
        self.voice = Some(engine.audio.play_wave(sound, true, self.config.sound_volume)?);

        Ok(())
    }

    fn update(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        if let Some(sprite) = self.sprite.as_mut() {
            let [dx, dy] = self.config.velocity;
            sprite.move_by(Vec2::new(dx, dy));
        }

        if engine.input.trigger_key(KeyCode::Space) {
            if let Some(voice) = self.voice.take() {
                if engine.audio.is_playing(voice) {
                    engine.audio.stop_wave(voice)?;
                    log::info!("Background sound stopped");
                }
            }
        }

        self.value += 1;
        engine.debug_text.print_fmt(format_args!("Value:{}", self.value), 50.0, 50.0, 1.0);
        Ok(())
    }

    fn draw(&mut self, engine: &mut Engine, cmd: &mut CommandList) -> Result<(), AppError> {
        // Background sprites
        cmd.begin_sprites()?;
        cmd.end_sprites()?;
        cmd.clear_depth()?;

        cmd.begin_models()?;
        self.model.draw(cmd, &self.world_transform, &self.view_projection, self.texture)?;
        cmd.end_models()?;

        // Foreground sprites
        cmd.begin_sprites()?;
        if let Some(sprite) = &self.sprite {
            sprite.draw(cmd)?;
        }
        engine.debug_text.draw_all(cmd)?;
        cmd.end_sprites()?;
        Ok(())
    }
}
