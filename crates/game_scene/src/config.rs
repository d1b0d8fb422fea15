//! Scene tuning configuration
//!
//! Every constant the three scenes use lives here so a TOML or RON file can
//! override any subset of them. Missing fields keep their defaults.

use scene_engine::config::{Config, ConfigError};
use serde::{Deserialize, Serialize};

/// Configuration for all scenes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Sprite movement scene
    pub sprite: SpriteSceneConfig,

    /// Free camera scene
    pub camera: CameraSceneConfig,

    /// Parent-child rig scene
    pub rig: RigSceneConfig,
}

/// Sprite movement scene settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSceneConfig {
    /// Texture for the sprite and the cube
    pub texture: String,

    /// Looping background sound
    pub sound: String,

    /// Background sound volume (0.0 - 1.0)
    pub sound_volume: f32,

    /// Sprite start position in pixels
    pub start_position: [f32; 2],

    /// Sprite movement per frame in pixels
    pub velocity: [f32; 2],
}

/// Free camera scene settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSceneConfig {
    /// Texture for the scattered cubes
    pub texture: String,

    /// Number of cubes scattered around the origin
    pub scatter_count: usize,

    /// Seed for the scatter generator
    pub scatter_seed: u64,

    /// Cubes are placed in `[-extent, extent]` on every axis
    pub scatter_extent: f32,

    /// Eye z movement per frame
    pub eye_speed: f32,

    /// Target x movement per frame
    pub target_speed: f32,

    /// Up vector rotation per frame in radians
    pub up_rot_speed: f32,

    /// Field of view change per frame in radians
    pub fov_speed: f32,

    /// Near clip change per frame
    pub near_speed: f32,
}

/// Parent-child rig scene settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigSceneConfig {
    /// Texture for the body parts
    pub texture: String,

    /// Distance between neighbouring joints
    pub unit: f32,

    /// Root movement per frame
    pub character_speed: f32,

    /// Chest yaw change per frame in radians
    pub chest_rot_speed: f32,

    /// Hip yaw change per frame in radians
    pub hip_rot_speed: f32,
}

impl Default for SpriteSceneConfig {
    fn default() -> Self {
        Self {
            texture: "mario.png".to_string(),
            sound: "se_sad03.wav".to_string(),
            sound_volume: 0.1,
            start_position: [100.0, 50.0],
            velocity: [2.0, 1.0],
        }
    }
}

impl Default for CameraSceneConfig {
    fn default() -> Self {
        Self {
            texture: "mario.png".to_string(),
            scatter_count: 100,
            scatter_seed: 2024,
            scatter_extent: 10.0,
            eye_speed: 0.2,
            target_speed: 0.2,
            up_rot_speed: 0.05,
            fov_speed: 0.01,
            near_speed: 0.1,
        }
    }
}

impl Default for RigSceneConfig {
    fn default() -> Self {
        Self {
            texture: "mario.png".to_string(),
            unit: 4.5,
            character_speed: 0.2,
            chest_rot_speed: 0.05,
            hip_rot_speed: 0.05,
        }
    }
}

impl SceneConfig {
    /// Reject values no scene can work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.sprite.sound_volume) {
            return Err(ConfigError::Invalid(format!(
                "sprite.sound_volume must be within [0, 1], got {}",
                self.sprite.sound_volume
            )));
        }
        if !(self.camera.scatter_extent >= 0.0) {
            return Err(ConfigError::Invalid("camera.scatter_extent must not be negative".to_string()));
        }
        if !(self.rig.unit > 0.0) {
            return Err(ConfigError::Invalid(format!("rig.unit must be positive, got {}", self.rig.unit)));
        }

        let speeds = [
            ("camera.eye_speed", self.camera.eye_speed),
            ("camera.target_speed", self.camera.target_speed),
            ("camera.up_rot_speed", self.camera.up_rot_speed),
            ("camera.fov_speed", self.camera.fov_speed),
            ("camera.near_speed", self.camera.near_speed),
            ("rig.character_speed", self.rig.character_speed),
            ("rig.chest_rot_speed", self.rig.chest_rot_speed),
            ("rig.hip_rot_speed", self.rig.hip_rot_speed),
        ];
        if let Some((name, value)) = speeds.iter().find(|(_, value)| !value.is_finite() || *value < 0.0) {
            return Err(ConfigError::Invalid(format!("{} must be a non-negative number, got {}", name, value)));
        }
        Ok(())
    }
}

impl Config for SceneConfig {}
