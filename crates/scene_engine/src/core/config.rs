//! # Unified Configuration System
//!
//! Configuration for the headless engine: logging and frame budget, window
//! metrics used for the projection aspect ratio, asset lookup, and the audio
//! voice pool.
//!
//! Every section is `#[serde(default)]`, so a file only needs to name the
//! values it overrides:
//!
//! ```toml
//! [engine]
//! max_frames = 600
//!
//! [audio]
//! master_volume = 0.5
//! ```

use serde::{Serialize, Deserialize};

use crate::config::{Config, ConfigError};

/// # Engine Settings
///
/// Core engine behavior: logging and how long the headless loop runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Log level for the engine
    pub log_level: String,
    /// Stop after this many frames (`None` runs until the scene quits)
    pub max_frames: Option<u64>,
    /// Seconds reported per frame by the frame timer
    pub fixed_timestep: f32,
}

impl EngineSettings {
    /// Create engine settings with defaults
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            max_frames: Some(600),
            fixed_timestep: 1.0 / 60.0,
        }
    }

    /// Set log level
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the frame budget
    #[must_use]
    pub fn with_max_frames(mut self, frames: Option<u64>) -> Self {
        self.max_frames = frames;
        self
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width
    pub width: u32,
    /// Window height
    pub height: u32,
}

impl WindowConfig {
    /// Width divided by height
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Game Scene".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// # Asset Configuration
///
/// Where textures and sounds are looked up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Base directory for assets
    pub resource_dir: String,
}

impl AssetConfig {
    /// Set assets directory
    #[must_use]
    pub fn with_resource_dir(mut self, dir: impl Into<String>) -> Self {
        self.resource_dir = dir.into();
        self
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            resource_dir: "resources".to_string(),
        }
    }
}

/// Audio configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Maximum simultaneous voices
    pub max_voices: usize,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            max_voices: 32,
        }
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineSettings,
    /// Window metrics
    pub window: WindowConfig,
    /// Asset system configuration
    pub assets: AssetConfig,
    /// Audio configuration
    pub audio: AudioConfig,
}

impl ApplicationConfig {
    /// Create a new application configuration with defaults and a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            window: WindowConfig {
                title: title.into(),
                ..WindowConfig::default()
            },
            ..Self::default()
        }
    }

    /// Validate the entire configuration
    ///
    /// An out-of-range master volume is clamped with a warning; everything
    /// else that cannot work is rejected.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.window.title.is_empty() {
            return Err(ConfigError::Invalid("window title cannot be empty".to_string()));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if self.audio.max_voices == 0 {
            return Err(ConfigError::Invalid("max_voices must be at least 1".to_string()));
        }
        if !(self.engine.fixed_timestep > 0.0) {
            return Err(ConfigError::Invalid("fixed_timestep must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.audio.master_volume) {
            log::warn!("master_volume {} out of range, clamping", self.audio.master_volume);
            self.audio.master_volume = self.audio.master_volume.clamp(0.0, 1.0);
        }
        Ok(())
    }
}

impl Config for ApplicationConfig {}
