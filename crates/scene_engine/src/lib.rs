//! # Scene Engine
//!
//! A small headless scene framework: world transforms with parent-child
//! hierarchies, a look-at camera, sprites, a cube model, debug text, keyboard
//! input and wave playback. Frames are recorded as draw command lists rather
//! than rasterized.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! struct MyScene {
//!     value: u32,
//! }
//!
//! impl Scene for MyScene {
//!     fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         self.value += 1;
//!         engine.debug_text.print_fmt(format_args!("Value:{}", self.value), 50.0, 50.0, 1.0);
//!         Ok(())
//!     }
//!
//!     fn draw(&mut self, engine: &mut Engine, cmd: &mut CommandList) -> Result<(), AppError> {
//!         cmd.begin_sprites()?;
//!         engine.debug_text.draw_all(cmd)?;
//!         cmd.end_sprites()?;
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut engine = Engine::new(ApplicationConfig::new("My Scene"))?;
//!     engine.run(&mut MyScene { value: 0 }, &InputScript::new())?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod core;
pub mod config;

pub mod foundation;
pub mod scene;
pub mod assets;
pub mod render;
pub mod input;
pub mod audio;

mod application;
mod engine;

pub use application::{AppError, Scene};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        AppError, Engine, EngineError, Scene,
        assets::{AssetError, TextureHandle, TextureManager},
        audio::{Audio, AudioError, SoundDataHandle, VoiceHandle},
        config::{Config, ConfigError},
        core::ApplicationConfig,
        foundation::{
            math::{Mat4, Mat4Ext, Vec2, Vec3, Vec4},
            time::Timer,
        },
        input::{InputManager, InputScript, KeyCode},
        render::{CommandList, DebugText, Frame, Model, Sprite},
        scene::{TransformHierarchy, ViewProjection, WorldTransform},
    };
}
