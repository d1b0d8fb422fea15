//! Scene trait and lifecycle management

use crate::assets::AssetError;
use crate::audio::AudioError;
use crate::config::ConfigError;
use crate::engine::{Engine, EngineError};
use crate::render::{CommandList, RenderError};
use crate::scene::HierarchyError;
use thiserror::Error;

/// Scene lifecycle trait
///
/// Implement this trait to build a game scene on the engine. The engine calls
/// `initialize` once, then `update` and `draw` every frame.
pub trait Scene {
    /// Load assets and set up initial state
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Advance one frame of game logic
    ///
    /// Input has already been sampled for the frame.
    fn update(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Record this frame's draw calls
    fn draw(&mut self, engine: &mut Engine, cmd: &mut CommandList) -> Result<(), AppError>;

    /// Release resources; called once after the last frame
    fn cleanup(&mut self, _engine: &mut Engine) {}
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Asset loading error
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Audio playback error
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    /// Draw recording error
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Transform hierarchy error
    #[error("Hierarchy error: {0}")]
    Hierarchy(#[from] HierarchyError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Game logic error
    #[error("Game logic error: {0}")]
    GameLogic(String),
}
