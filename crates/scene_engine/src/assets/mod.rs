//! Asset loading
//!
//! Textures are registered by name and measured, sounds are validated and
//! described. Neither is decoded into pixels or samples: the engine only
//! needs handles, sizes and durations.

pub mod texture_manager;
pub mod wave;

pub use texture_manager::{TextureManager, TextureHandle, TextureInfo, DEFAULT_TEXTURE_NAME};
pub use wave::WaveInfo;

use std::path::PathBuf;
use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// File does not exist under the resource directory
    #[error("Asset not found: {}", .0.display())]
    NotFound(PathBuf),

    /// File exists but could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Offending file
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Image header could not be decoded
    #[error("Failed to decode {}: {reason}", path.display())]
    Decode {
        /// Offending file
        path: PathBuf,
        /// Decoder message
        reason: String,
    },

    /// File content does not match the expected container format
    #[error("Invalid format in {}: {reason}", path.display())]
    InvalidFormat {
        /// Offending file
        path: PathBuf,
        /// What was wrong
        reason: String,
    },
}
