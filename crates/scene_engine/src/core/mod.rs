//! # Core Engine Module
//!
//! Shared configuration types used by every engine subsystem.

pub mod config;

pub use config::{
    ApplicationConfig,
    EngineSettings,
    WindowConfig,
    AssetConfig,
    AudioConfig,
};
