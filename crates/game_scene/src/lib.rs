//! # Game Scene
//!
//! Three versions of a tutorial scene built on `scene_engine`:
//!
//! - [`SpriteScene`]: a moving sprite over a cube, a looping sound and a frame counter
//! - [`CameraScene`]: a cloud of cubes viewed through a keyboard-driven camera
//! - [`RigScene`]: a nine-part character rig moved and twisted joint by joint

#![warn(missing_docs)]

pub mod config;
pub mod rig;
pub mod sprite_scene;
pub mod camera_scene;
pub mod rig_scene;

pub use camera_scene::CameraScene;
pub use config::SceneConfig;
pub use rig::{BodyPart, Rig};
pub use rig_scene::RigScene;
pub use sprite_scene::SpriteScene;
