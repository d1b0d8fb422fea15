//! Rendering front end
//!
//! Everything a scene draws goes through a [`CommandList`]. The engine does
//! not rasterize; finished frames are kept for inspection instead.

pub mod commands;
pub mod sprite;
pub mod model;
pub mod debug_text;
pub mod recorder;

pub use commands::{
    BatchKind, CommandList, DrawCommand, Frame, GlyphDraw, ModelDraw, RenderError, SpriteDraw,
};
pub use debug_text::{DebugText, MAX_CHAR_COUNT};
pub use model::{Model, Vertex};
pub use recorder::FrameRecorder;
pub use sprite::Sprite;
