//! Draw command recording
//!
//! A [`CommandList`] is the record of one frame's draw calls. The renderer
//! behind it is a black box; the engine keeps only what would have been
//! submitted, in submission order, which is enough to inspect and test a
//! scene's draw logic.
//!
//! Sprites and debug glyphs must be recorded inside a sprite batch, models
//! inside a model batch:
//!
//! ```rust
//! use scene_engine::render::CommandList;
//!
//! let mut cmd = CommandList::new(0);
//! cmd.begin_sprites()?;
//! cmd.end_sprites()?;
//! cmd.clear_depth()?;
//! let frame = cmd.finish()?;
//! assert_eq!(frame.commands.len(), 3);
//! # Ok::<(), scene_engine::render::RenderError>(())
//! ```

use thiserror::Error;

use crate::assets::TextureHandle;
use crate::foundation::math::{Vec2, Vec4};
use crate::scene::{ViewConstants, WorldConstants};

/// Rendering errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// A draw was recorded outside the batch kind it needs
    #[error("{draw} drawn outside a {batch} batch")]
    OutsideBatch {
        /// What was drawn
        draw: &'static str,
        /// Batch kind required
        batch: BatchKind,
    },

    /// A batch was begun while another was still open
    #[error("Cannot begin a {requested} batch while a {open} batch is open")]
    BatchAlreadyOpen {
        /// Batch still open
        open: BatchKind,
        /// Batch requested
        requested: BatchKind,
    },

    /// A batch was ended that was not open
    #[error("No {0} batch is open")]
    NoOpenBatch(BatchKind),

    /// The frame was finished with a batch still open
    #[error("Frame finished with an open {0} batch")]
    UnclosedBatch(BatchKind),
}

/// Kind of draw batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    /// 2D sprites and debug text
    Sprite,
    /// 3D models
    Model,
}

impl std::fmt::Display for BatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchKind::Sprite => write!(f, "sprite"),
            BatchKind::Model => write!(f, "model"),
        }
    }
}

/// One sprite quad
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDraw {
    /// Texture sampled
    pub texture: TextureHandle,
    /// Screen position of the anchor point, in pixels
    pub position: Vec2,
    /// Size in pixels
    pub size: Vec2,
    /// Anchor in normalized sprite space (`(0,0)` top-left)
    pub anchor: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    /// RGBA tint
    pub color: Vec4,
    /// Mirrored horizontally
    pub flip_x: bool,
    /// Mirrored vertically
    pub flip_y: bool,
}

/// One model draw
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDraw {
    /// Index of the model mesh (models are numbered by creation)
    pub mesh_id: u32,
    /// Texture sampled
    pub texture: TextureHandle,
    /// Index count of the mesh
    pub index_count: u32,
    /// World constants as uploaded
    pub world: WorldConstants,
    /// Camera constants as uploaded
    pub view: ViewConstants,
}

/// One debug text character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphDraw {
    /// Glyph index in the font atlas
    pub glyph: u8,
    /// Top-left position in pixels
    pub position: Vec2,
    /// Size in pixels
    pub size: Vec2,
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Start of a sprite batch
    BeginSprites,
    /// Sprite quad
    Sprite(SpriteDraw),
    /// Debug text glyph
    Glyph(GlyphDraw),
    /// End of a sprite batch
    EndSprites,
    /// Depth buffer cleared
    ClearDepth,
    /// Start of a model batch
    BeginModels,
    /// Model draw
    Model(ModelDraw),
    /// End of a model batch
    EndModels,
}

/// A finished, balanced frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Frame number
    pub number: u64,
    /// Commands in submission order
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    /// Number of sprite quads
    pub fn sprite_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Sprite(_))).count()
    }

    /// Number of model draws
    pub fn model_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Model(_))).count()
    }

    /// Number of debug text glyphs
    pub fn glyph_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Glyph(_))).count()
    }

    /// Model draws in order
    pub fn models(&self) -> impl Iterator<Item = &ModelDraw> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Model(draw) => Some(draw),
            _ => None,
        })
    }

    /// Sprite draws in order
    pub fn sprites(&self) -> impl Iterator<Item = &SpriteDraw> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite(draw) => Some(draw),
            _ => None,
        })
    }
}

/// Per-frame command recorder
#[derive(Debug)]
pub struct CommandList {
    frame: Frame,
    open_batch: Option<BatchKind>,
}

impl CommandList {
    /// Start recording frame `number`
    pub fn new(number: u64) -> Self {
        Self {
            frame: Frame { number, commands: Vec::new() },
            open_batch: None,
        }
    }

    /// Frame number being recorded
    pub fn frame_number(&self) -> u64 {
        self.frame.number
    }

    /// Commands recorded so far
    pub fn commands(&self) -> &[DrawCommand] {
        &self.frame.commands
    }

    fn begin(&mut self, kind: BatchKind, command: DrawCommand) -> Result<(), RenderError> {
        if let Some(open) = self.open_batch {
            return Err(RenderError::BatchAlreadyOpen { open, requested: kind });
        }
        self.open_batch = Some(kind);
        self.frame.commands.push(command);
        Ok(())
    }

    fn end(&mut self, kind: BatchKind, command: DrawCommand) -> Result<(), RenderError> {
        if self.open_batch != Some(kind) {
            return Err(RenderError::NoOpenBatch(kind));
        }
        self.open_batch = None;
        self.frame.commands.push(command);
        Ok(())
    }

    fn record(&mut self, draw: &'static str, batch: BatchKind, command: DrawCommand) -> Result<(), RenderError> {
        if self.open_batch != Some(batch) {
            return Err(RenderError::OutsideBatch { draw, batch });
        }
        self.frame.commands.push(command);
        Ok(())
    }

    /// Open a sprite batch
    pub fn begin_sprites(&mut self) -> Result<(), RenderError> {
        self.begin(BatchKind::Sprite, DrawCommand::BeginSprites)
    }

    /// Close the sprite batch
    pub fn end_sprites(&mut self) -> Result<(), RenderError> {
        self.end(BatchKind::Sprite, DrawCommand::EndSprites)
    }

    /// Open a model batch
    pub fn begin_models(&mut self) -> Result<(), RenderError> {
        self.begin(BatchKind::Model, DrawCommand::BeginModels)
    }

    /// Close the model batch
    pub fn end_models(&mut self) -> Result<(), RenderError> {
        self.end(BatchKind::Model, DrawCommand::EndModels)
    }

    /// Clear the depth buffer; only valid between batches
    pub fn clear_depth(&mut self) -> Result<(), RenderError> {
        if let Some(open) = self.open_batch {
            return Err(RenderError::UnclosedBatch(open));
        }
        self.frame.commands.push(DrawCommand::ClearDepth);
        Ok(())
    }

    /// Record a sprite quad
    pub fn draw_sprite(&mut self, draw: SpriteDraw) -> Result<(), RenderError> {
        self.record("sprite", BatchKind::Sprite, DrawCommand::Sprite(draw))
    }

    /// Record a debug text glyph
    pub fn draw_glyph(&mut self, draw: GlyphDraw) -> Result<(), RenderError> {
        self.record("glyph", BatchKind::Sprite, DrawCommand::Glyph(draw))
    }

    /// Record a model draw
    pub fn draw_model(&mut self, draw: ModelDraw) -> Result<(), RenderError> {
        self.record("model", BatchKind::Model, DrawCommand::Model(draw))
    }

    /// Finish recording; fails if a batch is still open
    pub fn finish(self) -> Result<Frame, RenderError> {
        match self.open_batch {
            Some(open) => Err(RenderError::UnclosedBatch(open)),
            None => Ok(self.frame),
        }
    }
}
