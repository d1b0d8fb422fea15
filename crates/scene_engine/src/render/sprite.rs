//! 2D sprites
//!
//! A sprite is a textured screen-space quad. Its default size is the pixel
//! size of its texture.

use crate::assets::{TextureHandle, TextureManager};
use crate::foundation::math::{Vec2, Vec4};

use super::commands::{CommandList, RenderError, SpriteDraw};

/// Screen-space textured quad
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    texture: TextureHandle,
    position: Vec2,
    size: Vec2,
    anchor: Vec2,
    rotation: f32,
    color: Vec4,
    flip_x: bool,
    flip_y: bool,
    is_invisible: bool,
}

impl Sprite {
    /// Create a sprite sized to its texture
    ///
    /// An unknown texture handle yields a 1x1 sprite.
    pub fn create(textures: &TextureManager, texture: TextureHandle, position: Vec2) -> Self {
        let size = textures
            .info(texture)
            .map_or_else(|| Vec2::new(1.0, 1.0), |info| Vec2::new(info.width as f32, info.height as f32));

        Self {
            texture,
            position,
            size,
            anchor: Vec2::zeros(),
            rotation: 0.0,
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            flip_x: false,
            flip_y: false,
            is_invisible: false,
        }
    }

    /// Builder: set color
    #[must_use]
    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    /// Builder: set anchor
    #[must_use]
    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = anchor;
        self
    }

    /// Current position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Move the anchor point to `position`
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Move by `delta` pixels
    pub fn move_by(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Current size
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Resize in pixels
    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    /// Rotation in radians
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Set rotation in radians
    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }

    /// Set RGBA tint
    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
    }

    /// Set anchor in normalized sprite space
    pub fn set_anchor(&mut self, anchor: Vec2) {
        self.anchor = anchor;
    }

    /// Mirror the sprite
    pub fn set_flip(&mut self, flip_x: bool, flip_y: bool) {
        self.flip_x = flip_x;
        self.flip_y = flip_y;
    }

    /// Hide or show the sprite
    pub fn set_invisible(&mut self, is_invisible: bool) {
        self.is_invisible = is_invisible;
    }

    /// Texture sampled
    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    /// Record the sprite into an open sprite batch; invisible sprites record nothing
    pub fn draw(&self, cmd: &mut CommandList) -> Result<(), RenderError> {
        if self.is_invisible {
            return Ok(());
        }
        cmd.draw_sprite(SpriteDraw {
            texture: self.texture,
            position: self.position,
            size: self.size,
            anchor: self.anchor,
            rotation: self.rotation,
            color: self.color,
            flip_x: self.flip_x,
            flip_y: self.flip_y,
        })
    }
}
