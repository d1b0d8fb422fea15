//! On-screen debug text
//!
//! Text is laid out into fixed-size glyph cells when printed and handed to
//! the command list when the frame draws. Each frame holds at most
//! [`MAX_CHAR_COUNT`] glyphs; the rest are dropped.

use std::fmt;

use crate::foundation::math::Vec2;

use super::commands::{CommandList, GlyphDraw, RenderError};

/// Maximum glyphs per frame
pub const MAX_CHAR_COUNT: usize = 256;

/// Glyph cell width in pixels at scale 1
pub const FONT_WIDTH: f32 = 9.0;

/// Glyph cell height in pixels at scale 1
pub const FONT_HEIGHT: f32 = 18.0;

/// Queued debug text for the current frame
#[derive(Debug, Default)]
pub struct DebugText {
    glyphs: Vec<GlyphDraw>,
    lines: Vec<String>,
    overflowed: bool,
}

impl DebugText {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            glyphs: Vec::with_capacity(MAX_CHAR_COUNT),
            lines: Vec::new(),
            overflowed: false,
        }
    }

    /// Queue `text` with its top-left corner at `(x, y)`
    pub fn print(&mut self, text: &str, x: f32, y: f32, scale: f32) {
        let size = Vec2::new(FONT_WIDTH * scale, FONT_HEIGHT * scale);

        for (i, ch) in text.chars().enumerate() {
            if self.glyphs.len() >= MAX_CHAR_COUNT {
                if !self.overflowed {
                    log::warn!("Debug text exceeds {} characters this frame, dropping the rest", MAX_CHAR_COUNT);
                    self.overflowed = true;
                }
                break;
            }
            self.glyphs.push(GlyphDraw {
                glyph: glyph_index(ch),
                position: Vec2::new(x + size.x * i as f32, y),
                size,
            });
        }
        self.lines.push(text.to_string());
    }

    /// Queue formatted text, e.g. `print_fmt(format_args!("Value:{}", v), 50.0, 50.0, 1.0)`
    pub fn print_fmt(&mut self, args: fmt::Arguments<'_>, x: f32, y: f32, scale: f32) {
        self.print(&args.to_string(), x, y, scale);
    }

    /// Glyphs queued so far
    pub fn queued(&self) -> usize {
        self.glyphs.len()
    }

    /// Strings printed this frame, in order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Drop everything queued without drawing it
    pub fn clear(&mut self) {
        self.glyphs.clear();
        self.lines.clear();
        self.overflowed = false;
    }

    /// Emit all queued glyphs into an open sprite batch and clear the queue
    pub fn draw_all(&mut self, cmd: &mut CommandList) -> Result<(), RenderError> {
        for glyph in self.glyphs.drain(..) {
            cmd.draw_glyph(glyph)?;
        }
        self.lines.clear();
        self.overflowed = false;
        Ok(())
    }
}

/// Font atlas index for a character; anything outside printable ASCII is glyph 0
fn glyph_index(ch: char) -> u8 {
    match ch {
        ' '..='~' => ch as u8,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::commands::DrawCommand;

    fn drawn(text: &mut DebugText) -> Vec<GlyphDraw> {
        let mut cmd = CommandList::new(0);
        cmd.begin_sprites().unwrap();
        text.draw_all(&mut cmd).unwrap();
        cmd.end_sprites().unwrap();
        cmd.finish()
            .unwrap()
            .commands
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::Glyph(g) => Some(g),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_layout_advances_by_scaled_cell() {
        let mut text = DebugText::new();
        text.print("Value:1", 50.0, 50.0, 2.0);

        let glyphs = drawn(&mut text);
        assert_eq!(glyphs.len(), 7);
        assert_eq!(glyphs[0].glyph, b'V');
        assert_eq!(glyphs[0].position, Vec2::new(50.0, 50.0));
        assert_eq!(glyphs[1].position, Vec2::new(68.0, 50.0));
        assert_eq!(glyphs[6].size, Vec2::new(18.0, 36.0));
    }

    #[test]
    fn test_capacity_is_capped_per_frame() {
        let mut text = DebugText::new();
        text.print(&"x".repeat(200), 0.0, 0.0, 1.0);
        text.print(&"y".repeat(200), 0.0, 20.0, 1.0);
        assert_eq!(text.queued(), MAX_CHAR_COUNT);

        assert_eq!(drawn(&mut text).len(), MAX_CHAR_COUNT);
        assert_eq!(text.queued(), 0);

        text.print("ok", 0.0, 0.0, 1.0);
        assert_eq!(text.queued(), 2);
    }

    #[test]
    fn test_non_ascii_maps_to_glyph_zero() {
        let mut text = DebugText::new();
        text.print("a\u{e9}\n", 0.0, 0.0, 1.0);
        let glyphs: Vec<u8> = drawn(&mut text).iter().map(|g| g.glyph).collect();
        assert_eq!(glyphs, vec![b'a', 0, 0]);
    }

    #[test]
    fn test_print_fmt_and_lines() {
        let mut text = DebugText::new();
        text.print_fmt(format_args!("Value:{}", 42), 50.0, 50.0, 1.0);
        assert_eq!(text.lines(), ["Value:42".to_string()]);
    }
}
