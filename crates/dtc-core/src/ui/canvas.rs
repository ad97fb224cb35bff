//! The drawing surface elements render into.

use embedded_graphics::mono_font::{MonoFont, ascii::FONT_6X9};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Font used for all element text.
///
/// Glyphs are six pixels wide, so centring is `(width - len * 6) / 2`.
pub const TEXT_FONT: &MonoFont<'static> = &FONT_6X9;

/// Horizontal advance of one glyph in pixels
pub const GLYPH_WIDTH_PX: i32 = 6;

/// Height of one glyph cell in pixels
pub const GLYPH_HEIGHT_PX: i32 = 9;

/// Width in pixels of `text` printed in [`TEXT_FONT`].
pub fn text_width(text: &str) -> i32 {
    text.chars().count() as i32 * GLYPH_WIDTH_PX
}

/// Minimal GFX-style drawing surface.
///
/// Text is printed at a cursor that advances past each printed string, in
/// the colour last passed to [`set_text_color`](Canvas::set_text_color),
/// with a transparent background. Drawing outside the surface, or outside
/// the current clip rectangle, is discarded.
pub trait Canvas {
    /// Restrict drawing to `area`; `None` allows the whole surface.
    fn set_clip(&mut self, area: Option<Rectangle>);

    fn set_text_color(&mut self, color: BinaryColor);

    /// Move the text cursor; `at` is the top-left corner of the next glyph.
    fn set_cursor(&mut self, at: Point);

    fn print(&mut self, text: &str);

    /// Stroke a one-pixel outline.
    fn draw_rect(&mut self, area: Rectangle, color: BinaryColor);

    fn fill_rect(&mut self, area: Rectangle, color: BinaryColor);

    fn draw_line(&mut self, from: Point, to: Point, color: BinaryColor);

    /// Blank the whole surface.
    fn clear(&mut self);
}
