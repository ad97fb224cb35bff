//! RAM framebuffer with per-pixel change detection.
//!
//! All element drawing targets this buffer instead of the I2C display.
//! After drawing completes, only the rectangular region containing changed
//! pixels is flushed to the panel in a single transfer.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use log::debug;

use crate::ui::canvas::{Canvas, TEXT_FONT};
use crate::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

/// Total number of pixels in the framebuffer (128 x 64 = 8,192).
const PIXEL_COUNT: usize = DISPLAY_WIDTH_PX as usize * DISPLAY_HEIGHT_PX as usize;

/// Bounding box of pixels that have changed since the last flush.
#[derive(Debug, Clone, Copy)]
struct DirtyRect {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl DirtyRect {
    /// Expand the dirty region to include the given pixel coordinate.
    fn expand(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn from_point(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn to_rectangle(self) -> Rectangle {
        Rectangle::new(
            Point::new(self.min_x as i32, self.min_y as i32),
            Size::new(
                (self.max_x - self.min_x + 1) as u32,
                (self.max_y - self.min_y + 1) as u32,
            ),
        )
    }
}

/// Monochrome framebuffer implementing `DrawTarget<Color = BinaryColor>` and [`Canvas`].
///
/// Tracks a dirty bounding box so that only changed pixels are flushed to the
/// panel. Also carries the GFX-style text cursor and text colour used by
/// [`Canvas::print`].
pub struct FrameBuffer {
    pixels: Vec<BinaryColor>,
    dirty: Option<DirtyRect>,
    cursor: Point,
    text_color: BinaryColor,
    clip: Option<Rectangle>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Allocate a new framebuffer with every pixel off.
    pub fn new() -> Self {
        Self {
            pixels: vec![BinaryColor::Off; PIXEL_COUNT],
            dirty: None,
            cursor: Point::zero(),
            text_color: BinaryColor::On,
            clip: None,
        }
    }

    /// Write a single pixel, expanding the dirty rect only if the color changed.
    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: BinaryColor) {
        let idx = y * DISPLAY_WIDTH_PX as usize + x;
        if self.pixels[idx] != color {
            self.pixels[idx] = color;
            match &mut self.dirty {
                Some(rect) => rect.expand(x, y),
                None => self.dirty = Some(DirtyRect::from_point(x, y)),
            }
        }
    }

    /// Read back a pixel; `None` outside the buffer.
    pub fn pixel(&self, at: Point) -> Option<BinaryColor> {
        let w = DISPLAY_WIDTH_PX as i32;
        let h = DISPLAY_HEIGHT_PX as i32;
        if at.x < 0 || at.y < 0 || at.x >= w || at.y >= h {
            return None;
        }
        Some(self.pixels[at.y as usize * w as usize + at.x as usize])
    }

    /// Region changed since the last flush.
    pub fn dirty_area(&self) -> Option<Rectangle> {
        self.dirty.map(DirtyRect::to_rectangle)
    }

    /// Force the next flush to resend the whole buffer.
    pub fn mark_all_dirty(&mut self) {
        self.dirty = Some(DirtyRect {
            min_x: 0,
            min_y: 0,
            max_x: DISPLAY_WIDTH_PX as usize - 1,
            max_y: DISPLAY_HEIGHT_PX as usize - 1,
        });
    }

    /// Current text cursor position.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Current clip rectangle, `None` when drawing is unrestricted.
    pub fn clip(&self) -> Option<Rectangle> {
        self.clip
    }

    /// Flush the dirty region to a display, then reset the dirty state.
    ///
    /// Only the bounding rectangle of changed pixels is sent via
    /// `fill_contiguous`. Returns `Ok(false)` without touching the display
    /// when nothing changed.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<bool, D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let Some(rect) = self.dirty.take() else {
            return Ok(false);
        };

        let width = rect.max_x - rect.min_x + 1;
        let area = rect.to_rectangle();

        debug!(
            "Flushing {}x{} dirty region at ({}, {})",
            area.size.width, area.size.height, rect.min_x, rect.min_y
        );

        // Borrow the pixel slice so the closure captures a shared reference,
        // avoiding the `FnMut` escaping-reference issue with `&mut self`.
        let pixels = &self.pixels;
        let stride = DISPLAY_WIDTH_PX as usize;
        let pixel_iter = (rect.min_y..=rect.max_y).flat_map(move |y| {
            let row_start = y * stride + rect.min_x;
            pixels[row_start..row_start + width].iter().copied()
        });

        display.fill_contiguous(&area, pixel_iter)?;
        Ok(true)
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH_PX as u32, DISPLAY_HEIGHT_PX as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let w = DISPLAY_WIDTH_PX as usize;
        let h = DISPLAY_HEIGHT_PX as usize;

        for Pixel(coord, color) in pixels {
            if self.clip.is_some_and(|clip| !clip.contains(coord)) {
                continue;
            }
            let x = coord.x;
            let y = coord.y;
            if x >= 0 && y >= 0 && (x as usize) < w && (y as usize) < h {
                self.set_pixel(x as usize, y as usize, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let w = DISPLAY_WIDTH_PX as i32;
        let h = DISPLAY_HEIGHT_PX as i32;
        let area = match self.clip {
            Some(clip) => area.intersection(&clip),
            None => *area,
        };

        // Areas may start off-screen, so clamp in signed space first
        let x_start = area.top_left.x.clamp(0, w) as usize;
        let y_start = area.top_left.y.clamp(0, h) as usize;
        let x_end = area
            .top_left
            .x
            .saturating_add(area.size.width as i32)
            .clamp(0, w) as usize;
        let y_end = area
            .top_left
            .y
            .saturating_add(area.size.height as i32)
            .clamp(0, h) as usize;

        for y in y_start..y_end {
            for x in x_start..x_end {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let w = DISPLAY_WIDTH_PX as usize;
        let h = DISPLAY_HEIGHT_PX as usize;

        for y in 0..h {
            for x in 0..w {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }
}

impl Canvas for FrameBuffer {
    fn set_clip(&mut self, area: Option<Rectangle>) {
        self.clip = area;
    }

    fn set_text_color(&mut self, color: BinaryColor) {
        self.text_color = color;
    }

    fn set_cursor(&mut self, at: Point) {
        self.cursor = at;
    }

    fn print(&mut self, text: &str) {
        let style = MonoTextStyle::new(TEXT_FONT, self.text_color);
        let Ok(next) = Text::with_baseline(text, self.cursor, style, Baseline::Top).draw(self);
        self.cursor = next;
    }

    fn draw_rect(&mut self, area: Rectangle, color: BinaryColor) {
        area.into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(self)
            .ok();
    }

    fn fill_rect(&mut self, area: Rectangle, color: BinaryColor) {
        self.fill_solid(&area, color).ok();
    }

    fn draw_line(&mut self, from: Point, to: Point, color: BinaryColor) {
        Line::new(from, to)
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(self)
            .ok();
    }

    fn clear(&mut self) {
        DrawTarget::clear(self, BinaryColor::Off).ok();
        self.cursor = Point::zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestPanel;

    #[test]
    fn test_new_buffer_is_clean() {
        let fb = FrameBuffer::new();
        assert!(fb.dirty_area().is_none());
        assert_eq!(fb.pixel(Point::new(0, 0)), Some(BinaryColor::Off));
        assert_eq!(fb.pixel(Point::new(128, 0)), None);
    }

    #[test]
    fn test_dirty_area_covers_changed_pixels() {
        let mut fb = FrameBuffer::new();
        fb.fill_rect(
            Rectangle::new(Point::new(10, 5), Size::new(4, 3)),
            BinaryColor::On,
        );
        assert_eq!(
            fb.dirty_area(),
            Some(Rectangle::new(Point::new(10, 5), Size::new(4, 3)))
        );
    }

    #[test]
    fn test_redrawing_same_pixels_stays_clean() {
        let mut fb = FrameBuffer::new();
        fb.fill_rect(
            Rectangle::new(Point::new(0, 0), Size::new(8, 8)),
            BinaryColor::Off,
        );
        assert!(fb.dirty_area().is_none());
    }

    #[test]
    fn test_flush_sends_only_dirty_region() {
        let mut fb = FrameBuffer::new();
        let mut panel = TestPanel::new();
        fb.draw_line(Point::new(3, 7), Point::new(6, 7), BinaryColor::On);

        assert!(fb.flush(&mut panel).unwrap());
        assert_eq!(
            panel.last_fill,
            Some(Rectangle::new(Point::new(3, 7), Size::new(4, 1)))
        );
        assert_eq!(panel.pixel(Point::new(5, 7)), BinaryColor::On);

        // Second flush has nothing to send
        assert!(!fb.flush(&mut panel).unwrap());
        assert_eq!(panel.fills, 1);
    }

    #[test]
    fn test_print_advances_cursor_by_glyph_width() {
        let mut fb = FrameBuffer::new();
        fb.set_cursor(Point::new(2, 1));
        fb.print("abc");
        assert_eq!(fb.cursor(), Point::new(2 + 18, 1));
        assert!(fb.dirty_area().is_some());
    }

    #[test]
    fn test_clip_discards_pixels_outside_area() {
        let mut fb = FrameBuffer::new();
        let clip = Rectangle::new(Point::new(10, 10), Size::new(12, 10));
        fb.set_clip(Some(clip));
        fb.set_cursor(Point::new(10, 10));
        fb.print("Status: Charging");
        fb.fill_rect(Rectangle::new(Point::new(0, 0), Size::new(128, 64)), BinaryColor::On);
        fb.draw_line(Point::new(0, 15), Point::new(127, 15), BinaryColor::On);

        assert_eq!(fb.dirty_area(), Some(clip));
        assert_eq!(fb.pixel(Point::new(9, 15)), Some(BinaryColor::Off));
        assert_eq!(fb.pixel(Point::new(22, 15)), Some(BinaryColor::Off));

        fb.set_clip(None);
        fb.draw_line(Point::new(0, 40), Point::new(3, 40), BinaryColor::On);
        assert_eq!(fb.pixel(Point::new(0, 40)), Some(BinaryColor::On));
    }

    #[test]
    fn test_clear_ignores_clip() {
        let mut fb = FrameBuffer::new();
        fb.fill_rect(Rectangle::new(Point::new(0, 0), Size::new(4, 4)), BinaryColor::On);
        fb.set_clip(Some(Rectangle::new(Point::new(100, 50), Size::new(4, 4))));
        Canvas::clear(&mut fb);
        assert_eq!(fb.pixel(Point::new(0, 0)), Some(BinaryColor::Off));
    }

    #[test]
    fn test_fill_clips_offscreen_area() {
        let mut fb = FrameBuffer::new();
        fb.fill_rect(
            Rectangle::new(Point::new(-4, 60), Size::new(8, 10)),
            BinaryColor::On,
        );
        assert_eq!(fb.pixel(Point::new(0, 63)), Some(BinaryColor::On));
        assert_eq!(fb.pixel(Point::new(4, 63)), Some(BinaryColor::Off));
    }
}
