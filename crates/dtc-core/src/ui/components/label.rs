//! Static text label

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::ui::canvas::{Canvas, text_width};
use crate::ui::components::truncated;
use crate::ui::core::Widget;

/// Maximum label length in characters
pub const LABEL_CAPACITY: usize = 32;

/// Single line of text, optionally centred horizontally in its bounds.
///
/// Labels take part in the tab order but ignore every key.
pub struct Label {
    bounds: Rectangle,
    text: heapless::String<LABEL_CAPACITY>,
    centered: bool,
    focused: bool,
    dirty: bool,
}

impl Label {
    pub fn new(bounds: Rectangle, text: &str) -> Self {
        Self {
            bounds,
            text: truncated(text),
            centered: false,
            focused: false,
            dirty: true,
        }
    }

    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    /// Update the displayed text.
    ///
    /// Marks the label dirty only if the text changed. Text longer than
    /// [`LABEL_CAPACITY`] is cut to fit.
    pub fn set_text(&mut self, text: &str) {
        let new_text = truncated(text);

        if self.text != new_text {
            self.text = new_text;
            self.dirty = true;
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn text_position(&self) -> Point {
        let top_left = self.bounds.top_left;
        if self.centered {
            let slack = self.bounds.size.width as i32 - text_width(&self.text);
            Point::new(top_left.x + slack / 2, top_left.y)
        } else {
            top_left
        }
    }
}

impl Widget for Label {
    fn render<C: Canvas>(&self, canvas: &mut C) {
        canvas.set_text_color(BinaryColor::On);
        canvas.set_cursor(self.text_position());
        canvas.print(&self.text);
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
