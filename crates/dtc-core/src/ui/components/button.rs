//! Push button activated with the OK key

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::input::Key;
use crate::ui::canvas::{Canvas, GLYPH_HEIGHT_PX, text_width};
use crate::ui::components::truncated;
use crate::ui::core::{Action, InputResult, Widget};

/// Inset of the focus fill from the outline, in pixels
const FOCUS_INSET_PX: i32 = 2;

/// Button component with label and action
///
/// Drawn as an outline; when focused the inside is filled and the label is
/// inverted. Pressing OK while focused yields the button's [`Action`].
pub struct Button {
    bounds: Rectangle,
    label: heapless::String<32>,
    action: Action,
    focused: bool,
    dirty: bool,
}

impl Button {
    pub fn new(bounds: Rectangle, label: &str, action: Action) -> Self {
        Self {
            bounds,
            label: truncated(label),
            action,
            focused: false,
            dirty: true,
        }
    }

    pub fn set_label(&mut self, label: &str) {
        let new_label = truncated(label);

        if self.label != new_label {
            self.label = new_label;
            self.dirty = true;
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn action(&self) -> Action {
        self.action
    }
}

impl Widget for Button {
    fn render<C: Canvas>(&self, canvas: &mut C) {
        let Rectangle { top_left, size } = self.bounds;
        let (w, h) = (size.width as i32, size.height as i32);

        canvas.draw_rect(self.bounds, BinaryColor::On);
        if self.focused {
            let inset = Rectangle::new(
                top_left + Point::new(FOCUS_INSET_PX, FOCUS_INSET_PX),
                Size::new(
                    (w - 2 * FOCUS_INSET_PX).max(0) as u32,
                    (h - 2 * FOCUS_INSET_PX).max(0) as u32,
                ),
            );
            canvas.fill_rect(inset, BinaryColor::On);
            canvas.set_text_color(BinaryColor::Off);
        } else {
            canvas.set_text_color(BinaryColor::On);
        }

        let text_x = top_left.x + (w - text_width(&self.label)) / 2;
        let text_y = top_left.y + (h - GLYPH_HEIGHT_PX) / 2;
        canvas.set_cursor(Point::new(text_x, text_y));
        canvas.print(&self.label);
    }

    fn handle_input(&mut self, key: Key) -> InputResult {
        if self.focused && key == Key::Ok {
            InputResult::Action(self.action)
        } else {
            InputResult::NotHandled
        }
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
