//! A screen's worth of elements with a single focus cursor.
//!
//! Elements are kept in insertion order, which is also the tab order and the
//! render order. Exactly one element of a non-empty view is focused: the
//! first one added, until the cursor is moved with [`View::navigate`].
//!
//! Navigation keys are intercepted by the view before the focused element
//! sees them, so elements never receive `Up`/`Down`.

use alloc::vec::Vec;
use embassy_time::Instant;
use embedded_graphics::pixelcolor::BinaryColor;
use log::debug;

use crate::input::Key;
use crate::ui::canvas::Canvas;
use crate::ui::core::{Direction, InputResult, Widget};
use crate::ui::elements::Element;

#[derive(Default)]
pub struct View {
    elements: Vec<Element>,
    focused: usize,
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element and return its index.
    ///
    /// The first element added receives focus.
    pub fn add_element(&mut self, element: impl Into<Element>) -> usize {
        let mut element = element.into();
        if self.elements.is_empty() {
            element.set_focus(true);
            self.focused = 0;
        }
        self.elements.push(element);
        self.elements.len() - 1
    }

    /// Builder form of [`add_element`](View::add_element).
    pub fn with_element(mut self, element: impl Into<Element>) -> Self {
        self.add_element(element);
        self
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn element_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.elements.get_mut(index)
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Index of the focused element, `None` for an empty view.
    pub fn focused_index(&self) -> Option<usize> {
        (!self.elements.is_empty()).then_some(self.focused)
    }

    pub fn focused(&self) -> Option<&Element> {
        self.elements.get(self.focused)
    }

    /// Move focus one step, wrapping at both ends. No-op on an empty view.
    pub fn navigate(&mut self, direction: Direction) {
        let count = self.elements.len();
        if count == 0 {
            return;
        }

        self.elements[self.focused].set_focus(false);
        self.focused = match direction {
            Direction::Next => (self.focused + 1) % count,
            Direction::Previous => (self.focused + count - 1) % count,
        };
        self.elements[self.focused].set_focus(true);
        debug!("Focus moved to element {}", self.focused);
    }

    /// Route a key: navigation first, then the focused element.
    pub fn handle_input(&mut self, key: Key) -> InputResult {
        if self.elements.is_empty() {
            return InputResult::NotHandled;
        }

        match key {
            Key::Up => {
                self.navigate(Direction::Previous);
                InputResult::Handled
            }
            Key::Down => {
                self.navigate(Direction::Next);
                InputResult::Handled
            }
            other => self.elements[self.focused].handle_input(other),
        }
    }

    /// Let every element refresh time-driven state.
    pub fn tick(&mut self, now: Instant) {
        for element in &mut self.elements {
            element.tick(now);
        }
    }

    /// Redraw dirty elements in order and mark them clean.
    ///
    /// Each element's bounds are blanked before it draws and its drawing is
    /// clipped to them, so the rest of the canvas is left as it was.
    /// Returns how many elements were drawn.
    pub fn render<C: Canvas>(&mut self, canvas: &mut C) -> usize {
        let mut drawn = 0;
        for element in self.elements.iter_mut().filter(|e| e.is_dirty()) {
            let bounds = element.bounds();
            canvas.set_clip(Some(bounds));
            canvas.fill_rect(bounds, BinaryColor::Off);
            element.render(canvas);
            element.mark_clean();
            drawn += 1;
        }
        if drawn > 0 {
            canvas.set_clip(None);
        }
        drawn
    }

    pub fn is_dirty(&self) -> bool {
        self.elements.iter().any(|e| e.is_dirty())
    }

    /// Force every element to be redrawn on the next render.
    pub fn mark_all_dirty(&mut self) {
        for element in &mut self.elements {
            element.mark_dirty();
        }
    }
}
