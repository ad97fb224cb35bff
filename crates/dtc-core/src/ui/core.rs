//! Core UI traits and types for the dtc UI system

use embassy_time::Instant;
use embedded_graphics::primitives::Rectangle;

use crate::input::Key;
use crate::ui::canvas::Canvas;

/// Logical slot a view is installed at in the compositor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u8);

impl ViewId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Direction the focus cursor moves in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the start of the tab order (the "up" button)
    Previous,
    /// Towards the end of the tab order (the "down" button)
    Next,
}

/// Actions that elements and command handlers can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Switch the active view
    ShowView(ViewId),
    /// Move focus within the active view
    Navigate(Direction),
    /// Application-defined action, handed back to the caller of `tick`
    Custom(u16),
}

/// Result from offering an input code to a command table, view or element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Input was consumed
    Handled,
    /// Input was not consumed, pass it on
    NotHandled,
    /// Input was consumed and triggered an action
    Action(Action),
}

impl InputResult {
    pub fn matched(&self) -> bool {
        !matches!(self, InputResult::NotHandled)
    }

    pub fn action(&self) -> Option<Action> {
        match self {
            InputResult::Action(action) => Some(*action),
            _ => None,
        }
    }
}

/// Capabilities shared by every element kind.
///
/// Any mutator that changes what [`render`](Widget::render) would draw must
/// mark the widget dirty; the owning view marks it clean right after
/// rendering it.
pub trait Widget {
    /// Draw the current visual state, staying inside [`bounds`](Widget::bounds).
    fn render<C: Canvas>(&self, canvas: &mut C);

    /// React to a key. Only focused widgets consume input.
    fn handle_input(&mut self, _key: Key) -> InputResult {
        InputResult::NotHandled
    }

    /// Refresh time-driven state.
    fn tick(&mut self, _now: Instant) {}

    fn bounds(&self) -> Rectangle;

    fn is_focused(&self) -> bool;

    /// Gain or lose focus. Always marks the widget dirty.
    fn set_focus(&mut self, focused: bool);

    fn is_dirty(&self) -> bool;

    fn mark_clean(&mut self);

    fn mark_dirty(&mut self);
}
