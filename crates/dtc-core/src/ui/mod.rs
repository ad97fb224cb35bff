//! dtc UI system - focus-driven widgets for a small monochrome display
//!
//! This module provides:
//! - Core traits and types for focusable, dirty-tracked elements
//! - The closed set of element kinds (label, button, readout, gauge, plot)
//! - Views with a wrapping focus cursor and selective redraw
//! - The canvas abstraction elements draw into

pub mod canvas;
pub mod components;
pub mod core;
pub mod elements;
pub mod view;

/// Panel width in pixels
pub const DISPLAY_WIDTH_PX: u16 = 128;

/// Panel height in pixels
pub const DISPLAY_HEIGHT_PX: u16 = 64;

// Re-export commonly used items
pub use canvas::{Canvas, GLYPH_HEIGHT_PX, GLYPH_WIDTH_PX, TEXT_FONT, text_width};
pub use components::{BatteryGauge, Button, FunctionPlot, Label, NumericReadout, PlotSource, Probe};
pub use self::core::{Action, Direction, InputResult, ViewId, Widget};
pub use elements::Element;
pub use view::View;
