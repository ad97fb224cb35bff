//! Hardware-independent core library for the dtc charger display.
//!
//! This crate contains the platform-agnostic UI runtime of the delta-T NiMH
//! charger: focusable elements with dirty tracking, views with a focus
//! cursor, the remote-control command table with repeat debouncing, and the
//! compositor that drives one decode → dispatch → render cycle per tick.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod commands;
pub mod compositor;
pub mod config;
pub mod display;
pub mod error;
pub mod framebuffer;
pub mod input;
pub mod screens;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use commands::CommandTable;
pub use compositor::Compositor;
pub use config::{BatteryParams, KeyMap, UiConfig};
pub use display::DisplayDevice;
pub use error::{ConfigError, UiError};
pub use input::{InputEvent, InputSource, Key};
