//! Top-level owner of views, shortcuts, the frame buffer and the devices.
//!
//! One call to [`Compositor::tick`] performs a full cycle:
//!
//! 1. skip the tick if the configured minimum interval has not elapsed,
//! 2. decode at most one remote code and re-arm the receiver,
//! 3. offer it to the [`CommandTable`], and if no command matches, to the
//!    active [`View`],
//! 4. tick the active view, redraw its dirty elements into the frame buffer
//!    and flush the changed region to the display.
//!
//! Everything runs to completion inside the tick; a slow handler delays the
//! whole loop.

use alloc::vec::Vec;
use core::fmt::Debug;
use embassy_time::{Duration, Instant};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::Point;
use log::{debug, error, info, warn};

use crate::commands::CommandTable;
use crate::config::UiConfig;
use crate::display::DisplayDevice;
use crate::error::UiError;
use crate::framebuffer::FrameBuffer;
use crate::input::{InputEvent, InputSource};
use crate::ui::canvas::Canvas;
use crate::ui::core::{Action, InputResult, ViewId};
use crate::ui::view::View;

pub struct Compositor<D, R>
where
    D: DisplayDevice,
    R: InputSource,
{
    display: D,
    receiver: R,
    frame: FrameBuffer,
    views: Vec<Option<View>>,
    active: ViewId,
    commands: CommandTable,
    config: UiConfig,
    tick_interval: Option<Duration>,
    last_tick: Option<Instant>,
}

impl<D, R> Compositor<D, R>
where
    D: DisplayDevice,
    D::Error: Debug,
    R: InputSource,
{
    /// Build a compositor; the first active slot is `ViewId(0)`.
    pub fn new(display: D, receiver: R, config: UiConfig) -> Self {
        Self {
            display,
            receiver,
            frame: FrameBuffer::new(),
            views: Vec::new(),
            active: ViewId(0),
            commands: CommandTable::from_config(&config),
            tick_interval: config.tick_interval(),
            config,
            last_tick: None,
        }
    }

    /// Bring up the display and the receiver.
    ///
    /// Fails with [`UiError::DisplayInit`] if the panel does not respond;
    /// there is no retry.
    pub fn begin(&mut self) -> Result<(), UiError> {
        self.display.init().map_err(|e| {
            error!("Display init failed: {:?}", e);
            UiError::DisplayInit
        })?;

        Canvas::clear(&mut self.frame);
        self.frame.mark_all_dirty();
        self.flush()?;

        self.receiver.enable();
        info!("Display and receiver ready");
        Ok(())
    }

    /// Install `view` at `id`, dropping any view already there.
    ///
    /// Replacing the active view clears the frame so the newcomer is drawn
    /// from scratch.
    pub fn add_view(&mut self, id: ViewId, view: View) {
        let index = id.index();
        if index >= self.views.len() {
            self.views.resize_with(index + 1, || None);
        }
        if self.views[index].replace(view).is_some() {
            warn!("Replaced view in slot {}", index);
        }
        if id == self.active {
            self.reset_frame();
        }
    }

    /// Switch to the view at `id` if one is installed.
    ///
    /// Switching clears the frame buffer and marks the new view fully dirty.
    /// An empty slot leaves everything untouched and returns `false`.
    pub fn set_active(&mut self, id: ViewId) -> bool {
        if !matches!(self.views.get(id.index()), Some(Some(_))) {
            debug!("Ignoring switch to empty view slot {}", id.index());
            return false;
        }
        self.active = id;
        self.reset_frame();
        debug!("Active view is now {}", id.index());
        true
    }

    /// Run one decode → dispatch → render cycle.
    ///
    /// Returns any [`Action::Custom`] produced this tick for the caller to
    /// act on. Throttled ticks return `Ok(None)` without touching the
    /// receiver or the display.
    pub fn tick(&mut self, now: Instant) -> Result<Option<Action>, UiError> {
        if let (Some(interval), Some(last)) = (self.tick_interval, self.last_tick)
            && now.saturating_duration_since(last) < interval
        {
            return Ok(None);
        }
        self.last_tick = Some(now);

        let outcome = match self.receiver.poll() {
            InputEvent::RemoteCode(code) => self.route(code, now),
            InputEvent::None => None,
        };

        if let Some(view) = self.active_view_mut() {
            view.tick(now);
        }
        self.render()?;

        Ok(outcome)
    }

    /// Global commands first, then the active view.
    fn route(&mut self, code: u32, now: Instant) -> Option<Action> {
        let result = match self.commands.dispatch(code, now) {
            InputResult::NotHandled => {
                let key = self.config.keys.classify(code);
                match self.active_view_mut() {
                    Some(view) => view.handle_input(key),
                    None => InputResult::NotHandled,
                }
            }
            matched => matched,
        };

        match result {
            InputResult::Action(action) => self.apply(action),
            InputResult::Handled => None,
            InputResult::NotHandled => {
                debug!("Dropped unhandled code 0x{:06X}", code);
                None
            }
        }
    }

    /// Apply built-in actions; hand the rest back to the caller.
    fn apply(&mut self, action: Action) -> Option<Action> {
        match action {
            Action::ShowView(id) => {
                self.set_active(id);
                None
            }
            Action::Navigate(direction) => {
                if let Some(view) = self.active_view_mut() {
                    view.navigate(direction);
                }
                None
            }
            Action::Custom(_) => Some(action),
        }
    }

    fn render(&mut self) -> Result<(), UiError> {
        if let Some(Some(view)) = self.views.get_mut(self.active.index()) {
            let drawn = view.render(&mut self.frame);
            if drawn > 0 {
                debug!("Rendered {} element(s)", drawn);
            }
        }
        self.flush()
    }

    fn flush(&mut self) -> Result<(), UiError> {
        let sent = self.frame.flush(&mut self.display).map_err(|e| {
            error!("Frame flush failed: {:?}", e);
            UiError::DisplayWrite
        })?;
        if sent {
            self.display.present().map_err(|e| {
                error!("Display present failed: {:?}", e);
                UiError::DisplayWrite
            })?;
        }
        Ok(())
    }

    /// Blank the frame and schedule a full redraw of the active view.
    fn reset_frame(&mut self) {
        Canvas::clear(&mut self.frame);
        if let Some(view) = self.active_view_mut() {
            view.mark_all_dirty();
        }
    }

    fn active_view_mut(&mut self) -> Option<&mut View> {
        self.views.get_mut(self.active.index()).and_then(Option::as_mut)
    }

    pub fn view(&self, id: ViewId) -> Option<&View> {
        self.views.get(id.index()).and_then(Option::as_ref)
    }

    pub fn view_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.views.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn active_view_id(&self) -> ViewId {
        self.active
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    pub fn commands_mut(&mut self) -> &mut CommandTable {
        &mut self.commands
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn receiver_mut(&mut self) -> &mut R {
        &mut self.receiver
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Whether the pixel at `(x, y)` of the frame buffer is lit.
    pub fn is_lit(&self, x: i32, y: i32) -> bool {
        self.frame.pixel(Point::new(x, y)) == Some(BinaryColor::On)
    }
}
