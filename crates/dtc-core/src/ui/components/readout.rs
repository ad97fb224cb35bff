//! Numeric value with fixed precision and a unit suffix

use alloc::boxed::Box;
use core::fmt::Write;
use embassy_time::Instant;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::primitives::Rectangle;

use crate::ui::canvas::Canvas;
use crate::ui::components::{OVERFLOW_TEXT, truncated};
use crate::ui::core::Widget;

/// Live value source polled on every tick.
///
/// Returning `None` keeps the last value.
pub type Probe = Box<dyn FnMut() -> Option<f32>>;

/// Formatted number such as `1.25 V`.
pub struct NumericReadout {
    bounds: Rectangle,
    value: f32,
    precision: u8,
    unit: heapless::String<8>,
    probe: Option<Probe>,
    focused: bool,
    dirty: bool,
}

impl NumericReadout {
    pub fn new(bounds: Rectangle, precision: u8, unit: &str) -> Self {
        Self {
            bounds,
            value: 0.0,
            precision,
            unit: truncated(unit),
            probe: None,
            focused: false,
            dirty: true,
        }
    }

    /// Attach a probe that refreshes the value on every tick.
    pub fn with_probe(mut self, probe: Probe) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn set_value(&mut self, value: f32) {
        // Bitwise comparison so a NaN reading does not redraw every tick
        if self.value.to_bits() != value.to_bits() {
            self.value = value;
            self.dirty = true;
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// The text `render` prints, or `---` if it does not fit.
    pub fn formatted(&self) -> heapless::String<24> {
        let mut text = heapless::String::new();
        if write!(
            text,
            "{:.*} {}",
            self.precision as usize, self.value, self.unit
        )
        .is_err()
        {
            return truncated(OVERFLOW_TEXT);
        }
        text
    }
}

impl Widget for NumericReadout {
    fn render<C: Canvas>(&self, canvas: &mut C) {
        canvas.set_text_color(BinaryColor::On);
        canvas.set_cursor(self.bounds.top_left);
        canvas.print(&self.formatted());
    }

    fn tick(&mut self, _now: Instant) {
        let sample = self.probe.as_mut().and_then(|probe| probe());
        if let Some(value) = sample {
            self.set_value(value);
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

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::Cell;
    use embedded_graphics::prelude::*;

    fn readout() -> NumericReadout {
        NumericReadout::new(Rectangle::new(Point::new(0, 42), Size::new(64, 10)), 2, "V")
    }

    #[test]
    fn test_formats_with_precision_and_unit() {
        let mut r = readout();
        r.set_value(5.6789);
        assert_eq!(r.formatted().as_str(), "5.68 V");
    }

    #[test]
    fn test_oversized_value_shows_overflow_marker() {
        let mut r = NumericReadout::new(Rectangle::new(Point::zero(), Size::new(64, 10)), 1, "V");
        r.set_value(1.0e20);
        assert_eq!(r.formatted().as_str(), "---");
    }

    #[test]
    fn test_long_unit_is_cut_to_fit() {
        let mut r = NumericReadout::new(Rectangle::new(Point::zero(), Size::new(64, 10)), 0, "milliamps");
        r.set_value(5.0);
        assert_eq!(r.formatted().as_str(), "5 milliamp");
    }

    #[test]
    fn test_unchanged_value_stays_clean() {
        let mut r = readout();
        r.set_value(1.5);
        r.mark_clean();
        r.set_value(1.5);
        assert!(!r.is_dirty());
        r.set_value(f32::NAN);
        r.mark_clean();
        r.set_value(f32::NAN);
        assert!(!r.is_dirty());
    }

    #[test]
    fn test_tick_polls_probe() {
        let reading = Rc::new(Cell::new(Some(2.0_f32)));
        let source = reading.clone();
        let mut r = readout().with_probe(Box::new(move || source.get()));
        r.mark_clean();

        r.tick(Instant::from_millis(0));
        assert_eq!(r.value(), 2.0);
        assert!(r.is_dirty());

        r.mark_clean();
        reading.set(None);
        r.tick(Instant::from_millis(10));
        assert_eq!(r.value(), 2.0);
        assert!(!r.is_dirty());
    }
}
