//! Battery icon with fill level and pack readings

use core::fmt::Write;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::BatteryParams;
use crate::ui::canvas::{Canvas, GLYPH_HEIGHT_PX};
use crate::ui::components::{OVERFLOW_TEXT, truncated};
use crate::ui::core::Widget;

/// Width of the terminal nub on the right of the icon, in pixels
const NUB_WIDTH_PX: i32 = 10;

/// Above this charge the label sits on the fill and is drawn inverted
const INVERT_LABEL_ABOVE_PCT: f32 = 50.0;

/// Battery outline filled in proportion to the state of charge, labelled
/// with the pack voltage and current.
pub struct BatteryGauge {
    bounds: Rectangle,
    params: BatteryParams,
    pack_voltage: f32,
    current_ma: f32,
    percentage: f32,
    focused: bool,
    dirty: bool,
}

impl BatteryGauge {
    pub fn new(bounds: Rectangle, params: BatteryParams) -> Self {
        Self {
            bounds,
            params,
            pack_voltage: 0.0,
            current_ma: 0.0,
            percentage: 0.0,
            focused: false,
            dirty: true,
        }
    }

    /// Update the readings and recompute the state of charge.
    pub fn update_values(&mut self, pack_voltage: f32, current_ma: f32) {
        if self.pack_voltage.to_bits() == pack_voltage.to_bits()
            && self.current_ma.to_bits() == current_ma.to_bits()
        {
            return;
        }
        self.pack_voltage = pack_voltage;
        self.current_ma = current_ma;
        self.percentage = self.params.percentage(pack_voltage);
        self.dirty = true;
    }

    pub fn percentage(&self) -> f32 {
        self.percentage
    }

    /// `5.60V 1000mA`, or `---` if the readings do not fit.
    pub fn label(&self) -> heapless::String<24> {
        let mut text = heapless::String::new();
        if write!(text, "{:.2}V {:.0}mA", self.pack_voltage, self.current_ma).is_err() {
            return truncated(OVERFLOW_TEXT);
        }
        text
    }

    /// Width of the charge fill in pixels.
    pub fn fill_width(&self) -> u32 {
        let usable = (self.bounds.size.width as i32 - NUB_WIDTH_PX - 4).max(0) as f32;
        (usable * self.percentage / 100.0) as u32
    }
}

impl Widget for BatteryGauge {
    fn render<C: Canvas>(&self, canvas: &mut C) {
        let Rectangle { top_left, size } = self.bounds;
        let (w, h) = (size.width as i32, size.height as i32);

        let body = Rectangle::new(
            top_left + Point::new(0, 2),
            Size::new((w - NUB_WIDTH_PX).max(0) as u32, (h - 4).max(0) as u32),
        );
        canvas.draw_rect(body, BinaryColor::On);

        let nub = Rectangle::new(
            top_left + Point::new(w - NUB_WIDTH_PX, h / 3),
            Size::new(NUB_WIDTH_PX as u32, (h / 3) as u32),
        );
        canvas.fill_rect(nub, BinaryColor::On);

        let fill = Rectangle::new(
            top_left + Point::new(2, 4),
            Size::new(self.fill_width(), (h - 8).max(0) as u32),
        );
        canvas.fill_rect(fill, BinaryColor::On);

        let label_color = if self.percentage > INVERT_LABEL_ABOVE_PCT {
            BinaryColor::Off
        } else {
            BinaryColor::On
        };
        canvas.set_text_color(label_color);
        canvas.set_cursor(top_left + Point::new(2, (h - GLYPH_HEIGHT_PX) / 2));
        canvas.print(&self.label());
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
    use crate::testing::{CanvasOp, RecordingCanvas};

    fn gauge() -> BatteryGauge {
        BatteryGauge::new(
            Rectangle::new(Point::new(0, 24), Size::new(124, 16)),
            BatteryParams::default(),
        )
    }

    #[test]
    fn test_full_pack_fills_usable_width() {
        let mut g = gauge();
        g.update_values(5.8, 1000.0);
        assert_eq!(g.percentage(), 100.0);
        assert_eq!(g.fill_width(), 110);
        assert_eq!(g.label().as_str(), "5.80V 1000mA");
    }

    #[test]
    fn test_empty_pack_draws_no_fill() {
        let mut g = gauge();
        g.update_values(3.2, 0.0);
        assert_eq!(g.percentage(), 0.0);
        assert_eq!(g.fill_width(), 0);
    }

    #[test]
    fn test_label_inverts_over_half_charge() {
        let mut low = gauge();
        low.update_values(4.4, 50.0);
        let mut canvas = RecordingCanvas::new();
        low.render(&mut canvas);
        assert!(canvas.ops.contains(&CanvasOp::TextColor(BinaryColor::On)));

        let mut high = gauge();
        high.update_values(5.6, 50.0);
        let mut canvas = RecordingCanvas::new();
        high.render(&mut canvas);
        assert!(canvas.ops.contains(&CanvasOp::TextColor(BinaryColor::Off)));
    }

    #[test]
    fn test_absurd_current_shows_overflow_marker() {
        let mut g = gauge();
        g.update_values(5.0, 1.0e20);
        assert_eq!(g.label().as_str(), "---");
    }

    #[test]
    fn test_same_readings_stay_clean() {
        let mut g = gauge();
        g.update_values(5.0, 900.0);
        g.mark_clean();
        g.update_values(5.0, 900.0);
        assert!(!g.is_dirty());
    }
}
