//! Concrete UI element enum.
//!
//! Views own heterogeneous elements *without* trait objects. Because
//! [`Widget::render`] is generic over the canvas, the trait is not
//! object-safe; this enum is the closed set of element kinds and grows a
//! variant whenever a new kind is added.

use embassy_time::Instant;
use embedded_graphics::primitives::Rectangle;

use crate::input::Key;
use crate::ui::canvas::Canvas;
use crate::ui::components::{BatteryGauge, Button, FunctionPlot, Label, NumericReadout};
use crate::ui::core::{InputResult, Widget};

/// A concrete, view-owned UI element.
pub enum Element {
    Label(Label),
    Button(Button),
    NumericReadout(NumericReadout),
    BatteryGauge(BatteryGauge),
    FunctionPlot(FunctionPlot),
}

impl Widget for Element {
    fn render<C: Canvas>(&self, canvas: &mut C) {
        match self {
            Element::Label(l) => l.render(canvas),
            Element::Button(b) => b.render(canvas),
            Element::NumericReadout(r) => r.render(canvas),
            Element::BatteryGauge(g) => g.render(canvas),
            Element::FunctionPlot(p) => p.render(canvas),
        }
    }

    fn handle_input(&mut self, key: Key) -> InputResult {
        match self {
            Element::Label(l) => l.handle_input(key),
            Element::Button(b) => b.handle_input(key),
            Element::NumericReadout(r) => r.handle_input(key),
            Element::BatteryGauge(g) => g.handle_input(key),
            Element::FunctionPlot(p) => p.handle_input(key),
        }
    }

    fn tick(&mut self, now: Instant) {
        match self {
            Element::Label(l) => l.tick(now),
            Element::Button(b) => b.tick(now),
            Element::NumericReadout(r) => r.tick(now),
            Element::BatteryGauge(g) => g.tick(now),
            Element::FunctionPlot(p) => p.tick(now),
        }
    }

    fn bounds(&self) -> Rectangle {
        match self {
            Element::Label(l) => l.bounds(),
            Element::Button(b) => b.bounds(),
            Element::NumericReadout(r) => r.bounds(),
            Element::BatteryGauge(g) => g.bounds(),
            Element::FunctionPlot(p) => p.bounds(),
        }
    }

    fn is_focused(&self) -> bool {
        match self {
            Element::Label(l) => l.is_focused(),
            Element::Button(b) => b.is_focused(),
            Element::NumericReadout(r) => r.is_focused(),
            Element::BatteryGauge(g) => g.is_focused(),
            Element::FunctionPlot(p) => p.is_focused(),
        }
    }

    fn set_focus(&mut self, focused: bool) {
        match self {
            Element::Label(l) => l.set_focus(focused),
            Element::Button(b) => b.set_focus(focused),
            Element::NumericReadout(r) => r.set_focus(focused),
            Element::BatteryGauge(g) => g.set_focus(focused),
            Element::FunctionPlot(p) => p.set_focus(focused),
        }
    }

    fn is_dirty(&self) -> bool {
        match self {
            Element::Label(l) => l.is_dirty(),
            Element::Button(b) => b.is_dirty(),
            Element::NumericReadout(r) => r.is_dirty(),
            Element::BatteryGauge(g) => g.is_dirty(),
            Element::FunctionPlot(p) => p.is_dirty(),
        }
    }

    fn mark_clean(&mut self) {
        match self {
            Element::Label(l) => l.mark_clean(),
            Element::Button(b) => b.mark_clean(),
            Element::NumericReadout(r) => r.mark_clean(),
            Element::BatteryGauge(g) => g.mark_clean(),
            Element::FunctionPlot(p) => p.mark_clean(),
        }
    }

    fn mark_dirty(&mut self) {
        match self {
            Element::Label(l) => l.mark_dirty(),
            Element::Button(b) => b.mark_dirty(),
            Element::NumericReadout(r) => r.mark_dirty(),
            Element::BatteryGauge(g) => g.mark_dirty(),
            Element::FunctionPlot(p) => p.mark_dirty(),
        }
    }
}

impl From<Label> for Element {
    fn from(label: Label) -> Self {
        Element::Label(label)
    }
}

impl From<Button> for Element {
    fn from(button: Button) -> Self {
        Element::Button(button)
    }
}

impl From<NumericReadout> for Element {
    fn from(readout: NumericReadout) -> Self {
        Element::NumericReadout(readout)
    }
}

impl From<BatteryGauge> for Element {
    fn from(gauge: BatteryGauge) -> Self {
        Element::BatteryGauge(gauge)
    }
}

impl From<FunctionPlot> for Element {
    fn from(plot: FunctionPlot) -> Self {
        Element::FunctionPlot(plot)
    }
}
