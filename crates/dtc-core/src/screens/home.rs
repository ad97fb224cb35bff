//! Main charger screen: pack summary and the start/stop button.

use core::fmt::Write;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::String;

use crate::config::BatteryParams;
use crate::screens::{ACTION_TOGGLE_CHARGING, Telemetry};
use crate::ui::components::{BatteryGauge, Button, Label, NumericReadout};
use crate::ui::core::Action;
use crate::ui::elements::Element;
use crate::ui::view::View;

pub const TITLE_INDEX: usize = 0;
pub const STATUS_INDEX: usize = 1;
pub const GAUGE_INDEX: usize = 2;
pub const TEMP_INDEX: usize = 3;
pub const BUTTON_INDEX: usize = 4;

const START_LABEL: &str = "Start Charging";
const STOP_LABEL: &str = "Stop Charging";

pub fn main_view(params: &BatteryParams) -> View {
    let title = Label::new(
        Rectangle::new(Point::new(0, 0), Size::new(128, 10)),
        "NiMH Charger",
    )
    .centered();

    let status = Label::new(
        Rectangle::new(Point::new(0, 12), Size::new(128, 10)),
        "State: Idle",
    );

    let gauge = BatteryGauge::new(
        Rectangle::new(Point::new(0, 24), Size::new(124, 16)),
        *params,
    );

    let temp = NumericReadout::new(
        Rectangle::new(Point::new(0, 42), Size::new(64, 10)),
        1,
        "C dT",
    );

    let button = Button::new(
        Rectangle::new(Point::new(14, 52), Size::new(100, 12)),
        START_LABEL,
        Action::Custom(ACTION_TOGGLE_CHARGING),
    );

    View::new()
        .with_element(title)
        .with_element(status)
        .with_element(gauge)
        .with_element(temp)
        .with_element(button)
}

/// Push the latest telemetry into a view built by [`main_view`].
pub fn update_main_view(view: &mut View, telemetry: &Telemetry) {
    if let Some(Element::Label(status)) = view.element_mut(STATUS_INDEX) {
        let mut text: String<32> = String::new();
        write!(text, "State: {}", telemetry.state.label()).ok();
        status.set_text(&text);
    }

    if let Some(Element::BatteryGauge(gauge)) = view.element_mut(GAUGE_INDEX) {
        gauge.update_values(telemetry.pack_voltage, telemetry.current_ma);
    }

    if let Some(Element::NumericReadout(temp)) = view.element_mut(TEMP_INDEX) {
        temp.set_value(telemetry.temp_delta);
    }

    if let Some(Element::Button(button)) = view.element_mut(BUTTON_INDEX) {
        let label = if telemetry.state.is_charging() {
            STOP_LABEL
        } else {
            START_LABEL
        };
        button.set_label(label);
    }
}
