//! Desktop simulator for the dtc charger display.
//!
//! Renders the dtc-core compositor in an SDL2 window via
//! `embedded-graphics-simulator`. A mock charge controller produces
//! telemetry so the screens can be exercised without hardware.
//!
//! # Key bindings
//!
//! | Key        | Remote button          |
//! |------------|------------------------|
//! | Up / Down  | Up / Down (focus)      |
//! | Left/Right | Left / Right           |
//! | Enter      | OK                     |
//! | R / G / B  | Red / Green / Blue     |
//! | Q / Esc    | Quit                   |
//!
//! Holding a key sends the remote's repeat code, as a real NEC remote does.

use std::convert::Infallible;
use std::time::{Duration as StdDuration, Instant as StdInstant};

use embassy_time::Instant;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{
    BinaryColorTheme, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
    sdl2::Keycode,
};
use log::{error, info};

use dtc_core::screens::{
    self, ACTION_CYCLE_GRAPH, ACTION_TOGGLE_CHARGING, ChargerState, GRAPH_VIEW, GraphKind,
    History, HistoryPoint, MAIN_VIEW, Telemetry,
};
use dtc_core::ui::{Action, DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};
use dtc_core::{BatteryParams, Compositor, DisplayDevice, InputSource, KeyMap, UiConfig};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 4;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: StdDuration = StdDuration::from_millis(33);

/// Interval between mock charger readings.
const MOCK_SAMPLE_INTERVAL: StdDuration = StdDuration::from_secs(1);

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

/// The SDL framebuffer posing as the OLED panel.
struct SimPanel {
    display: SimulatorDisplay<BinaryColor>,
}

impl SimPanel {
    fn new() -> Self {
        Self {
            display: SimulatorDisplay::new(Size::new(
                DISPLAY_WIDTH_PX as u32,
                DISPLAY_HEIGHT_PX as u32,
            )),
        }
    }
}

impl OriginDimensions for SimPanel {
    fn size(&self) -> Size {
        self.display.size()
    }
}

impl DrawTarget for SimPanel {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.display.draw_iter(pixels)
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.display.fill_contiguous(area, colors)
    }
}

impl DisplayDevice for SimPanel {
    fn init(&mut self) -> Result<(), Self::Error> {
        self.display.clear(BinaryColor::Off)
    }
}

/// Keyboard standing in for the infrared receiver; latches one code.
#[derive(Default)]
struct KeyboardReceiver {
    enabled: bool,
    latched: Option<u32>,
}

impl KeyboardReceiver {
    /// Latch `code` unless one is already pending, like the IR decoder.
    fn press(&mut self, code: u32) {
        if self.enabled && self.latched.is_none() {
            self.latched = Some(code);
        }
    }
}

impl InputSource for KeyboardReceiver {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn decode(&mut self) -> Option<u32> {
        self.latched
    }

    fn resume(&mut self) {
        self.latched = None;
    }
}

/// Map an SDL keycode to the remote code it emulates.
fn keycode_to_remote(keycode: Keycode, keys: &KeyMap) -> Option<u32> {
    match keycode {
        Keycode::Up => Some(keys.up),
        Keycode::Down => Some(keys.down),
        Keycode::Left => Some(keys.left),
        Keycode::Right => Some(keys.right),
        Keycode::Return | Keycode::KpEnter => Some(keys.ok),
        Keycode::R => Some(keys.red),
        Keycode::G => Some(keys.green),
        Keycode::B => Some(keys.blue),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Mock charge controller
// ---------------------------------------------------------------------------

/// Pack voltage at rest, before charging starts.
const REST_CELL_VOLTAGE: f32 = 1.2;

/// Voltage rise per cell per mock sample while charging.
const CHARGE_STEP_CELL_VOLTAGE: f32 = 0.005;

/// Temperature rise per mock sample at full charge current, in °C.
const HEAT_STEP: f32 = 0.05;

/// Passive cooling per mock sample, in °C.
const COOL_STEP: f32 = 0.02;

/// Synthetic charger that ramps the pack voltage while charging.
struct MockCharger {
    params: BatteryParams,
    telemetry: Telemetry,
}

impl MockCharger {
    fn new(params: BatteryParams) -> Self {
        Self {
            params,
            telemetry: Telemetry {
                pack_voltage: REST_CELL_VOLTAGE * params.cell_count as f32,
                ..Telemetry::default()
            },
        }
    }

    fn toggle(&mut self) {
        self.telemetry.state = if self.telemetry.state.is_charging() {
            ChargerState::Idle
        } else {
            ChargerState::Charging
        };
        info!("Charger → {}", self.telemetry.state.label());
    }

    /// Advance one sample period and return the new readings.
    fn step(&mut self) -> Telemetry {
        let cells = self.params.cell_count as f32;
        let t = &mut self.telemetry;

        match t.state {
            ChargerState::Charging => {
                t.current_ma = self.params.charge_current_ma as f32;
                t.pack_voltage += CHARGE_STEP_CELL_VOLTAGE * cells;
                t.temp_delta += HEAT_STEP;
                if t.pack_voltage >= self.params.full_pack_voltage() {
                    t.pack_voltage = self.params.full_pack_voltage();
                    t.state = ChargerState::Trickle;
                    info!("Pack full, trickle charging");
                }
            }
            ChargerState::Trickle => {
                t.current_ma = self.params.trickle_current_ma as f32;
                t.temp_delta = (t.temp_delta - COOL_STEP).max(0.0);
                if t.temp_delta <= 0.0 {
                    t.state = ChargerState::Complete;
                    info!("Charge complete");
                }
            }
            ChargerState::Idle | ChargerState::Complete | ChargerState::Error => {
                t.current_ma = 0.0;
                t.temp_delta = (t.temp_delta - COOL_STEP).max(0.0);
            }
        }

        *t
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting dtc simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: arrows=navigate  Enter=OK  R/G/B=colour buttons  Q=Quit");

    let config = UiConfig::default();
    let keys = config.keys;
    let params = config.battery;

    let mut ui = Compositor::new(SimPanel::new(), KeyboardReceiver::default(), config);
    if let Err(e) = ui.begin() {
        error!("Startup failed: {}", e);
        return;
    }

    ui.add_view(MAIN_VIEW, screens::main_view(&params));
    ui.add_view(GRAPH_VIEW, screens::graph_view());
    screens::install_shortcuts(ui.commands_mut(), &keys);
    ui.commands().log_commands();

    let mut charger = MockCharger::new(params);
    let mut history = History::default();
    let mut graph = GraphKind::default();

    let output_settings = OutputSettingsBuilder::new()
        .scale(WINDOW_SCALE)
        .theme(BinaryColorTheme::OledBlue)
        .build();
    let mut window = Window::new("dtc Simulator", &output_settings);

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    window.update(&ui.display().display);

    let mut last_sample = StdInstant::now();

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = StdInstant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown {
                    keycode, repeat, ..
                } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }
                    if let Some(code) = keycode_to_remote(keycode, &keys) {
                        let code = if repeat { keys.repeat } else { code };
                        ui.receiver_mut().press(code);
                    }
                }

                _ => {}
            }
        }

        // --- Mock charger -------------------------------------------------
        if last_sample.elapsed() >= MOCK_SAMPLE_INTERVAL {
            let telemetry = charger.step();
            history.push(HistoryPoint::from(&telemetry));
            if let Some(view) = ui.view_mut(MAIN_VIEW) {
                screens::update_main_view(view, &telemetry);
            }
            if let Some(view) = ui.view_mut(GRAPH_VIEW) {
                screens::update_graph_view(view, graph, &history);
            }
            last_sample = StdInstant::now();
        }

        // --- UI tick ------------------------------------------------------
        match ui.tick(Instant::now()) {
            Ok(Some(Action::Custom(ACTION_TOGGLE_CHARGING))) => {
                charger.toggle();
                if let Some(view) = ui.view_mut(MAIN_VIEW) {
                    screens::update_main_view(view, &charger.telemetry);
                }
            }
            Ok(Some(Action::Custom(ACTION_CYCLE_GRAPH))) => {
                graph = graph.next();
                info!("Graph → {}", graph.title());
                if let Some(view) = ui.view_mut(GRAPH_VIEW) {
                    screens::update_graph_view(view, graph, &history);
                }
            }
            Ok(Some(other)) => info!("Unhandled action {:?}", other),
            Ok(None) => {}
            Err(e) => error!("Render error: {}", e),
        }

        window.update(&ui.display().display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
