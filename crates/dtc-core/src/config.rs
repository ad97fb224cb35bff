//! Startup configuration for the display runtime.
//!
//! Remote-control codes, timing and battery parameters are vendor or
//! hardware data rather than protocol, so they are supplied as a
//! [`UiConfig`] when the compositor is built. The configuration can be
//! shipped as a `postcard` blob (for example via `include_bytes!`) and
//! decoded with [`UiConfig::from_bytes`].

use alloc::vec::Vec;
use embassy_time::Duration;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::input::Key;

/// Sentinel the infrared decoder emits while a button is held.
pub const DEFAULT_REPEAT_CODE: u32 = 0xFFFF_FFFF;

/// Minimum time between two accepted repeats of a held button.
pub const DEFAULT_REPEAT_DELAY_MS: u32 = 250;

/// Remote-control codes keyed by their meaning.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMap {
    pub up: u32,
    pub down: u32,
    pub left: u32,
    pub right: u32,
    pub ok: u32,
    pub red: u32,
    pub green: u32,
    pub blue: u32,
    /// The "repeat previous code" sentinel
    pub repeat: u32,
}

impl Default for KeyMap {
    /// Codes of the NEC remote shipped with the charger.
    fn default() -> Self {
        Self {
            up: 0xFF629D,
            down: 0xFFA857,
            left: 0xFF22DD,
            right: 0xFFC23D,
            ok: 0xFF02FD,
            red: 0xF720DF,
            green: 0xA720DF,
            blue: 0x6720DF,
            repeat: DEFAULT_REPEAT_CODE,
        }
    }
}

impl KeyMap {
    /// Symbolic names accepted by [`KeyMap::code`], in declaration order.
    pub const NAMES: [&'static str; 9] = [
        "up", "down", "left", "right", "ok", "red", "green", "blue", "repeat",
    ];

    /// Look up a code by its symbolic name.
    pub fn code(&self, name: &str) -> Option<u32> {
        match name {
            "up" => Some(self.up),
            "down" => Some(self.down),
            "left" => Some(self.left),
            "right" => Some(self.right),
            "ok" => Some(self.ok),
            "red" => Some(self.red),
            "green" => Some(self.green),
            "blue" => Some(self.blue),
            "repeat" => Some(self.repeat),
            _ => None,
        }
    }

    /// The raw code bound to a symbolic key.
    ///
    /// `Key::Other` carries its own code.
    pub fn code_for(&self, key: Key) -> u32 {
        match key {
            Key::Up => self.up,
            Key::Down => self.down,
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Ok => self.ok,
            Key::Red => self.red,
            Key::Green => self.green,
            Key::Blue => self.blue,
            Key::Repeat => self.repeat,
            Key::Other(code) => code,
        }
    }

    /// Translate a raw code into the key it stands for.
    pub fn classify(&self, code: u32) -> Key {
        // Checked in the same order as `NAMES`; the first binding wins.
        if code == self.up {
            Key::Up
        } else if code == self.down {
            Key::Down
        } else if code == self.left {
            Key::Left
        } else if code == self.right {
            Key::Right
        } else if code == self.ok {
            Key::Ok
        } else if code == self.red {
            Key::Red
        } else if code == self.green {
            Key::Green
        } else if code == self.blue {
            Key::Blue
        } else if code == self.repeat {
            Key::Repeat
        } else {
            Key::Other(code)
        }
    }

    fn semantic_codes(&self) -> [u32; 8] {
        [
            self.up, self.down, self.left, self.right, self.ok, self.red, self.green, self.blue,
        ]
    }
}

/// Electrical parameters of the battery pack shown on the gauge.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BatteryParams {
    /// Cells in series
    pub cell_count: u8,
    /// Per-cell voltage treated as empty
    pub cell_voltage_min: f32,
    /// Per-cell voltage treated as full
    pub cell_voltage_max: f32,
    pub capacity_mah: u16,
    pub charge_current_ma: u16,
    pub trickle_current_ma: u16,
}

impl Default for BatteryParams {
    fn default() -> Self {
        Self {
            cell_count: 4,
            cell_voltage_min: 1.0,
            cell_voltage_max: 1.45,
            capacity_mah: 2000,
            charge_current_ma: 1000,
            trickle_current_ma: 50,
        }
    }
}

impl BatteryParams {
    /// State of charge in percent derived from the pack voltage, clamped to `0..=100`.
    pub fn percentage(&self, pack_voltage: f32) -> f32 {
        let cells = self.cell_count.max(1) as f32;
        let span = self.cell_voltage_max - self.cell_voltage_min;
        if span <= 0.0 || !pack_voltage.is_finite() {
            return 0.0;
        }
        let pct = ((pack_voltage / cells) - self.cell_voltage_min) / span * 100.0;
        pct.clamp(0.0, 100.0)
    }

    /// Pack voltage at which the gauge reads full.
    pub fn full_pack_voltage(&self) -> f32 {
        self.cell_voltage_max * self.cell_count as f32
    }
}

/// Complete runtime configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct UiConfig {
    pub keys: KeyMap,
    /// Minimum spacing between accepted repeats, in milliseconds
    pub repeat_delay_ms: u32,
    /// Minimum spacing between ticks in milliseconds; 0 runs unthrottled
    pub tick_interval_ms: u32,
    pub battery: BatteryParams,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            keys: KeyMap::default(),
            repeat_delay_ms: DEFAULT_REPEAT_DELAY_MS,
            tick_interval_ms: 0,
            battery: BatteryParams::default(),
        }
    }
}

impl UiConfig {
    /// Decode and validate a `postcard` configuration blob.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: UiConfig = postcard::from_bytes(bytes).map_err(|_| ConfigError::Decode)?;
        config.validate()?;
        Ok(config)
    }

    /// Encode this configuration as a `postcard` blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(|_| ConfigError::Encode)
    }

    /// Check the configuration for values the runtime cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.battery.cell_count == 0 {
            return Err(ConfigError::Invalid {
                reason: "battery cell count must be non-zero",
            });
        }
        if !(self.battery.cell_voltage_max > self.battery.cell_voltage_min) {
            return Err(ConfigError::Invalid {
                reason: "cell voltage max must exceed min",
            });
        }
        if self.keys.semantic_codes().contains(&self.keys.repeat) {
            return Err(ConfigError::Invalid {
                reason: "repeat sentinel collides with a key code",
            });
        }
        Ok(())
    }

    pub fn repeat_delay(&self) -> Duration {
        Duration::from_millis(self.repeat_delay_ms as u64)
    }

    /// Minimum tick interval, or `None` when ticks are unthrottled.
    pub fn tick_interval(&self) -> Option<Duration> {
        (self.tick_interval_ms > 0).then(|| Duration::from_millis(self.tick_interval_ms as u64))
    }
}
