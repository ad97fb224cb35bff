//! Charger screens built from the generic UI elements.
//!
//! The charger shows two views: a summary with the battery gauge and a
//! start/stop button, and a history graph that cycles between voltage,
//! current and temperature rise. The colour buttons of the remote jump
//! between them regardless of focus.

pub mod graph;
pub mod home;

use alloc::collections::VecDeque;

use crate::commands::CommandTable;
use crate::config::KeyMap;
use crate::ui::core::{Action, ViewId};

pub use graph::{GraphKind, graph_view, update_graph_view};
pub use home::{main_view, update_main_view};

pub const MAIN_VIEW: ViewId = ViewId(0);
pub const GRAPH_VIEW: ViewId = ViewId(1);

/// Start or stop charging, fired by the main view's button.
pub const ACTION_TOGGLE_CHARGING: u16 = 1;
/// Show the next quantity on the graph view.
pub const ACTION_CYCLE_GRAPH: u16 = 2;

/// One history sample per pixel column of the graph.
pub const HISTORY_CAPACITY: usize = 128;

/// Charge controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChargerState {
    #[default]
    Idle,
    Charging,
    Trickle,
    Complete,
    Error,
}

impl ChargerState {
    pub fn label(self) -> &'static str {
        match self {
            ChargerState::Idle => "Idle",
            ChargerState::Charging => "Charging",
            ChargerState::Trickle => "Trickle",
            ChargerState::Complete => "Complete",
            ChargerState::Error => "Error",
        }
    }

    /// Whether current is flowing into the pack.
    pub fn is_charging(self) -> bool {
        matches!(self, ChargerState::Charging | ChargerState::Trickle)
    }
}

/// Latest readings from the charge controller.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Telemetry {
    pub pack_voltage: f32,
    pub current_ma: f32,
    /// Battery temperature above ambient, in °C
    pub temp_delta: f32,
    pub state: ChargerState,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HistoryPoint {
    pub pack_voltage: f32,
    pub current_ma: f32,
    pub temp_delta: f32,
}

impl From<&Telemetry> for HistoryPoint {
    fn from(t: &Telemetry) -> Self {
        Self {
            pack_voltage: t.pack_voltage,
            current_ma: t.current_ma,
            temp_delta: t.temp_delta,
        }
    }
}

/// Bounded sample history; the oldest point is dropped when full.
#[derive(Debug, Clone)]
pub struct History {
    points: VecDeque<HistoryPoint>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, point: HistoryPoint) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryPoint> {
        self.points.iter()
    }
}

/// Bind the colour buttons: red shows the main view, green the graph,
/// blue cycles the graphed quantity.
pub fn install_shortcuts(table: &mut CommandTable, keys: &KeyMap) {
    table.register_action(keys.red, Action::ShowView(MAIN_VIEW), "Show main view");
    table.register_action(keys.green, Action::ShowView(GRAPH_VIEW), "Show graph view");
    table.register_action(keys.blue, Action::Custom(ACTION_CYCLE_GRAPH), "Next graph");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::core::InputResult;
    use embassy_time::Instant;

    fn point(v: f32) -> HistoryPoint {
        HistoryPoint {
            pack_voltage: v,
            ..HistoryPoint::default()
        }
    }

    #[test]
    fn test_history_drops_oldest_when_full() {
        let mut history = History::with_capacity(3);
        for v in [1.0, 2.0, 3.0, 4.0] {
            history.push(point(v));
        }
        let volts: alloc::vec::Vec<f32> = history.iter().map(|p| p.pack_voltage).collect();
        assert_eq!(volts, [2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_charging_states() {
        assert!(ChargerState::Charging.is_charging());
        assert!(ChargerState::Trickle.is_charging());
        assert!(!ChargerState::Complete.is_charging());
        assert_eq!(ChargerState::default().label(), "Idle");
    }

    #[test]
    fn test_shortcuts_map_colour_buttons() {
        let keys = KeyMap::default();
        let mut table = CommandTable::default();
        install_shortcuts(&mut table, &keys);

        let now = Instant::from_millis(0);
        assert_eq!(
            table.dispatch(keys.green, now),
            InputResult::Action(Action::ShowView(GRAPH_VIEW))
        );
        assert_eq!(
            table.dispatch(keys.red, now),
            InputResult::Action(Action::ShowView(MAIN_VIEW))
        );
        assert_eq!(
            table.dispatch(keys.blue, now),
            InputResult::Action(Action::Custom(ACTION_CYCLE_GRAPH))
        );
    }
}
