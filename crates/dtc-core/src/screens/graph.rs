//! History graph screen.

use alloc::vec::Vec;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::screens::{ACTION_CYCLE_GRAPH, History, HistoryPoint};
use crate::ui::components::{Button, FunctionPlot, Label};
use crate::ui::core::Action;
use crate::ui::elements::Element;
use crate::ui::view::View;

pub const TITLE_INDEX: usize = 0;
pub const PLOT_INDEX: usize = 1;
pub const BUTTON_INDEX: usize = 2;

/// Quantity shown on the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphKind {
    #[default]
    Voltage,
    Current,
    TempDelta,
}

impl GraphKind {
    pub fn title(self) -> &'static str {
        match self {
            GraphKind::Voltage => "Pack Voltage (V)",
            GraphKind::Current => "Current (mA)",
            GraphKind::TempDelta => "Temp Rise (C)",
        }
    }

    /// Cycles Voltage → Current → TempDelta → Voltage.
    pub fn next(self) -> Self {
        match self {
            GraphKind::Voltage => GraphKind::Current,
            GraphKind::Current => GraphKind::TempDelta,
            GraphKind::TempDelta => GraphKind::Voltage,
        }
    }

    pub fn value(self, point: &HistoryPoint) -> f32 {
        match self {
            GraphKind::Voltage => point.pack_voltage,
            GraphKind::Current => point.current_ma,
            GraphKind::TempDelta => point.temp_delta,
        }
    }
}

pub fn graph_view() -> View {
    let title = Label::new(
        Rectangle::new(Point::new(0, 0), Size::new(128, 10)),
        GraphKind::default().title(),
    )
    .centered();

    let plot = FunctionPlot::samples(Rectangle::new(Point::new(0, 11), Size::new(128, 38)));

    let button = Button::new(
        Rectangle::new(Point::new(14, 51), Size::new(100, 12)),
        "Next Graph",
        Action::Custom(ACTION_CYCLE_GRAPH),
    );

    View::new()
        .with_element(title)
        .with_element(plot)
        .with_element(button)
}

/// Show `kind` from `history` on a view built by [`graph_view`].
pub fn update_graph_view(view: &mut View, kind: GraphKind, history: &History) {
    if let Some(Element::Label(title)) = view.element_mut(TITLE_INDEX) {
        title.set_text(kind.title());
    }

    if let Some(Element::FunctionPlot(plot)) = view.element_mut(PLOT_INDEX) {
        let samples: Vec<f32> = history.iter().map(|p| kind.value(p)).collect();
        plot.set_samples(&samples);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingCanvas;
    use crate::ui::core::Widget;

    fn history() -> History {
        let mut history = History::default();
        for i in 0..4 {
            history.push(HistoryPoint {
                pack_voltage: 5.0 + i as f32 * 0.1,
                current_ma: 1000.0,
                temp_delta: i as f32,
            });
        }
        history
    }

    #[test]
    fn test_kind_cycles_through_all() {
        let start = GraphKind::Voltage;
        assert_eq!(start.next(), GraphKind::Current);
        assert_eq!(start.next().next(), GraphKind::TempDelta);
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn test_update_sets_title_and_samples() {
        let mut view = graph_view();
        view.render(&mut RecordingCanvas::new());

        update_graph_view(&mut view, GraphKind::TempDelta, &history());
        match view.element(TITLE_INDEX) {
            Some(Element::Label(label)) => assert_eq!(label.text(), "Temp Rise (C)"),
            _ => panic!("title missing"),
        }
        match view.element(PLOT_INDEX) {
            Some(Element::FunctionPlot(plot)) => {
                assert!(plot.is_dirty());
                assert_eq!(plot.y_range(), (0.0, 3.0));
            }
            _ => panic!("plot missing"),
        }
    }

    #[test]
    fn test_unchanged_history_keeps_plot_clean() {
        let mut view = graph_view();
        let history = history();
        update_graph_view(&mut view, GraphKind::Voltage, &history);
        view.render(&mut RecordingCanvas::new());

        update_graph_view(&mut view, GraphKind::Voltage, &history);
        assert!(!view.is_dirty());
    }
}
