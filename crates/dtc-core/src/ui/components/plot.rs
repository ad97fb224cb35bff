//! Line plot of a function or a sampled series
//!
//! The plot evaluates its source once per pixel column across the x domain
//! and joins consecutive points with straight lines. With auto-scaling on,
//! the y range is taken from the evaluated points at render time; otherwise
//! points outside the fixed range are clamped to the plot edges.

use alloc::boxed::Box;
use alloc::vec::Vec;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::ui::canvas::Canvas;
use crate::ui::core::Widget;

/// Half-height of the range used when every plotted value is equal
const FLAT_RANGE_PAD: f32 = 0.5;

/// What the plot draws.
pub enum PlotSource {
    /// `y = f(x)` over the x domain
    Function(Box<dyn Fn(f32) -> f32>),
    /// Evenly spaced samples stretched across the x domain, linearly interpolated
    Samples(Vec<f32>),
}

impl PlotSource {
    /// Value at `t`, where `t` runs from 0.0 (left edge) to 1.0 (right edge).
    fn eval(&self, t: f32, x: f32) -> Option<f32> {
        match self {
            PlotSource::Function(f) => Some(f(x)),
            PlotSource::Samples(samples) => interpolate(samples, t),
        }
    }
}

fn interpolate(samples: &[f32], t: f32) -> Option<f32> {
    match samples.len() {
        0 => None,
        1 => Some(samples[0]),
        n => {
            let pos = t.clamp(0.0, 1.0) * (n - 1) as f32;
            let i = (pos as usize).min(n - 2);
            let frac = pos - i as f32;
            Some(samples[i] + (samples[i + 1] - samples[i]) * frac)
        }
    }
}

pub struct FunctionPlot {
    bounds: Rectangle,
    source: PlotSource,
    x_min: f32,
    x_max: f32,
    y_min: f32,
    y_max: f32,
    auto_scale: bool,
    focused: bool,
    dirty: bool,
}

impl FunctionPlot {
    /// Plot `f` over `x_min..=x_max`, auto-scaled.
    pub fn new(bounds: Rectangle, f: impl Fn(f32) -> f32 + 'static, x_min: f32, x_max: f32) -> Self {
        Self::with_source(bounds, PlotSource::Function(Box::new(f)), x_min, x_max)
    }

    /// Plot an initially empty sample series.
    pub fn samples(bounds: Rectangle) -> Self {
        Self::with_source(bounds, PlotSource::Samples(Vec::new()), 0.0, 1.0)
    }

    fn with_source(bounds: Rectangle, source: PlotSource, x_min: f32, x_max: f32) -> Self {
        Self {
            bounds,
            source,
            x_min,
            x_max,
            y_min: 0.0,
            y_max: 1.0,
            auto_scale: true,
            focused: false,
            dirty: true,
        }
    }

    /// Fix the y range and turn auto-scaling off.
    pub fn set_y_range(&mut self, min: f32, max: f32) {
        self.y_min = min;
        self.y_max = max;
        self.auto_scale = false;
        self.dirty = true;
    }

    pub fn enable_auto_scale(&mut self, enable: bool) {
        self.auto_scale = enable;
        self.dirty = true;
    }

    pub fn set_function(&mut self, f: impl Fn(f32) -> f32 + 'static) {
        self.source = PlotSource::Function(Box::new(f));
        self.dirty = true;
    }

    /// Replace the plotted series.
    pub fn set_samples(&mut self, samples: &[f32]) {
        if let PlotSource::Samples(current) = &self.source
            && current.as_slice() == samples
        {
            return;
        }
        self.source = PlotSource::Samples(samples.to_vec());
        self.dirty = true;
    }

    /// The y range the next render will use.
    pub fn y_range(&self) -> (f32, f32) {
        if self.auto_scale {
            self.auto_range(&self.evaluate())
        } else {
            (self.y_min, self.y_max)
        }
    }

    /// One value per pixel column; `None` where the source has nothing to plot.
    fn evaluate(&self) -> Vec<Option<f32>> {
        let columns = self.bounds.size.width as usize;
        let last = columns.saturating_sub(1).max(1) as f32;
        (0..columns)
            .map(|i| {
                let t = i as f32 / last;
                let x = self.x_min + (self.x_max - self.x_min) * t;
                self.source.eval(t, x).filter(|y| y.is_finite())
            })
            .collect()
    }

    fn auto_range(&self, values: &[Option<f32>]) -> (f32, f32) {
        let mut finite = values.iter().flatten().copied();
        let Some(first) = finite.next() else {
            return (self.y_min, self.y_max);
        };
        let (min, max) = finite.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
        if max > min {
            (min, max)
        } else {
            (min - FLAT_RANGE_PAD, max + FLAT_RANGE_PAD)
        }
    }
}

impl Widget for FunctionPlot {
    fn render<C: Canvas>(&self, canvas: &mut C) {
        let Rectangle { top_left, size } = self.bounds;
        let (x, y) = (top_left.x, top_left.y);
        let (w, h) = (size.width as i32, size.height as i32);
        if w < 2 || h < 2 {
            return;
        }
        let bottom = y + h - 1;

        canvas.draw_line(Point::new(x, bottom), Point::new(x + w - 1, bottom), BinaryColor::On);
        canvas.draw_line(Point::new(x, y), Point::new(x, bottom), BinaryColor::On);

        let values = self.evaluate();
        let (y_min, y_max) = if self.auto_scale {
            self.auto_range(&values)
        } else {
            (self.y_min, self.y_max)
        };
        let span = y_max - y_min;
        if !(span > 0.0) {
            return;
        }

        let mut last: Option<i32> = None;
        for (i, value) in values.iter().enumerate() {
            let Some(value) = value else {
                last = None;
                continue;
            };
            let scaled = (h - 1) as f32 * (value - y_min) / span;
            let plot_y = (bottom as f32 - scaled).clamp(y as f32, bottom as f32) as i32;
            let column = x + i as i32;
            if let Some(prev) = last {
                canvas.draw_line(Point::new(column - 1, prev), Point::new(column, plot_y), BinaryColor::On);
            }
            last = Some(plot_y);
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
