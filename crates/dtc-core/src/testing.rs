//! Test doubles shared by the unit tests.

use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::display::DisplayDevice;
use crate::input::InputSource;
use crate::ui::canvas::Canvas;
use crate::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

/// In-memory panel that records flush traffic.
pub struct TestPanel {
    pixels: Vec<BinaryColor>,
    pub fills: usize,
    pub last_fill: Option<Rectangle>,
    pub presents: usize,
    pub initialised: bool,
    pub fail_init: bool,
    pub fail_writes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelFault;

impl TestPanel {
    pub fn new() -> Self {
        Self {
            pixels: vec![BinaryColor::Off; DISPLAY_WIDTH_PX as usize * DISPLAY_HEIGHT_PX as usize],
            fills: 0,
            last_fill: None,
            presents: 0,
            initialised: false,
            fail_init: false,
            fail_writes: false,
        }
    }

    pub fn pixel(&self, at: Point) -> BinaryColor {
        self.pixels[at.y as usize * DISPLAY_WIDTH_PX as usize + at.x as usize]
    }
}

impl OriginDimensions for TestPanel {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH_PX as u32, DISPLAY_HEIGHT_PX as u32)
    }
}

impl DrawTarget for TestPanel {
    type Color = BinaryColor;
    type Error = PanelFault;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        if self.fail_writes {
            return Err(PanelFault);
        }
        for Pixel(at, color) in pixels {
            if self.bounding_box().contains(at) {
                self.pixels[at.y as usize * DISPLAY_WIDTH_PX as usize + at.x as usize] = color;
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.fills += 1;
        self.last_fill = Some(*area);
        self.draw_iter(
            area.points()
                .zip(colors)
                .map(|(pos, color)| Pixel(pos, color)),
        )
    }
}

impl DisplayDevice for TestPanel {
    fn init(&mut self) -> Result<(), Self::Error> {
        if self.fail_init {
            return Err(PanelFault);
        }
        self.initialised = true;
        Ok(())
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        self.presents += 1;
        Ok(())
    }
}

/// Receiver that hands out a scripted sequence of codes, one per decode.
pub struct ScriptedReceiver {
    codes: VecDeque<u32>,
    latched: Option<u32>,
    pub enabled: bool,
    pub polls: usize,
}

impl ScriptedReceiver {
    pub fn new(codes: &[u32]) -> Self {
        Self {
            codes: codes.iter().copied().collect(),
            latched: None,
            enabled: false,
            polls: 0,
        }
    }

    pub fn push(&mut self, code: u32) {
        self.codes.push_back(code);
    }
}

impl InputSource for ScriptedReceiver {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn decode(&mut self) -> Option<u32> {
        self.polls += 1;
        if self.latched.is_none() {
            self.latched = self.codes.pop_front();
        }
        self.latched
    }

    fn resume(&mut self) {
        self.latched = None;
    }
}

/// One recorded canvas call.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    Clip(Option<Rectangle>),
    TextColor(BinaryColor),
    Cursor(Point),
    Print(String),
    Rect(Rectangle, BinaryColor),
    Fill(Rectangle, BinaryColor),
    Line(Point, Point, BinaryColor),
    Clear,
}

/// Canvas that records every call instead of drawing.
#[derive(Default)]
pub struct RecordingCanvas {
    pub ops: Vec<CanvasOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything printed, in order.
    pub fn printed(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::Print(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn set_clip(&mut self, area: Option<Rectangle>) {
        self.ops.push(CanvasOp::Clip(area));
    }

    fn set_text_color(&mut self, color: BinaryColor) {
        self.ops.push(CanvasOp::TextColor(color));
    }

    fn set_cursor(&mut self, at: Point) {
        self.ops.push(CanvasOp::Cursor(at));
    }

    fn print(&mut self, text: &str) {
        self.ops.push(CanvasOp::Print(String::from(text)));
    }

    fn draw_rect(&mut self, area: Rectangle, color: BinaryColor) {
        self.ops.push(CanvasOp::Rect(area, color));
    }

    fn fill_rect(&mut self, area: Rectangle, color: BinaryColor) {
        self.ops.push(CanvasOp::Fill(area, color));
    }

    fn draw_line(&mut self, from: Point, to: Point, color: BinaryColor) {
        self.ops.push(CanvasOp::Line(from, to, color));
    }

    fn clear(&mut self) {
        self.ops.push(CanvasOp::Clear);
    }
}
