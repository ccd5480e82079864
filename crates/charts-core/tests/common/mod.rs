// File: crates/charts-core/tests/common/mod.rs
// Purpose: Shared helpers for integration tests.
// - `RecordingRenderer` keeps every path and text call so tests can assert on absolute
//   coordinates without parsing SVG.
// - `recording_painter` wraps one in a painter with the light theme.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use charts_core::renderer::{OutputType, PaintMode, Path, PathCommand, Renderer};
use charts_core::style::{Color, DrawStyle, TextStyle};
use charts_core::{Painter, Rect, Registry};

#[derive(Clone, Debug)]
pub struct RecordedPath {
    pub commands: Vec<PathCommand>,
    pub style: DrawStyle,
    pub mode: PaintMode,
}

impl RecordedPath {
    /// Bounding box of the move/line points.
    pub fn bounds(&self) -> Rect {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => {
                    xs.push(x as i32);
                    ys.push(y as i32);
                }
                _ => {}
            }
        }
        let min = |v: &[i32]| v.iter().copied().min().unwrap_or(0);
        let max = |v: &[i32]| v.iter().copied().max().unwrap_or(0);
        Rect::from_ltrb(min(&xs), min(&ys), max(&xs), max(&ys))
    }
}

#[derive(Clone, Debug)]
pub struct RecordedText {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub style: TextStyle,
}

pub struct RecordingRenderer {
    width: i32,
    height: i32,
    pub paths: Vec<RecordedPath>,
    pub texts: Vec<RecordedText>,
}

impl RecordingRenderer {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height, paths: Vec::new(), texts: Vec::new() }
    }

    /// Paths filled with `color`.
    pub fn filled_with(&self, color: Color) -> Vec<&RecordedPath> {
        self.paths.iter().filter(|p| p.mode != PaintMode::Stroke && p.style.fill_color == color).collect()
    }
}

impl Renderer for RecordingRenderer {
    fn output(&self) -> OutputType {
        OutputType::Svg
    }
    fn width(&self) -> i32 {
        self.width
    }
    fn height(&self) -> i32 {
        self.height
    }
    fn draw_path(&mut self, path: &Path, style: &DrawStyle, mode: PaintMode) {
        self.paths.push(RecordedPath { commands: path.commands().to_vec(), style: style.clone(), mode });
    }
    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.texts.push(RecordedText { text: text.to_string(), x, y, style: style.clone() });
    }
    fn bytes(&mut self) -> charts_core::Result<Vec<u8>> {
        Ok(Vec::new())
    }
}

pub fn recording_painter(width: i32, height: i32) -> (Painter, Rc<RefCell<RecordingRenderer>>) {
    let registry = Registry::new();
    let recorder = Rc::new(RefCell::new(RecordingRenderer::new(width, height)));
    let renderer: Rc<RefCell<dyn Renderer>> = recorder.clone();
    let painter = Painter::with_renderer(renderer, registry.theme("light"), registry.default_font());
    (painter, recorder)
}

pub fn months() -> Vec<String> {
    ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
        .iter()
        .map(|m| m.to_string())
        .collect()
}
