// File: crates/charts-core/src/renderer/mod.rs
// Summary: Low-level drawing capability (paths, text, measurement, encoding) that the
// painter drives; SVG and Skia raster implementations live in the submodules.

use serde::Deserialize;

use crate::error::Result;
use crate::geometry::Rect;
use crate::style::{DrawStyle, TextStyle};

mod raster;
mod svg;

pub use raster::RasterRenderer;
pub use svg::SvgRenderer;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    #[default]
    Svg,
    Png,
}

/// How a finished path is painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintMode {
    Stroke,
    Fill,
    FillStroke,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadTo { cx: f64, cy: f64, x: f64, y: f64 },
    /// Elliptical arc around `(cx, cy)`. Angles are radians measured clockwise from the
    /// positive x axis (y grows downward). A line joins the current point to the arc
    /// start; an empty path moves there instead.
    ArcTo { cx: f64, cy: f64, rx: f64, ry: f64, start: f64, delta: f64 },
    /// A closed circle, independent of the current point.
    Circle { cx: f64, cy: f64, r: f64 },
    Close,
}

/// Path in absolute canvas coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::MoveTo { x, y });
    }
    pub fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::LineTo { x, y });
    }
    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.commands.push(PathCommand::QuadTo { cx, cy, x, y });
    }
    pub fn arc_to(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, start: f64, delta: f64) {
        self.commands.push(PathCommand::ArcTo { cx, cy, rx, ry, start, delta });
    }
    pub fn circle(&mut self, cx: f64, cy: f64, r: f64) {
        self.commands.push(PathCommand::Circle { cx, cy, r });
    }
    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

/// Start and end points of an arc command.
pub(crate) fn arc_endpoints(cx: f64, cy: f64, rx: f64, ry: f64, start: f64, delta: f64) -> ((f64, f64), (f64, f64)) {
    let end = start + delta;
    (
        (cx + rx * start.cos(), cy + ry * start.sin()),
        (cx + rx * end.cos(), cy + ry * end.sin()),
    )
}

/// Drawing surface. Styles are explicit arguments of each call; a renderer keeps no
/// cursor or style state between calls.
pub trait Renderer {
    fn output(&self) -> OutputType;
    fn width(&self) -> i32;
    fn height(&self) -> i32;

    fn draw_path(&mut self, path: &Path, style: &DrawStyle, mode: PaintMode);

    /// Draws `text` with its baseline-left corner at `(x, y)`, rotated around that
    /// point by `style.rotation`.
    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle);

    fn measure_text(&self, text: &str, style: &TextStyle) -> Rect {
        style.measure(text)
    }

    /// Encoded document (SVG text or PNG bytes).
    fn bytes(&mut self) -> Result<Vec<u8>>;
}
