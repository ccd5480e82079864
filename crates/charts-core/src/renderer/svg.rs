// File: crates/charts-core/src/renderer/svg.rs
// Summary: SVG document writer; each path becomes a <path>, each label a <text>.

use std::f64::consts::PI;
use std::fmt::Write as _;

use tracing::trace;

use super::{arc_endpoints, OutputType, PaintMode, Path, PathCommand, Renderer};
use crate::error::Result;
use crate::style::{DrawStyle, TextStyle};

#[derive(Debug)]
pub struct SvgRenderer {
    width: i32,
    height: i32,
    content: Vec<String>,
}

impl SvgRenderer {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height, content: Vec::new() }
    }

    /// Number of elements written so far.
    pub fn element_count(&self) -> usize {
        self.content.len()
    }

    pub fn render(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n  {}\n</svg>",
            self.content.join("\n  "),
            w = self.width,
            h = self.height,
        )
    }
}

fn num(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        return format!("{}", v.round() as i64);
    }
    let s = format!("{v:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn path_data(path: &Path) -> String {
    let mut d = String::new();
    let mut has_point = false;
    for cmd in path.commands() {
        if !d.is_empty() {
            d.push(' ');
        }
        match *cmd {
            PathCommand::MoveTo { x, y } => {
                let _ = write!(d, "M {} {}", num(x), num(y));
                has_point = true;
            }
            PathCommand::LineTo { x, y } => {
                let op = if has_point { 'L' } else { 'M' };
                let _ = write!(d, "{op} {} {}", num(x), num(y));
                has_point = true;
            }
            PathCommand::QuadTo { cx, cy, x, y } => {
                let _ = write!(d, "Q {},{} {},{}", num(cx), num(cy), num(x), num(y));
                has_point = true;
            }
            PathCommand::ArcTo { cx, cy, rx, ry, start, delta } => {
                let ((sx, sy), _) = arc_endpoints(cx, cy, rx, ry, start, delta);
                let op = if has_point { 'L' } else { 'M' };
                let _ = write!(d, "{op} {} {}", num(sx), num(sy));
                // A full turn has coincident endpoints, so it is written as two halves.
                let segments = if delta.abs() >= 2.0 * PI - 1e-6 { 2 } else { 1 };
                let step = delta / f64::from(segments);
                for i in 0..segments {
                    let seg_start = start + step * f64::from(i);
                    let (_, (ex, ey)) = arc_endpoints(cx, cy, rx, ry, seg_start, step);
                    let large = u8::from(step.abs() > PI);
                    let sweep = u8::from(step > 0.0);
                    let _ = write!(d, " A {} {} 0 {large} {sweep} {} {}", num(rx), num(ry), num(ex), num(ey));
                }
                has_point = true;
            }
            PathCommand::Circle { cx, cy, r } => {
                let _ = write!(
                    d,
                    "M {x0} {y} A {r} {r} 0 1 1 {x1} {y} A {r} {r} 0 1 1 {x0} {y} Z",
                    x0 = num(cx + r),
                    x1 = num(cx - r),
                    y = num(cy),
                    r = num(r),
                );
                has_point = true;
            }
            PathCommand::Close => d.push('Z'),
        }
    }
    d
}

fn path_style(style: &DrawStyle, mode: PaintMode) -> String {
    let stroke = matches!(mode, PaintMode::Stroke | PaintMode::FillStroke) && style.has_stroke();
    let fill = matches!(mode, PaintMode::Fill | PaintMode::FillStroke) && style.has_fill();
    let mut css = String::new();
    if stroke {
        let _ = write!(css, "stroke-width:{};stroke:{}", num(style.stroke_width), style.stroke_color);
        if !style.stroke_dash_array.is_empty() {
            let dash: Vec<String> = style.stroke_dash_array.iter().map(|v| num(*v)).collect();
            let _ = write!(css, ";stroke-dasharray:{}", dash.join(","));
        }
    } else {
        css.push_str("stroke:none");
    }
    if fill {
        let _ = write!(css, ";fill:{}", style.fill_color);
    } else {
        css.push_str(";fill:none");
    }
    css
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

impl Renderer for SvgRenderer {
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
        if path.is_empty() {
            return;
        }
        let visible = match mode {
            PaintMode::Stroke => style.has_stroke(),
            PaintMode::Fill => style.has_fill(),
            PaintMode::FillStroke => style.has_stroke() || style.has_fill(),
        };
        if !visible {
            trace!("skipping invisible path");
            return;
        }
        self.content.push(format!("<path d=\"{}\" style=\"{}\"/>", path_data(path), path_style(style, mode)));
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        if text.is_empty() {
            return;
        }
        let transform = if style.rotation != 0.0 {
            format!(" transform=\"rotate({},{},{})\"", num(style.rotation.to_degrees()), num(x), num(y))
        } else {
            String::new()
        };
        self.content.push(format!(
            "<text x=\"{}\" y=\"{}\" style=\"stroke:none;fill:{};font-size:{}px;font-family:'{}'\"{}>{}</text>",
            num(x),
            num(y),
            style.font_color,
            num(style.font_size),
            escape_xml(style.font.family()),
            transform,
            escape_xml(text),
        ));
    }

    fn bytes(&mut self) -> Result<Vec<u8>> {
        Ok(self.render().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    fn stroke() -> DrawStyle {
        DrawStyle {
            stroke_color: Color::rgb(1, 2, 3),
            stroke_width: 1.0,
            stroke_dash_array: vec![4.0, 2.0],
            fill_color: Color::TRANSPARENT,
        }
    }

    #[test]
    fn writes_dashed_stroke_path() {
        let mut svg = SvgRenderer::new(100, 50);
        let mut path = Path::new();
        path.move_to(0.0, 10.0);
        path.line_to(50.5, 10.0);
        svg.draw_path(&path, &stroke(), PaintMode::Stroke);
        let doc = svg.render();
        assert!(doc.contains("<path d=\"M 0 10 L 50.5 10\" style=\"stroke-width:1;stroke:rgb(1,2,3);stroke-dasharray:4,2;fill:none\"/>"));
        assert!(doc.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100\" height=\"50\""));
    }

    #[test]
    fn skips_invisible_paths() {
        let mut svg = SvgRenderer::new(10, 10);
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.line_to(5.0, 5.0);
        svg.draw_path(&path, &stroke(), PaintMode::Fill);
        assert_eq!(svg.element_count(), 0);
    }

    #[test]
    fn arc_starts_with_line_from_current_point() {
        let mut path = Path::new();
        path.move_to(50.0, 50.0);
        path.arc_to(50.0, 50.0, 10.0, 10.0, 0.0, PI / 2.0);
        path.close();
        assert_eq!(path_data(&path), "M 50 50 L 60 50 A 10 10 0 0 1 50 60 Z");
    }

    #[test]
    fn escapes_text() {
        assert_eq!(escape_xml("a<b & 'c'"), "a&lt;b &amp; &apos;c&apos;");
    }
}
