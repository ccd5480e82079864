// File: crates/charts-core/src/painter.rs
// Summary: Nested coordinate-space drawing handle. Every coordinate a component passes is
// local to the painter's rect and is translated before reaching the shared renderer.

use std::cell::RefCell;
use std::f64::consts::PI;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::{ChartError, Result};
use crate::geometry::{Align, Orient, Point, Position, Rect};
use crate::renderer::{OutputType, PaintMode, Path, RasterRenderer, Renderer, SvgRenderer};
use crate::style::{Color, Style, TextStyle};
use crate::text::{wrap_words, FontFace};
use crate::theme::Theme;
use crate::util::{auto_divide, auto_divide_spans, polygon_points};

/// Extra pixels between wrapped lines of `text_fit`.
const TEXT_LINE_SPACING: i32 = 5;

pub struct PainterOptions {
    pub output: OutputType,
    pub width: i32,
    pub height: i32,
    pub font: Arc<FontFace>,
    pub theme: Arc<Theme>,
}

/// Shaping options for [`Painter::child`]. `Padding` and `Box` are alternatives: the
/// later one in the option list wins.
#[derive(Clone, Debug)]
pub enum PainterOption {
    /// Shrinks the parent rect by the given insets.
    Padding(Rect),
    /// Replaces the rect with an absolute canvas rectangle; a zero rect is ignored.
    Box(Rect),
    Theme(Arc<Theme>),
    Font(Arc<FontFace>),
    /// Sets the drawing style of the child.
    Style(Style),
}

#[derive(Clone, Debug, Default)]
pub struct TicksOption {
    /// Index of the first division that gets a tick.
    pub first: usize,
    pub length: i32,
    pub orient: Orient,
    /// Number of divisions.
    pub count: usize,
    /// Every `unit`-th division gets a tick.
    pub unit: usize,
}

#[derive(Clone, Debug, Default)]
pub struct MultiTextOption {
    pub text_list: Vec<String>,
    pub orient: Orient,
    /// Show every `unit`-th label; 0 shows them all.
    pub unit: usize,
    /// `Left`/`Top` puts labels on the division lines, anything else centers them
    /// between two lines.
    pub position: Option<Position>,
    pub align: Align,
    /// Radians.
    pub text_rotation: f64,
    pub offset: Point,
    pub first: usize,
}

#[derive(Clone, Debug, Default)]
pub struct GridOption {
    pub column: usize,
    /// Relative column widths; overrides `column` when not empty.
    pub column_spans: Vec<usize>,
    pub row: usize,
    pub ignore_column_lines: Vec<usize>,
    pub ignore_row_lines: Vec<usize>,
}

#[derive(Clone)]
pub struct Painter {
    renderer: Rc<RefCell<dyn Renderer>>,
    rect: Rect,
    style: Style,
    previous_style: Style,
    theme: Arc<Theme>,
    font: Arc<FontFace>,
    path: Path,
}

impl fmt::Debug for Painter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Painter")
            .field("rect", &self.rect)
            .field("style", &self.style)
            .field("theme", &self.theme.name)
            .field("font", &self.font.family())
            .finish()
    }
}

impl Painter {
    pub fn new(opts: PainterOptions) -> Result<Self> {
        if opts.width <= 0 || opts.height <= 0 {
            return Err(ChartError::InvalidSize { width: opts.width, height: opts.height });
        }
        let renderer: Rc<RefCell<dyn Renderer>> = match opts.output {
            OutputType::Svg => Rc::new(RefCell::new(SvgRenderer::new(opts.width, opts.height))),
            OutputType::Png => Rc::new(RefCell::new(RasterRenderer::new(opts.width, opts.height)?)),
        };
        Ok(Self::with_renderer(renderer, opts.theme, opts.font))
    }

    /// Painter over a caller-supplied renderer, covering its whole canvas.
    pub fn with_renderer(renderer: Rc<RefCell<dyn Renderer>>, theme: Arc<Theme>, font: Arc<FontFace>) -> Self {
        let (width, height) = {
            let r = renderer.borrow();
            (r.width(), r.height())
        };
        Self {
            renderer,
            rect: Rect::from_ltwh(0, 0, width, height),
            style: Style::default(),
            previous_style: Style::default(),
            theme,
            font,
            path: Path::new(),
        }
    }

    pub fn child(&self, opts: &[PainterOption]) -> Painter {
        let mut child = self.clone();
        child.path = Path::new();
        for opt in opts {
            match opt {
                PainterOption::Padding(padding) => child.rect = child.rect.padded(padding),
                PainterOption::Box(rect) => {
                    if !rect.is_zero() {
                        child.rect = *rect;
                    }
                }
                PainterOption::Theme(theme) => child.theme = theme.clone(),
                PainterOption::Font(font) => child.font = font.clone(),
                PainterOption::Style(style) => {
                    child.set_drawing_style(style.clone());
                }
            }
        }
        child
    }

    /// Shorthand for a padding-only child.
    pub fn padded(&self, padding: Rect) -> Painter {
        self.child(&[PainterOption::Padding(padding)])
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }
    pub fn width(&self) -> i32 {
        self.rect.width()
    }
    pub fn height(&self) -> i32 {
        self.rect.height()
    }
    pub fn theme(&self) -> &Arc<Theme> {
        &self.theme
    }
    pub fn font(&self) -> &Arc<FontFace> {
        &self.font
    }
    pub fn style(&self) -> &Style {
        &self.style
    }
    pub fn output(&self) -> OutputType {
        self.renderer.borrow().output()
    }
    pub fn renderer(&self) -> Rc<RefCell<dyn Renderer>> {
        self.renderer.clone()
    }

    // ---- style ----------------------------------------------------------------

    pub fn set_style(&mut self, style: Style) -> &mut Self {
        self.previous_style = std::mem::replace(&mut self.style, style);
        self
    }

    pub fn set_drawing_style(&mut self, style: Style) -> &mut Self {
        self.previous_style = self.style.clone();
        self.style.replace_drawing(&style);
        self
    }

    pub fn set_text_style(&mut self, style: Style) -> &mut Self {
        self.previous_style = self.style.clone();
        self.style.replace_text(&style);
        self
    }

    /// Merges the set drawing fields of `style` onto the current style.
    pub fn override_drawing_style(&mut self, style: Style) -> &mut Self {
        self.previous_style = self.style.clone();
        self.style.merge_drawing(&style);
        self
    }

    /// Merges the set text fields of `style` onto the current style.
    pub fn override_text_style(&mut self, style: Style) -> &mut Self {
        self.previous_style = self.style.clone();
        self.style.merge_text(&style);
        self
    }

    pub fn restore_style(&mut self) -> &mut Self {
        self.style = self.previous_style.clone();
        self
    }

    pub fn set_text_rotation(&mut self, radians: f64) -> &mut Self {
        self.style.text_rotation = Some(radians);
        self
    }

    pub fn clear_text_rotation(&mut self) -> &mut Self {
        self.style.text_rotation = None;
        self
    }

    fn text_style(&self) -> TextStyle {
        self.style.resolve_text(&self.font, self.theme.font_size, self.theme.text_color)
    }

    // ---- path -----------------------------------------------------------------

    fn abs(&self, x: i32, y: i32) -> (f64, f64) {
        (f64::from(x + self.rect.left), f64::from(y + self.rect.top))
    }

    pub fn move_to(&mut self, x: i32, y: i32) -> &mut Self {
        let (x, y) = self.abs(x, y);
        self.path.move_to(x, y);
        self
    }

    pub fn line_to(&mut self, x: i32, y: i32) -> &mut Self {
        let (x, y) = self.abs(x, y);
        self.path.line_to(x, y);
        self
    }

    pub fn quad_curve_to(&mut self, cx: i32, cy: i32, x: i32, y: i32) -> &mut Self {
        let (cx, cy) = self.abs(cx, cy);
        let (x, y) = self.abs(x, y);
        self.path.quad_to(cx, cy, x, y);
        self
    }

    /// Arc around `(cx, cy)` from `start` sweeping `delta` radians (clockwise positive).
    pub fn arc_to(&mut self, cx: i32, cy: i32, rx: f64, ry: f64, start: f64, delta: f64) -> &mut Self {
        let (cx, cy) = self.abs(cx, cy);
        self.path.arc_to(cx, cy, rx, ry, start, delta);
        self
    }

    pub fn circle(&mut self, radius: f64, x: i32, y: i32) -> &mut Self {
        let (x, y) = self.abs(x, y);
        self.path.circle(x, y, radius);
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.path.close();
        self
    }

    fn flush(&mut self, mode: PaintMode) -> &mut Self {
        if !self.path.is_empty() {
            let style = self.style.resolve_drawing();
            self.renderer.borrow_mut().draw_path(&self.path, &style, mode);
            self.path.clear();
        }
        self
    }

    pub fn stroke(&mut self) -> &mut Self {
        self.flush(PaintMode::Stroke)
    }
    pub fn fill(&mut self) -> &mut Self {
        self.flush(PaintMode::Fill)
    }
    pub fn fill_stroke(&mut self) -> &mut Self {
        self.flush(PaintMode::FillStroke)
    }

    // ---- shapes ---------------------------------------------------------------

    fn trace_points(&mut self, points: &[Point]) {
        for (index, point) in points.iter().enumerate() {
            if index == 0 {
                self.move_to(point.x, point.y);
            } else {
                self.line_to(point.x, point.y);
            }
        }
    }

    pub fn line_stroke(&mut self, points: &[Point]) -> &mut Self {
        self.trace_points(points);
        self.stroke()
    }

    /// Polyline smoothed with quadratic curves: each interior point is the control
    /// point of a curve joining the midpoints of its two segments.
    pub fn smooth_line_stroke(&mut self, points: &[Point]) -> &mut Self {
        let Some(first) = points.first() else {
            return self;
        };
        let mid = |a: Point, b: Point| Point::new((a.x + b.x) / 2, (a.y + b.y) / 2);
        self.move_to(first.x, first.y);
        if points.len() > 2 {
            let m = mid(points[0], points[1]);
            self.line_to(m.x, m.y);
            for i in 1..points.len() - 1 {
                let m = mid(points[i], points[i + 1]);
                self.quad_curve_to(points[i].x, points[i].y, m.x, m.y);
            }
        }
        if let Some(last) = points.last().filter(|_| points.len() > 1) {
            self.line_to(last.x, last.y);
        }
        self.stroke()
    }

    pub fn fill_area(&mut self, points: &[Point]) -> &mut Self {
        self.trace_points(points);
        self.fill()
    }

    pub fn dots(&mut self, points: &[Point], radius: f64) -> &mut Self {
        for p in points {
            self.circle(radius, p.x, p.y);
        }
        self.fill_stroke()
    }

    pub fn rect(&mut self, rect: Rect) -> &mut Self {
        self.move_to(rect.left, rect.top)
            .line_to(rect.right, rect.top)
            .line_to(rect.right, rect.bottom)
            .line_to(rect.left, rect.bottom)
            .line_to(rect.left, rect.top)
            .fill_stroke()
    }

    /// Rectangle with arc corners. The radius is clamped to half the rectangle's
    /// smaller side.
    pub fn rounded_rect(&mut self, rect: Rect, radius: i32) -> &mut Self {
        let radius = radius.min(rect.width() / 2).min(rect.height() / 2).max(0);
        if radius == 0 {
            return self.rect(rect);
        }
        let r = f64::from(radius);
        self.move_to(rect.left + radius, rect.top)
            .line_to(rect.right - radius, rect.top)
            .arc_to(rect.right - radius, rect.top + radius, r, r, -PI / 2.0, PI / 2.0)
            .line_to(rect.right, rect.bottom - radius)
            .arc_to(rect.right - radius, rect.bottom - radius, r, r, 0.0, PI / 2.0)
            .line_to(rect.left + radius, rect.bottom)
            .arc_to(rect.left + radius, rect.bottom - radius, r, r, PI / 2.0, PI / 2.0)
            .line_to(rect.left, rect.top + radius)
            .arc_to(rect.left + radius, rect.top + radius, r, r, PI, PI / 2.0)
            .close()
            .fill_stroke()
    }

    /// Map-pin marker whose head is centered at `(x, y - width / 4)`.
    pub fn pin(&mut self, x: i32, y: i32, width: i32) -> &mut Self {
        let r = f64::from(width) / 2.0;
        let y = y - width / 4;
        let angle = 15f64.to_radians();
        self.arc_to(x, y, r, r, PI / 2.0 + angle, 2.0 * PI - 2.0 * angle)
            .line_to(x, y)
            .close()
            .fill_stroke();
        let ri = r as i32;
        self.move_to(x - ri, y)
            .quad_curve_to(x, y + (r * 2.5) as i32, x + ri, y)
            .close()
            .fill()
    }

    fn arrow(&mut self, x: i32, y: i32, width: i32, height: i32, direction: Position) -> &mut Self {
        let half_width = width >> 1;
        let half_height = height >> 1;
        match direction {
            Position::Top | Position::Bottom => {
                let x0 = x - half_width;
                let x1 = x0 + width;
                let mut dy = -height / 3;
                let (mut y0, mut y1) = (y, y - height);
                if direction == Position::Bottom {
                    y0 = y - height;
                    y1 = y;
                    dy *= 2;
                }
                self.move_to(x0, y0)
                    .line_to(x0 + half_width, y1)
                    .line_to(x1, y0)
                    .line_to(x0 + half_width, y + dy)
                    .line_to(x0, y0);
            }
            _ => {
                let mut x0 = x + width;
                let mut x1 = x0 - width;
                let y0 = y - half_height;
                let mut dx = -width / 3;
                if direction == Position::Right {
                    x0 = x - width;
                    dx = -dx;
                    x1 = x0 + width;
                }
                self.move_to(x0, y0)
                    .line_to(x1, y0 + half_height)
                    .line_to(x0, y0 + height)
                    .line_to(x0 + dx, y0 + half_height)
                    .line_to(x0, y0);
            }
        }
        self.fill_stroke()
    }

    pub fn arrow_left(&mut self, x: i32, y: i32, width: i32, height: i32) -> &mut Self {
        self.arrow(x, y, width, height, Position::Left)
    }
    pub fn arrow_right(&mut self, x: i32, y: i32, width: i32, height: i32) -> &mut Self {
        self.arrow(x, y, width, height, Position::Right)
    }
    pub fn arrow_top(&mut self, x: i32, y: i32, width: i32, height: i32) -> &mut Self {
        self.arrow(x, y, width, height, Position::Top)
    }
    pub fn arrow_bottom(&mut self, x: i32, y: i32, width: i32, height: i32) -> &mut Self {
        self.arrow(x, y, width, height, Position::Bottom)
    }

    /// Dot at the start, a line with the current (dashed) stroke, and a solid right
    /// arrow at `x + width`.
    pub fn mark_line(&mut self, x: i32, y: i32, width: i32) -> &mut Self {
        let arrow_width = 16;
        let arrow_height = 10;
        let radius = 3;
        let end_x = x + width;
        self.circle(f64::from(radius), x + radius, y).fill();
        self.move_to(x + radius * 3, y).line_to(end_x - arrow_width, y).stroke();
        let dash = self.style.stroke_dash_array.replace(Vec::new());
        self.arrow_right(end_x, y, arrow_width, arrow_height);
        self.style.stroke_dash_array = dash;
        self
    }

    pub fn polygon(&mut self, center: Point, radius: f64, sides: usize) -> &mut Self {
        let points = polygon_points(center, radius, sides);
        self.trace_points(&points);
        if let Some(first) = points.first() {
            self.line_to(first.x, first.y);
        }
        self.stroke()
    }

    /// Legend icon: a thick line with a dot in the middle, vertically centered on a
    /// text line whose baseline sits at `rect.top`.
    pub fn legend_line_dot(&mut self, rect: Rect) -> &mut Self {
        let stroke_width = 3;
        let dot_radius = 5.0;
        let center = ((rect.height() - stroke_width) >> 1) - 1;
        let y = rect.top - center;
        let saved = self.style.stroke_width.replace(f64::from(stroke_width));
        self.move_to(rect.left, y).line_to(rect.right, y).stroke();
        self.circle(dot_radius, rect.left + (rect.width() >> 1), y).fill_stroke();
        self.style.stroke_width = saved;
        self
    }

    /// Fills `width x height` with `color`, from this painter's origin when `inside` is
    /// set, otherwise from the canvas origin.
    pub fn set_background(&mut self, width: i32, height: i32, color: Color, inside: bool) -> &mut Self {
        let saved = self.style.clone();
        self.style.replace_drawing(&Style::fill(color));
        if inside {
            self.rect(Rect::from_ltwh(0, 0, width, height));
        } else {
            let (w, h) = (f64::from(width), f64::from(height));
            self.path.move_to(0.0, 0.0);
            self.path.line_to(w, 0.0);
            self.path.line_to(w, h);
            self.path.line_to(0.0, h);
            self.path.line_to(0.0, 0.0);
            self.fill_stroke();
        }
        self.style = saved;
        self
    }

    pub fn ticks(&mut self, opt: &TicksOption) -> &mut Self {
        if opt.count == 0 || opt.length <= 0 {
            return self;
        }
        let unit = opt.unit.max(1);
        let vertical = opt.orient == Orient::Vertical;
        let values = if vertical { auto_divide(self.height(), opt.count) } else { auto_divide(self.width(), opt.count) };
        for (index, value) in values.into_iter().enumerate() {
            if index < opt.first || (index - opt.first) % unit != 0 {
                continue;
            }
            if vertical {
                self.line_stroke(&[Point::new(0, value), Point::new(opt.length, value)]);
            } else {
                self.line_stroke(&[Point::new(value, opt.length), Point::new(value, 0)]);
            }
        }
        self
    }

    /// Distributes labels along the painter's width (or height when vertical).
    pub fn multi_text(&mut self, opt: &MultiTextOption) -> &mut Self {
        if opt.text_list.is_empty() {
            return self;
        }
        let mut count = opt.text_list.len();
        let mut centered = true;
        let mut show_index = opt.unit / 2;
        if matches!(opt.position, Some(Position::Left) | Some(Position::Top)) {
            centered = false;
            count -= 1;
            show_index = 0;
        }
        let vertical = opt.orient == Orient::Vertical;
        let (width, height) = (self.width(), self.height());
        let values = if vertical { auto_divide(height, count) } else { auto_divide(width, count) };
        let rotated = opt.text_rotation != 0.0;
        for (index, text) in opt.text_list.iter().enumerate() {
            if index < opt.first {
                continue;
            }
            if opt.unit != 0 && (index - opt.first) % opt.unit != show_index {
                continue;
            }
            let Some(&line) = values.get(index) else {
                continue;
            };
            if rotated {
                self.set_text_rotation(opt.text_rotation);
            }
            let b = self.measure_text(text);
            let start = match values.get(index + 1) {
                Some(next) if centered => (line + next) >> 1,
                _ => line,
            };
            let (mut x, mut y);
            if vertical {
                y = start + (b.height() >> 1);
                x = match opt.align {
                    Align::Right => width - b.width(),
                    Align::Center => (width - b.width()) >> 1,
                    Align::Left => 0,
                };
            } else {
                x = start - (b.width() >> 1);
                y = 0;
            }
            x += opt.offset.x;
            y += opt.offset.y;
            self.text(text, x, y);
        }
        if rotated {
            self.clear_text_rotation();
        }
        self
    }

    pub fn grid(&mut self, opt: &GridOption) -> &mut Self {
        let (width, height) = (self.width(), self.height());
        let columns: usize = if opt.column_spans.is_empty() { opt.column } else { opt.column_spans.iter().sum() };
        if columns > 0 {
            let values = if opt.column_spans.is_empty() {
                auto_divide(width, columns)
            } else {
                auto_divide_spans(width, &opt.column_spans)
            };
            for (index, x) in values.into_iter().enumerate() {
                if !opt.ignore_column_lines.contains(&index) {
                    self.line_stroke(&[Point::new(x, 0), Point::new(x, height)]);
                }
            }
        }
        if opt.row > 0 {
            for (index, y) in auto_divide(height, opt.row).into_iter().enumerate() {
                if !opt.ignore_row_lines.contains(&index) {
                    self.line_stroke(&[Point::new(0, y), Point::new(width, y)]);
                }
            }
        }
        self
    }

    // ---- text -----------------------------------------------------------------

    /// Draws `text` with its baseline-left corner at `(x, y)`.
    pub fn text(&mut self, text: &str, x: i32, y: i32) -> &mut Self {
        let style = self.text_style();
        let (x, y) = self.abs(x, y);
        self.renderer.borrow_mut().draw_text(text, x, y, &style);
        self
    }

    pub fn text_rotation(&mut self, text: &str, x: i32, y: i32, radians: f64) -> &mut Self {
        let saved = self.style.text_rotation.replace(radians);
        self.text(text, x, y);
        self.style.text_rotation = saved;
        self
    }

    fn fit_lines(&self, text: &str, width: i32) -> Vec<String> {
        let style = self.text_style();
        let renderer = self.renderer.borrow();
        wrap_words(text, width, |s| renderer.measure_text(s, &style).width())
    }

    /// Box `text_fit` would occupy, without drawing.
    pub fn measure_text_fit(&self, text: &str, width: i32) -> Rect {
        let lines = self.fit_lines(text, width);
        let mut output = Rect::ZERO;
        let count = lines.len();
        for (index, line) in lines.iter().enumerate() {
            let b = self.measure_text(line);
            output.right = output.right.max(b.width());
            output.bottom += b.height();
            if index + 1 < count {
                output.bottom += TEXT_LINE_SPACING;
            }
        }
        output
    }

    /// Word-wraps `text` into `width` and draws it starting at baseline `y`; returns the
    /// occupied box.
    pub fn text_fit(&mut self, text: &str, x: i32, y: i32, width: i32, align: Align) -> Rect {
        let lines = self.fit_lines(text, width);
        let mut output = Rect::ZERO;
        let count = lines.len();
        for (index, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let b = self.measure_text(line);
            let x0 = match align {
                Align::Right => x + width - b.width(),
                Align::Center => x + ((width - b.width()) >> 1),
                Align::Left => x,
            };
            self.text(line, x0, y + output.height());
            output.right = output.right.max(b.width());
            output.bottom += b.height();
            if index + 1 < count {
                output.bottom += TEXT_LINE_SPACING;
            }
        }
        output
    }

    pub fn measure_text(&self, text: &str) -> Rect {
        let style = self.text_style();
        self.renderer.borrow().measure_text(text, &style)
    }

    pub fn measure_text_max_width_height<S: AsRef<str>>(&self, texts: &[S]) -> (i32, i32) {
        texts.iter().fold((0, 0), |(w, h), text| {
            let b = self.measure_text(text.as_ref());
            (w.max(b.width()), h.max(b.height()))
        })
    }

    pub fn bytes(&self) -> Result<Vec<u8>> {
        self.renderer.borrow_mut().bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    fn painter(width: i32, height: i32) -> Painter {
        let registry = Registry::new();
        Painter::new(PainterOptions {
            output: OutputType::Svg,
            width,
            height,
            font: registry.default_font(),
            theme: registry.theme("light"),
        })
        .unwrap()
    }

    fn svg(p: &Painter) -> String {
        String::from_utf8(p.bytes().unwrap()).unwrap()
    }

    #[test]
    fn rejects_empty_canvas() {
        let registry = Registry::new();
        let err = Painter::new(PainterOptions {
            output: OutputType::Svg,
            width: 0,
            height: 300,
            font: registry.default_font(),
            theme: registry.theme("light"),
        })
        .unwrap_err();
        assert!(matches!(err, ChartError::InvalidSize { width: 0, height: 300 }));
    }

    #[test]
    fn nested_padding_translates_coordinates() {
        let p = painter(400, 300);
        let mut child = p.padded(Rect::from_ltrb(5, 10, 0, 0)).padded(Rect::from_ltrb(10, 5, 0, 0));
        assert_eq!(child.rect(), Rect::from_ltrb(15, 15, 400, 300));
        child
            .override_drawing_style(Style::stroke(Color::BLACK, 1.0))
            .line_stroke(&[Point::new(0, 0), Point::new(10, 0)]);
        assert!(svg(&p).contains("M 15 15 L 25 15"));
    }

    #[test]
    fn box_option_replaces_rect() {
        let p = painter(400, 300);
        let child = p.child(&[PainterOption::Padding(Rect::new_padding_all(10)), PainterOption::Box(Rect::from_ltwh(50, 60, 20, 20))]);
        assert_eq!(child.rect(), Rect::from_ltwh(50, 60, 20, 20));
        let kept = p.child(&[PainterOption::Box(Rect::ZERO)]);
        assert_eq!(kept.rect(), p.rect());
    }

    #[test]
    fn override_merges_and_restore_reverts() {
        let mut p = painter(100, 100);
        p.set_drawing_style(Style::stroke(Color::BLACK, 2.0));
        p.override_drawing_style(Style::fill(Color::WHITE));
        assert_eq!(p.style().stroke_width, Some(2.0));
        assert_eq!(p.style().fill_color, Some(Color::WHITE));
        p.restore_style();
        assert_eq!(p.style().fill_color, None);
        p.set_drawing_style(Style::fill(Color::WHITE));
        assert_eq!(p.style().stroke_color, None);
    }

    #[test]
    fn rounded_rect_radius_is_clamped() {
        let p = painter(100, 100);
        let mut child = p.padded(Rect::ZERO);
        child.set_drawing_style(Style::fill(Color::BLACK));
        child.rounded_rect(Rect::from_ltrb(0, 0, 10, 50), 20);
        let doc = svg(&p);
        assert!(doc.contains("A 5 5 0 0 1 10 5"), "{doc}");
    }

    #[test]
    fn text_fit_wraps_and_aligns() {
        let mut p = painter(200, 200);
        let one_line = p.measure_text("Hello");
        let b = p.text_fit("Hello world", 0, 20, one_line.width() + 2, Align::Left);
        assert_eq!(b.height(), one_line.height() * 2 + TEXT_LINE_SPACING);
        assert_eq!(p.measure_text_fit("Hello world", one_line.width() + 2), b);
    }

    #[test]
    fn max_width_height_of_labels() {
        let p = painter(100, 100);
        let (w, h) = p.measure_text_max_width_height(&["1", "1000", "10"]);
        assert_eq!(w, p.measure_text("1000").width());
        assert_eq!(h, p.measure_text("1").height());
    }
}
