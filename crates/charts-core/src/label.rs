// File: crates/charts-core/src/label.rs
// Summary: Series value labels. Positions are collected while a chart lays out its
// points and drawn afterwards so labels sit above every series.

use std::sync::Arc;

use crate::error::Result;
use crate::geometry::{Orient, Point};
use crate::overlay::Overlay;
use crate::painter::Painter;
use crate::series::{format_label, SeriesLabel, DEFAULT_LABEL_LAYOUT};
use crate::style::{Color, Style};
use crate::text::FontFace;
use crate::theme::Theme;

pub const LABEL_FONT_SIZE: f64 = 10.0;
pub const SMALL_LABEL_FONT_SIZE: f64 = 8.0;
/// Text color used on light fills.
pub const DEFAULT_LIGHT_FONT_COLOR: Color = Color::rgb(70, 70, 70);
/// Text color used on dark fills.
pub const DEFAULT_DARK_FONT_COLOR: Color = Color::rgb(238, 238, 238);

/// Text color readable on top of `fill`.
pub fn font_color_on(fill: Color) -> Color {
    if fill.is_light() {
        DEFAULT_LIGHT_FONT_COLOR
    } else {
        DEFAULT_DARK_FONT_COLOR
    }
}

#[derive(Clone, Debug, Default)]
pub struct LabelValue {
    /// Series index within the rendered list, used for the `{b}` name.
    pub index: usize,
    pub value: f64,
    pub x: i32,
    pub y: i32,
    pub radians: f64,
    pub font_color: Option<Color>,
    pub font_size: Option<f64>,
    /// Vertical places the label above the point, horizontal to its right.
    pub orient: Orient,
    pub offset: Point,
}

#[derive(Clone, Debug)]
struct LabelRenderValue {
    text: String,
    style: Style,
    x: i32,
    y: i32,
    radians: f64,
}

pub struct SeriesLabelPainter {
    series_names: Vec<String>,
    label: SeriesLabel,
    theme: Arc<Theme>,
    font: Arc<FontFace>,
    values: Vec<LabelRenderValue>,
}

impl SeriesLabelPainter {
    pub fn new(label: &SeriesLabel, series_names: Vec<String>, theme: Arc<Theme>, font: Arc<FontFace>) -> Self {
        Self { series_names, label: label.clone(), theme, font, values: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Formats and positions one label; `painter` is only used to measure the text.
    pub fn add(&mut self, painter: &Painter, value: LabelValue) {
        let distance = if self.label.distance == 0 { 5 } else { self.label.distance };
        let name = self.series_names.get(value.index).map(String::as_str).unwrap_or("");
        let text = format_label(self.label.formatter.as_deref(), DEFAULT_LABEL_LAYOUT, name, value.value, 0.0);
        let font_color = value.font_color.or(self.label.color).unwrap_or(self.theme.text_color);
        let style = Style {
            font: Some(self.font.clone()),
            font_size: Some(value.font_size.or(self.label.font_size).unwrap_or(LABEL_FONT_SIZE)),
            font_color: Some(font_color),
            ..Style::default()
        };

        let rotated = value.radians != 0.0;
        let mut measure = painter.child(&[]);
        measure.override_text_style(style.clone());
        if rotated {
            measure.set_text_rotation(value.radians);
        }
        let b = measure.measure_text(&text);

        let mut x = value.x;
        let mut y = value.y;
        if value.orient == Orient::Horizontal {
            x += distance;
            y += (b.height() >> 1) - 2;
        } else {
            x -= b.width() >> 1;
            y -= distance;
        }
        if rotated {
            x = value.x + (b.width() >> 1) - 1;
        } else if b.width() % 2 != 0 {
            x += 1;
        }
        x += value.offset.x;
        y += value.offset.y;
        self.values.push(LabelRenderValue { text, style, x, y, radians: value.radians });
    }
}

impl Overlay for SeriesLabelPainter {
    fn id(&self) -> &'static str {
        "series-label"
    }

    fn render(&self, painter: &mut Painter) -> Result<()> {
        for item in &self.values {
            painter.override_text_style(item.style.clone());
            if item.radians != 0.0 {
                painter.text_rotation(&item.text, item.x, item.y, item.radians);
            } else {
                painter.text(&item.text, item.x, item.y);
            }
        }
        Ok(())
    }
}
