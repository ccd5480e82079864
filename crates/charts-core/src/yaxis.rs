// File: crates/charts-core/src/yaxis.rs
// Summary: Value Y axis options (bounds overrides, label formatting) and the left/right
// axis constructors.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::axis::{AxisOption, AxisPainter, DEFAULT_X_AXIS_HEIGHT};
use crate::geometry::{Position, Rect};
use crate::painter::Painter;
use crate::range::ValueFormatter;
use crate::style::Color;
use crate::text::FontFace;
use crate::theme::Theme;

#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct YAxisOption {
    /// Lowers the computed minimum.
    pub min: Option<f64>,
    /// Raises the computed maximum.
    pub max: Option<f64>,
    #[serde(skip)]
    pub font: Option<Arc<FontFace>>,
    /// Category labels of a horizontal bar chart; value axes fill this from their range.
    pub data: Vec<String>,
    #[serde(skip)]
    pub theme: Option<Arc<Theme>>,
    pub font_size: Option<f64>,
    pub font_color: Option<Color>,
    pub position: Option<Position>,
    /// Template with a `{value}` placeholder, e.g. `"{value} ml"`.
    pub formatter: Option<String>,
    /// Sets both the label and the axis line color.
    pub color: Option<Color>,
    pub show: Option<bool>,
    /// Number of intervals; 0 selects 6.
    pub divide_count: usize,
    pub unit: usize,
    pub split_line_show: Option<bool>,
    #[serde(skip)]
    pub value_formatter: Option<ValueFormatter>,
    #[serde(skip)]
    pub(crate) is_category_axis: bool,
}

impl fmt::Debug for YAxisOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YAxisOption")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("position", &self.position)
            .field("formatter", &self.formatter)
            .field("divide_count", &self.divide_count)
            .field("show", &self.show)
            .finish_non_exhaustive()
    }
}

impl YAxisOption {
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_formatter(mut self, formatter: impl Into<String>) -> Self {
        self.formatter = Some(formatter.into());
        self
    }

    pub fn to_axis_option(&self, painter: &Painter) -> AxisOption {
        let position = if self.position == Some(Position::Right) { Position::Right } else { Position::Left };
        let theme = self.theme.clone().unwrap_or_else(|| painter.theme().clone());
        let mut opt = AxisOption {
            formatter: self.formatter.clone(),
            split_line_color: Some(theme.axis_split_line_color),
            theme: Some(theme),
            data: self.data.clone(),
            position: Some(position),
            font_size: self.font_size,
            stroke_width: -1.0,
            font: self.font.clone(),
            font_color: self.font_color,
            boundary_gap: Some(false),
            split_line_show: true,
            show: self.show.unwrap_or(true),
            unit: self.unit,
            ..AxisOption::default()
        };
        if let Some(color) = self.color {
            opt.font_color = Some(color);
            opt.stroke_color = Some(color);
        }
        if self.is_category_axis {
            opt.boundary_gap = Some(true);
            opt.stroke_width = 1.0;
            opt.split_line_show = false;
        }
        if let Some(show) = self.split_line_show {
            opt.split_line_show = show;
        }
        opt
    }
}

/// Left axis over `painter` minus the reserved X axis strip.
pub fn new_left_y_axis(painter: &Painter, opt: &YAxisOption) -> AxisPainter {
    let p = painter.padded(Rect::from_ltrb(0, 0, 0, DEFAULT_X_AXIS_HEIGHT));
    let axis = opt.to_axis_option(&p);
    AxisPainter::new(p, axis)
}

/// Right axis; its split lines would duplicate the left axis so they stay off.
pub fn new_right_y_axis(painter: &Painter, opt: &YAxisOption) -> AxisPainter {
    let p = painter.padded(Rect::from_ltrb(0, 0, 0, DEFAULT_X_AXIS_HEIGHT));
    let mut axis = YAxisOption { position: Some(Position::Right), ..opt.clone() }.to_axis_option(&p);
    axis.split_line_show = false;
    AxisPainter::new(p, axis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painter::PainterOptions;
    use crate::registry::Registry;
    use crate::renderer::OutputType;

    fn painter() -> Painter {
        let registry = Registry::new();
        Painter::new(PainterOptions {
            output: OutputType::Svg,
            width: 400,
            height: 300,
            font: registry.default_font(),
            theme: registry.theme("light"),
        })
        .unwrap()
    }

    #[test]
    fn value_axis_defaults() {
        let p = painter();
        let axis = YAxisOption::default().to_axis_option(&p);
        assert_eq!(axis.position, Some(Position::Left));
        assert_eq!(axis.stroke_width, -1.0);
        assert_eq!(axis.boundary_gap, Some(false));
        assert!(axis.split_line_show);
    }

    #[test]
    fn color_applies_to_labels_and_line() {
        let p = painter();
        let opt = YAxisOption { color: Some(Color::rgb(1, 2, 3)), split_line_show: Some(false), ..YAxisOption::default() };
        let axis = opt.to_axis_option(&p);
        assert_eq!(axis.font_color, Some(Color::rgb(1, 2, 3)));
        assert_eq!(axis.stroke_color, Some(Color::rgb(1, 2, 3)));
        assert!(!axis.split_line_show);
    }

    #[test]
    fn category_axis_draws_baseline() {
        let p = painter();
        let opt = YAxisOption { is_category_axis: true, ..YAxisOption::default() };
        let axis = opt.to_axis_option(&p);
        assert_eq!(axis.boundary_gap, Some(true));
        assert_eq!(axis.stroke_width, 1.0);
        assert!(!axis.split_line_show);
    }

    #[test]
    fn parses_from_json() {
        let opt: YAxisOption = serde_json::from_str(r#"{"min": 0, "formatter": "{value} ml", "position": "right"}"#).unwrap();
        assert_eq!(opt.min, Some(0.0));
        assert_eq!(opt.position, Some(Position::Right));
        assert_eq!(opt.formatter.as_deref(), Some("{value} ml"));
    }
}
