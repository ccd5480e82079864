// File: crates/charts-core/src/xaxis.rs
// Summary: Category X axis options and the bottom/top axis constructor.

use std::sync::Arc;

use serde::Deserialize;

use crate::axis::{AxisOption, AxisPainter};
use crate::geometry::{Point, Position};
use crate::painter::Painter;
use crate::style::Color;
use crate::text::FontFace;
use crate::theme::Theme;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct XAxisOption {
    pub data: Vec<String>,
    pub show: Option<bool>,
    pub boundary_gap: Option<bool>,
    pub split_number: usize,
    /// `top` or anything else for bottom.
    pub position: Option<Position>,
    pub stroke_color: Option<Color>,
    pub font_size: Option<f64>,
    #[serde(skip)]
    pub font: Option<Arc<FontFace>>,
    pub font_color: Option<Color>,
    #[serde(skip)]
    pub theme: Option<Arc<Theme>>,
    /// Radians.
    pub text_rotation: f64,
    pub label_offset: Point,
    pub first_axis: usize,
    pub unit: usize,
    /// Numeric labels of a horizontal bar chart: split lines, no baseline.
    #[serde(skip)]
    pub(crate) is_value_axis: bool,
}

impl XAxisOption {
    pub fn new<S: Into<String>>(data: impl IntoIterator<Item = S>) -> Self {
        Self { data: data.into_iter().map(Into::into).collect(), ..Self::default() }
    }

    pub fn with_boundary_gap(mut self, boundary_gap: bool) -> Self {
        self.boundary_gap = Some(boundary_gap);
        self
    }

    pub fn to_axis_option(&self) -> AxisOption {
        let position = if self.position == Some(Position::Top) { Some(Position::Top) } else { Some(Position::Bottom) };
        let mut opt = AxisOption {
            theme: self.theme.clone(),
            data: self.data.clone(),
            show: self.show.unwrap_or(true),
            position,
            boundary_gap: self.boundary_gap,
            split_number: self.split_number,
            stroke_color: self.stroke_color,
            font: self.font.clone(),
            font_size: self.font_size,
            font_color: self.font_color,
            split_line_color: self.theme.as_ref().map(|t| t.axis_split_line_color),
            text_rotation: self.text_rotation,
            label_offset: self.label_offset,
            first: self.first_axis,
            unit: self.unit,
            ..AxisOption::default()
        };
        if self.is_value_axis {
            opt.split_line_show = true;
            opt.stroke_width = -1.0;
            opt.boundary_gap = Some(false);
        }
        opt
    }
}

pub fn new_bottom_x_axis(painter: Painter, opt: &XAxisOption) -> AxisPainter {
    AxisPainter::new(painter, opt.to_axis_option())
}
