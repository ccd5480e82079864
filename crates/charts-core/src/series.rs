// File: crates/charts-core/src/series.rs
// Summary: Series model (data points, labels, mark options) and the list helpers the
// chart renderers share: filtering by type, axis extents and per-series summaries.

use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::Deserialize;

use crate::geometry::{Point, Position};
use crate::style::{Color, Style};
use crate::util::format_float;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    #[default]
    Line,
    Bar,
    HorizontalBar,
    Pie,
    Radar,
    Funnel,
}

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
            ChartType::HorizontalBar => "horizontal_bar",
            ChartType::Pie => "pie",
            ChartType::Radar => "radar",
            ChartType::Funnel => "funnel",
        }
    }

    /// Types that own the whole canvas and can not share it with another type.
    pub fn is_exclusive(&self) -> bool {
        !matches!(self, ChartType::Line | ChartType::Bar)
    }

    /// Types drawn without x/y axes.
    pub fn hides_axes(&self) -> bool {
        matches!(self, ChartType::Pie | ChartType::Radar | ChartType::Funnel)
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value of a series, optionally with its own style (e.g. a highlighted bar).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SeriesData {
    pub value: f64,
    pub style: Style,
}

impl SeriesData {
    pub fn new(value: f64) -> Self {
        Self { value, style: Style::default() }
    }

    pub fn with_style(value: f64, style: Style) -> Self {
        Self { value, style }
    }

    pub fn from_values(values: &[f64]) -> Vec<SeriesData> {
        values.iter().copied().map(SeriesData::new).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeriesLabel {
    /// Layout with `{b}` (series name), `{c}` (value) and `{d}` (percent) placeholders.
    pub formatter: Option<String>,
    pub color: Option<Color>,
    pub show: bool,
    /// Gap between the data point and the label.
    pub distance: i32,
    pub position: Option<Position>,
    pub offset: Point,
    pub font_size: Option<f64>,
    /// Radians, clockwise.
    pub rotate: f64,
}

impl Default for SeriesLabel {
    fn default() -> Self {
        Self {
            formatter: None,
            color: None,
            show: false,
            distance: 5,
            position: None,
            offset: Point::default(),
            font_size: None,
            rotate: 0.0,
        }
    }
}

impl SeriesLabel {
    pub fn shown() -> Self {
        Self { show: true, ..Self::default() }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    #[default]
    Max,
    Min,
    Average,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeriesMarkData {
    #[serde(rename = "type")]
    pub kind: MarkType,
}

impl SeriesMarkData {
    pub fn new(kind: MarkType) -> Self {
        Self { kind }
    }
}

fn mark_data(kinds: &[MarkType]) -> Vec<SeriesMarkData> {
    kinds.iter().copied().map(SeriesMarkData::new).collect()
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeriesMarkPoint {
    /// Pin width in pixels; 0 selects the default of 30.
    pub symbol_size: i32,
    pub data: Vec<SeriesMarkData>,
}

impl SeriesMarkPoint {
    pub fn new(kinds: &[MarkType]) -> Self {
        Self { symbol_size: 0, data: mark_data(kinds) }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SeriesMarkLine {
    pub data: Vec<SeriesMarkData>,
}

impl SeriesMarkLine {
    pub fn new(kinds: &[MarkType]) -> Self {
        Self { data: mark_data(kinds) }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Series {
    #[serde(rename = "type")]
    pub kind: ChartType,
    pub data: Vec<SeriesData>,
    /// Y axis the series is scaled against, 0 (left) or 1 (right).
    pub axis_index: usize,
    pub style: Style,
    pub label: SeriesLabel,
    pub name: String,
    /// Pie/radar radius, `"40%"` of the plot or pixels.
    pub radius: Option<String>,
    pub mark_point: SeriesMarkPoint,
    pub mark_line: SeriesMarkLine,
    /// Overrides the computed maximum (funnel scaling).
    pub max: Option<f64>,
    pub min: Option<f64>,
    /// Corner radius of bars; 0 draws square bars.
    pub round_radius: i32,
    /// Position in the chart's series list, used to pick the theme color.
    #[serde(skip)]
    pub index: usize,
}

impl Series {
    pub fn new(kind: ChartType, values: &[f64]) -> Self {
        Self { kind, data: SeriesData::from_values(values), ..Self::default() }
    }

    pub fn line(values: &[f64]) -> Self {
        Self::new(ChartType::Line, values)
    }

    pub fn bar(values: &[f64]) -> Self {
        Self::new(ChartType::Bar, values)
    }

    pub fn horizontal_bar(values: &[f64]) -> Self {
        Self::new(ChartType::HorizontalBar, values)
    }

    pub fn radar(values: &[f64]) -> Self {
        Self::new(ChartType::Radar, values)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
    pub fn with_axis_index(mut self, axis_index: usize) -> Self {
        self.axis_index = axis_index;
        self
    }
    pub fn with_label(mut self, label: SeriesLabel) -> Self {
        self.label = label;
        self
    }
    pub fn with_mark_point(mut self, mark_point: SeriesMarkPoint) -> Self {
        self.mark_point = mark_point;
        self
    }
    pub fn with_mark_line(mut self, mark_line: SeriesMarkLine) -> Self {
        self.mark_line = mark_line;
        self
    }
    pub fn with_radius(mut self, radius: impl Into<String>) -> Self {
        self.radius = Some(radius.into());
        self
    }
    pub fn with_round_radius(mut self, radius: i32) -> Self {
        self.round_radius = radius;
        self
    }
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().map(|d| d.value)
    }

    pub fn summary(&self) -> SeriesSummary {
        let mut summary = SeriesSummary::default();
        if self.data.is_empty() {
            return summary;
        }
        summary.max_value = f64::MIN;
        summary.min_value = f64::MAX;
        let mut sum = 0.0;
        for (index, value) in self.values().enumerate() {
            if value > summary.max_value {
                summary.max_value = value;
                summary.max_index = index;
            }
            if value < summary.min_value {
                summary.min_value = value;
                summary.min_index = index;
            }
            sum += value;
        }
        summary.average_value = sum / self.data.len() as f64;
        summary
    }
}

/// Extremes and mean of one series. The first occurrence wins on ties.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SeriesSummary {
    pub max_index: usize,
    pub max_value: f64,
    pub min_index: usize,
    pub min_value: f64,
    pub average_value: f64,
}

impl SeriesSummary {
    pub fn value_of(&self, kind: MarkType) -> (usize, f64) {
        match kind {
            MarkType::Max => (self.max_index, self.max_value),
            MarkType::Min => (self.min_index, self.min_value),
            MarkType::Average => (0, self.average_value),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SeriesList(pub Vec<Series>);

impl SeriesList {
    pub fn new(series: Vec<Series>) -> Self {
        Self(series)
    }

    /// One series per row of `values`.
    pub fn from_values(kind: ChartType, values: &[Vec<f64>]) -> Self {
        values.iter().map(|v| Series::new(kind, v)).collect()
    }

    /// One single-value series per slice.
    pub fn pie(values: &[f64]) -> Self {
        values.iter().map(|v| Series::new(ChartType::Pie, &[*v])).collect()
    }

    /// One single-value series per tier.
    pub fn funnel(values: &[f64]) -> Self {
        values.iter().map(|v| Series::new(ChartType::Funnel, &[*v])).collect()
    }

    pub fn radar(values: &[Vec<f64>]) -> Self {
        Self::from_values(ChartType::Radar, values)
    }

    pub fn horizontal_bar(values: &[Vec<f64>]) -> Self {
        Self::from_values(ChartType::HorizontalBar, values)
    }

    /// Assigns each series its position as the render index.
    pub fn init(&mut self) {
        for (index, series) in self.0.iter_mut().enumerate() {
            series.index = index;
        }
    }

    /// Series of one type; each keeps its render index.
    pub fn filter(&self, kind: ChartType) -> SeriesList {
        self.0.iter().filter(|s| s.kind == kind).cloned().collect()
    }

    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|s| s.name.clone()).collect()
    }

    /// `(min, max)` over every value of the series bound to `axis_index`, or `(0, 0)`
    /// when there is no finite value.
    pub fn min_max(&self, axis_index: usize) -> (f64, f64) {
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        for value in self
            .0
            .iter()
            .filter(|s| s.axis_index == axis_index)
            .flat_map(Series::values)
            .filter(|v| v.is_finite())
        {
            min = min.min(value);
            max = max.max(value);
        }
        if min > max {
            return (0.0, 0.0);
        }
        (min, max)
    }

    /// Distinct axis indices in first-seen order.
    pub fn axis_indices(&self) -> Vec<usize> {
        let mut out: Vec<usize> = Vec::new();
        for series in &self.0 {
            if !out.contains(&series.axis_index) {
                out.push(series.axis_index);
            }
        }
        out
    }
}

impl Deref for SeriesList {
    type Target = Vec<Series>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SeriesList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromIterator<Series> for SeriesList {
    fn from_iter<I: IntoIterator<Item = Series>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Series>> for SeriesList {
    fn from(series: Vec<Series>) -> Self {
        Self(series)
    }
}

impl<'a> IntoIterator for &'a SeriesList {
    type Item = &'a Series;
    type IntoIter = std::slice::Iter<'a, Series>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

pub const DEFAULT_LABEL_LAYOUT: &str = "{c}";
pub const PIE_LABEL_LAYOUT: &str = "{b}: {d}";
pub const FUNNEL_LABEL_LAYOUT: &str = "{b}({d})";

/// Expands `{b}`, `{c}` and `{d}` in `layout`. An empty layout falls back to `default`.
pub fn format_label(layout: Option<&str>, default: &str, name: &str, value: f64, percent: f64) -> String {
    let layout = layout.filter(|l| !l.is_empty()).unwrap_or(default);
    layout
        .replace("{c}", &format_float(value, 2))
        .replace("{d}", &format!("{}%", format_float(percent * 100.0, 2)))
        .replace("{b}", name)
}
