// File: crates/charts-core/src/chart_option.rs
// Summary: Top-level chart description plus builder helpers; deserializable from JSON.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::geometry::Rect;
use crate::legend::LegendOption;
use crate::radar_chart::RadarIndicator;
use crate::range::ValueFormatter;
use crate::registry::Registry;
use crate::renderer::OutputType;
use crate::series::{Series, SeriesList};
use crate::style::Color;
use crate::text::FontFace;
use crate::theme::{Theme, THEME_LIGHT};
use crate::title::TitleOption;
use crate::xaxis::XAxisOption;
use crate::yaxis::YAxisOption;

pub const DEFAULT_CHART_WIDTH: i32 = 600;
pub const DEFAULT_CHART_HEIGHT: i32 = 400;
pub const DEFAULT_PADDING: i32 = 20;

#[derive(Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartOption {
    #[serde(rename = "type")]
    pub output: OutputType,
    /// Registered font family; unknown families fall back to the default font.
    pub font_family: String,
    pub theme: String,
    pub title: TitleOption,
    pub legend: LegendOption,
    pub x_axis: XAxisOption,
    #[serde(rename = "yAxis")]
    pub y_axis_options: Vec<YAxisOption>,
    pub width: i32,
    pub height: i32,
    /// Canvas region of a child chart. Zero uses the whole parent.
    #[serde(rename = "box")]
    pub rect: Rect,
    /// Zero selects 20px on every side.
    pub padding: Rect,
    pub series_list: SeriesList,
    pub radar_indicators: Vec<RadarIndicator>,
    /// Draw dots on line points (the default).
    pub symbol_show: Option<bool>,
    /// 0 selects 2.
    pub line_stroke_width: f64,
    pub fill_area: bool,
    pub smooth: bool,
    /// Fixed bar width; 0 lets the slot width decide.
    pub bar_width: i32,
    /// Fixed bar height of horizontal bars.
    pub bar_height: i32,
    /// Gap between bars of one category; 0 selects the default.
    pub bar_margin: i32,
    /// Defaults to the theme background.
    pub background_color: Option<Color>,
    /// Tick label formatter for every Y axis without its own.
    #[serde(skip)]
    pub value_formatter: Option<ValueFormatter>,
    /// Charts drawn into the same canvas after this one, each in its own `rect`.
    pub children: Vec<ChartOption>,
    #[serde(skip)]
    pub(crate) resolved_theme: Option<Arc<Theme>>,
    #[serde(skip)]
    pub(crate) resolved_font: Option<Arc<FontFace>>,
}

impl Default for ChartOption {
    fn default() -> Self {
        Self {
            output: OutputType::Svg,
            font_family: String::new(),
            theme: THEME_LIGHT.to_string(),
            title: TitleOption::default(),
            legend: LegendOption::default(),
            x_axis: XAxisOption::default(),
            y_axis_options: Vec::new(),
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
            rect: Rect::ZERO,
            padding: Rect::ZERO,
            series_list: SeriesList::default(),
            radar_indicators: Vec::new(),
            symbol_show: None,
            line_stroke_width: 0.0,
            fill_area: false,
            smooth: false,
            bar_width: 0,
            bar_height: 0,
            bar_margin: 0,
            background_color: None,
            value_formatter: None,
            children: Vec::new(),
            resolved_theme: None,
            resolved_font: None,
        }
    }
}

impl fmt::Debug for ChartOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartOption")
            .field("output", &self.output)
            .field("theme", &self.theme)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("rect", &self.rect)
            .field("title", &self.title.text)
            .field("series", &self.series_list.len())
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}

impl ChartOption {
    pub fn new(series_list: impl Into<SeriesList>) -> Self {
        Self { series_list: series_list.into(), ..Self::default() }
    }

    pub fn with_output(mut self, output: OutputType) -> Self {
        self.output = output;
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn with_title(mut self, text: impl Into<String>) -> Self {
        self.title.text = text.into();
        self
    }

    pub fn with_title_option(mut self, title: TitleOption) -> Self {
        self.title = title;
        self
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_padding(mut self, padding: Rect) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_box(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    pub fn with_x_axis_data<S: Into<String>>(mut self, data: impl IntoIterator<Item = S>) -> Self {
        self.x_axis.data = data.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_x_axis(mut self, x_axis: XAxisOption) -> Self {
        self.x_axis = x_axis;
        self
    }

    pub fn with_y_axis(mut self, y_axis: YAxisOption) -> Self {
        self.y_axis_options.push(y_axis);
        self
    }

    pub fn with_legend<S: Into<String>>(mut self, data: impl IntoIterator<Item = S>) -> Self {
        self.legend.data = data.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_legend_option(mut self, legend: LegendOption) -> Self {
        self.legend = legend;
        self
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series_list.push(series);
        self
    }

    pub fn with_radar_indicators(mut self, indicators: Vec<RadarIndicator>) -> Self {
        self.radar_indicators = indicators;
        self
    }

    pub fn with_children(mut self, children: Vec<ChartOption>) -> Self {
        self.children = children;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn with_value_formatter(mut self, formatter: ValueFormatter) -> Self {
        self.value_formatter = Some(formatter);
        self
    }

    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub(crate) fn theme_ref(&self) -> Arc<Theme> {
        self.resolved_theme.clone().unwrap_or_else(|| Arc::new(Theme::light()))
    }

    /// Resolves theme, font, size, padding, axis count and the legend/series name
    /// pairing before layout.
    pub(crate) fn fill_defaults(&mut self, registry: &Registry) {
        let theme = registry.theme(&self.theme);
        let font = if self.font_family.is_empty() { registry.default_font() } else { registry.font(&self.font_family) };

        let axis_count = self.series_list.iter().map(|s| s.axis_index + 1).max().unwrap_or(1).max(1);
        if self.width == 0 {
            self.width = DEFAULT_CHART_WIDTH;
        }
        if self.height == 0 {
            self.height = DEFAULT_CHART_HEIGHT;
        }
        self.y_axis_options.resize_with(self.y_axis_options.len().max(axis_count), YAxisOption::default);
        if let Some(formatter) = &self.value_formatter {
            for y_axis in self.y_axis_options.iter_mut().filter(|y| y.value_formatter.is_none()) {
                y_axis.value_formatter = Some(formatter.clone());
            }
        }
        if self.background_color.is_none() {
            self.background_color = Some(theme.background_color);
        }
        if self.padding.is_zero() {
            self.padding = Rect::new_padding_all(DEFAULT_PADDING);
        }

        if self.legend.data.is_empty() {
            self.legend.data = self.series_list.names();
        } else {
            for (series, name) in self.series_list.iter_mut().zip(&self.legend.data) {
                if series.name.is_empty() {
                    series.name = name.clone();
                }
            }
            // series follow the legend order; names absent from the legend go first
            let legend = &self.legend.data;
            let rank = |name: &str| legend.iter().position(|n| n == name);
            self.series_list.sort_by_key(|s| rank(&s.name));
        }
        self.resolved_theme = Some(theme);
        self.resolved_font = Some(font);
    }
}
