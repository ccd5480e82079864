// File: crates/charts-core/src/echarts.rs
// Summary: ECharts-style JSON documents mapped onto `ChartOption`: bare-number or object
// data items, CSS-like padding arrays, single-or-list axes.

use serde::{Deserialize, Deserializer};

use crate::chart::{render_to_png, render_to_svg};
use crate::chart_option::ChartOption;
use crate::error::Result;
use crate::geometry::{Align, Orient, Point, Position, Rect};
use crate::legend::LegendOption;
use crate::radar_chart::RadarIndicator;
use crate::registry::Registry;
use crate::renderer::OutputType;
use crate::series::{ChartType, Series, SeriesData, SeriesLabel, SeriesList, SeriesMarkData, SeriesMarkLine, SeriesMarkPoint};
use crate::style::{Color, Style};
use crate::title::TitleOption;
use crate::util::deserialize_flex;
use crate::xaxis::XAxisOption;
use crate::yaxis::YAxisOption;

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

fn one_or_many<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        Some(OneOrMany::One(v)) => vec![v],
        Some(OneOrMany::Many(v)) => v,
        None => Vec::new(),
    })
}

/// `10`, `[10]`, `[top/bottom, left/right]`, `[top, left/right, bottom]` or
/// `[top, right, bottom, left]`.
fn deserialize_padding<'de, D>(deserializer: D) -> std::result::Result<Rect, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Vec<i32> = one_or_many::<D, f64>(deserializer)?.into_iter().map(|v| v as i32).collect();
    Ok(match values.as_slice() {
        [] => Rect::ZERO,
        [all] => Rect::new_padding_all(*all),
        [vertical, horizontal] => Rect::from_ltrb(*horizontal, *vertical, *horizontal, *vertical),
        [top, horizontal, bottom] => Rect::from_ltrb(*horizontal, *top, *horizontal, *bottom),
        [top, right, bottom, left, ..] => Rect::from_ltrb(*left, *top, *right, *bottom),
    })
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct EChartsStyle {
    pub color: Option<Color>,
}

impl EChartsStyle {
    fn to_style(&self) -> Style {
        Style { fill_color: self.color, stroke_color: self.color, ..Style::default() }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EChartsSeriesDataValue {
    pub value: f64,
    pub name: String,
    pub item_style: EChartsStyle,
}

/// Series data item: `12` or `{"value": 12, "name": "...", "itemStyle": {...}}`.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum EChartsSeriesData {
    Value(f64),
    Item(EChartsSeriesDataValue),
}

impl EChartsSeriesData {
    pub fn value(&self) -> f64 {
        match self {
            Self::Value(v) => *v,
            Self::Item(item) => item.value,
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Value(_) => "",
            Self::Item(item) => &item.name,
        }
    }

    fn to_series_data(&self) -> SeriesData {
        match self {
            Self::Value(v) => SeriesData::new(*v),
            Self::Item(item) => SeriesData::with_style(item.value, item.item_style.to_style()),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EChartsTextStyle {
    pub color: Option<Color>,
    pub font_family: String,
    pub font_size: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EChartsTitle {
    pub text: String,
    pub subtext: String,
    #[serde(deserialize_with = "deserialize_flex")]
    pub left: Option<String>,
    #[serde(deserialize_with = "deserialize_flex")]
    pub top: Option<String>,
    pub text_style: EChartsTextStyle,
    pub subtext_style: EChartsTextStyle,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EChartsLegend {
    pub show: Option<bool>,
    pub data: Vec<String>,
    pub align: Align,
    pub orient: Orient,
    #[serde(deserialize_with = "deserialize_padding")]
    pub padding: Rect,
    #[serde(deserialize_with = "deserialize_flex")]
    pub left: Option<String>,
    #[serde(deserialize_with = "deserialize_flex")]
    pub top: Option<String>,
    pub text_style: EChartsTextStyle,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EChartsAxisLabel {
    pub formatter: Option<String>,
    pub show: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EChartsXAxis {
    pub data: Vec<String>,
    pub boundary_gap: Option<bool>,
    pub split_number: usize,
    pub show: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EChartsYAxis {
    /// `category` turns bar series into horizontal bars.
    #[serde(rename = "type")]
    pub kind: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub data: Vec<String>,
    pub axis_label: EChartsAxisLabel,
    pub show: Option<bool>,
    pub position: Option<Position>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EChartsLabel {
    pub show: bool,
    pub color: Option<Color>,
    pub distance: Option<i32>,
    pub formatter: Option<String>,
    pub position: Option<Position>,
    pub font_size: Option<f64>,
    pub offset: Vec<i32>,
}

impl EChartsLabel {
    fn to_series_label(&self) -> SeriesLabel {
        let defaults = SeriesLabel::default();
        SeriesLabel {
            show: self.show,
            color: self.color,
            distance: self.distance.unwrap_or(defaults.distance),
            formatter: self.formatter.clone(),
            position: self.position,
            font_size: self.font_size,
            offset: match self.offset.as_slice() {
                [x, y, ..] => Point::new(*x, *y),
                _ => Point::default(),
            },
            ..defaults
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EChartsMarkPoint {
    pub symbol_size: i32,
    pub data: Vec<SeriesMarkData>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct EChartsMarkLine {
    pub data: Vec<SeriesMarkData>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EChartsSeries {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Vec<EChartsSeriesData>,
    #[serde(deserialize_with = "deserialize_flex")]
    pub radius: Option<String>,
    pub y_axis_index: usize,
    pub item_style: EChartsStyle,
    pub label: EChartsLabel,
    pub mark_point: EChartsMarkPoint,
    pub mark_line: EChartsMarkLine,
    pub max: Option<f64>,
    pub min: Option<f64>,
}

impl EChartsSeries {
    fn chart_type(&self, horizontal: bool) -> ChartType {
        match self.kind.as_str() {
            "bar" if horizontal => ChartType::HorizontalBar,
            "bar" => ChartType::Bar,
            "pie" => ChartType::Pie,
            "radar" => ChartType::Radar,
            "funnel" => ChartType::Funnel,
            _ => ChartType::Line,
        }
    }

    fn base_series(&self, kind: ChartType, data: Vec<SeriesData>) -> Series {
        Series {
            kind,
            data,
            axis_index: self.y_axis_index,
            style: self.item_style.to_style(),
            label: self.label.to_series_label(),
            name: self.name.clone(),
            radius: self.radius.clone(),
            mark_point: SeriesMarkPoint { symbol_size: self.mark_point.symbol_size, data: self.mark_point.data.clone() },
            mark_line: SeriesMarkLine { data: self.mark_line.data.clone() },
            max: self.max,
            min: self.min,
            ..Series::default()
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct EChartsRadar {
    pub indicator: Vec<RadarIndicator>,
}

/// Subset of the ECharts option document this renderer understands.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EChartsOption {
    #[serde(rename = "type")]
    pub output: OutputType,
    pub theme: String,
    pub font_family: String,
    pub width: i32,
    pub height: i32,
    #[serde(deserialize_with = "deserialize_padding")]
    pub padding: Rect,
    #[serde(rename = "box")]
    pub rect: Rect,
    pub background_color: Option<Color>,
    pub title: EChartsTitle,
    pub legend: EChartsLegend,
    pub radar: EChartsRadar,
    #[serde(deserialize_with = "one_or_many")]
    pub x_axis: Vec<EChartsXAxis>,
    #[serde(deserialize_with = "one_or_many")]
    pub y_axis: Vec<EChartsYAxis>,
    pub series: Vec<EChartsSeries>,
    pub children: Vec<EChartsOption>,
}

impl EChartsOption {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn series_list(&self) -> SeriesList {
        let horizontal = self.y_axis.first().is_some_and(|y| y.kind == "category");
        let mut list = SeriesList::default();
        for series in &self.series {
            let kind = series.chart_type(horizontal);
            // every item of a pie or funnel series is a slice or tier of its own
            if matches!(kind, ChartType::Pie | ChartType::Funnel) {
                for item in &series.data {
                    let mut slice = series.base_series(kind, vec![SeriesData::new(item.value())]);
                    slice.name = item.name().to_string();
                    if let EChartsSeriesData::Item(value) = item {
                        if value.item_style.color.is_some() {
                            slice.style = value.item_style.to_style();
                        }
                    }
                    list.push(slice);
                }
                continue;
            }
            let data = series.data.iter().map(EChartsSeriesData::to_series_data).collect();
            list.push(series.base_series(kind, data));
        }
        list
    }

    pub fn to_chart_option(&self) -> ChartOption {
        let title_style = &self.title.text_style;
        let title = TitleOption {
            text: self.title.text.clone(),
            subtext: self.title.subtext.clone(),
            left: self.title.left.clone(),
            top: self.title.top.clone(),
            font_size: title_style.font_size,
            font_color: title_style.color,
            subtext_font_size: self.title.subtext_style.font_size,
            subtext_font_color: self.title.subtext_style.color,
            ..TitleOption::default()
        };
        let legend = LegendOption {
            data: self.legend.data.clone(),
            show: self.legend.show,
            align: self.legend.align,
            orient: self.legend.orient,
            padding: self.legend.padding,
            left: self.legend.left.clone(),
            top: self.legend.top.clone(),
            font_size: self.legend.text_style.font_size,
            font_color: self.legend.text_style.color,
            ..LegendOption::default()
        };
        let x_axis = self
            .x_axis
            .first()
            .map(|x| XAxisOption {
                data: x.data.clone(),
                boundary_gap: x.boundary_gap,
                split_number: x.split_number,
                show: x.show,
                ..XAxisOption::default()
            })
            .unwrap_or_default();
        let y_axis_options = self
            .y_axis
            .iter()
            .map(|y| YAxisOption {
                min: y.min,
                max: y.max,
                data: y.data.clone(),
                formatter: y.axis_label.formatter.clone(),
                show: y.show,
                position: y.position,
                ..YAxisOption::default()
            })
            .collect();

        let font_family = if self.font_family.is_empty() { title_style.font_family.clone() } else { self.font_family.clone() };
        let mut opt = ChartOption {
            output: self.output,
            theme: self.theme.clone(),
            font_family,
            padding: self.padding,
            rect: self.rect,
            background_color: self.background_color,
            title,
            legend,
            x_axis,
            y_axis_options,
            series_list: self.series_list(),
            radar_indicators: self.radar.indicator.clone(),
            children: self.children.iter().map(EChartsOption::to_chart_option).collect(),
            ..ChartOption::default()
        };
        if self.width > 0 {
            opt.width = self.width;
        }
        if self.height > 0 {
            opt.height = self.height;
        }
        opt
    }
}

/// Parses an ECharts document into a chart option.
pub fn parse_echarts_option(json: &str) -> Result<ChartOption> {
    Ok(EChartsOption::from_json(json)?.to_chart_option())
}

pub fn render_echarts_to_svg(json: &str, registry: &Registry) -> Result<String> {
    render_to_svg(parse_echarts_option(json)?, registry)
}

pub fn render_echarts_to_png(json: &str, registry: &Registry) -> Result<Vec<u8>> {
    render_to_png(parse_echarts_option(json)?, registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_forms() {
        let parse = |json: &str| {
            #[derive(Deserialize)]
            struct Holder {
                #[serde(deserialize_with = "deserialize_padding")]
                padding: Rect,
            }
            serde_json::from_str::<Holder>(json).unwrap().padding
        };
        assert_eq!(parse(r#"{"padding": 10}"#), Rect::new_padding_all(10));
        assert_eq!(parse(r#"{"padding": [5, 10]}"#), Rect::from_ltrb(10, 5, 10, 5));
        assert_eq!(parse(r#"{"padding": [1, 2, 3]}"#), Rect::from_ltrb(2, 1, 2, 3));
        assert_eq!(parse(r#"{"padding": [1, 2, 3, 4]}"#), Rect::from_ltrb(4, 1, 2, 3));
    }

    #[test]
    fn data_items_accept_numbers_and_objects() {
        let opt = parse_echarts_option(
            r##"{
                "xAxis": {"data": ["Mon", "Tue"]},
                "series": [{"type": "bar", "data": [120, {"value": 200, "itemStyle": {"color": "#a90000"}}]}]
            }"##,
        )
        .unwrap();
        let data = &opt.series_list[0].data;
        assert_eq!(data[0].value, 120.0);
        assert_eq!(data[1].value, 200.0);
        assert_eq!(data[1].style.fill_color, Some(Color::rgb(0xa9, 0, 0)));
        assert_eq!(opt.series_list[0].kind, ChartType::Bar);
    }

    #[test]
    fn axes_accept_object_or_array() {
        let opt = parse_echarts_option(
            r#"{
                "xAxis": [{"data": ["a"], "boundaryGap": false}],
                "yAxis": [{"min": 0, "axisLabel": {"formatter": "{value} ml"}}, {"max": 25}],
                "series": [{"data": [1]}, {"data": [2], "yAxisIndex": 1}]
            }"#,
        )
        .unwrap();
        assert_eq!(opt.x_axis.boundary_gap, Some(false));
        assert_eq!(opt.y_axis_options.len(), 2);
        assert_eq!(opt.y_axis_options[0].formatter.as_deref(), Some("{value} ml"));
        assert_eq!(opt.series_list[1].axis_index, 1);
    }

    #[test]
    fn pie_items_become_series() {
        let opt = parse_echarts_option(
            r#"{
                "legend": {"left": 20, "orient": "vertical"},
                "series": [{"type": "pie", "radius": "50%", "data": [{"value": 1048, "name": "Search"}, {"value": 735, "name": "Direct"}]}]
            }"#,
        )
        .unwrap();
        assert_eq!(opt.series_list.names(), vec!["Search", "Direct"]);
        assert!(opt.series_list.iter().all(|s| s.kind == ChartType::Pie && s.radius.as_deref() == Some("50%")));
        assert_eq!(opt.legend.left.as_deref(), Some("20"));
    }

    #[test]
    fn category_y_axis_makes_horizontal_bars() {
        let opt = parse_echarts_option(
            r#"{"yAxis": {"type": "category", "data": ["a", "b"]}, "series": [{"type": "bar", "data": [1, 2]}]}"#,
        )
        .unwrap();
        assert_eq!(opt.series_list[0].kind, ChartType::HorizontalBar);
        assert_eq!(opt.y_axis_options[0].data, vec!["a", "b"]);
    }
}
