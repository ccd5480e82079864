// File: crates/charts-core/src/line_chart.rs
// Summary: Line series: polyline (optionally smoothed), area fill down to the axis
// minimum, point dots, labels and marks.

use crate::chart::DefaultRenderResult;
use crate::error::Result;
use crate::geometry::{Orient, Point, Rect};
use crate::label::{LabelValue, SeriesLabelPainter};
use crate::mark_line::{MarkLinePainter, MarkLineRenderOption};
use crate::mark_point::{MarkPointPainter, MarkPointRenderOption};
use crate::overlay::{render_overlays, Overlay};
use crate::painter::Painter;
use crate::series::SeriesList;
use crate::style::{Color, Style};
use crate::util::auto_divide;
use crate::xaxis::XAxisOption;

const DEFAULT_STROKE_WIDTH: f64 = 2.0;
const DOT_RADIUS: f64 = 2.0;
const AREA_ALPHA: u8 = 200;

#[derive(Clone, Debug, Default)]
pub struct LineChartOption {
    pub x_axis: XAxisOption,
    /// `Some(false)` hides the point dots.
    pub symbol_show: Option<bool>,
    /// 0 selects 2.
    pub stroke_width: f64,
    pub fill_area: bool,
    pub smooth: bool,
}

/// X pixel of each category: slot midpoints with a boundary gap, slot edges without.
pub fn line_x_values(width: i32, categories: usize, boundary_gap: bool) -> Vec<i32> {
    if boundary_gap {
        let divides = auto_divide(width, categories);
        divides.windows(2).map(|w| (w[0] + w[1]) >> 1).collect()
    } else {
        auto_divide(width, categories.saturating_sub(1))
    }
}

pub struct LineChart {
    painter: Painter,
    opt: LineChartOption,
}

impl LineChart {
    pub fn new(painter: Painter, opt: LineChartOption) -> Self {
        Self { painter, opt }
    }

    pub fn render(&self, result: &DefaultRenderResult, series_list: &SeriesList) -> Result<Rect> {
        let opt = &self.opt;
        let mut series_painter = result.series_painter.clone();
        let theme = self.painter.theme().clone();
        let font = self.painter.font().clone();
        let boundary_gap = opt.x_axis.boundary_gap != Some(false);
        let x_values = line_x_values(series_painter.width(), opt.x_axis.data.len(), boundary_gap);
        let stroke_width = if opt.stroke_width == 0.0 { DEFAULT_STROKE_WIDTH } else { opt.stroke_width };
        let series_names = series_list.names();

        let mut mark_points = MarkPointPainter::new();
        let mut mark_lines = MarkLinePainter::new();
        let mut label_painters = Vec::new();

        for (index, series) in series_list.iter().enumerate() {
            let Some(y_range) = result.axis_range(series.axis_index).copied() else {
                continue;
            };
            let series_color = theme.series_color(series.index);
            let mut drawing_style = Style::stroke(series_color, stroke_width);
            drawing_style.stroke_dash_array = series.style.stroke_dash_array.clone().filter(|d| !d.is_empty());
            let mut label_painter = series
                .label
                .show
                .then(|| SeriesLabelPainter::new(&series.label, series_names.clone(), theme.clone(), font.clone()));

            let mut points = Vec::with_capacity(series.data.len());
            for (item, &x) in series.data.iter().zip(&x_values) {
                let point = Point::new(x, y_range.get_rest_height(item.value));
                points.push(point);
                if let Some(labels) = label_painter.as_mut() {
                    labels.add(
                        &series_painter,
                        LabelValue {
                            index,
                            value: item.value,
                            x: point.x,
                            y: point.y,
                            font_size: series.label.font_size,
                            orient: Orient::Vertical,
                            offset: series.label.offset,
                            ..LabelValue::default()
                        },
                    );
                }
            }
            if points.is_empty() {
                continue;
            }

            if opt.fill_area {
                let bottom = y_range.get_rest_height(y_range.min());
                let mut area = points.clone();
                if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
                    area.extend([Point::new(last.x, bottom), Point::new(first.x, bottom), first]);
                }
                series_painter.set_drawing_style(Style::fill(series_color.with_alpha(AREA_ALPHA)));
                series_painter.fill_area(&area);
            }

            series_painter.set_drawing_style(drawing_style.clone());
            if opt.smooth {
                series_painter.smooth_line_stroke(&points);
            } else {
                series_painter.line_stroke(&points);
            }

            drawing_style.fill_color = Some(if theme.is_dark { series_color } else { Color::WHITE });
            drawing_style.stroke_dash_array = None;
            series_painter.set_drawing_style(drawing_style);
            if opt.symbol_show != Some(false) {
                series_painter.dots(&points, DOT_RADIUS);
            }
            tracing::trace!(series = index, points = points.len(), smooth = opt.smooth, "line series drawn");

            mark_points.add(MarkPointRenderOption { fill_color: series_color, font: font.clone(), series: series.clone(), points });
            mark_lines.add(MarkLineRenderOption {
                fill_color: series_color,
                stroke_color: series_color,
                font_color: theme.text_color,
                font: font.clone(),
                series: series.clone(),
                range: y_range,
            });
            label_painters.extend(label_painter);
        }

        let mut overlays: Vec<&dyn Overlay> = vec![&mark_points, &mark_lines];
        overlays.extend(label_painters.iter().map(|l| l as &dyn Overlay));
        render_overlays(&mut series_painter, &overlays)?;
        Ok(self.painter.rect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::painter::PainterOptions;
    use crate::range::{AxisRange, AxisRangeOption};
    use crate::registry::Registry;
    use crate::renderer::OutputType;

    fn render(opt: LineChartOption, values: &[f64]) -> String {
        let registry = Registry::new();
        let p = Painter::new(PainterOptions {
            output: OutputType::Svg,
            width: 300,
            height: 120,
            font: registry.default_font(),
            theme: registry.theme("light"),
        })
        .unwrap();
        // 0..12 over 120px: 10px per unit
        let range = AxisRange::new(AxisRangeOption { min: 0.0, max: 8.0, size: 120, divide_count: 6, boundary: false });
        let result = DefaultRenderResult { axis_ranges: BTreeMap::from([(0, range)]), series_painter: p.clone() };
        let series = SeriesList::from_values(crate::series::ChartType::Line, &[values.to_vec()]);
        LineChart::new(p.clone(), opt).render(&result, &series).unwrap();
        String::from_utf8(p.bytes().unwrap()).unwrap()
    }

    fn x_axis(n: usize, boundary_gap: Option<bool>) -> XAxisOption {
        XAxisOption { data: (0..n).map(|i| i.to_string()).collect(), boundary_gap, ..XAxisOption::default() }
    }

    #[test]
    fn x_values_follow_boundary_gap() {
        assert_eq!(line_x_values(300, 3, true), vec![50, 150, 250]);
        assert_eq!(line_x_values(300, 3, false), vec![0, 150, 300]);
    }

    #[test]
    fn polyline_uses_rest_height() {
        let svg = render(LineChartOption { x_axis: x_axis(3, None), ..Default::default() }, &[0.0, 6.0, 12.0]);
        assert!(svg.contains("d=\"M 50 120 L 150 60 L 250 0\""), "{svg}");
        assert!(svg.contains("stroke-width:2;"));
    }

    #[test]
    fn area_closes_along_the_minimum() {
        let opt = LineChartOption { x_axis: x_axis(3, Some(false)), fill_area: true, symbol_show: Some(false), ..Default::default() };
        let svg = render(opt, &[0.0, 6.0, 12.0]);
        assert!(svg.contains("d=\"M 0 120 L 150 60 L 300 0 L 300 120 L 0 120 L 0 120\""), "{svg}");
    }

    #[test]
    fn extra_values_beyond_categories_are_dropped() {
        let svg = render(LineChartOption { x_axis: x_axis(2, None), symbol_show: Some(false), ..Default::default() }, &[1.0, 2.0, 3.0]);
        assert_eq!(svg.matches("<path").count(), 1);
        assert!(svg.contains("d=\"M 75 110 L 225 100\""), "{svg}");
    }
}
