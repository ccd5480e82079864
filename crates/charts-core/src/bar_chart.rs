// File: crates/charts-core/src/bar_chart.rs
// Summary: Vertical bar geometry: category slots split into one bar per series.

use std::f64::consts::PI;

use crate::chart::DefaultRenderResult;
use crate::error::Result;
use crate::geometry::{Orient, Point, Position, Rect};
use crate::label::{font_color_on, LabelValue, SeriesLabelPainter};
use crate::mark_line::{MarkLinePainter, MarkLineRenderOption};
use crate::mark_point::{MarkPointPainter, MarkPointRenderOption};
use crate::overlay::{render_overlays, Overlay};
use crate::painter::Painter;
use crate::range::AxisRange;
use crate::series::SeriesList;
use crate::style::Style;
use crate::xaxis::XAxisOption;

#[derive(Clone, Debug, Default)]
pub struct BarChartOption {
    pub x_axis: XAxisOption,
    /// Fixed bar width, applied only when narrower than the computed width.
    pub bar_width: i32,
    /// Gap between the bars of one category; 0 keeps the slot-based default.
    pub bar_margin: i32,
}

/// Bar placement inside one category slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarLayout {
    /// Space before the first and after the last bar.
    pub margin: i32,
    /// Space between neighbouring bars.
    pub bar_margin: i32,
    pub bar_width: i32,
}

/// Splits a `slot` pixels wide category into `count` bars. Narrow slots use tighter
/// margins; a fixed `bar_width` smaller than the computed one re-centers the group.
pub fn bar_layout(slot: i32, count: usize, bar_width: i32, bar_margin: i32) -> BarLayout {
    let (mut margin, mut gap) = match slot {
        s if s < 20 => (2, 2),
        s if s < 50 => (5, 3),
        _ => (10, 5),
    };
    if bar_margin > 0 {
        gap = bar_margin;
    }
    let n = count.max(1) as i32;
    let mut width = (slot - 2 * margin - gap * (n - 1)) / n;
    if bar_width > 0 && bar_width < width {
        width = bar_width;
        margin = (slot - n * width - gap * (n - 1)) / 2;
    }
    if margin < 0 {
        margin = 0;
    }
    BarLayout { margin, bar_margin: gap, bar_width: width.max(0) }
}

pub struct BarChart {
    painter: Painter,
    opt: BarChartOption,
}

impl BarChart {
    pub fn new(painter: Painter, opt: BarChartOption) -> Self {
        Self { painter, opt }
    }

    pub fn render(&self, result: &DefaultRenderResult, series_list: &SeriesList) -> Result<Rect> {
        let mut series_painter = result.series_painter.clone();
        let theme = self.painter.theme().clone();
        let font = self.painter.font().clone();
        let x_range = AxisRange::category(self.opt.x_axis.data.len(), series_painter.width(), true);
        let (x0, x1) = x_range.get_range(0);
        let layout = bar_layout((x1 - x0) as i32, series_list.len(), self.opt.bar_width, self.opt.bar_margin);
        let bar_max_height = series_painter.height();
        let series_names = series_list.names();
        let divide_values = x_range.auto_divide();

        let mut mark_points = MarkPointPainter::new();
        let mut mark_lines = MarkLinePainter::new();
        let mut label_painters = Vec::new();

        for (index, series) in series_list.iter().enumerate() {
            let Some(y_range) = result.axis_range(series.axis_index).copied() else {
                continue;
            };
            let series_color = theme.series_color(series.index);
            let mut points = vec![Point::default(); series.data.len()];
            let mut label_painter = series
                .label
                .show
                .then(|| SeriesLabelPainter::new(&series.label, series_names.clone(), theme.clone(), font.clone()));

            for (j, item) in series.data.iter().enumerate() {
                if j >= x_range.divide_count() {
                    continue;
                }
                let x = divide_values[j] + layout.margin + index as i32 * (layout.bar_width + layout.bar_margin);
                let h = y_range.get_height(item.value);
                let fill_color = item.style.fill_color.unwrap_or(series_color);
                let top = bar_max_height - h;
                let bar = Rect::from_ltrb(x, top, x + layout.bar_width, bar_max_height - 1);
                series_painter.override_drawing_style(Style::fill(fill_color));
                if series.round_radius <= 0 {
                    series_painter.rect(bar);
                } else {
                    series_painter.rounded_rect(bar, series.round_radius);
                }
                let center_x = x + (layout.bar_width >> 1);
                points[j] = Point::new(center_x, top);

                let Some(labels) = label_painter.as_mut() else {
                    continue;
                };
                let mut value = LabelValue {
                    index,
                    value: item.value,
                    x: center_x,
                    y: top,
                    font_color: series.label.color,
                    font_size: series.label.font_size,
                    orient: Orient::Vertical,
                    offset: series.label.offset,
                    ..LabelValue::default()
                };
                if series.label.position == Some(Position::Bottom) {
                    value.y = bar_max_height;
                    value.radians = -PI / 2.0;
                    value.font_color = Some(series.label.color.unwrap_or_else(|| font_color_on(fill_color)));
                }
                labels.add(&series_painter, value);
            }
            tracing::trace!(series = index, bars = points.len(), width = layout.bar_width, "bar series laid out");

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
    use super::*;

    #[test]
    fn bar_width_fills_the_slot() {
        for (slot, count) in [(100, 2), (45, 3), (15, 1), (80, 4), (231, 5)] {
            let l = bar_layout(slot, count, 0, 0);
            let n = count as i32;
            let used = n * l.bar_width + (n - 1) * l.bar_margin + 2 * l.margin;
            assert!(slot - used >= 0 && slot - used < n, "slot {slot} count {count}: {l:?}");
        }
    }

    #[test]
    fn narrow_slots_use_tight_margins() {
        assert_eq!(bar_layout(15, 1, 0, 0).margin, 2);
        assert_eq!(bar_layout(45, 1, 0, 0).bar_margin, 3);
        assert_eq!(bar_layout(100, 2, 0, 0), BarLayout { margin: 10, bar_margin: 5, bar_width: 37 });
    }

    #[test]
    fn fixed_width_recenters() {
        let l = bar_layout(100, 2, 20, 0);
        assert_eq!(l.bar_width, 20);
        assert_eq!(l.margin, (100 - 40 - 5) / 2);
        // a fixed width wider than the slot allows is ignored
        assert_eq!(bar_layout(100, 2, 60, 0).bar_width, 37);
    }
}
