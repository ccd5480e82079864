// File: crates/charts-core/src/horizontal_bar_chart.rs
// Summary: Horizontal bars: categories run down the Y axis (first category at the
// bottom), values grow to the right.

use crate::bar_chart::bar_layout;
use crate::chart::DefaultRenderResult;
use crate::error::Result;
use crate::geometry::{Position, Rect};
use crate::label::{font_color_on, LabelValue, SeriesLabelPainter};
use crate::overlay::{render_overlays, Overlay};
use crate::painter::Painter;
use crate::range::{AxisRange, AxisRangeOption, DEFAULT_AXIS_DIVIDE_COUNT};
use crate::series::SeriesList;
use crate::style::Style;
use crate::yaxis::YAxisOption;

#[derive(Clone, Debug, Default)]
pub struct HorizontalBarChartOption {
    /// The first entry carries the category labels.
    pub y_axis_options: Vec<YAxisOption>,
    pub bar_height: i32,
    pub bar_margin: i32,
}

pub struct HorizontalBarChart {
    painter: Painter,
    opt: HorizontalBarChartOption,
}

impl HorizontalBarChart {
    pub fn new(painter: Painter, opt: HorizontalBarChartOption) -> Self {
        Self { painter, opt }
    }

    pub fn render(&self, result: &DefaultRenderResult, series_list: &SeriesList) -> Result<Rect> {
        let mut series_painter = result.series_painter.clone();
        let theme = self.painter.theme().clone();
        let font = self.painter.font().clone();
        let categories = self.opt.y_axis_options.first().map(|y| y.data.len()).unwrap_or(0);
        let y_range = AxisRange::category(categories, series_painter.height(), true);
        let (y0, y1) = y_range.get_range(0);
        let layout = bar_layout((y1 - y0) as i32, series_list.len(), self.opt.bar_height, self.opt.bar_margin);

        let (min, max) = series_list.min_max(0);
        let x_range = AxisRange::new(AxisRangeOption {
            min,
            max,
            size: series_painter.width(),
            divide_count: DEFAULT_AXIS_DIVIDE_COUNT,
            boundary: false,
        });
        let series_names = series_list.names();
        let divide_values = y_range.auto_divide();
        let divide_count = y_range.divide_count();
        let mut label_painters = Vec::new();

        for (index, series) in series_list.iter().enumerate() {
            let series_color = theme.series_color(series.index);
            let mut label_painter = series
                .label
                .show
                .then(|| SeriesLabelPainter::new(&series.label, series_names.clone(), theme.clone(), font.clone()));

            for (j, item) in series.data.iter().enumerate().take(divide_count) {
                // last category on top
                let slot = divide_count - j - 1;
                let y = divide_values[slot] + layout.margin + index as i32 * (layout.bar_width + layout.bar_margin);
                let w = x_range.get_height(item.value);
                let fill_color = item.style.fill_color.unwrap_or(series_color);
                series_painter.override_drawing_style(Style::fill(fill_color));
                series_painter.rect(Rect::from_ltrb(0, y, w, y + layout.bar_width));

                let Some(labels) = label_painter.as_mut() else {
                    continue;
                };
                let mut value = LabelValue {
                    index,
                    value: item.value,
                    x: w,
                    y: y + (layout.bar_width >> 1),
                    font_color: series.label.color,
                    font_size: series.label.font_size,
                    offset: series.label.offset,
                    ..LabelValue::default()
                };
                if series.label.position == Some(Position::Left) {
                    value.x = 0;
                    value.font_color = Some(series.label.color.unwrap_or_else(|| font_color_on(fill_color)));
                }
                labels.add(&series_painter, value);
            }
            label_painters.extend(label_painter);
        }
        tracing::trace!(series = series_list.len(), categories, bar_height = layout.bar_width, "horizontal bars laid out");

        let overlays: Vec<&dyn Overlay> = label_painters.iter().map(|l| l as &dyn Overlay).collect();
        render_overlays(&mut series_painter, &overlays)?;
        Ok(self.painter.rect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::painter::PainterOptions;
    use crate::registry::Registry;
    use crate::renderer::OutputType;

    #[test]
    fn first_category_is_drawn_at_the_bottom() {
        let registry = Registry::new();
        let p = Painter::new(PainterOptions {
            output: OutputType::Svg,
            width: 300,
            height: 300,
            font: registry.default_font(),
            theme: registry.theme("light"),
        })
        .unwrap();
        let result = DefaultRenderResult { axis_ranges: BTreeMap::new(), series_painter: p.clone() };
        let y_axis = YAxisOption { data: vec!["a".into(), "b".into(), "c".into()], ..YAxisOption::default() };
        let opt = HorizontalBarChartOption { y_axis_options: vec![y_axis], ..Default::default() };
        let series = SeriesList::horizontal_bar(&[vec![10.0, 20.0, 30.0]]);
        HorizontalBarChart::new(p.clone(), opt).render(&result, &series).unwrap();

        let svg = String::from_utf8(p.bytes().unwrap()).unwrap();
        // 100px slots: 10px margin, one 80px bar
        let first = svg.find("d=\"M 0 210 L").expect("first bar in the bottom slot");
        let last = svg.find("d=\"M 0 10 L").expect("last bar in the top slot");
        assert!(first < last);
        assert!(svg.contains(" 290 L 0 290"));
    }
}
