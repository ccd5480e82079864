// File: crates/charts-core/src/pie_chart.rs
// Summary: Pie wedges in data order, clockwise from twelve o'clock, with radial leader
// lines and `{b}: {d}` labels.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::chart::DefaultRenderResult;
use crate::error::{ChartError, Result};
use crate::geometry::Rect;
use crate::label::LABEL_FONT_SIZE;
use crate::painter::Painter;
use crate::series::{format_label, SeriesList, PIE_LABEL_LAYOUT};
use crate::style::Style;
use crate::util::get_radius;

const LABEL_TEXT_MARGIN: i32 = 3;
/// Leader lines closer than this on both axes count as overlapping.
const LABEL_OVERLAP: i32 = LABEL_FONT_SIZE as i32;

#[derive(Clone, Debug, Default)]
pub struct PieChartOption {
    /// Slice names; empty uses the series names.
    pub series_names: Vec<String>,
}

/// Angular extent of one slice, in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieSector {
    pub value: f64,
    pub percent: f64,
    pub start: f64,
    pub delta: f64,
}

impl PieSector {
    pub fn end(&self) -> f64 {
        self.start + self.delta
    }

    pub fn mid(&self) -> f64 {
        self.start + self.delta / 2.0
    }
}

/// Splits the full circle proportionally to `values`, starting at `-π/2`.
pub fn pie_sectors(values: &[f64]) -> Result<Vec<PieSector>> {
    let total: f64 = values.iter().sum();
    if !(total > 0.0) {
        return Err(ChartError::PieSumNotPositive);
    }
    let mut current = 0.0;
    Ok(values
        .iter()
        .map(|&value| {
            let start = current / total * TAU - FRAC_PI_2;
            current += value;
            let percent = value / total;
            PieSector { value, percent, start, delta: percent * TAU }
        })
        .collect())
}

pub struct PieChart {
    painter: Painter,
    opt: PieChartOption,
}

impl PieChart {
    pub fn new(painter: Painter, opt: PieChartOption) -> Self {
        Self { painter, opt }
    }

    pub fn render(&self, result: &DefaultRenderResult, series_list: &SeriesList) -> Result<Rect> {
        let values: Vec<f64> = series_list.iter().map(|s| s.values().sum()).collect();
        let sectors = pie_sectors(&values)?;
        let radius_value = series_list.iter().rev().find_map(|s| s.radius.as_deref());

        let mut p = result.series_painter.clone();
        let theme = self.painter.theme().clone();
        let font = self.painter.font().clone();
        let cx = p.width() >> 1;
        let cy = p.height() >> 1;
        let radius = get_radius(f64::from(p.width().min(p.height())), radius_value);
        let label_line_width = if radius < 50.0 { 10 } else { 15 };
        let label_radius = radius + f64::from(label_line_width);
        let series_names = if self.opt.series_names.is_empty() { series_list.names() } else { self.opt.series_names.clone() };
        tracing::trace!(slices = sectors.len(), radius, "pie layout");

        if sectors.len() == 1 {
            let color = theme.series_color(0);
            p.override_drawing_style(Style::stroke(color, 1.0).with_fill(color));
            p.circle(radius, cx, cy).fill_stroke();
            return Ok(self.painter.rect());
        }

        let (mut prev_end_x, mut prev_end_y) = (0, 0);
        for (index, (sector, series)) in sectors.iter().zip(series_list.iter()).enumerate() {
            let color = theme.series_color(index);
            p.override_drawing_style(Style::stroke(color, 1.0).with_fill(color));
            p.move_to(cx, cy)
                .arc_to(cx, cy, radius, radius, sector.start, sector.delta)
                .line_to(cx, cy)
                .close()
                .fill_stroke();
            if !series.label.show {
                continue;
            }

            let angle = sector.mid();
            let start_x = cx + (radius * angle.cos()) as i32;
            let start_y = cy + (radius * angle.sin()) as i32;
            let mut end_x = cx + (label_radius * angle.cos()) as i32;
            let mut end_y = cy + (label_radius * angle.sin()) as i32;
            if index != 0 && (end_x - prev_end_x).abs() < LABEL_OVERLAP && (end_y - prev_end_y).abs() < LABEL_OVERLAP {
                end_y -= LABEL_OVERLAP << 1;
            }
            prev_end_x = end_x;
            prev_end_y = end_y;

            let offset = if end_x < cx { -label_line_width } else { label_line_width };
            p.move_to(start_x, start_y).line_to(end_x, end_y);
            p.move_to(end_x, end_y);
            end_x += offset;
            p.line_to(end_x, end_y).stroke();

            let font_color = series.label.color.or(series.style.font_color).unwrap_or(theme.text_color);
            p.override_text_style(Style {
                font: Some(font.clone()),
                font_size: Some(series.label.font_size.unwrap_or(LABEL_FONT_SIZE)),
                font_color: Some(font_color),
                ..Style::default()
            });
            let name = series_names.get(index).map(String::as_str).unwrap_or("");
            let text = format_label(series.label.formatter.as_deref(), PIE_LABEL_LAYOUT, name, sector.value, sector.percent);
            let b = p.measure_text(&text);
            let x = if offset < 0 { end_x - b.width() - LABEL_TEXT_MARGIN } else { end_x + LABEL_TEXT_MARGIN };
            let y = end_y + (b.height() >> 1) - 1;
            p.text(&text, x, y);
        }
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
    use crate::series::SeriesLabel;

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
    fn sweeps_close_the_circle() {
        let sectors = pie_sectors(&[1048.0, 735.0, 580.0, 484.0, 300.0]).unwrap();
        let sweep: f64 = sectors.iter().map(|s| s.delta).sum();
        assert!((sweep - TAU).abs() < 1e-9);
        let first = sectors.first().unwrap();
        let last = sectors.last().unwrap();
        assert!((last.end() - (first.start + TAU)).abs() < 1e-9);
        for pair in sectors.windows(2) {
            assert!((pair[0].end() - pair[1].start).abs() < 1e-9);
        }
        assert!((first.start + FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn non_positive_total_is_rejected() {
        assert!(matches!(pie_sectors(&[0.0, 0.0]), Err(ChartError::PieSumNotPositive)));
        assert!(matches!(pie_sectors(&[]), Err(ChartError::PieSumNotPositive)));
    }

    #[test]
    fn labels_use_names_and_percent() {
        let p = painter();
        let result = DefaultRenderResult { axis_ranges: BTreeMap::new(), series_painter: p.clone() };
        let mut series = SeriesList::pie(&[3.0, 1.0]);
        for s in series.iter_mut() {
            s.label = SeriesLabel::shown();
        }
        let opt = PieChartOption { series_names: vec!["Search".into(), "Direct".into()] };
        PieChart::new(p.clone(), opt).render(&result, &series).unwrap();
        let svg = String::from_utf8(p.bytes().unwrap()).unwrap();
        assert!(svg.contains(">Search: 75%<"), "{svg}");
        assert!(svg.contains(">Direct: 25%<"), "{svg}");
    }

    #[test]
    fn single_value_draws_a_circle() {
        let p = painter();
        let result = DefaultRenderResult { axis_ranges: BTreeMap::new(), series_painter: p.clone() };
        PieChart::new(p.clone(), PieChartOption::default()).render(&result, &SeriesList::pie(&[5.0])).unwrap();
        let svg = String::from_utf8(p.bytes().unwrap()).unwrap();
        assert_eq!(svg.matches("<path").count(), 1);
        assert!(!svg.contains("<text"));
    }
}
