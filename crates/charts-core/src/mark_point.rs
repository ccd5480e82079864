// File: crates/charts-core/src/mark_point.rs
// Summary: Pin markers with the value text over the max/min data points of a series.

use std::sync::Arc;

use crate::error::Result;
use crate::geometry::Point;
use crate::label::{font_color_on, LABEL_FONT_SIZE, SMALL_LABEL_FONT_SIZE};
use crate::overlay::Overlay;
use crate::painter::Painter;
use crate::series::{MarkType, Series};
use crate::style::{Color, Style};
use crate::text::FontFace;
use crate::util::commaf_with_digits;

const DEFAULT_SYMBOL_SIZE: i32 = 30;

#[derive(Clone, Debug)]
pub struct MarkPointRenderOption {
    pub fill_color: Color,
    pub font: Arc<FontFace>,
    pub series: Series,
    /// Pixel position of every data point of `series`, in data order.
    pub points: Vec<Point>,
}

#[derive(Default)]
pub struct MarkPointPainter {
    options: Vec<MarkPointRenderOption>,
}

impl MarkPointPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, opt: MarkPointRenderOption) {
        self.options.push(opt);
    }
}

impl Overlay for MarkPointPainter {
    fn id(&self) -> &'static str {
        "mark-point"
    }

    fn render(&self, painter: &mut Painter) -> Result<()> {
        for opt in &self.options {
            let series = &opt.series;
            if series.mark_point.data.is_empty() || opt.points.is_empty() {
                continue;
            }
            let summary = series.summary();
            let symbol_size = if series.mark_point.symbol_size > 0 { series.mark_point.symbol_size } else { DEFAULT_SYMBOL_SIZE };
            let mut text_style = Style {
                font: Some(opt.font.clone()),
                font_size: Some(LABEL_FONT_SIZE),
                font_color: Some(font_color_on(opt.fill_color)),
                stroke_width: Some(1.0),
                ..Style::default()
            };
            painter.override_drawing_style(Style::fill(opt.fill_color));
            for mark in &series.mark_point.data {
                // a pin over the mean has no data point to sit on
                if mark.kind == MarkType::Average {
                    continue;
                }
                let (index, value) = summary.value_of(mark.kind);
                let Some(&p) = opt.points.get(index) else {
                    continue;
                };
                text_style.font_size = Some(LABEL_FONT_SIZE);
                painter.override_text_style(text_style.clone());
                painter.pin(p.x, p.y - (symbol_size >> 1), symbol_size);

                let text = commaf_with_digits(value);
                let mut b = painter.measure_text(&text);
                if b.width() > symbol_size {
                    text_style.font_size = Some(SMALL_LABEL_FONT_SIZE);
                    painter.override_text_style(text_style.clone());
                    b = painter.measure_text(&text);
                }
                painter.text(&text, p.x - (b.width() >> 1), p.y - (symbol_size >> 1) - 2);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painter::PainterOptions;
    use crate::registry::Registry;
    use crate::renderer::OutputType;
    use crate::series::SeriesMarkPoint;

    fn painter() -> Painter {
        let registry = Registry::new();
        Painter::new(PainterOptions {
            output: OutputType::Svg,
            width: 300,
            height: 200,
            font: registry.default_font(),
            theme: registry.theme("light"),
        })
        .unwrap()
    }

    #[test]
    fn pins_max_and_min() {
        let mut p = painter();
        let series = Series::line(&[3.0, 120.0, 7.0]).with_mark_point(SeriesMarkPoint::new(&[MarkType::Max, MarkType::Min]));
        let mut marks = MarkPointPainter::new();
        marks.add(MarkPointRenderOption {
            fill_color: Color::rgb(84, 112, 198),
            font: p.font().clone(),
            series,
            points: vec![Point::new(10, 150), Point::new(100, 20), Point::new(200, 140)],
        });
        marks.render(&mut p).unwrap();
        let svg = String::from_utf8(p.bytes().unwrap()).unwrap();
        assert!(svg.contains(">120<"), "{svg}");
        assert!(svg.contains(">3<"), "{svg}");
    }

    #[test]
    fn wide_value_shrinks_pin_text() {
        let render_pin = |value: f64| {
            let mut p = painter();
            let mark_point = SeriesMarkPoint { symbol_size: 20, ..SeriesMarkPoint::new(&[MarkType::Max]) };
            let mut marks = MarkPointPainter::new();
            marks.add(MarkPointRenderOption {
                fill_color: Color::rgb(84, 112, 198),
                font: p.font().clone(),
                series: Series::line(&[value]).with_mark_point(mark_point),
                points: vec![Point::new(100, 100)],
            });
            marks.render(&mut p).unwrap();
            String::from_utf8(p.bytes().unwrap()).unwrap()
        };
        let wide = render_pin(123456789.0);
        assert!(wide.contains(">123.45M<"), "{wide}");
        assert!(wide.contains("font-size:8px"), "{wide}");
        assert!(!wide.contains("font-size:10px"), "{wide}");

        let narrow = render_pin(7.0);
        assert!(narrow.contains("font-size:10px"), "{narrow}");
    }

    #[test]
    fn series_without_marks_draws_nothing() {
        let mut p = painter();
        let mut marks = MarkPointPainter::new();
        marks.add(MarkPointRenderOption {
            fill_color: Color::BLACK,
            font: p.font().clone(),
            series: Series::line(&[1.0]),
            points: vec![Point::new(10, 10)],
        });
        marks.render(&mut p).unwrap();
        let svg = String::from_utf8(p.bytes().unwrap()).unwrap();
        assert!(!svg.contains("<path"), "{svg}");
    }
}
