// File: crates/charts-core/src/mark_line.rs
// Summary: Dashed horizontal reference lines at a series' max, min or average value.

use std::sync::Arc;

use crate::error::Result;
use crate::label::LABEL_FONT_SIZE;
use crate::overlay::Overlay;
use crate::painter::Painter;
use crate::range::AxisRange;
use crate::series::Series;
use crate::style::{Color, Style};
use crate::text::FontFace;
use crate::util::commaf_with_digits;

#[derive(Clone, Debug)]
pub struct MarkLineRenderOption {
    pub fill_color: Color,
    pub stroke_color: Color,
    pub font_color: Color,
    pub font: Arc<FontFace>,
    pub series: Series,
    pub range: AxisRange,
}

#[derive(Default)]
pub struct MarkLinePainter {
    options: Vec<MarkLineRenderOption>,
}

impl MarkLinePainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, opt: MarkLineRenderOption) {
        self.options.push(opt);
    }
}

impl Overlay for MarkLinePainter {
    fn id(&self) -> &'static str {
        "mark-line"
    }

    fn render(&self, painter: &mut Painter) -> Result<()> {
        for opt in &self.options {
            let series = &opt.series;
            if series.mark_line.data.is_empty() || series.data.is_empty() {
                continue;
            }
            let summary = series.summary();
            for mark in &series.mark_line.data {
                // mark_line swaps the dash for its arrow, so reset before every line
                painter
                    .override_drawing_style(Style {
                        fill_color: Some(opt.fill_color),
                        stroke_color: Some(opt.stroke_color),
                        stroke_width: Some(1.0),
                        stroke_dash_array: Some(vec![4.0, 2.0]),
                        ..Style::default()
                    })
                    .override_text_style(Style {
                        font: Some(opt.font.clone()),
                        font_color: Some(opt.font_color),
                        font_size: Some(LABEL_FONT_SIZE),
                        ..Style::default()
                    });
                let (_, value) = summary.value_of(mark.kind);
                let y = opt.range.get_rest_height(value);
                let width = painter.width();
                let text = commaf_with_digits(value);
                let b = painter.measure_text(&text);
                painter.mark_line(0, y, width - 2);
                painter.text(&text, width, y + (b.height() >> 1) - 2);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painter::PainterOptions;
    use crate::range::AxisRangeOption;
    use crate::registry::Registry;
    use crate::renderer::OutputType;
    use crate::series::{MarkType, SeriesMarkLine};

    #[test]
    fn average_line_is_labelled() {
        let registry = Registry::new();
        let mut p = Painter::new(PainterOptions {
            output: OutputType::Svg,
            width: 300,
            height: 200,
            font: registry.default_font(),
            theme: registry.theme("light"),
        })
        .unwrap();
        let series = Series::bar(&[2.0, 4.0, 6.0]).with_mark_line(SeriesMarkLine::new(&[MarkType::Average]));
        let range = AxisRange::new(AxisRangeOption { min: 2.0, max: 6.0, size: 200, divide_count: 6, boundary: false });
        let mut marks = MarkLinePainter::new();
        marks.add(MarkLineRenderOption {
            fill_color: Color::BLACK,
            stroke_color: Color::BLACK,
            font_color: Color::BLACK,
            font: p.font().clone(),
            series,
            range,
        });
        marks.render(&mut p).unwrap();
        let svg = String::from_utf8(p.bytes().unwrap()).unwrap();
        assert!(svg.contains(">4<"), "{svg}");
        assert!(svg.contains("stroke-dasharray"), "{svg}");
    }
}
