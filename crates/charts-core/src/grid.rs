// File: crates/charts-core/src/grid.rs
// Summary: Evenly spaced background grid lines with optional outer lines suppressed.

use crate::error::Result;
use crate::geometry::Rect;
use crate::painter::{GridOption, Painter};
use crate::style::{Color, Style};

#[derive(Clone, Debug, Default)]
pub struct GridPainterOption {
    /// 0 or less selects 1.
    pub stroke_width: f64,
    pub stroke_color: Option<Color>,
    pub column: usize,
    pub row: usize,
    pub ignore_first_row: bool,
    pub ignore_last_row: bool,
    pub ignore_first_column: bool,
    pub ignore_last_column: bool,
}

pub struct GridPainter {
    painter: Painter,
    opt: GridPainterOption,
}

impl GridPainter {
    pub fn new(painter: Painter, opt: GridPainterOption) -> Self {
        Self { painter, opt }
    }

    pub fn render(&mut self) -> Result<Rect> {
        let opt = &self.opt;
        let outer = |first: bool, last: bool, count: usize| {
            let mut lines = Vec::new();
            if first {
                lines.push(0);
            }
            if last {
                lines.push(count);
            }
            lines
        };
        let stroke_width = if opt.stroke_width <= 0.0 { 1.0 } else { opt.stroke_width };
        let stroke_color = opt.stroke_color.unwrap_or(self.painter.theme().axis_split_line_color);
        self.painter.set_drawing_style(Style::stroke(stroke_color, stroke_width));
        self.painter.grid(&GridOption {
            column: opt.column,
            row: opt.row,
            ignore_column_lines: outer(opt.ignore_first_column, opt.ignore_last_column, opt.column),
            ignore_row_lines: outer(opt.ignore_first_row, opt.ignore_last_row, opt.row),
            ..GridOption::default()
        });
        Ok(self.painter.rect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painter::PainterOptions;
    use crate::registry::Registry;
    use crate::renderer::OutputType;

    #[test]
    fn outer_lines_can_be_skipped() {
        let registry = Registry::new();
        let p = Painter::new(PainterOptions {
            output: OutputType::Svg,
            width: 300,
            height: 200,
            font: registry.default_font(),
            theme: registry.theme("light"),
        })
        .unwrap();
        let opt = GridPainterOption {
            column: 3,
            row: 2,
            ignore_first_column: true,
            ignore_last_column: true,
            ignore_first_row: true,
            ..GridPainterOption::default()
        };
        let b = GridPainter::new(p.clone(), opt).render().unwrap();
        assert_eq!(b, Rect::from_ltwh(0, 0, 300, 200));
        let svg = String::from_utf8(p.bytes().unwrap()).unwrap();
        // columns 1 and 2 plus rows 1 and 2
        assert_eq!(svg.matches("<path").count(), 4, "{svg}");
        assert!(svg.contains("M 100 0 L 100 200"), "{svg}");
    }
}
