// File: crates/charts-core/src/table.rs
// Summary: Table renderer. A measure pass sizes header and rows from the wrapped cell
// text, then a draw pass paints backgrounds, per-cell fills and the text.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::error::{ChartError, Result};
use crate::geometry::{Align, Rect};
use crate::painter::{Painter, PainterOptions};
use crate::registry::Registry;
use crate::renderer::OutputType;
use crate::style::{Color, Style};
use crate::theme::THEME_LIGHT;
use crate::util::{auto_divide, auto_divide_spans};

pub const DEFAULT_TABLE_WIDTH: i32 = 600;
pub const DEFAULT_TABLE_FONT_SIZE: f64 = 12.0;

/// One cell as seen by the style callbacks. Row 0 is the header.
#[derive(Clone, Debug, Default)]
pub struct TableCell {
    pub text: String,
    /// Text style the cell would be drawn with.
    pub style: Style,
    pub row: usize,
    pub column: usize,
}

/// Per-cell style hook; `None` keeps the default.
pub type CellStyleFn = Arc<dyn Fn(&TableCell) -> Option<Style> + Send + Sync>;

/// Colors and padding shared by every table of a light or dark theme.
#[derive(Clone, Debug, PartialEq)]
pub struct TableSetting {
    pub header_color: Color,
    pub header_font_color: Color,
    pub font_color: Color,
    /// Row backgrounds, cycled.
    pub row_colors: Vec<Color>,
    pub padding: Rect,
}

impl TableSetting {
    pub fn light() -> Self {
        Self {
            header_color: Color::rgb(240, 240, 240),
            header_font_color: Color::rgb(98, 105, 118),
            font_color: Color::rgb(70, 70, 70),
            row_colors: vec![Color::WHITE, Color::rgb(247, 247, 247)],
            padding: Rect::new_padding_all(10),
        }
    }

    pub fn dark() -> Self {
        Self {
            header_color: Color::rgb(38, 38, 42),
            header_font_color: Color::rgb(216, 217, 218),
            font_color: Color::rgb(216, 217, 218),
            row_colors: vec![Color::rgb(24, 24, 28), Color::rgb(38, 38, 42)],
            padding: Rect::new_padding_all(10),
        }
    }
}

#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableChartOption {
    #[serde(rename = "type")]
    pub output: OutputType,
    /// 0 selects 600.
    pub width: i32,
    pub theme: String,
    pub font_family: String,
    /// Cell padding; zero uses the setting's 10px.
    pub padding: Rect,
    pub header: Vec<String>,
    pub data: Vec<Vec<String>>,
    /// Relative column widths in even units; missing entries count as 1.
    pub spans: Vec<usize>,
    /// Per column: a fraction of the width below 1.0, pixels from 1.0, 0 unspecified.
    /// Takes precedence over `spans` when set.
    pub column_widths: Vec<f64>,
    pub text_aligns: Vec<Align>,
    pub font_size: f64,
    pub font_color: Option<Color>,
    pub header_background_color: Option<Color>,
    pub header_font_color: Option<Color>,
    pub row_background_colors: Vec<Color>,
    pub background_color: Option<Color>,
    #[serde(skip)]
    pub cell_text_style: Option<CellStyleFn>,
    #[serde(skip)]
    pub cell_style: Option<CellStyleFn>,
}

impl fmt::Debug for TableChartOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableChartOption")
            .field("output", &self.output)
            .field("width", &self.width)
            .field("theme", &self.theme)
            .field("header", &self.header)
            .field("rows", &self.data.len())
            .field("spans", &self.spans)
            .field("column_widths", &self.column_widths)
            .finish_non_exhaustive()
    }
}

impl TableChartOption {
    pub fn new<S: Into<String>>(header: impl IntoIterator<Item = S>, data: Vec<Vec<String>>) -> Self {
        Self { header: header.into_iter().map(Into::into).collect(), data, ..Self::default() }
    }

    pub fn with_cell_text_style(mut self, f: impl Fn(&TableCell) -> Option<Style> + Send + Sync + 'static) -> Self {
        self.cell_text_style = Some(Arc::new(f));
        self
    }

    pub fn with_cell_style(mut self, f: impl Fn(&TableCell) -> Option<Style> + Send + Sync + 'static) -> Self {
        self.cell_style = Some(Arc::new(f));
        self
    }
}

/// Result of the measure pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableRenderInfo {
    pub width: i32,
    pub height: i32,
    pub header_height: i32,
    pub row_heights: Vec<i32>,
    pub column_widths: Vec<i32>,
}

/// Resolves the pixel width of each of `columns` columns out of `total`.
pub fn table_column_widths(total: i32, columns: usize, spans: &[usize], column_widths: &[f64]) -> Result<Vec<i32>> {
    if column_widths.iter().all(|w| *w <= 0.0) {
        let spans: Vec<usize> = (0..columns).map(|i| spans.get(i).copied().filter(|s| *s > 0).unwrap_or(1)).collect();
        let bounds = auto_divide_spans(total, &spans);
        return Ok(bounds.windows(2).map(|w| w[1] - w[0]).collect());
    }

    let specified: Vec<Option<i32>> = (0..columns)
        .map(|i| match column_widths.get(i).copied().unwrap_or(0.0) {
            w if w <= 0.0 => None,
            w if w < 1.0 => Some((w * f64::from(total)) as i32),
            w => Some(w as i32),
        })
        .collect();
    let used: i32 = specified.iter().flatten().sum();
    if used > total {
        return Err(ChartError::ColumnWidthOverflow { specified: used, total });
    }
    let free = specified.iter().filter(|w| w.is_none()).count();
    let shares = auto_divide(total - used, free.max(1));
    let mut share = shares.windows(2).map(|w| w[1] - w[0]);
    Ok(specified.into_iter().map(|w| w.unwrap_or_else(|| share.next().unwrap_or(0))).collect())
}

pub struct TableChart {
    painter: Painter,
    opt: TableChartOption,
}

impl TableChart {
    pub fn new(painter: Painter, opt: TableChartOption) -> Self {
        Self { painter, opt }
    }

    fn setting(&self) -> TableSetting {
        if self.painter.theme().is_dark {
            TableSetting::dark()
        } else {
            TableSetting::light()
        }
    }

    fn font_size(&self) -> f64 {
        if self.opt.font_size > 0.0 {
            self.opt.font_size
        } else {
            DEFAULT_TABLE_FONT_SIZE
        }
    }

    fn padding(&self, setting: &TableSetting) -> Rect {
        if self.opt.padding.is_zero() {
            setting.padding
        } else {
            self.opt.padding
        }
    }

    /// Header text style for row 0, body style otherwise.
    fn row_style(&self, setting: &TableSetting, row: usize) -> Style {
        let color = if row == 0 {
            self.opt.header_font_color.unwrap_or(setting.header_font_color)
        } else {
            self.opt.font_color.unwrap_or(setting.font_color)
        };
        Style {
            font: Some(self.painter.font().clone()),
            font_size: Some(self.font_size()),
            font_color: Some(color),
            ..Style::default()
        }
    }

    fn rows(&self) -> impl Iterator<Item = &[String]> {
        std::iter::once(self.opt.header.as_slice()).chain(self.opt.data.iter().map(Vec::as_slice))
    }

    fn cell_text_style(&self, text: &str, row: usize, column: usize, base: &Style) -> Style {
        let cell = TableCell { text: text.to_string(), style: base.clone(), row, column };
        self.opt
            .cell_text_style
            .as_ref()
            .and_then(|f| f(&cell))
            .map(|style| base.merge(&style))
            .unwrap_or_else(|| base.clone())
    }

    /// Measure pass: column widths and the height of every row, nothing is drawn.
    pub fn measure(&self) -> Result<TableRenderInfo> {
        if self.opt.header.is_empty() {
            return Err(ChartError::EmptyTableHeader);
        }
        let setting = self.setting();
        let padding = self.padding(&setting);
        let width = self.painter.width();
        let column_widths = table_column_widths(width, self.opt.header.len(), &self.opt.spans, &self.opt.column_widths)?;

        let mut heights = Vec::with_capacity(self.opt.data.len() + 1);
        for (row, cells) in self.rows().enumerate() {
            let base = self.row_style(&setting, row);
            let mut row_height = 0;
            for (column, (text, &column_width)) in cells.iter().zip(&column_widths).enumerate() {
                let mut cell = self.painter.child(&[]);
                cell.set_text_style(self.cell_text_style(text, row, column, &base));
                let b = cell.measure_text_fit(text, column_width - padding.left - padding.right);
                row_height = row_height.max(b.height() + padding.top + padding.bottom);
            }
            heights.push(row_height);
        }
        let header_height = heights.first().copied().unwrap_or(0);
        let row_heights = heights.split_off(1.min(heights.len()));
        let height = header_height + row_heights.iter().sum::<i32>();
        debug!(width, height, rows = row_heights.len(), "table measured");
        Ok(TableRenderInfo { width, height, header_height, row_heights, column_widths })
    }

    /// Draws the table and returns its box.
    pub fn render(&mut self) -> Result<Rect> {
        let info = self.measure()?;
        self.render_with_info(&info)
    }

    pub fn render_with_info(&mut self, info: &TableRenderInfo) -> Result<Rect> {
        let setting = self.setting();
        let padding = self.padding(&setting);
        let font_size = self.font_size() as i32;
        let p = &mut self.painter;

        if let Some(color) = self.opt.background_color {
            p.set_background(p.width(), p.height(), color, true);
        }
        let header_color = self.opt.header_background_color.unwrap_or(setting.header_color);
        p.set_background(info.width, info.header_height, header_color, true);

        let row_colors = if self.opt.row_background_colors.is_empty() { &setting.row_colors } else { &self.opt.row_background_colors };
        let mut top = info.header_height;
        for (index, &h) in info.row_heights.iter().enumerate() {
            if let Some(&color) = row_colors.get(index % row_colors.len().max(1)) {
                p.padded(Rect::from_ltrb(0, top, 0, 0)).set_background(info.width, h, color, true);
            }
            top += h;
        }

        let heights: Vec<i32> = std::iter::once(info.header_height).chain(info.row_heights.iter().copied()).collect();
        let lefts: Vec<i32> = std::iter::once(0)
            .chain(info.column_widths.iter().scan(0, |acc, w| {
                *acc += w;
                Some(*acc)
            }))
            .collect();

        if let Some(cell_style) = self.opt.cell_style.clone() {
            let mut top = 0;
            for (row, cells) in self.rows().enumerate() {
                for (column, text) in cells.iter().enumerate().take(info.column_widths.len()) {
                    let cell = TableCell { text: text.clone(), row, column, ..TableCell::default() };
                    let Some(fill) = cell_style(&cell).and_then(|s| s.fill_color) else {
                        continue;
                    };
                    self.painter.padded(Rect::from_ltrb(lefts[column], top, 0, 0)).set_background(
                        info.column_widths[column],
                        heights[row],
                        fill,
                        true,
                    );
                }
                top += heights[row];
            }
        }

        let mut top = 0;
        for (row, cells) in self.rows().enumerate() {
            let base = self.row_style(&setting, row);
            for (column, text) in cells.iter().enumerate().take(info.column_widths.len()) {
                let align = self.opt.text_aligns.get(column).copied().unwrap_or_default();
                let mut cell = self.painter.child(&[]);
                cell.set_text_style(self.cell_text_style(text, row, column, &base));
                let width = info.column_widths[column] - padding.left - padding.right;
                cell.text_fit(text, lefts[column] + padding.left, top + padding.top + font_size, width, align);
            }
            top += heights.get(row).copied().unwrap_or(0);
        }
        Ok(Rect::from_ltrb(0, 0, info.width, info.height))
    }
}

/// Renders a table onto a canvas exactly as tall as its measured rows.
pub fn table_render(opt: TableChartOption, registry: &Registry) -> Result<Painter> {
    let width = if opt.width > 0 { opt.width } else { DEFAULT_TABLE_WIDTH };
    let theme = registry.theme(if opt.theme.is_empty() { THEME_LIGHT } else { opt.theme.as_str() });
    let font = if opt.font_family.is_empty() { registry.default_font() } else { registry.font(&opt.font_family) };

    let measure_painter = Painter::new(PainterOptions { output: OutputType::Svg, width, height: 100, font: font.clone(), theme: theme.clone() })?;
    let info = TableChart::new(measure_painter, opt.clone()).measure()?;

    let painter = Painter::new(PainterOptions { output: opt.output, width, height: info.height.max(1), font, theme })?;
    TableChart::new(painter.clone(), opt).render_with_info(&info)?;
    Ok(painter)
}

/// Renders the table and encodes it with the option's output type.
pub fn table_render_to_bytes(opt: TableChartOption, registry: &Registry) -> Result<Vec<u8>> {
    table_render(opt, registry)?.bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Vec<String>> {
        [["Alice", "23", "Engineer"], ["Bob", "31", "Gardener with a long description of the job"]]
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn spans_divide_the_width() {
        assert_eq!(table_column_widths(400, 3, &[1, 2], &[]).unwrap(), vec![100, 200, 100]);
    }

    #[test]
    fn fixed_fraction_and_leftover_columns() {
        assert_eq!(table_column_widths(600, 3, &[], &[100.0, 0.5, 0.0]).unwrap(), vec![100, 300, 200]);
        assert_eq!(table_column_widths(600, 4, &[], &[0.5]).unwrap(), vec![300, 100, 100, 100]);
    }

    #[test]
    fn overflowing_widths_are_rejected() {
        let err = table_column_widths(300, 2, &[], &[200.0, 150.0]).unwrap_err();
        assert!(matches!(err, ChartError::ColumnWidthOverflow { specified: 350, total: 300 }));
    }

    #[test]
    fn empty_header_is_rejected() {
        let err = table_render(TableChartOption::default(), &Registry::new()).unwrap_err();
        assert!(matches!(err, ChartError::EmptyTableHeader));
    }

    #[test]
    fn canvas_height_matches_measured_rows() {
        let registry = Registry::new();
        let opt = TableChartOption { width: 300, ..TableChartOption::new(["Name", "Age", "Job"], rows()) };
        let painter = table_render(opt, &registry).unwrap();
        let p = Painter::new(PainterOptions {
            output: OutputType::Svg,
            width: 300,
            height: 100,
            font: registry.default_font(),
            theme: registry.theme("light"),
        })
        .unwrap();
        let info = TableChart::new(p, TableChartOption::new(["Name", "Age", "Job"], rows())).measure().unwrap();
        assert_eq!(painter.height(), info.height);
        assert_eq!(info.row_heights.len(), 2);
        // the long job description wraps onto more lines
        assert!(info.row_heights[1] > info.row_heights[0]);
        assert_eq!(info.height, info.header_height + info.row_heights.iter().sum::<i32>());
    }

    #[test]
    fn cell_callbacks_restyle_cells() {
        let opt = TableChartOption::new(["Name", "Score"], vec![vec!["a".into(), "-3".into()]])
            .with_cell_text_style(|cell| (cell.text.starts_with('-')).then(|| Style::default().with_font_color(Color::rgb(255, 0, 0))))
            .with_cell_style(|cell| (cell.row == 1 && cell.column == 1).then(|| Style::fill(Color::rgb(0, 0, 255))));
        let painter = table_render(opt, &Registry::new()).unwrap();
        let svg = String::from_utf8(painter.bytes().unwrap()).unwrap();
        assert!(svg.contains("fill:rgb(255,0,0)"), "{svg}");
        assert!(svg.contains("fill:rgb(0,0,255)"), "{svg}");
    }
}
