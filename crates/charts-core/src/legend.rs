// File: crates/charts-core/src/legend.rs
// Summary: Legend component: one icon plus series name per entry, laid out horizontally
// with wrapping or stacked vertically.

use std::sync::Arc;

use serde::Deserialize;

use crate::error::Result;
use crate::geometry::{Align, Orient, Rect};
use crate::painter::Painter;
use crate::style::{Color, Style};
use crate::text::FontFace;
use crate::theme::Theme;
use crate::util::{deserialize_flex, flex_left};

const ITEM_GAP: i32 = 20;
const TEXT_GAP: i32 = 2;
const ICON_WIDTH: i32 = 30;
const ICON_HEIGHT: i32 = 20;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendIcon {
    /// Thick line with a dot.
    #[default]
    Dot,
    Rect,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegendOption {
    #[serde(skip)]
    pub theme: Option<Arc<Theme>>,
    #[serde(skip)]
    pub font: Option<Arc<FontFace>>,
    /// Entry names; defaults to the series names.
    pub data: Vec<String>,
    pub font_size: Option<f64>,
    pub font_color: Option<Color>,
    /// `left`, `center` (the default), `right`, `"20%"` or pixels.
    #[serde(deserialize_with = "deserialize_flex")]
    pub left: Option<String>,
    /// Pixels from the top.
    #[serde(deserialize_with = "deserialize_flex")]
    pub top: Option<String>,
    /// `Right` draws the icon after the text.
    pub align: Align,
    pub orient: Orient,
    pub icon: LegendIcon,
    pub show: Option<bool>,
    /// Zero selects a 5px top padding.
    pub padding: Rect,
}

impl LegendOption {
    pub fn new<S: Into<String>>(data: impl IntoIterator<Item = S>) -> Self {
        Self { data: data.into_iter().map(Into::into).collect(), ..Self::default() }
    }

    pub fn with_left(mut self, left: impl Into<String>) -> Self {
        self.left = Some(left.into());
        self
    }

    /// No names, or only blank ones.
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|name| name.is_empty())
    }
}

pub struct LegendPainter {
    painter: Painter,
    opt: LegendOption,
}

impl LegendPainter {
    pub fn new(painter: Painter, opt: LegendOption) -> Self {
        Self { painter, opt }
    }

    /// Draws the legend and returns its footprint (`right` = width, `bottom` = height
    /// including padding).
    pub fn render(&mut self) -> Result<Rect> {
        let opt = &self.opt;
        if opt.is_empty() || opt.show == Some(false) {
            return Ok(Rect::ZERO);
        }
        let theme = opt.theme.clone().unwrap_or_else(|| self.painter.theme().clone());
        let padding = if opt.padding.is_zero() { Rect::from_ltrb(0, 5, 0, 0) } else { opt.padding };
        let mut p = self.painter.padded(padding);
        let font = opt.font.clone().unwrap_or_else(|| p.font().clone());
        p.set_text_style(Style {
            font: Some(font),
            font_size: opt.font_size.or(Some(theme.font_size)),
            font_color: Some(opt.font_color.unwrap_or(theme.text_color)),
            ..Style::default()
        });

        let measures: Vec<Rect> = opt.data.iter().map(|text| p.measure_text(text)).collect();
        let max_text_width = measures.iter().map(Rect::width).max().unwrap_or(0);
        let item_max_height = measures.iter().map(Rect::height).max().unwrap_or(0).max(ICON_HEIGHT) + 10;

        let count = opt.data.len() as i32;
        let (width, mut height) = if opt.orient == Orient::Vertical {
            (max_text_width + TEXT_GAP + ICON_WIDTH, ITEM_GAP * count)
        } else {
            let text_width: i32 = measures.iter().map(Rect::width).sum();
            (text_width + (count - 1) * (ITEM_GAP + TEXT_GAP) + count * ICON_WIDTH, ICON_HEIGHT)
        };

        let left = flex_left(opt.left.as_deref().or(Some("center")), p.width(), width).max(0);
        let top = opt.top.as_deref().and_then(|v| v.trim().parse::<f64>().ok()).unwrap_or(0.0) as i32;
        let x = left;
        let mut y = top + 10;
        let start_y = y;
        let mut x0 = x;
        let mut y0 = y;

        let draw_icon = |p: &mut Painter, top: i32, left: i32| -> i32 {
            if opt.icon == LegendIcon::Rect {
                p.rect(Rect::from_ltrb(left, top - ICON_HEIGHT + 8, left + ICON_WIDTH, top + 1));
            } else {
                p.legend_line_dot(Rect::from_ltrb(left, top + 1, left + ICON_WIDTH, top + ICON_HEIGHT + 1));
            }
            left + ICON_WIDTH
        };

        let last_index = opt.data.len() - 1;
        for (index, text) in opt.data.iter().enumerate() {
            let color = theme.series_color(index);
            p.set_drawing_style(Style { fill_color: Some(color), stroke_color: Some(color), ..Style::default() });
            let text_width = measures[index].width();
            let item_right = if index == last_index {
                x0 + text_width + ICON_WIDTH
            } else {
                x0 + text_width + TEXT_GAP + ITEM_GAP + ICON_WIDTH
            };
            if item_right > p.width() && opt.orient != Orient::Vertical {
                x0 = 0;
                y += item_max_height;
                y0 = y;
            }
            if opt.align != Align::Right {
                x0 = draw_icon(&mut p, y0, x0) + TEXT_GAP;
            }
            p.text(text, x0, y0);
            x0 += text_width;
            if opt.align == Align::Right {
                x0 = draw_icon(&mut p, y0, x0 + TEXT_GAP);
            }
            if opt.orient == Orient::Vertical {
                y0 += ITEM_GAP;
                x0 = x;
            } else {
                x0 += ITEM_GAP;
                y0 = y;
            }
            height = y0 - start_y + 10;
        }
        tracing::trace!(width, height, "legend rendered");
        Ok(Rect::from_ltrb(0, 0, width, height + padding.top + padding.bottom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painter::PainterOptions;
    use crate::registry::Registry;
    use crate::renderer::OutputType;

    fn painter(width: i32) -> Painter {
        let registry = Registry::new();
        Painter::new(PainterOptions {
            output: OutputType::Svg,
            width,
            height: 300,
            font: registry.default_font(),
            theme: registry.theme("light"),
        })
        .unwrap()
    }

    #[test]
    fn empty_or_hidden_legend_is_skipped() {
        assert_eq!(LegendPainter::new(painter(400), LegendOption::default()).render().unwrap(), Rect::ZERO);
        let hidden = LegendOption { show: Some(false), ..LegendOption::new(["a"]) };
        assert_eq!(LegendPainter::new(painter(400), hidden).render().unwrap(), Rect::ZERO);
    }

    #[test]
    fn blank_names_count_as_empty() {
        let blank = LegendOption::new(["", ""]);
        assert!(blank.is_empty());
        assert_eq!(LegendPainter::new(painter(400), blank).render().unwrap(), Rect::ZERO);
        assert!(!LegendOption::new(["", "b"]).is_empty());
    }

    #[test]
    fn horizontal_width_sums_items() {
        let p = painter(600);
        let names = ["Email", "Union Ads"];
        let text: i32 = names.iter().map(|n| p.measure_text(n).width()).sum();
        let b = LegendPainter::new(p, LegendOption::new(names)).render().unwrap();
        assert_eq!(b.width(), text + ITEM_GAP + TEXT_GAP + 2 * ICON_WIDTH);
        // one row: 10px trailer plus the 5px default top padding
        assert_eq!(b.height(), 15);
    }

    #[test]
    fn narrow_painter_wraps_items() {
        let names = ["Email", "Union Ads", "Video Ads", "Direct", "Search Engine"];
        let one_row = LegendPainter::new(painter(800), LegendOption::new(names)).render().unwrap();
        let wrapped = LegendPainter::new(painter(150), LegendOption::new(names)).render().unwrap();
        assert!(wrapped.height() > one_row.height());
    }

    #[test]
    fn vertical_stacks_items() {
        let opt = LegendOption { orient: Orient::Vertical, left: Some("0".into()), ..LegendOption::new(["a", "b", "c"]) };
        let b = LegendPainter::new(painter(400), opt).render().unwrap();
        assert_eq!(b.height(), 3 * ITEM_GAP + 10 + 5);
    }
}
