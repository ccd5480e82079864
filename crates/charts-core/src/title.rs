// File: crates/charts-core/src/title.rs
// Summary: Title component: centered multi-line title and subtext block.

use std::sync::Arc;

use serde::Deserialize;

use crate::error::Result;
use crate::geometry::Rect;
use crate::painter::Painter;
use crate::style::{Color, Style};
use crate::text::FontFace;
use crate::theme::Theme;
use crate::util::{deserialize_flex, flex_left};

pub const TITLE_FONT_SIZE: f64 = 14.0;
pub const SUBTEXT_FONT_SIZE: f64 = 10.0;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TitleOption {
    #[serde(skip)]
    pub theme: Option<Arc<Theme>>,
    /// Lines are separated by `\n`.
    pub text: String,
    pub subtext: String,
    /// `left` (the default), `center`, `right`, `"20%"` or pixels.
    #[serde(deserialize_with = "deserialize_flex")]
    pub left: Option<String>,
    /// Pixels from the top.
    #[serde(deserialize_with = "deserialize_flex")]
    pub top: Option<String>,
    pub font_size: Option<f64>,
    pub font_color: Option<Color>,
    pub subtext_font_size: Option<f64>,
    pub subtext_font_color: Option<Color>,
    #[serde(skip)]
    pub font: Option<Arc<FontFace>>,
}

impl TitleOption {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Self::default() }
    }

    pub fn with_subtext(mut self, subtext: impl Into<String>) -> Self {
        self.subtext = subtext.into();
        self
    }

    pub fn with_left(mut self, left: impl Into<String>) -> Self {
        self.left = Some(left.into());
        self
    }
}

fn split_title_text(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(str::trim).filter(|line| !line.is_empty())
}

pub struct TitlePainter {
    painter: Painter,
    opt: TitleOption,
}

impl TitlePainter {
    pub fn new(painter: Painter, opt: TitleOption) -> Self {
        Self { painter, opt }
    }

    /// Draws the title block; `bottom` of the result is the height it consumed.
    pub fn render(&mut self) -> Result<Rect> {
        let opt = &self.opt;
        if opt.text.is_empty() && opt.subtext.is_empty() {
            return Ok(Rect::ZERO);
        }
        let p = &mut self.painter;
        let theme = opt.theme.clone().unwrap_or_else(|| p.theme().clone());
        let font = opt.font.clone().unwrap_or_else(|| p.font().clone());

        let title_style = Style {
            font: Some(font.clone()),
            font_size: Some(opt.font_size.unwrap_or(TITLE_FONT_SIZE)),
            font_color: Some(opt.font_color.unwrap_or(theme.text_color)),
            ..Style::default()
        };
        let subtext_style = Style {
            font: Some(font),
            font_size: Some(opt.subtext_font_size.unwrap_or(SUBTEXT_FONT_SIZE)),
            font_color: Some(opt.subtext_font_color.unwrap_or(theme.text_color)),
            ..Style::default()
        };

        let lines: Vec<(&str, &Style)> = split_title_text(&opt.text)
            .map(|line| (line, &title_style))
            .chain(split_title_text(&opt.subtext).map(|line| (line, &subtext_style)))
            .collect();

        let mut measures = Vec::with_capacity(lines.len());
        let mut max_width = 0;
        for (text, style) in &lines {
            p.override_text_style((*style).clone());
            let b = p.measure_text(text);
            max_width = max_width.max(b.width());
            measures.push(b);
        }

        let title_x = flex_left(opt.left.as_deref(), p.width(), max_width);
        let mut title_y = opt.top.as_deref().and_then(|v| v.trim().parse::<f64>().ok()).unwrap_or(0.0) as i32;
        for ((text, style), b) in lines.iter().zip(&measures) {
            p.override_text_style((*style).clone());
            let x = title_x + ((max_width - b.width()) >> 1);
            let y = title_y + b.height();
            p.text(text, x, y);
            title_y = y;
        }
        Ok(Rect::from_ltrb(0, 0, title_x + max_width, title_y))
    }
}
