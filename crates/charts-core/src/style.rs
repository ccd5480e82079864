// File: crates/charts-core/src/style.rs
// Summary: RGBA colors, partial styles with explicit unset fields, and the resolved
// drawing/text styles handed to renderers.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::error::{ChartError, Result};
use crate::geometry::Rect;
use crate::text::FontFace;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Perceived brightness above the mid point.
    pub fn is_light(&self) -> bool {
        is_light_color(*self)
    }

    /// `rgba(r,g,b,a)` with a fractional alpha, the form SVG style attributes expect.
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("rgb({},{},{})", self.r, self.g, self.b)
        } else {
            let alpha = f64::from(self.a) / 255.0;
            format!("rgba({},{},{},{})", self.r, self.g, self.b, trim_alpha(alpha))
        }
    }
}

fn trim_alpha(alpha: f64) -> String {
    let s = format!("{alpha:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for Color {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        parse_color(s)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_color(&s).map_err(serde::de::Error::custom)
    }
}

/// Parses `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r,g,b)`, `rgba(r,g,b,a)` and a few keywords.
/// In `rgba()` an alpha of at most 1.0 is read as a fraction, larger values as 0..=255.
pub fn parse_color(input: &str) -> Result<Color> {
    let s = input.trim();
    let invalid = || ChartError::InvalidColor(input.to_string());
    match s.to_ascii_lowercase().as_str() {
        "transparent" | "none" => return Ok(Color::TRANSPARENT),
        "white" => return Ok(Color::WHITE),
        "black" => return Ok(Color::BLACK),
        _ => {}
    }
    if let Some(hex) = s.strip_prefix('#') {
        let digits: Vec<u8> = hex
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<Vec<u8>>>()
            .ok_or_else(invalid)?;
        return match digits.len() {
            3 => Ok(Color::rgb(digits[0] * 17, digits[1] * 17, digits[2] * 17)),
            6 | 8 => {
                let pair = |i: usize| digits[i] * 16 + digits[i + 1];
                let a = if digits.len() == 8 { pair(6) } else { 255 };
                Ok(Color::rgba(pair(0), pair(2), pair(4), a))
            }
            _ => Err(invalid()),
        };
    }
    let open = s.find('(').ok_or_else(invalid)?;
    let close = s.rfind(')').ok_or_else(invalid)?;
    if close <= open {
        return Err(invalid());
    }
    let parts: Vec<&str> = s[open + 1..close].split(',').map(str::trim).collect();
    if parts.len() < 3 || parts.len() > 4 {
        return Err(invalid());
    }
    let channel = |v: &str| -> Result<u8> {
        let value: f64 = v.parse().map_err(|_| invalid())?;
        Ok(value.round().clamp(0.0, 255.0) as u8)
    };
    let mut color = Color::rgb(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?);
    if let Some(alpha) = parts.get(3) {
        let value: f64 = alpha.parse().map_err(|_| invalid())?;
        color.a = if value <= 1.0 {
            (value.max(0.0) * 255.0).round() as u8
        } else {
            value.round().min(255.0) as u8
        };
    }
    Ok(color)
}

pub fn is_light_color(c: Color) -> bool {
    let r = f64::from(c.r) * f64::from(c.r) * 0.299;
    let g = f64::from(c.g) * f64::from(c.g) * 0.587;
    let b = f64::from(c.b) * f64::from(c.b) * 0.114;
    (r + g + b).sqrt() > 127.5
}

/// Partial style. `None` inherits from whatever baseline the style is merged onto;
/// `Some(Color::TRANSPARENT)` is an explicit request for no paint.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Style {
    pub stroke_color: Option<Color>,
    pub stroke_width: Option<f64>,
    pub stroke_dash_array: Option<Vec<f64>>,
    pub fill_color: Option<Color>,
    #[serde(skip)]
    pub font: Option<Arc<FontFace>>,
    pub font_size: Option<f64>,
    pub font_color: Option<Color>,
    pub text_rotation: Option<f64>,
}

impl Style {
    pub fn fill(color: Color) -> Self {
        Self { fill_color: Some(color), ..Self::default() }
    }

    pub fn stroke(color: Color, width: f64) -> Self {
        Self { stroke_color: Some(color), stroke_width: Some(width), ..Self::default() }
    }

    pub fn text(color: Color, size: f64) -> Self {
        Self { font_color: Some(color), font_size: Some(size), ..Self::default() }
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }
    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke_color = Some(color);
        self.stroke_width = Some(width);
        self
    }
    pub fn with_dash(mut self, dash: Vec<f64>) -> Self {
        self.stroke_dash_array = Some(dash);
        self
    }
    pub fn with_font(mut self, font: Arc<FontFace>) -> Self {
        self.font = Some(font);
        self
    }
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }
    pub fn with_font_color(mut self, color: Color) -> Self {
        self.font_color = Some(color);
        self
    }

    /// Every field set on `over` wins, everything else is kept from `self`.
    pub fn merge(&self, over: &Style) -> Style {
        let mut out = self.clone();
        out.merge_drawing(over);
        out.merge_text(over);
        out
    }

    pub fn merge_drawing(&mut self, over: &Style) {
        if over.stroke_color.is_some() {
            self.stroke_color = over.stroke_color;
        }
        if over.stroke_width.is_some() {
            self.stroke_width = over.stroke_width;
        }
        if over.stroke_dash_array.is_some() {
            self.stroke_dash_array = over.stroke_dash_array.clone();
        }
        if over.fill_color.is_some() {
            self.fill_color = over.fill_color;
        }
    }

    pub fn merge_text(&mut self, over: &Style) {
        if over.font.is_some() {
            self.font = over.font.clone();
        }
        if over.font_size.is_some() {
            self.font_size = over.font_size;
        }
        if over.font_color.is_some() {
            self.font_color = over.font_color;
        }
        if over.text_rotation.is_some() {
            self.text_rotation = over.text_rotation;
        }
    }

    /// Replaces the drawing fields wholesale, leaving text fields untouched.
    pub fn replace_drawing(&mut self, with: &Style) {
        self.stroke_color = with.stroke_color;
        self.stroke_width = with.stroke_width;
        self.stroke_dash_array = with.stroke_dash_array.clone();
        self.fill_color = with.fill_color;
    }

    /// Replaces the text fields wholesale, leaving drawing fields untouched.
    pub fn replace_text(&mut self, with: &Style) {
        self.font = with.font.clone();
        self.font_size = with.font_size;
        self.font_color = with.font_color;
        self.text_rotation = with.text_rotation;
    }

    pub fn resolve_drawing(&self) -> DrawStyle {
        DrawStyle {
            stroke_color: self.stroke_color.unwrap_or(Color::TRANSPARENT),
            stroke_width: self.stroke_width.unwrap_or(1.0),
            stroke_dash_array: self.stroke_dash_array.clone().unwrap_or_default(),
            fill_color: self.fill_color.unwrap_or(Color::TRANSPARENT),
        }
    }

    pub fn resolve_text(&self, font: &Arc<FontFace>, size: f64, color: Color) -> TextStyle {
        TextStyle {
            font: self.font.clone().unwrap_or_else(|| font.clone()),
            font_size: self.font_size.filter(|s| *s > 0.0).unwrap_or(size),
            font_color: self.font_color.unwrap_or(color),
            rotation: self.text_rotation.unwrap_or(0.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawStyle {
    pub stroke_color: Color,
    pub stroke_width: f64,
    pub stroke_dash_array: Vec<f64>,
    pub fill_color: Color,
}

impl DrawStyle {
    pub fn has_stroke(&self) -> bool {
        self.stroke_width > 0.0 && !self.stroke_color.is_transparent()
    }
    pub fn has_fill(&self) -> bool {
        !self.fill_color.is_transparent()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font: Arc<FontFace>,
    pub font_size: f64,
    pub font_color: Color,
    /// Radians, clockwise.
    pub rotation: f64,
}

impl TextStyle {
    /// Box of the text as laid out on one line, rotated when a rotation is set.
    pub fn measure(&self, text: &str) -> Rect {
        let (w, h) = self.font.measure(text, self.font_size);
        if self.rotation == 0.0 {
            return Rect::from_ltwh(0, 0, w, h);
        }
        let (sin, cos) = self.rotation.sin_cos();
        let (w, h) = (f64::from(w), f64::from(h));
        let rw = (w * cos).abs() + (h * sin).abs();
        let rh = (w * sin).abs() + (h * cos).abs();
        Rect::from_ltwh(0, 0, rw.round() as i32, rh.round() as i32)
    }
}
