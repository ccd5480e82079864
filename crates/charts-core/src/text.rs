// File: crates/charts-core/src/text.rs
// Summary: Font faces with Skia-backed or estimated metrics, plus word wrapping.

use std::fmt;

use skia_safe as skia;

use crate::error::{ChartError, Result};

/// A named font. With a typeface the metrics come from Skia; without one a
/// deterministic per-glyph estimate is used, so layout does not depend on the fonts
/// installed on the host.
#[derive(Clone)]
pub struct FontFace {
    family: String,
    typeface: Option<skia::Typeface>,
}

impl FontFace {
    pub fn estimated(family: impl Into<String>) -> Self {
        Self { family: family.into(), typeface: None }
    }

    /// Parses TTF/OTF bytes.
    pub fn from_data(family: impl Into<String>, data: &[u8]) -> Result<Self> {
        let family = family.into();
        let typeface = skia::FontMgr::default()
            .new_from_data(data, None)
            .ok_or_else(|| ChartError::InvalidFont(family.clone()))?;
        Ok(Self { family, typeface: Some(typeface) })
    }

    /// Looks up a family installed on the host.
    pub fn system(family: impl Into<String>) -> Option<Self> {
        let family = family.into();
        let typeface = skia::FontMgr::default().match_family_style(&family, skia::FontStyle::normal())?;
        Some(Self { family, typeface: Some(typeface) })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn typeface(&self) -> Option<&skia::Typeface> {
        self.typeface.as_ref()
    }

    pub fn is_estimated(&self) -> bool {
        self.typeface.is_none()
    }

    /// Width and line height in pixels of `text` laid out on a single line.
    pub fn measure(&self, text: &str, size: f64) -> (i32, i32) {
        match &self.typeface {
            Some(typeface) => {
                let font = skia::Font::from_typeface(typeface.clone(), size as f32);
                let (advance, _) = font.measure_str(text, None);
                let (_, metrics) = font.metrics();
                let height = (metrics.descent - metrics.ascent).ceil();
                (advance.ceil() as i32, height as i32)
            }
            None => estimate(text, size),
        }
    }
}

fn estimate(text: &str, size: f64) -> (i32, i32) {
    let em: f64 = text.chars().map(glyph_advance).sum();
    ((em * size).ceil() as i32, (size * 1.2).round() as i32)
}

fn glyph_advance(c: char) -> f64 {
    match c {
        ' ' => 0.28,
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '!' | '|' | '\'' => 0.28,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '-' => 0.36,
        'm' | 'w' | 'M' | 'W' => 0.84,
        '%' => 0.8,
        '0'..='9' => 0.56,
        'A'..='Z' => 0.66,
        c if c.is_ascii() => 0.52,
        // CJK and other wide scripts
        c if (c as u32) >= 0x2E80 => 1.0,
        _ => 0.6,
    }
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("estimated", &self.is_estimated())
            .finish()
    }
}

impl PartialEq for FontFace {
    fn eq(&self, other: &Self) -> bool {
        self.family == other.family && self.is_estimated() == other.is_estimated()
    }
}

/// Breaks `text` into lines no wider than `width`, splitting on whitespace first and
/// falling back to characters for a single word that does not fit. Explicit newlines
/// always start a new line.
pub fn wrap_words(text: &str, width: i32, measure: impl Fn(&str) -> i32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() { word.to_string() } else { format!("{line} {word}") };
            if measure(&candidate) <= width {
                line = candidate;
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if measure(word) <= width {
                line = word.to_string();
                continue;
            }
            for c in word.chars() {
                line.push(c);
                if measure(&line) > width && line.chars().count() > 1 {
                    line.pop();
                    lines.push(std::mem::take(&mut line));
                    line.push(c);
                }
            }
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(s: &str) -> i32 {
        s.chars().count() as i32 * 10
    }

    #[test]
    fn wraps_on_words() {
        let lines = wrap_words("the quick brown fox", 110, fixed);
        assert_eq!(lines, vec!["the quick", "brown fox"]);
    }

    #[test]
    fn breaks_long_words_by_char() {
        let lines = wrap_words("abcdefghij", 40, fixed);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn keeps_explicit_newlines() {
        let lines = wrap_words("a\nb c", 1000, fixed);
        assert_eq!(lines, vec!["a", "b c"]);
    }

    #[test]
    fn estimated_metrics_are_deterministic() {
        let face = FontFace::estimated("sans-serif");
        assert_eq!(face.measure("1234", 10.0), (23, 12));
        assert_eq!(face.measure("", 10.0).0, 0);
        assert!(face.measure("Jan", 12.0).0 < face.measure("January", 12.0).0);
    }
}
