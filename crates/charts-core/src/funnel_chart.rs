// File: crates/charts-core/src/funnel_chart.rs
// Summary: Funnel chart: tiers sorted by value, each a centered trapezoid narrowing to
// the width of the next tier.

use std::cmp::Ordering;

use crate::chart::DefaultRenderResult;
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::label::LABEL_FONT_SIZE;
use crate::painter::Painter;
use crate::series::{format_label, SeriesList, FUNNEL_LABEL_LAYOUT};
use crate::style::Style;

const TIER_GAP: i32 = 2;

/// Geometry of one funnel tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FunnelTier {
    pub y: i32,
    pub height: i32,
    pub top_width: i32,
    /// Top width of the next tier; 0 for the last one.
    pub bottom_width: i32,
    /// Value relative to the maximum.
    pub percent: f64,
}

/// Lays out `values` (already sorted descending) as stacked tiers in a `width x height`
/// box. Width is proportional to `(value - min) / (max - min)`; equal bounds give every
/// tier the full width.
pub fn funnel_tiers(values: &[f64], min: f64, max: f64, width: i32, height: i32) -> Vec<FunnelTier> {
    if values.is_empty() {
        return Vec::new();
    }
    let count = values.len() as i32;
    let h = ((height - TIER_GAP * (count - 1)) / count).max(0);
    let span = max - min;
    let widths: Vec<i32> = values
        .iter()
        .map(|&v| {
            let fraction = if span == 0.0 { 1.0 } else { (v - min) / span };
            (fraction * f64::from(width)) as i32
        })
        .collect();
    widths
        .iter()
        .enumerate()
        .map(|(index, &top_width)| FunnelTier {
            y: index as i32 * (h + TIER_GAP),
            height: h,
            top_width,
            bottom_width: widths.get(index + 1).copied().unwrap_or(0),
            percent: if max == 0.0 { 1.0 } else { values[index] / max },
        })
        .collect()
}

pub struct FunnelChart {
    painter: Painter,
}

impl FunnelChart {
    pub fn new(painter: Painter) -> Self {
        Self { painter }
    }

    pub fn render(&self, result: &DefaultRenderResult, series_list: &SeriesList) -> Result<Rect> {
        let first_value = |s: &crate::series::Series| s.data.first().map(|d| d.value).unwrap_or(0.0);
        let mut sorted = series_list.clone();
        sorted.sort_by(|a, b| first_value(b).partial_cmp(&first_value(a)).unwrap_or(Ordering::Equal));

        let values: Vec<f64> = sorted.iter().map(first_value).collect();
        let mut max = values.first().copied().unwrap_or(0.0);
        let mut min = 0.0;
        for series in sorted.iter() {
            if let Some(v) = series.max {
                max = v;
            }
            if let Some(v) = series.min {
                min = v;
            }
        }

        let mut p = result.series_painter.clone();
        let theme = self.painter.theme().clone();
        let font = self.painter.font().clone();
        let width = p.width();
        let tiers = funnel_tiers(&values, min, max, width, p.height());
        let names = sorted.names();
        tracing::trace!(tiers = tiers.len(), min, max, "funnel layout");

        for (index, (tier, series)) in tiers.iter().zip(sorted.iter()).enumerate() {
            let top_x = (width - tier.top_width) >> 1;
            let bottom_x = (width - tier.bottom_width) >> 1;
            let bottom_y = tier.y + tier.height;
            let points = [
                Point::new(top_x, tier.y),
                Point::new(top_x + tier.top_width, tier.y),
                Point::new(bottom_x + tier.bottom_width, bottom_y),
                Point::new(bottom_x, bottom_y),
                Point::new(top_x, tier.y),
            ];
            p.override_drawing_style(Style::fill(theme.series_color(series.index)));
            p.fill_area(&points);

            let name = names.get(index).map(String::as_str).unwrap_or("");
            let text = format_label(series.label.formatter.as_deref(), FUNNEL_LABEL_LAYOUT, name, values[index], tier.percent);
            p.override_text_style(Style {
                font: Some(font.clone()),
                font_size: Some(LABEL_FONT_SIZE),
                font_color: Some(series.label.color.unwrap_or(theme.text_color)),
                ..Style::default()
            });
            let b = p.measure_text(&text);
            p.text(&text, (width >> 1) - (b.width() >> 1), tier.y + (tier.height >> 1));
        }
        Ok(self.painter.rect())
    }
}
