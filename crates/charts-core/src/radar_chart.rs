// File: crates/charts-core/src/radar_chart.rs
// Summary: Radar chart: five concentric polygon rings, one spoke per indicator, and one
// closed translucent polygon per series.

use serde::Deserialize;

use crate::chart::DefaultRenderResult;
use crate::error::{ChartError, Result};
use crate::geometry::{Point, Rect};
use crate::label::LABEL_FONT_SIZE;
use crate::painter::Painter;
use crate::series::SeriesList;
use crate::style::{Color, Style};
use crate::util::{format_float, get_radius, polygon_angles, polygon_point, polygon_points};

const DIVIDE_COUNT: usize = 5;
const INDICATOR_OFFSET: i32 = 5;
const SERIES_STROKE_WIDTH: f64 = 2.0;
const FILL_ALPHA: u8 = 20;
const DOT_RADIUS: f64 = 2.0;

/// One radar axis. `max <= 0` takes the largest value any series has on it.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RadarIndicator {
    pub name: String,
    pub max: f64,
    pub min: f64,
}

impl RadarIndicator {
    pub fn new(name: impl Into<String>, max: f64) -> Self {
        Self { name: name.into(), max, min: 0.0 }
    }
}

/// Builds indicators from parallel name and max lists.
pub fn new_radar_indicators<S: AsRef<str>>(names: &[S], max: &[f64]) -> Vec<RadarIndicator> {
    names
        .iter()
        .zip(max)
        .map(|(name, &max)| RadarIndicator::new(name.as_ref(), max))
        .collect()
}

#[derive(Clone, Debug, Default)]
pub struct RadarChartOption {
    pub indicators: Vec<RadarIndicator>,
}

/// Fills in missing maxima from the data and rejects fewer than three indicators.
pub fn resolve_indicators(indicators: &[RadarIndicator], series_list: &SeriesList) -> Result<Vec<RadarIndicator>> {
    if indicators.len() < 3 {
        return Err(ChartError::TooFewIndicators(indicators.len()));
    }
    let mut max_values = vec![0.0_f64; indicators.len()];
    for series in series_list.iter() {
        for (max, item) in max_values.iter_mut().zip(&series.data) {
            *max = max.max(item.value);
        }
    }
    Ok(indicators
        .iter()
        .zip(max_values)
        .map(|(indicator, data_max)| RadarIndicator {
            max: if indicator.max <= 0.0 { data_max } else { indicator.max },
            ..indicator.clone()
        })
        .collect())
}

pub struct RadarChart {
    painter: Painter,
    opt: RadarChartOption,
}

impl RadarChart {
    pub fn new(painter: Painter, opt: RadarChartOption) -> Self {
        Self { painter, opt }
    }

    pub fn render(&self, result: &DefaultRenderResult, series_list: &SeriesList) -> Result<Rect> {
        let indicators = resolve_indicators(&self.opt.indicators, series_list)?;
        let sides = indicators.len();
        let mut p = result.series_painter.clone();
        let theme = self.painter.theme().clone();
        let font = self.painter.font().clone();
        let center = Point::new(p.width() >> 1, p.height() >> 1);
        let radius_value = series_list.iter().rev().find_map(|s| s.radius.as_deref());
        let radius = get_radius(f64::from(p.width().min(p.height())), radius_value);
        // rings sit on whole pixels
        let divide_radius = (radius / DIVIDE_COUNT as f64).trunc();
        let radius = divide_radius * DIVIDE_COUNT as f64;

        p.override_drawing_style(Style::stroke(theme.axis_split_line_color, 1.0));
        for i in 1..=DIVIDE_COUNT {
            p.polygon(center, divide_radius * i as f64, sides);
        }
        let points = polygon_points(center, radius, sides);
        for point in &points {
            p.move_to(center.x, center.y).line_to(point.x, point.y).stroke();
        }

        p.set_text_style(Style {
            font: Some(font.clone()),
            font_size: Some(LABEL_FONT_SIZE),
            font_color: Some(theme.text_color),
            ..Style::default()
        });
        for (indicator, point) in indicators.iter().zip(&points) {
            let b = p.measure_text(&indicator.name);
            let (mut x, mut y) = (point.x, point.y);
            let is_top = point.y < center.y;
            let is_bottom = point.y > center.y;
            if point.x == center.x {
                x -= b.width() >> 1;
                if is_top {
                    y -= b.height();
                } else {
                    y += b.height();
                }
            }
            if point.y == center.y {
                y += b.height() >> 1;
            }
            if is_top || is_bottom {
                y += INDICATOR_OFFSET;
            }
            if point.x > center.x {
                x += INDICATOR_OFFSET;
            }
            if point.x < center.x {
                x -= b.width() + INDICATOR_OFFSET;
            }
            p.text(&indicator.name, x, y);
        }

        let angles = polygon_angles(sides);
        for series in series_list.iter() {
            let color = theme.series_color(series.index);
            let mut line_points: Vec<Point> = series
                .data
                .iter()
                .zip(indicators.iter().zip(&angles))
                .map(|(item, (indicator, &angle))| {
                    let span = indicator.max - indicator.min;
                    let percent = if span > 0.0 { (item.value - indicator.min) / span } else { 0.0 };
                    polygon_point(center, percent * radius, angle)
                })
                .collect();
            let Some(&first) = line_points.first() else {
                continue;
            };
            line_points.push(first);
            p.set_drawing_style(Style::stroke(color, SERIES_STROKE_WIDTH).with_fill(color.with_alpha(FILL_ALPHA)));
            p.line_stroke(&line_points).fill_area(&line_points);

            let dot_fill = if theme.is_dark { color } else { Color::WHITE };
            p.set_drawing_style(Style::stroke(color, SERIES_STROKE_WIDTH).with_fill(dot_fill));
            p.dots(&line_points[..line_points.len() - 1], DOT_RADIUS);

            if !series.label.show {
                continue;
            }
            p.set_text_style(Style {
                font: Some(font.clone()),
                font_size: Some(series.label.font_size.unwrap_or(LABEL_FONT_SIZE)),
                font_color: Some(series.label.color.unwrap_or(theme.text_color)),
                ..Style::default()
            });
            for (item, point) in series.data.iter().zip(&line_points) {
                let text = format_float(item.value, 2);
                let b = p.measure_text(&text);
                p.text(&text, point.x - (b.width() >> 1), point.y);
            }
        }
        tracing::trace!(indicators = sides, series = series_list.len(), radius, "radar drawn");
        Ok(self.painter.rect())
    }
}
