// File: crates/charts-core/src/axis.rs
// Summary: Axis component: baseline, ticks, thinned labels and optional split lines for
// an axis attached to any side of its painter.

use std::sync::Arc;

use crate::error::Result;
use crate::geometry::{Align, Orient, Point, Position, Rect};
use crate::grid::{GridPainter, GridPainterOption};
use crate::painter::{MultiTextOption, Painter, TicksOption};
use crate::style::{Color, Style};
use crate::text::FontFace;
use crate::theme::Theme;

/// Height reserved for a bottom axis; the series area always leaves it free.
pub const DEFAULT_X_AXIS_HEIGHT: i32 = 30;

const DEFAULT_TICK_LENGTH: i32 = 5;
const DEFAULT_LABEL_MARGIN: i32 = 5;
/// Breathing room added to the widest label when estimating how many labels fit.
const LABEL_FILL_GAP: i32 = 20;

#[derive(Clone, Debug)]
pub struct AxisOption {
    pub theme: Option<Arc<Theme>>,
    /// Label texts, one per division (or per line when `boundary_gap` is off).
    pub data: Vec<String>,
    pub show: bool,
    /// `None` is a bottom axis.
    pub position: Option<Position>,
    /// Labels between division lines (the default) or on them.
    pub boundary_gap: Option<bool>,
    /// 0 is treated as 1; a negative width hides the baseline and ticks.
    pub stroke_width: f64,
    pub tick_length: Option<i32>,
    pub label_margin: Option<i32>,
    pub font: Option<Arc<FontFace>>,
    pub font_size: Option<f64>,
    pub font_color: Option<Color>,
    pub stroke_color: Option<Color>,
    /// Template with a `{value}` placeholder applied to every label.
    pub formatter: Option<String>,
    pub split_line_show: bool,
    pub split_line_color: Option<Color>,
    /// Radians.
    pub text_rotation: f64,
    pub label_offset: Point,
    /// Show every `unit`-th label; 0 derives it from the available space.
    pub unit: usize,
    /// Lower bound for the derived unit.
    pub split_number: usize,
    /// Index of the first label and tick drawn.
    pub first: usize,
}

impl Default for AxisOption {
    fn default() -> Self {
        Self {
            theme: None,
            data: Vec::new(),
            show: true,
            position: None,
            boundary_gap: None,
            stroke_width: 0.0,
            tick_length: None,
            label_margin: None,
            font: None,
            font_size: None,
            font_color: None,
            stroke_color: None,
            formatter: None,
            split_line_show: false,
            split_line_color: None,
            text_rotation: 0.0,
            label_offset: Point::default(),
            unit: 0,
            split_number: 0,
            first: 0,
        }
    }
}

pub struct AxisPainter {
    painter: Painter,
    opt: AxisOption,
}

/// Label step so that roughly one label per `fit_text_count` slot is shown. An even
/// step that divides `data_count + 1` evenly is bumped so the last label stays visible.
fn label_unit(data_count: usize, fit_text_count: usize, split_number: usize) -> usize {
    let fit = fit_text_count.max(1);
    let mut unit = data_count.div_ceil(fit).max(split_number);
    if unit % 2 == 0 && data_count % (unit + 1) == 0 {
        unit += 1;
    }
    unit
}

impl AxisPainter {
    pub fn new(painter: Painter, opt: AxisOption) -> Self {
        Self { painter, opt }
    }

    /// Draws the axis and returns its footprint: `right` is the width and `bottom` the
    /// height it occupies.
    pub fn render(&mut self) -> Result<Rect> {
        let opt = &self.opt;
        if !opt.show {
            return Ok(Rect::ZERO);
        }
        let top = &mut self.painter;
        let theme = opt.theme.clone().unwrap_or_else(|| top.theme().clone());

        let stroke_width = if opt.stroke_width == 0.0 { 1.0 } else { opt.stroke_width };
        let font = opt.font.clone().unwrap_or_else(|| top.font().clone());
        let font_size = opt.font_size.filter(|s| *s > 0.0).unwrap_or(theme.font_size);
        let font_color = opt.font_color.unwrap_or(theme.text_color);
        let stroke_color = opt.stroke_color.unwrap_or(theme.axis_stroke_color);

        let data: Vec<String> = match opt.formatter.as_deref().filter(|f| !f.is_empty()) {
            Some(formatter) => opt.data.iter().map(|text| formatter.replace("{value}", text)).collect(),
            None => opt.data.clone(),
        };
        let data_count = data.len();
        let mut tick_count = data_count;

        let boundary_gap = opt.boundary_gap.unwrap_or(true);
        let is_vertical = matches!(opt.position, Some(Position::Left) | Some(Position::Right));
        let mut label_position = None;
        if !boundary_gap {
            tick_count = tick_count.saturating_sub(1);
            label_position = Some(Position::Left);
        }
        if is_vertical && boundary_gap {
            label_position = Some(Position::Center);
        }

        let tick_length = opt.tick_length.unwrap_or(DEFAULT_TICK_LENGTH);
        let label_margin = opt.label_margin.unwrap_or(DEFAULT_LABEL_MARGIN);

        let style = Style {
            stroke_color: Some(stroke_color),
            stroke_width: Some(stroke_width),
            font: Some(font),
            font_color: Some(font_color),
            font_size: Some(font_size),
            ..Style::default()
        };
        top.set_drawing_style(style.clone()).override_text_style(style.clone());

        let rotated = opt.text_rotation != 0.0;
        if rotated {
            top.set_text_rotation(opt.text_rotation);
        }
        let (text_max_width, text_max_height) = top.measure_text_max_width_height(&data);
        if rotated {
            top.clear_text_rotation();
        }

        let fit_text_count = (f64::from(top.width()) / f64::from(text_max_width + LABEL_FILL_GAP)).ceil().max(0.0) as usize;
        let unit = if opt.unit == 0 { label_unit(data_count, fit_text_count, opt.split_number) } else { opt.unit };

        let (width, height) = if is_vertical {
            (text_max_width + (tick_length << 1), top.height())
        } else {
            (top.width(), (tick_length << 1) + text_max_height)
        };

        let mut padding = Rect::ZERO;
        match opt.position {
            Some(Position::Top) => padding.bottom = top.height() - height,
            Some(Position::Left) => padding.right = top.width() - width,
            Some(Position::Right) => padding.left = top.width() - width,
            _ => padding.top = top.height() - DEFAULT_X_AXIS_HEIGHT,
        }
        let mut p = top.padded(padding);

        let (mut x0, mut y0, mut x1, mut y1) = (0, 0, 0, 0);
        let (mut ticks_padding_top, mut ticks_padding_left) = (0, 0);
        let (mut label_padding_top, mut label_padding_left, mut label_padding_right) = (0, 0, 0);
        let mut align = Align::Left;
        let orient;
        match opt.position {
            Some(Position::Top) => {
                x1 = p.width();
                y0 = label_margin + font_size as i32;
                ticks_padding_top = font_size as i32;
                y1 = y0;
                orient = Orient::Horizontal;
            }
            Some(Position::Left) => {
                x0 = p.width();
                x1 = p.width();
                y1 = p.height();
                orient = Orient::Vertical;
                align = Align::Right;
                ticks_padding_left = text_max_width + tick_length;
                label_padding_right = width - text_max_width;
            }
            Some(Position::Right) => {
                orient = Orient::Vertical;
                y1 = p.height();
                label_padding_left = width - text_max_width;
            }
            _ => {
                label_padding_top = height;
                x1 = p.width();
                orient = Orient::Horizontal;
            }
        }

        if stroke_width > 0.0 {
            p.padded(Rect::from_ltrb(ticks_padding_left, ticks_padding_top, 0, 0)).ticks(&TicksOption {
                first: opt.first,
                length: tick_length,
                orient,
                count: tick_count,
                unit,
            });
            p.line_stroke(&[Point::new(x0, y0), Point::new(x1, y1)]);
        }

        p.padded(Rect::from_ltrb(label_padding_left, label_padding_top, label_padding_right, 0))
            .multi_text(&MultiTextOption {
                text_list: data,
                orient,
                unit,
                position: label_position,
                align,
                text_rotation: opt.text_rotation,
                offset: opt.label_offset,
                first: opt.first,
            });

        if opt.split_line_show {
            let split_color = Some(opt.split_line_color.unwrap_or(theme.axis_split_line_color));
            let mut grid = if is_vertical {
                let (x0, x1) = if opt.position == Some(Position::Right) {
                    (0, top.width() - p.width())
                } else {
                    (p.width(), top.width())
                };
                let area = top.padded(Rect::from_ltrb(x0, 0, top.width() - x1, 0));
                // the bottom line is left to the x axis
                GridPainter::new(area, GridPainterOption {
                    stroke_color: split_color,
                    row: tick_count,
                    ignore_last_row: true,
                    ..GridPainterOption::default()
                })
            } else {
                let y0 = p.height() - DEFAULT_X_AXIS_HEIGHT;
                let y1 = top.height() - DEFAULT_X_AXIS_HEIGHT;
                let area = top.padded(Rect::from_ltrb(0, y0, 0, top.height() - y1));
                GridPainter::new(area, GridPainterOption {
                    stroke_color: split_color,
                    column: tick_count,
                    ignore_first_column: true,
                    ..GridPainterOption::default()
                })
            };
            grid.render()?;
        }
        tracing::trace!(position = ?opt.position, width, height, unit, "axis rendered");

        Ok(Rect::from_ltrb(0, 0, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painter::PainterOptions;
    use crate::registry::Registry;
    use crate::renderer::OutputType;

    fn painter() -> Painter {
        let registry = Registry::new();
        Painter::new(PainterOptions {
            output: OutputType::Svg,
            width: 600,
            height: 400,
            font: registry.default_font(),
            theme: registry.theme("light"),
        })
        .unwrap()
    }

    fn months() -> Vec<String> {
        ["Jan", "Feb", "Mar", "Apr", "May", "Jun"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn label_unit_keeps_last_label() {
        assert_eq!(label_unit(12, 12, 0), 1);
        assert_eq!(label_unit(24, 6, 0), 4);
        assert_eq!(label_unit(10, 3, 0), 5);
        assert_eq!(label_unit(10, 20, 3), 3);
    }

    #[test]
    fn bottom_axis_footprint() {
        let p = painter();
        let (_, h) = p.child(&[]).measure_text_max_width_height(&months());
        let mut axis = AxisPainter::new(p, AxisOption { data: months(), ..AxisOption::default() });
        let b = axis.render().unwrap();
        assert_eq!(b.width(), 600);
        assert_eq!(b.height(), 2 * DEFAULT_TICK_LENGTH + h);
    }

    #[test]
    fn left_axis_footprint() {
        let p = painter();
        let data: Vec<String> = ["0", "50", "100"].iter().map(|s| s.to_string()).collect();
        let (w, _) = p.measure_text_max_width_height(&data);
        let mut axis = AxisPainter::new(
            p,
            AxisOption { data, position: Some(Position::Left), boundary_gap: Some(false), ..AxisOption::default() },
        );
        let b = axis.render().unwrap();
        assert_eq!(b.width(), w + 2 * DEFAULT_TICK_LENGTH);
        assert_eq!(b.height(), 400);
    }

    #[test]
    fn hidden_axis_takes_no_space() {
        let mut axis = AxisPainter::new(painter(), AxisOption { show: false, data: months(), ..AxisOption::default() });
        assert_eq!(axis.render().unwrap(), Rect::ZERO);
    }

    #[test]
    fn formatter_and_split_lines() {
        let p = painter();
        let data: Vec<String> = ["1", "2", "3"].iter().map(|s| s.to_string()).collect();
        let mut axis = AxisPainter::new(
            p.clone(),
            AxisOption {
                data,
                position: Some(Position::Left),
                boundary_gap: Some(false),
                stroke_width: -1.0,
                formatter: Some("{value} ms".into()),
                split_line_show: true,
                ..AxisOption::default()
            },
        );
        axis.render().unwrap();
        let svg = String::from_utf8(p.bytes().unwrap()).unwrap();
        assert!(svg.contains(">2 ms<"), "{svg}");
        // two intervals, the bottom line is left to the x axis
        assert_eq!(svg.matches("stroke:rgb(224,230,242)").count(), 2, "{svg}");
    }
}
