// File: crates/charts-core/src/chart.rs
// Summary: Render pipeline. Allocates title, legend, Y axes and X axis out of the canvas
// in one pass, then hands the remaining series box to each chart type.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::axis::DEFAULT_X_AXIS_HEIGHT;
use crate::bar_chart::{BarChart, BarChartOption};
use crate::chart_option::ChartOption;
use crate::error::{ChartError, Result};
use crate::funnel_chart::FunnelChart;
use crate::geometry::{Orient, Rect};
use crate::horizontal_bar_chart::{HorizontalBarChart, HorizontalBarChartOption};
use crate::legend::{LegendOption, LegendPainter};
use crate::line_chart::{LineChart, LineChartOption};
use crate::painter::{Painter, PainterOption, PainterOptions};
use crate::pie_chart::{PieChart, PieChartOption};
use crate::radar_chart::{RadarChart, RadarChartOption};
use crate::range::{AxisRange, AxisRangeOption, DEFAULT_AXIS_DIVIDE_COUNT};
use crate::registry::Registry;
use crate::renderer::OutputType;
use crate::series::{ChartType, SeriesList};
use crate::theme::Theme;
use crate::title::{TitleOption, TitlePainter};
use crate::xaxis::{new_bottom_x_axis, XAxisOption};
use crate::yaxis::{new_left_y_axis, new_right_y_axis, YAxisOption};

/// Space between the title/legend block and the axes.
const TITLE_GAP: i32 = 20;

#[derive(Clone, Debug, Default)]
pub struct DefaultRenderOption {
    pub theme: Option<Arc<Theme>>,
    pub padding: Rect,
    pub series_list: SeriesList,
    pub y_axis_options: Vec<YAxisOption>,
    pub x_axis: XAxisOption,
    pub title: TitleOption,
    pub legend: LegendOption,
    pub background_is_filled: bool,
    /// Horizontal bars: categories on the Y axis, values on the X axis.
    pub axis_reversed: bool,
}

#[derive(Debug)]
pub struct DefaultRenderResult {
    /// Value scale per Y axis index.
    pub axis_ranges: BTreeMap<usize, AxisRange>,
    /// Region left for the series geometry.
    pub series_painter: Painter,
}

impl DefaultRenderResult {
    /// Range of `axis_index`, falling back to the first axis.
    pub fn axis_range(&self, axis_index: usize) -> Option<&AxisRange> {
        self.axis_ranges.get(&axis_index).or_else(|| self.axis_ranges.values().next())
    }
}

/// Background, padding, legend, title, Y axes and X axis, in that order. Every stage
/// consumes the box left by the previous one.
pub fn default_render(painter: &Painter, mut opt: DefaultRenderOption) -> Result<DefaultRenderResult> {
    opt.series_list.init();
    let theme = opt.theme.clone().unwrap_or_else(|| painter.theme().clone());
    let mut p = painter.child(&[PainterOption::Theme(theme.clone())]);
    if !opt.background_is_filled {
        p.set_background(p.width(), p.height(), theme.background_color, true);
    }
    if !opt.padding.is_zero() {
        p = p.padded(opt.padding);
    }

    let mut legend_height = 0;
    if !opt.legend.is_empty() {
        let legend = LegendOption { theme: opt.legend.theme.clone().or_else(|| Some(theme.clone())), ..opt.legend.clone() };
        legend_height = LegendPainter::new(p.clone(), legend).render()?.height();
    }

    if !opt.title.text.is_empty() {
        let title = TitleOption { theme: opt.title.theme.clone().or_else(|| Some(theme.clone())), ..opt.title.clone() };
        let title_box = TitlePainter::new(p.clone(), title).render()?;
        let top = if opt.legend.orient == Orient::Vertical { title_box.height() } else { legend_height.max(title_box.height()) };
        p = p.padded(Rect::from_ltrb(0, top + TITLE_GAP, 0, 0));
        debug!(title_height = title_box.height(), legend_height, "title block allocated");
    }

    let mut axis_indices = opt.series_list.axis_indices();
    axis_indices.sort_unstable_by(|a, b| b.cmp(a));
    if let Some(&index) = axis_indices.iter().find(|i| **i > 1) {
        return Err(ChartError::TooManyYAxes(index));
    }

    let range_height = p.height() - DEFAULT_X_AXIS_HEIGHT;
    let (mut width_left, mut width_right) = (0, 0);
    let mut axis_ranges = BTreeMap::new();
    for index in axis_indices {
        let mut y_axis = opt.y_axis_options.get(index).cloned().unwrap_or_default();
        let divide_count = if y_axis.divide_count == 0 { DEFAULT_AXIS_DIVIDE_COUNT } else { y_axis.divide_count };
        let (min, max) = opt.series_list.min_max(index);
        let mut range = AxisRange::new(AxisRangeOption { min, max, size: range_height, divide_count, boundary: false });
        if let Some(v) = y_axis.min {
            range = range.with_min(v);
        }
        if let Some(v) = y_axis.max {
            range = range.with_max(v);
        }
        axis_ranges.insert(index, range);

        if y_axis.theme.is_none() {
            y_axis.theme = Some(theme.clone());
        }
        if opt.axis_reversed {
            y_axis.is_category_axis = true;
            let value_range = AxisRange::new(AxisRangeOption {
                min,
                max,
                size: range_height,
                divide_count: DEFAULT_AXIS_DIVIDE_COUNT,
                boundary: false,
            });
            opt.x_axis.data = value_range.values(y_axis.value_formatter.as_ref());
            opt.x_axis.is_value_axis = true;
        } else {
            y_axis.data = range.values(y_axis.value_formatter.as_ref());
        }
        y_axis.data.reverse();

        let child = p.padded(Rect::from_ltrb(width_left, 0, width_right, 0));
        let mut axis = if index == 0 { new_left_y_axis(&child, &y_axis) } else { new_right_y_axis(&child, &y_axis) };
        let axis_box = axis.render()?;
        if index == 0 {
            width_left += axis_box.width();
        } else {
            width_right += axis_box.width();
        }
        trace!(index, min = range.min(), max = range.max(), width = axis_box.width(), "y axis rendered");
    }
    debug!(width_left, width_right, "y axes allocated");

    if opt.x_axis.theme.is_none() {
        opt.x_axis.theme = Some(theme.clone());
    }
    new_bottom_x_axis(p.padded(Rect::from_ltrb(width_left, 0, width_right, 0)), &opt.x_axis).render()?;

    let series_painter = p.padded(Rect::from_ltrb(width_left, 0, width_right, DEFAULT_X_AXIS_HEIGHT));
    debug!(rect = ?series_painter.rect(), "series box allocated");
    Ok(DefaultRenderResult { axis_ranges, series_painter })
}

/// Fails when an exclusive chart type shares the list with any other type.
fn check_mixing(series_list: &SeriesList) -> Result<()> {
    let total = series_list.len();
    for kind in series_list.iter().map(|s| s.kind).filter(ChartType::is_exclusive) {
        let count = series_list.iter().filter(|s| s.kind == kind).count();
        if count != 0 && count != total {
            return Err(ChartError::MixedChartType(kind));
        }
    }
    Ok(())
}

/// Renders `opt` onto a fresh canvas and returns the painter holding the result.
pub fn render(opt: ChartOption, registry: &Registry) -> Result<Painter> {
    render_with_parent(opt, registry, None)
}

fn render_with_parent(mut opt: ChartOption, registry: &Registry, parent: Option<&Painter>) -> Result<Painter> {
    opt.fill_defaults(registry);
    let theme = opt.theme_ref();
    let font = opt.resolved_font.clone().unwrap_or_else(|| registry.default_font());

    let p = match parent {
        Some(parent) => parent.child(&[
            PainterOption::Box(opt.rect),
            PainterOption::Theme(theme.clone()),
            PainterOption::Font(font),
        ]),
        None => Painter::new(PainterOptions {
            output: opt.output,
            width: opt.width,
            height: opt.height,
            font,
            theme: theme.clone(),
        })?,
    };
    debug!(chart = ?opt, "render chart");
    check_mixing(&opt.series_list)?;
    if opt.series_list.is_empty() {
        return Err(ChartError::EmptySeries);
    }

    let mut bg = p.child(&[]);
    let background = opt.background_color.unwrap_or(theme.background_color);
    bg.set_background(p.width(), p.height(), background, true);

    let mut series_list = opt.series_list.clone();
    series_list.init();
    let has = |kind: ChartType| series_list.iter().any(|s| s.kind == kind);
    let axis_reversed = has(ChartType::HorizontalBar);

    let mut render_opt = DefaultRenderOption {
        theme: Some(theme.clone()),
        padding: opt.padding,
        series_list: series_list.clone(),
        y_axis_options: opt.y_axis_options.clone(),
        x_axis: opt.x_axis.clone(),
        title: opt.title.clone(),
        legend: opt.legend.clone(),
        background_is_filled: true,
        axis_reversed,
    };
    if series_list.iter().any(|s| s.kind.hides_axes()) {
        render_opt.x_axis.show = Some(false);
        render_opt.y_axis_options = vec![YAxisOption { show: Some(false), ..YAxisOption::default() }];
    }
    if axis_reversed {
        if let Some(y_axis) = render_opt.y_axis_options.first_mut() {
            y_axis.divide_count = y_axis.data.len();
            y_axis.unit = 1;
        }
    }
    let result = default_render(&p, render_opt)?;

    let bar = series_list.filter(ChartType::Bar);
    if !bar.is_empty() {
        let bar_opt = BarChartOption { x_axis: opt.x_axis.clone(), bar_width: opt.bar_width, bar_margin: opt.bar_margin };
        BarChart::new(p.clone(), bar_opt).render(&result, &bar)?;
    }
    let horizontal_bar = series_list.filter(ChartType::HorizontalBar);
    if !horizontal_bar.is_empty() {
        let hbar_opt = HorizontalBarChartOption {
            y_axis_options: opt.y_axis_options.clone(),
            bar_height: opt.bar_height,
            bar_margin: opt.bar_margin,
        };
        HorizontalBarChart::new(p.clone(), hbar_opt).render(&result, &horizontal_bar)?;
    }
    let pie = series_list.filter(ChartType::Pie);
    if !pie.is_empty() {
        PieChart::new(p.clone(), PieChartOption { series_names: opt.legend.data.clone() }).render(&result, &pie)?;
    }
    let line = series_list.filter(ChartType::Line);
    if !line.is_empty() {
        let line_opt = LineChartOption {
            x_axis: opt.x_axis.clone(),
            symbol_show: opt.symbol_show,
            stroke_width: opt.line_stroke_width,
            fill_area: opt.fill_area,
            smooth: opt.smooth,
        };
        LineChart::new(p.clone(), line_opt).render(&result, &line)?;
    }
    let radar = series_list.filter(ChartType::Radar);
    if !radar.is_empty() {
        RadarChart::new(p.clone(), RadarChartOption { indicators: opt.radar_indicators.clone() }).render(&result, &radar)?;
    }
    let funnel = series_list.filter(ChartType::Funnel);
    if !funnel.is_empty() {
        FunnelChart::new(p.clone()).render(&result, &funnel)?;
    }

    for mut child in std::mem::take(&mut opt.children) {
        if child.theme.is_empty() {
            child.theme = opt.theme.clone();
        }
        if child.font_family.is_empty() {
            child.font_family = opt.font_family.clone();
        }
        render_with_parent(child, registry, Some(&p))?;
    }
    Ok(p)
}

/// Renders and encodes in one step.
pub fn render_to_bytes(opt: ChartOption, registry: &Registry) -> Result<Vec<u8>> {
    render(opt, registry)?.bytes()
}

/// Renders `opt` and writes the encoded document to `path`, creating parent
/// directories as needed. The output type follows the option, not the extension.
pub fn render_to_file(opt: ChartOption, registry: &Registry, path: impl AsRef<Path>) -> Result<()> {
    let data = render_to_bytes(opt, registry)?;
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, data)?;
    Ok(())
}

pub fn render_to_svg(opt: ChartOption, registry: &Registry) -> Result<String> {
    let data = render_to_bytes(opt.with_output(OutputType::Svg), registry)?;
    String::from_utf8(data).map_err(|e| ChartError::Encode(e.to_string()))
}

pub fn render_to_png(opt: ChartOption, registry: &Registry) -> Result<Vec<u8>> {
    render_to_bytes(opt.with_output(OutputType::Png), registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Series;

    #[test]
    fn exclusive_types_can_not_mix() {
        let list: SeriesList = vec![Series::bar(&[1.0]), Series::new(ChartType::Pie, &[1.0])].into();
        assert!(matches!(check_mixing(&list), Err(ChartError::MixedChartType(ChartType::Pie))));
        let list: SeriesList = vec![Series::bar(&[1.0]), Series::line(&[1.0])].into();
        assert!(check_mixing(&list).is_ok());
    }

    #[test]
    fn third_axis_is_rejected() {
        let opt = ChartOption::new(vec![Series::line(&[1.0]).with_axis_index(2)]);
        let err = render(opt, &Registry::new()).unwrap_err();
        assert!(matches!(err, ChartError::TooManyYAxes(2)));
    }

    #[test]
    fn invalid_size_is_rejected() {
        let opt = ChartOption::new(vec![Series::line(&[1.0])]).with_size(-1, 300);
        assert!(matches!(render(opt, &Registry::new()), Err(ChartError::InvalidSize { .. })));
    }

    #[test]
    fn series_painter_reserves_axes() {
        let registry = Registry::new();
        let p = Painter::new(PainterOptions {
            output: OutputType::Svg,
            width: 600,
            height: 400,
            font: registry.default_font(),
            theme: registry.theme("light"),
        })
        .unwrap();
        let opt = DefaultRenderOption {
            padding: Rect::new_padding_all(20),
            series_list: vec![Series::bar(&[1.0, 2.0])].into(),
            x_axis: XAxisOption::new(["a", "b"]),
            ..DefaultRenderOption::default()
        };
        let result = default_render(&p, opt).unwrap();
        let rect = result.series_painter.rect();
        assert_eq!(rect.bottom, 400 - 20 - DEFAULT_X_AXIS_HEIGHT);
        assert_eq!(rect.right, 580);
        assert!(rect.left > 20);
        assert_eq!(result.axis_ranges.len(), 1);
        assert_eq!(result.axis_range(0).map(|r| r.size()), Some(360 - DEFAULT_X_AXIS_HEIGHT));
    }
}
