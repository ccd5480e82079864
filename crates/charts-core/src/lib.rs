// File: crates/charts-core/src/lib.rs
// Summary: Core library entry point; exports the chart option model, the render
// pipeline and the painter/renderer layer underneath it.

pub mod axis;
pub mod bar_chart;
pub mod chart;
pub mod chart_option;
pub mod echarts;
pub mod error;
pub mod funnel_chart;
pub mod geometry;
pub mod grid;
pub mod horizontal_bar_chart;
pub mod label;
pub mod legend;
pub mod line_chart;
pub mod mark_line;
pub mod mark_point;
pub mod overlay;
pub mod painter;
pub mod pie_chart;
pub mod radar_chart;
pub mod range;
pub mod registry;
pub mod renderer;
pub mod series;
pub mod style;
pub mod table;
pub mod text;
pub mod theme;
pub mod title;
pub mod util;
pub mod xaxis;
pub mod yaxis;

pub use chart::{default_render, render, render_to_bytes, render_to_file, render_to_png, render_to_svg};
pub use chart::{DefaultRenderOption, DefaultRenderResult};
pub use chart_option::ChartOption;
pub use echarts::{parse_echarts_option, render_echarts_to_png, render_echarts_to_svg};
pub use error::{ChartError, Result};
pub use geometry::{Align, Orient, Point, Position, Rect};
pub use legend::LegendOption;
pub use painter::{Painter, PainterOption, PainterOptions};
pub use radar_chart::RadarIndicator;
pub use range::{AxisRange, AxisRangeOption, ValueFormatter};
pub use registry::Registry;
pub use renderer::{OutputType, Renderer};
pub use series::{ChartType, MarkType, Series, SeriesData, SeriesLabel, SeriesList, SeriesMarkLine, SeriesMarkPoint};
pub use style::{Color, Style};
pub use table::{table_render, TableCell, TableChart, TableChartOption};
pub use text::FontFace;
pub use theme::Theme;
pub use title::TitleOption;
pub use xaxis::XAxisOption;
pub use yaxis::YAxisOption;
