// File: crates/charts-core/src/error.rs
// Summary: Typed error returned by every fallible layout, render and encode step.

use crate::series::ChartType;

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("invalid canvas size {width}x{height}, both sides must be greater than 0")]
    InvalidSize { width: i32, height: i32 },

    #[error("series list can not be empty")]
    EmptySeries,

    #[error("{0} chart can not be mixed with other chart types")]
    MixedChartType(ChartType),

    #[error("the count of radar indicators should be >= 3, got {0}")]
    TooFewIndicators(usize),

    #[error("the sum value of pie chart should be greater than 0")]
    PieSumNotPositive,

    #[error("at most two y axes are supported, got axis index {0}")]
    TooManyYAxes(usize),

    #[error("table header can not be empty")]
    EmptyTableHeader,

    #[error("table column widths ({specified}px) exceed the table width ({total}px)")]
    ColumnWidthOverflow { specified: i32, total: i32 },

    #[error("font family '{0}' is not installed")]
    FontNotFound(String),

    #[error("theme '{0}' is not registered")]
    ThemeNotFound(String),

    #[error("font data for '{0}' could not be parsed")]
    InvalidFont(String),

    #[error("invalid color '{0}'")]
    InvalidColor(String),

    #[error("failed to create raster surface: {0}")]
    Surface(String),

    #[error("failed to encode output: {0}")]
    Encode(String),

    #[error("invalid chart json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
