// File: crates/charts-core/src/range.rs
// Summary: Value-to-pixel axis scale with "nice" rounded bounds and tick division.

use std::sync::Arc;

use crate::util::{auto_divide, commaf_with_digits};

/// Number of tick intervals used when an axis does not ask for a specific count.
pub const DEFAULT_AXIS_DIVIDE_COUNT: usize = 6;

const MAX_UNIT_PASSES: usize = 16;

/// Custom tick label formatter.
pub type ValueFormatter = Arc<dyn Fn(f64) -> String + Send + Sync>;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisRangeOption {
    pub min: f64,
    pub max: f64,
    /// Pixel extent of the axis.
    pub size: i32,
    pub divide_count: usize,
    /// Values sit centered between ticks instead of on them.
    pub boundary: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRange {
    min: f64,
    max: f64,
    size: i32,
    divide_count: usize,
    boundary: bool,
}

fn base_unit(span: f64) -> f64 {
    match span {
        r if r > 200.0 => 20.0,
        r if r > 100.0 => 10.0,
        r if r > 30.0 => 5.0,
        r if r > 10.0 => 4.0,
        r if r > 5.0 => 2.0,
        _ => 1.0,
    }
}

/// Rounds `min` outward to a multiple of `unit`. Negative results take one more unit
/// so the data never touches the axis edge.
fn nice_min(min: f64, unit: f64) -> f64 {
    if min == 0.0 {
        return 0.0;
    }
    let was_negative = min < 0.0;
    let rounded = (min / unit).trunc() * unit;
    if rounded < 0.0 || (was_negative && rounded == 0.0) {
        rounded - unit
    } else {
        rounded
    }
}

impl AxisRange {
    /// Computes nice bounds covering `[opt.min, opt.max]` with `divide_count` equal
    /// intervals of an integer unit. The max is always `min + unit * divide_count`.
    pub fn new(opt: AxisRangeOption) -> Self {
        let divide_count = opt.divide_count.max(1);
        let count = divide_count as f64;
        let (data_min, data_max) = match (opt.min, opt.max) {
            (lo, hi) if !lo.is_finite() || !hi.is_finite() => (0.0, 0.0),
            (lo, hi) if lo <= hi => (lo, hi),
            (lo, hi) => (hi, lo),
        };
        let max = data_max + (data_max * 0.1).abs();
        let min = data_min - (data_min * 0.1).abs();
        let span = (max - min).abs();
        let base = base_unit(span);
        let mut unit = (span / count / base).trunc() * base + base;
        let mut nice_lo = nice_min(min, unit);
        let mut nice_hi = nice_lo + unit * count;
        let covers = |hi: f64| hi >= data_max;
        let mut passes = 0;
        // step the unit by whole bases sized to the shortfall
        while !covers(nice_hi) && passes < MAX_UNIT_PASSES {
            let missing = ((data_max - nice_hi) / count / base).ceil().max(1.0);
            unit += missing * base;
            nice_lo = nice_min(min, unit);
            nice_hi = nice_lo + unit * count;
            passes += 1;
        }
        if !covers(nice_hi) {
            // nice_min drops the low end with every unit; anchor it on the base
            nice_lo = (min / base).floor() * base;
            unit = ((data_max - nice_lo) / count / base).ceil().max(1.0) * base;
            nice_hi = nice_lo + unit * count;
        }
        Self {
            min: nice_lo,
            max: nice_hi,
            size: opt.size,
            divide_count,
            boundary: opt.boundary,
        }
    }

    /// Category scale over `count` slots (no nice rounding): `[0, count]`.
    pub fn category(count: usize, size: i32, boundary: bool) -> Self {
        let divide = if boundary { count } else { count.saturating_sub(1) };
        Self {
            min: 0.0,
            max: divide.max(1) as f64,
            size,
            divide_count: divide,
            boundary,
        }
    }

    /// Lowers the minimum to `min` when that widens the range.
    pub fn with_min(mut self, min: f64) -> Self {
        if min < self.min {
            self.min = min;
        }
        self
    }

    /// Raises the maximum to `max` when that widens the range.
    pub fn with_max(mut self, max: f64) -> Self {
        if max > self.max {
            self.max = max;
        }
        self
    }

    pub fn min(&self) -> f64 { self.min }
    pub fn max(&self) -> f64 { self.max }
    pub fn size(&self) -> i32 { self.size }
    pub fn divide_count(&self) -> usize { self.divide_count }
    pub fn boundary(&self) -> bool { self.boundary }

    /// Tick labels from the minimum upward, `divide_count + 1` entries.
    pub fn values(&self, formatter: Option<&ValueFormatter>) -> Vec<String> {
        let count = self.divide_count.max(1);
        let offset = (self.max - self.min) / count as f64;
        (0..=count)
            .map(|i| {
                let v = self.min + offset * i as f64;
                match formatter {
                    Some(f) => f(v),
                    None => commaf_with_digits(v),
                }
            })
            .collect()
    }

    /// Pixel offset of `value` from the zero end of the axis.
    pub fn get_height(&self, value: f64) -> i32 {
        if self.max <= self.min {
            return 0;
        }
        ((value - self.min) / (self.max - self.min) * f64::from(self.size)) as i32
    }

    /// `size - get_height(value)`, i.e. the y coordinate in a top-down painter.
    pub fn get_rest_height(&self, value: f64) -> i32 {
        self.size - self.get_height(value)
    }

    /// Horizontal offset of `value`; boundary ranges shift by half a unit so category
    /// values are centered between ticks.
    pub fn get_width(&self, value: f64) -> i32 {
        if self.max <= self.min {
            return 0;
        }
        let mut v = (value - self.min) / (self.max - self.min);
        if self.boundary && self.divide_count != 0 {
            v += 1.0 / (self.divide_count as f64 * 2.0);
        }
        (v * f64::from(self.size)) as i32
    }

    /// Pixel span of the `index`-th division.
    pub fn get_range(&self, index: usize) -> (f64, f64) {
        let unit = f64::from(self.size) / self.divide_count.max(1) as f64;
        (unit * index as f64, unit * (index + 1) as f64)
    }

    /// Integer division boundaries over the pixel extent.
    pub fn auto_divide(&self) -> Vec<i32> {
        auto_divide(self.size, self.divide_count)
    }
}
