// File: crates/charts-core/src/geometry.rs
// Summary: Integer pixel rectangles and points used for every layout allocation.

use serde::Deserialize;

/// Axis-aligned pixel rectangle. Doubles as a region (painter bounds) and as a set of
/// insets (padding), where each side holds the amount to subtract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const ZERO: Rect = Rect { left: 0, top: 0, right: 0, bottom: 0 };

    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }
    pub const fn from_ltwh(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }
    /// Same inset on all four sides.
    pub const fn new_padding_all(value: i32) -> Self {
        Self { left: value, top: value, right: value, bottom: value }
    }
    pub const fn width(&self) -> i32 { self.right - self.left }
    pub const fn height(&self) -> i32 { self.bottom - self.top }

    pub const fn is_zero(&self) -> bool {
        self.left == 0 && self.top == 0 && self.right == 0 && self.bottom == 0
    }

    /// Shrinks this region by `padding` on each side. A padding larger than the region
    /// collapses it to zero size instead of producing a negative extent.
    pub fn padded(&self, padding: &Rect) -> Rect {
        let left = self.left + padding.left;
        let top = self.top + padding.top;
        let right = (self.right - padding.right).max(left);
        let bottom = (self.bottom - padding.bottom).max(top);
        Rect { left, top, right, bottom }
    }

    /// Element-wise sum, used to combine two paddings.
    pub fn add(&self, other: &Rect) -> Rect {
        Rect {
            left: self.left + other.left,
            top: self.top + other.top,
            right: self.right + other.right,
            bottom: self.bottom + other.bottom,
        }
    }

    pub fn with_offset(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Side of a box something is attached to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Left,
    Right,
    Top,
    Bottom,
    Center,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orient {
    #[default]
    Horizontal,
    Vertical,
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}
