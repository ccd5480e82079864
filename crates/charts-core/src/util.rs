// File: crates/charts-core/src/util.rs
// Summary: Pixel division, number formatting and polygon helpers shared by the painters.

use serde::{Deserialize, Deserializer};

use crate::geometry::Point;

/// Splits `total` pixels into `count` gaps and returns the `count + 1` boundaries.
/// The remainder goes one pixel at a time to the leading gaps.
pub fn auto_divide(total: i32, count: usize) -> Vec<i32> {
    if count == 0 {
        return vec![0, total];
    }
    let n = count as i32;
    let unit = total / n;
    let rest = total - unit * n;
    let mut values = Vec::with_capacity(count + 1);
    let mut current = 0;
    values.push(0);
    for i in 0..n {
        current += unit + i32::from(i < rest);
        values.push(current);
    }
    values
}

/// Boundaries for columns that each cover `spans[i]` units of an even division.
pub fn auto_divide_spans(total: i32, spans: &[usize]) -> Vec<i32> {
    let sum: usize = spans.iter().sum();
    let values = auto_divide(total, sum.max(1));
    let mut result = Vec::with_capacity(spans.len() + 1);
    let mut index = 0;
    for span in spans {
        result.push(values[index.min(values.len() - 1)]);
        index += span;
    }
    result.push(total);
    result
}

/// Formats with `digits` decimals, rounding, then trims trailing zeros (`1.20` → `1.2`).
pub fn format_float(value: f64, digits: usize) -> String {
    let s = format!("{value:.digits$}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    };
    if s == "-0" { "0".to_string() } else { s }
}

/// Inserts thousands separators in the integer part of `value` and keeps at most
/// `digits` decimals (truncated, not rounded).
pub fn commaf_digits(value: f64, digits: usize) -> String {
    let raw = format!("{}", value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f)),
        None => (raw.clone(), None),
    };
    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let mut out = String::new();
    if value < 0.0 && value.abs() > 0.0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        let kept: String = frac.chars().take(digits).collect();
        if !kept.is_empty() {
            out.push('.');
            out.push_str(&kept);
        }
    }
    out
}

/// Axis-friendly number: `1.2M`, `1.2k`, or the value with up to two decimals.
pub fn commaf_with_digits(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        return format!("{}M", commaf_digits(value / 1_000_000.0, 2));
    }
    if abs >= 1_000.0 {
        return format!("{}k", commaf_digits(value / 1_000.0, 2));
    }
    commaf_digits(value, 2)
}

/// `"50%"` of the diameter, or a bare pixel value; defaults to 40% of the diameter.
pub fn get_radius(diameter: f64, value: Option<&str>) -> f64 {
    let default = diameter * 0.4;
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return default;
    };
    let radius = match raw.strip_suffix('%') {
        Some(percent) => percent.trim().parse::<f64>().map(|p| diameter * p / 100.0),
        None => raw.parse::<f64>(),
    };
    radius.ok().filter(|r| *r > 0.0).unwrap_or(default)
}

/// Vertex angles of a regular polygon with the first vertex pointing up.
pub fn polygon_angles(sides: usize) -> Vec<f64> {
    (0..sides)
        .map(|i| std::f64::consts::TAU / sides as f64 * i as f64 - std::f64::consts::FRAC_PI_2)
        .collect()
}

pub fn polygon_point(center: Point, radius: f64, angle: f64) -> Point {
    Point {
        x: center.x + (radius * angle.cos()) as i32,
        y: center.y + (radius * angle.sin()) as i32,
    }
}

pub fn polygon_points(center: Point, radius: f64, sides: usize) -> Vec<Point> {
    polygon_angles(sides)
        .into_iter()
        .map(|angle| polygon_point(center, radius, angle))
        .collect()
}

/// Resolves a pixel-or-percent string against `total`: `"20%"`, `"35"`.
pub fn parse_flex_size(value: &str, total: i32) -> Option<i32> {
    let value = value.trim();
    if let Some(percent) = value.strip_suffix('%') {
        let p: f64 = percent.trim().parse().ok()?;
        return Some((f64::from(total) * p / 100.0) as i32);
    }
    value.parse::<f64>().ok().map(|v| v as i32)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlexValue {
    Text(String),
    Number(f64),
}

/// Accepts `"center"`, `"20%"`, `"35"` or a bare number `35` for placement fields.
pub(crate) fn deserialize_flex<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<FlexValue>::deserialize(deserializer)?.map(|v| match v {
        FlexValue::Text(s) => s,
        FlexValue::Number(n) => format_float(n, 2),
    }))
}

/// Horizontal placement of a box `width` wide inside `total`: `left`/`right`/`center`,
/// a percentage of `total`, or pixels. Unparsable values place it at 0.
pub fn flex_left(value: Option<&str>, total: i32, width: i32) -> i32 {
    match value.map(str::trim) {
        Some("right") => total - width,
        Some("center") => (total >> 1) - (width >> 1),
        Some(v) => parse_flex_size(v, total).unwrap_or(0),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_divide_spreads_remainder() {
        assert_eq!(auto_divide(600, 7), vec![0, 86, 172, 258, 344, 430, 515, 600]);
        assert_eq!(auto_divide(10, 2), vec![0, 5, 10]);
        let values = auto_divide(997, 13);
        assert_eq!(values.len(), 14);
        assert_eq!(*values.last().unwrap(), 997);
        let gaps: Vec<i32> = values.windows(2).map(|w| w[1] - w[0]).collect();
        let (lo, hi) = (gaps.iter().min().unwrap(), gaps.iter().max().unwrap());
        assert!(hi - lo <= 1);
    }

    #[test]
    fn auto_divide_spans_merges_units() {
        assert_eq!(auto_divide_spans(300, &[1, 2]), vec![0, 100, 300]);
        assert_eq!(auto_divide_spans(100, &[1, 1, 1, 1]), vec![0, 25, 50, 75, 100]);
    }

    #[test]
    fn commaf_suffixes() {
        assert_eq!(commaf_with_digits(1.2), "1.2");
        assert_eq!(commaf_with_digits(1.21231), "1.21");
        assert_eq!(commaf_with_digits(1200.121), "1.20k");
        assert_eq!(commaf_with_digits(1_200_000.0), "1.2M");
        assert_eq!(commaf_with_digits(-40.0), "-40");
        assert_eq!(commaf_digits(1234567.891, 2), "1,234,567.89");
    }

    #[test]
    fn format_float_trims() {
        assert_eq!(format_float(1.2, 2), "1.2");
        assert_eq!(format_float(12.0, 2), "12");
        assert_eq!(format_float(0.126, 2), "0.13");
        assert_eq!(format_float(-0.001, 2), "0");
    }

    #[test]
    fn radius_forms() {
        assert_eq!(get_radius(100.0, Some("50%")), 50.0);
        assert_eq!(get_radius(100.0, Some("30")), 30.0);
        assert_eq!(get_radius(100.0, None), 40.0);
        assert_eq!(get_radius(100.0, Some("bad")), 40.0);
        assert_eq!(get_radius(100.0, Some("0")), 40.0);
    }

    #[test]
    fn polygon_first_vertex_points_up() {
        let points = polygon_points(Point::new(100, 100), 50.0, 4);
        assert_eq!(points[0], Point::new(100, 50));
        assert_eq!(points[1], Point::new(150, 100));
        assert_eq!(points[2].y, 150);
    }

    #[test]
    fn flex_sizes() {
        assert_eq!(parse_flex_size("20%", 500), Some(100));
        assert_eq!(parse_flex_size("35", 500), Some(35));
        assert_eq!(parse_flex_size("x", 500), None);
        assert_eq!(flex_left(Some("right"), 500, 100), 400);
        assert_eq!(flex_left(Some("center"), 500, 101), 200);
        assert_eq!(flex_left(Some("10%"), 500, 100), 50);
        assert_eq!(flex_left(None, 500, 100), 0);
    }

    #[test]
    fn flex_fields_accept_numbers() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(default, deserialize_with = "deserialize_flex")]
            left: Option<String>,
        }
        let h: Holder = serde_json::from_str(r#"{"left": 20}"#).unwrap();
        assert_eq!(h.left.as_deref(), Some("20"));
        let h: Holder = serde_json::from_str(r#"{"left": "center"}"#).unwrap();
        assert_eq!(h.left.as_deref(), Some("center"));
        let h: Holder = serde_json::from_str("{}").unwrap();
        assert_eq!(h.left, None);
    }
}
