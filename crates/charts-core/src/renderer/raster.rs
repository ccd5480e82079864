// File: crates/charts-core/src/renderer/raster.rs
// Summary: Skia CPU raster renderer encoding to PNG.

use std::collections::HashMap;

use skia_safe as skia;
use tracing::debug;

use super::{OutputType, PaintMode, Path, PathCommand, Renderer};
use crate::error::{ChartError, Result};
use crate::style::{Color, DrawStyle, TextStyle};

pub struct RasterRenderer {
    width: i32,
    height: i32,
    surface: skia::Surface,
    // typeface lookups for estimated faces, keyed by family
    fallback_typefaces: HashMap<String, Option<skia::Typeface>>,
}

impl RasterRenderer {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let mut surface = skia::surfaces::raster_n32_premul((width, height))
            .ok_or_else(|| ChartError::Surface(format!("{width}x{height}")))?;
        surface.canvas().clear(skia::Color::TRANSPARENT);
        Ok(Self { width, height, surface, fallback_typefaces: HashMap::new() })
    }

    /// Raw RGBA8 pixels of the current surface.
    pub fn rgba8(&mut self) -> Result<Vec<u8>> {
        let info = skia::ImageInfo::new(
            (self.width, self.height),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let stride = self.width as usize * 4;
        let mut pixels = vec![0u8; stride * self.height as usize];
        if !self.surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            return Err(ChartError::Encode("failed to read raster pixels".to_string()));
        }
        Ok(pixels)
    }

    fn typeface_for(&mut self, style: &TextStyle) -> Option<skia::Typeface> {
        if let Some(typeface) = style.font.typeface() {
            return Some(typeface.clone());
        }
        let family = style.font.family().to_string();
        self.fallback_typefaces
            .entry(family)
            .or_insert_with_key(|family| {
                let mgr = skia::FontMgr::default();
                let found = mgr
                    .match_family_style(family, skia::FontStyle::normal())
                    .or_else(|| mgr.legacy_make_typeface(None::<&str>, skia::FontStyle::normal()));
                if found.is_none() {
                    debug!(family = family.as_str(), "no system typeface, text is skipped in png output");
                }
                found
            })
            .clone()
    }
}

fn to_skia(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn build_path(path: &Path) -> skia::Path {
    let mut out = skia::Path::new();
    let mut has_point = false;
    for cmd in path.commands() {
        match *cmd {
            PathCommand::MoveTo { x, y } => {
                out.move_to((x as f32, y as f32));
                has_point = true;
            }
            PathCommand::LineTo { x, y } => {
                if has_point {
                    out.line_to((x as f32, y as f32));
                } else {
                    out.move_to((x as f32, y as f32));
                }
                has_point = true;
            }
            PathCommand::QuadTo { cx, cy, x, y } => {
                out.quad_to((cx as f32, cy as f32), (x as f32, y as f32));
                has_point = true;
            }
            PathCommand::ArcTo { cx, cy, rx, ry, start, delta } => {
                let oval = skia::Rect::from_ltrb((cx - rx) as f32, (cy - ry) as f32, (cx + rx) as f32, (cy + ry) as f32);
                let sweep = delta.to_degrees();
                // Skia drops a 360 degree sweep passed to arc_to, so full turns use add_oval.
                if sweep.abs() >= 360.0 - 1e-6 {
                    out.add_oval(oval, None);
                } else {
                    out.arc_to(oval, start.to_degrees() as f32, sweep as f32, !has_point);
                }
                has_point = true;
            }
            PathCommand::Circle { cx, cy, r } => {
                out.add_circle((cx as f32, cy as f32), r as f32, None);
                has_point = true;
            }
            PathCommand::Close => {
                out.close();
            }
        }
    }
    out
}

impl Renderer for RasterRenderer {
    fn output(&self) -> OutputType {
        OutputType::Png
    }
    fn width(&self) -> i32 {
        self.width
    }
    fn height(&self) -> i32 {
        self.height
    }

    fn draw_path(&mut self, path: &Path, style: &DrawStyle, mode: PaintMode) {
        if path.is_empty() {
            return;
        }
        let sk_path = build_path(path);
        let canvas = self.surface.canvas();
        if matches!(mode, PaintMode::Fill | PaintMode::FillStroke) && style.has_fill() {
            let mut paint = skia::Paint::default();
            paint.set_anti_alias(true);
            paint.set_style(skia::PaintStyle::Fill);
            paint.set_color(to_skia(style.fill_color));
            canvas.draw_path(&sk_path, &paint);
        }
        if matches!(mode, PaintMode::Stroke | PaintMode::FillStroke) && style.has_stroke() {
            let mut paint = skia::Paint::default();
            paint.set_anti_alias(true);
            paint.set_style(skia::PaintStyle::Stroke);
            paint.set_stroke_width(style.stroke_width as f32);
            paint.set_color(to_skia(style.stroke_color));
            if !style.stroke_dash_array.is_empty() {
                let intervals: Vec<f32> = style.stroke_dash_array.iter().map(|v| *v as f32).collect();
                paint.set_path_effect(skia::PathEffect::dash(&intervals, 0.0));
            }
            canvas.draw_path(&sk_path, &paint);
        }
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        if text.is_empty() {
            return;
        }
        let Some(typeface) = self.typeface_for(style) else {
            return;
        };
        let font = skia::Font::from_typeface(typeface, style.font_size as f32);
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_color(to_skia(style.font_color));
        let canvas = self.surface.canvas();
        canvas.save();
        canvas.translate((x as f32, y as f32));
        if style.rotation != 0.0 {
            canvas.rotate(style.rotation.to_degrees() as f32, None);
        }
        canvas.draw_str(text, (0.0, 0.0), &font, &paint);
        canvas.restore();
    }

    fn bytes(&mut self) -> Result<Vec<u8>> {
        let image = self.surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| ChartError::Encode("encode PNG failed".to_string()))?;
        Ok(data.as_bytes().to_vec())
    }
}
