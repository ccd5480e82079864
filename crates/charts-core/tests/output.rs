// File: crates/charts-core/tests/output.rs
// Purpose: Encoded output of the public render API.
// Behavior:
// - PNG bytes decode through `image` to the requested canvas size.
// - The raster surface exposes its RGBA8 pixels directly.
// - The SVG golden snapshot follows the bless flow: UPDATE_SNAPSHOTS=1 rewrites it,
//   an existing snapshot must match exactly, a missing one is reported and skipped.

use std::cell::RefCell;
use std::rc::Rc;

use charts_core::renderer::{RasterRenderer, Renderer};
use charts_core::{
    render_to_file, render_to_png, render_to_svg, ChartOption, Color, OutputType, Painter, Rect, Registry, Series, Style,
};

fn sample_chart() -> ChartOption {
    ChartOption::new(vec![
        Series::line(&[120.0, 132.0, 101.0, 134.0, 90.0, 230.0, 210.0]).with_name("Email"),
        Series::line(&[220.0, 182.0, 191.0, 234.0, 290.0, 330.0, 310.0]).with_name("Union Ads"),
    ])
    .with_title("Line")
    .with_x_axis_data(["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"])
}

#[test]
fn png_decodes_to_canvas_size() {
    let bytes = render_to_png(sample_chart().with_size(400, 300), &Registry::new()).expect("render png");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    let img = image::load_from_memory(&bytes).expect("decode png").to_rgba8();
    assert_eq!(img.dimensions(), (400, 300));
    // light background is opaque white
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
}

#[test]
fn dark_theme_fills_the_background() {
    let opt = sample_chart().with_size(200, 150).with_theme("dark");
    let bytes = render_to_png(opt, &Registry::new()).expect("render png");
    let img = image::load_from_memory(&bytes).expect("decode png").to_rgba8();
    assert_eq!(img.get_pixel(1, 1).0, [16, 12, 42, 255]);
}

#[test]
fn raster_pixels_match_painted_rects() {
    let registry = Registry::new();
    let raster = Rc::new(RefCell::new(RasterRenderer::new(40, 30).expect("raster surface")));
    let renderer: Rc<RefCell<dyn Renderer>> = raster.clone();
    let mut p = Painter::with_renderer(renderer, registry.theme("light"), registry.default_font());
    p.set_background(40, 30, Color::WHITE, true);
    p.set_drawing_style(Style::fill(Color::rgb(200, 0, 0)));
    p.rect(Rect::from_ltrb(10, 10, 30, 20));

    let pixels = raster.borrow_mut().rgba8().expect("read pixels");
    assert_eq!(pixels.len(), 40 * 30 * 4);
    let at = |x: usize, y: usize| &pixels[(y * 40 + x) * 4..(y * 40 + x) * 4 + 4];
    assert_eq!(at(0, 0), [255, 255, 255, 255]);
    assert_eq!(at(20, 15), [200, 0, 0, 255]);
    assert_eq!(at(35, 25), [255, 255, 255, 255]);
}

#[test]
fn file_output_follows_the_option() {
    let out = std::path::PathBuf::from("target/test_out/line.svg");
    render_to_file(sample_chart().with_output(OutputType::Svg), &Registry::new(), &out).expect("render to file");
    let text = std::fs::read_to_string(&out).expect("read svg");
    assert!(text.starts_with("<svg"));
    assert!(text.trim_end().ends_with("</svg>"));
}

#[test]
fn golden_line_chart_svg() {
    let svg = render_to_svg(sample_chart(), &Registry::new()).expect("render svg");
    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join("line_chart.svg");

    let update = std::env::var("UPDATE_SNAPSHOTS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        std::fs::write(&snap_path, &svg).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), svg.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read_to_string(&snap_path).expect("read snapshot");
        assert_eq!(svg, want, "rendered svg differs from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
    }
}
