// File: crates/charts-core/tests/painter.rs
// Purpose: Painter coordinate handling checked through a recording renderer.
// - Nested paddings compose like one summed padding.
// - Shapes and text land at absolute canvas coordinates.

mod common;

use charts_core::geometry::Point;
use charts_core::renderer::{PaintMode, PathCommand};
use charts_core::style::{Color, Style};
use charts_core::{FontFace, PainterOption, Rect};
use common::recording_painter;

#[test]
fn nested_padding_is_associative() {
    let (p, _) = recording_painter(400, 300);
    let a = Rect::from_ltrb(10, 20, 5, 15);
    let b = Rect::from_ltrb(7, 3, 11, 2);
    let nested = p.padded(a).padded(b).rect();
    let summed = p.padded(a.add(&b)).rect();
    assert_eq!(nested, summed);
    assert_eq!(nested, Rect::from_ltrb(17, 23, 384, 283));
}

#[test]
fn oversized_padding_collapses_the_box() {
    let (p, _) = recording_painter(100, 100);
    let child = p.padded(Rect::new_padding_all(80));
    assert_eq!(child.width(), 0);
    assert_eq!(child.height(), 0);
}

#[test]
fn rect_is_recorded_in_canvas_coordinates() {
    let (p, recorder) = recording_painter(200, 200);
    let mut child = p.padded(Rect::from_ltrb(30, 40, 0, 0));
    child.override_drawing_style(Style::fill(Color::rgb(1, 2, 3)));
    child.rect(Rect::from_ltrb(0, 0, 10, 20));

    let rec = recorder.borrow();
    assert_eq!(rec.paths.len(), 1);
    let path = &rec.paths[0];
    assert_eq!(path.mode, PaintMode::FillStroke);
    assert_eq!(path.commands.first(), Some(&PathCommand::MoveTo { x: 30.0, y: 40.0 }));
    assert_eq!(path.commands.len(), 5);
    assert_eq!(path.bounds(), Rect::from_ltrb(30, 40, 40, 60));
    assert_eq!(path.style.fill_color, Color::rgb(1, 2, 3));
}

#[test]
fn box_option_places_child_absolutely() {
    let (p, recorder) = recording_painter(300, 300);
    let nested = p.padded(Rect::new_padding_all(50));
    let mut child = nested.child(&[PainterOption::Box(Rect::from_ltwh(100, 100, 50, 50))]);
    child.set_text_style(Style::text(Color::rgb(0, 0, 0), 12.0));
    child.text("hello", 5, 10);

    let rec = recorder.borrow();
    assert_eq!(rec.texts.len(), 1);
    assert_eq!((rec.texts[0].x, rec.texts[0].y), (105.0, 110.0));
    assert_eq!(rec.texts[0].text, "hello");
}

#[test]
fn empty_paths_are_not_flushed() {
    let (mut p, recorder) = recording_painter(100, 100);
    p.stroke().fill().fill_stroke();
    p.line_stroke(&[]);
    assert!(recorder.borrow().paths.is_empty());

    p.override_drawing_style(Style::stroke(Color::rgb(9, 9, 9), 1.0));
    p.line_stroke(&[Point::new(0, 0), Point::new(10, 10)]);
    let rec = recorder.borrow();
    assert_eq!(rec.paths.len(), 1);
    assert_eq!(rec.paths[0].mode, PaintMode::Stroke);
}

#[test]
fn dots_share_one_path() {
    let (mut p, recorder) = recording_painter(100, 100);
    p.override_drawing_style(Style::stroke(Color::rgb(9, 9, 9), 1.0).with_fill(Color::WHITE));
    p.dots(&[Point::new(10, 10), Point::new(20, 20), Point::new(30, 30)], 2.0);
    let rec = recorder.borrow();
    assert_eq!(rec.paths.len(), 1);
    let circles = rec.paths[0].commands.iter().filter(|c| matches!(c, PathCommand::Circle { .. })).count();
    assert_eq!(circles, 3);
}

#[test]
fn arrows_point_their_tip_in_the_named_direction() {
    let (mut p, recorder) = recording_painter(100, 100);
    p.override_drawing_style(Style::fill(Color::rgb(9, 9, 9)));
    p.arrow_top(50, 50, 10, 12).arrow_bottom(50, 50, 10, 12).arrow_left(50, 50, 10, 12).arrow_right(50, 50, 10, 12);

    let rec = recorder.borrow();
    let tips: Vec<PathCommand> = rec.paths.iter().map(|p| p.commands[1]).collect();
    assert_eq!(tips[0], PathCommand::LineTo { x: 50.0, y: 38.0 });
    assert_eq!(tips[1], PathCommand::LineTo { x: 50.0, y: 50.0 });
    assert_eq!(rec.paths[1].bounds().top, 38);
    assert_eq!(tips[2], PathCommand::LineTo { x: 50.0, y: 50.0 });
    assert_eq!(rec.paths[2].bounds(), Rect::from_ltrb(50, 44, 60, 56));
    assert_eq!(rec.paths[3].bounds(), Rect::from_ltrb(40, 44, 50, 56));
}

#[test]
fn offset_moves_without_resizing() {
    let r = Rect::from_ltwh(1, 2, 30, 40).with_offset(10, 20);
    assert_eq!(r, Rect::from_ltrb(11, 22, 41, 62));
    assert_eq!((r.width(), r.height()), (30, 40));
}

#[test]
fn system_font_measures_with_real_metrics() {
    // hosts without fonts have nothing to look up
    let Some(face) = FontFace::system("sans-serif") else {
        return;
    };
    assert!(!face.is_estimated());
    assert_eq!(face.family(), "sans-serif");
    let (w, h) = face.measure("Hello", 12.0);
    assert!(w > 0 && h > 0);
}
