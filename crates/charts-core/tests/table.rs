// File: crates/charts-core/tests/table.rs
// Purpose: Table rendering through the public API.

use charts_core::style::{Color, Style};
use charts_core::table::{table_render_to_bytes, TableCell};
use charts_core::{table_render, ChartError, OutputType, Registry, TableChartOption};

fn rows() -> Vec<Vec<String>> {
    [
        ["John", "35", "New York", "Engineer"],
        ["Alice", "28", "London", "Designer with a particularly long and wrapping title"],
        ["Bob", "42", "Paris", "Manager"],
    ]
    .iter()
    .map(|row| row.iter().map(|c| c.to_string()).collect())
    .collect()
}

fn option() -> TableChartOption {
    TableChartOption::new(["Name", "Age", "City", "Role"], rows())
}

#[test]
fn svg_table_contains_every_cell() {
    let p = table_render(option(), &Registry::new()).expect("render");
    let svg = String::from_utf8(p.bytes().expect("bytes")).expect("utf8");
    for text in ["Name", "Age", "John", "London", "Manager"] {
        assert!(svg.contains(&format!(">{text}<")), "missing {text}");
    }
    assert_eq!(p.width(), 600);
}

#[test]
fn png_canvas_is_as_tall_as_the_rows() {
    let opt = TableChartOption { output: OutputType::Png, width: 400, spans: vec![1, 1, 1, 3], ..option() };
    let bytes = table_render_to_bytes(opt, &Registry::new()).expect("render");
    let img = image::load_from_memory(&bytes).expect("decode png");
    assert_eq!(img.width(), 400);
    // header plus three rows, each at least font size plus padding
    assert!(img.height() >= 4 * (12 + 20));
}

#[test]
fn table_from_json_with_cell_style() {
    let json = r##"{
        "width": 500,
        "theme": "dark",
        "header": ["Metric", "Value"],
        "data": [["cpu", "93%"], ["mem", "40%"]],
        "columnWidths": [0.4, 0],
        "textAligns": ["left", "right"]
    }"##;
    let opt: TableChartOption = serde_json::from_str(json).expect("parse");
    assert_eq!(opt.column_widths, vec![0.4, 0.0]);
    let alert = Color::rgb(200, 0, 0);
    let opt = opt.with_cell_style(move |cell: &TableCell| {
        (cell.row > 0 && cell.text.ends_with('%') && cell.text.starts_with('9')).then(|| Style::fill(alert))
    });
    let p = table_render(opt, &Registry::new()).expect("render");
    let svg = String::from_utf8(p.bytes().expect("bytes")).expect("utf8");
    assert_eq!(svg.matches("fill:rgb(200,0,0)").count(), 1);
    assert!(svg.contains(">93%<"));
}

#[test]
fn header_is_required() {
    let opt = TableChartOption::new(Vec::<String>::new(), rows());
    assert!(matches!(table_render(opt, &Registry::new()), Err(ChartError::EmptyTableHeader)));
}
