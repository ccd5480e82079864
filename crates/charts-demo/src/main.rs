// File: crates/charts-demo/src/main.rs
// Summary: Gallery demo. Renders one chart per type plus a table to target/out as SVG
// and PNG. An optional argument adds a chart from a CSV file (first column categories,
// one series per remaining column) or from an ECharts JSON document.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use charts_core::radar_chart::new_radar_indicators;
use charts_core::series::{MarkType, SeriesMarkLine, SeriesMarkPoint};
use charts_core::{
    render_echarts_to_svg, render_to_file, table_render, ChartOption, ChartType, OutputType, Registry, Series,
    SeriesLabel, SeriesList, TableChartOption, YAxisOption,
};
use tracing::{info, warn};

const OUT_DIR: &str = "target/out";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let registry = Registry::new();
    std::fs::create_dir_all(OUT_DIR).with_context(|| format!("creating {OUT_DIR}"))?;

    for (name, opt) in gallery() {
        write_both(&registry, name, opt)?;
    }
    write_table(&registry)?;

    if let Some(raw) = std::env::args().nth(1) {
        let path = PathBuf::from(&raw);
        match path.extension().and_then(|e| e.to_str()).map(str::to_lowercase).as_deref() {
            Some("json") => {
                let json = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
                let svg = render_echarts_to_svg(&json, &registry)
                    .with_context(|| format!("rendering ECharts document '{}'", path.display()))?;
                let out = out_name(&path, "svg");
                std::fs::write(&out, svg)?;
                info!(path = %out.display(), "wrote echarts chart");
            }
            _ => {
                let opt = load_csv_chart(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
                let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("csv").to_string();
                write_both(&registry, &stem, opt)?;
            }
        }
    }
    Ok(())
}

fn write_both(registry: &Registry, name: &str, opt: ChartOption) -> Result<()> {
    for output in [OutputType::Svg, OutputType::Png] {
        let ext = if output == OutputType::Svg { "svg" } else { "png" };
        let out = Path::new(OUT_DIR).join(format!("{name}.{ext}"));
        render_to_file(opt.clone().with_output(output), registry, &out)
            .with_context(|| format!("rendering {}", out.display()))?;
        info!(path = %out.display(), "wrote chart");
    }
    Ok(())
}

fn months() -> Vec<&'static str> {
    vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
}

fn gallery() -> Vec<(&'static str, ChartOption)> {
    let evaporation = [2.0, 4.9, 7.0, 23.2, 25.6, 76.7, 135.6, 162.2, 32.6, 20.0, 6.4, 3.3];
    let precipitation = [2.6, 5.9, 9.0, 26.4, 28.7, 70.7, 175.6, 182.2, 48.7, 18.8, 6.0, 2.3];
    let marks = || SeriesMarkPoint::new(&[MarkType::Max, MarkType::Min]);

    let bar = ChartOption::new(vec![
        Series::bar(&evaporation).with_name("Evaporation").with_mark_point(marks()),
        Series::bar(&precipitation)
            .with_name("Precipitation")
            .with_mark_line(SeriesMarkLine::new(&[MarkType::Average])),
    ])
    .with_title("Rainfall vs Evaporation")
    .with_x_axis_data(months());

    let line = ChartOption::new(vec![
        Series::line(&[120.0, 132.0, 101.0, 134.0, 90.0, 230.0, 210.0]).with_name("Email"),
        Series::line(&[220.0, 182.0, 191.0, 234.0, 290.0, 330.0, 310.0])
            .with_name("Search Engine")
            .with_label(SeriesLabel::shown()),
    ])
    .with_title("Weekly Traffic")
    .with_x_axis_data(["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"])
    .with_theme("grafana");

    let mut dual_axis = ChartOption::new(vec![
        Series::bar(&evaporation).with_name("Evaporation"),
        Series::line(&[2.0, 2.2, 3.3, 4.5, 6.3, 10.2, 20.3, 23.4, 23.0, 16.5, 12.0, 6.2])
            .with_name("Temperature")
            .with_axis_index(1),
    ])
    .with_title("Evaporation and Temperature")
    .with_x_axis_data(months())
    .with_y_axis(YAxisOption::default().with_formatter("{value} ml"))
    .with_y_axis(YAxisOption::default().with_formatter("{value} °C"));
    dual_axis.smooth = true;

    let horizontal = ChartOption::new(SeriesList::horizontal_bar(&[
        vec![18203.0, 23489.0, 29034.0, 104970.0, 131744.0, 630230.0],
        vec![19325.0, 23438.0, 31000.0, 121594.0, 134141.0, 681807.0],
    ]))
    .with_title("World Population")
    .with_legend(["2011", "2012"])
    .with_y_axis(YAxisOption {
        data: ["Brazil", "Indonesia", "USA", "India", "China", "World"].iter().map(|s| s.to_string()).collect(),
        ..YAxisOption::default()
    })
    .with_value_formatter(Arc::new(|v: f64| format!("{:.0}k", v / 1000.0)));

    let pie_series: Vec<Series> = [1048.0, 735.0, 580.0, 484.0, 300.0]
        .iter()
        .map(|v| Series::new(ChartType::Pie, &[*v]).with_label(SeriesLabel::shown()).with_radius("35%"))
        .collect();
    let pie = ChartOption::new(pie_series)
        .with_title("Referer of a Website")
        .with_legend(["Search Engine", "Direct", "Email", "Union Ads", "Video Ads"]);

    let radar = ChartOption::new(SeriesList::radar(&[
        vec![4200.0, 3000.0, 20000.0, 35000.0, 50000.0, 18000.0],
        vec![5000.0, 14000.0, 28000.0, 26000.0, 42000.0, 21000.0],
    ]))
    .with_title("Basic Radar Chart")
    .with_legend(["Allocated Budget", "Actual Spending"])
    .with_radar_indicators(new_radar_indicators(
        &["Sales", "Administration", "Information Technology", "Customer Support", "Development", "Marketing"],
        &[6500.0, 16000.0, 30000.0, 38000.0, 52000.0, 25000.0],
    ))
    .with_theme("dark");

    let funnel = ChartOption::new(SeriesList::funnel(&[100.0, 80.0, 60.0, 40.0, 20.0]))
        .with_title("Funnel")
        .with_legend(["Show", "Click", "Visit", "Inquiry", "Order"]);

    vec![
        ("bar", bar),
        ("line", line),
        ("dual_axis", dual_axis),
        ("horizontal_bar", horizontal),
        ("pie", pie),
        ("radar", radar),
        ("funnel", funnel),
    ]
}

fn write_table(registry: &Registry) -> Result<()> {
    let data = [
        ["John", "35", "New York", "Engineer"],
        ["Alice", "28", "London", "Product designer working across several teams"],
        ["Bob", "42", "Paris", "Manager"],
    ]
    .iter()
    .map(|row| row.iter().map(|c| c.to_string()).collect())
    .collect();
    let opt = TableChartOption { spans: vec![1, 1, 2, 3], ..TableChartOption::new(["Name", "Age", "City", "Role"], data) };
    let out = Path::new(OUT_DIR).join("table.svg");
    let bytes = table_render(opt, registry)?.bytes()?;
    std::fs::write(&out, bytes)?;
    info!(path = %out.display(), "wrote table");
    Ok(())
}

/// Output name like target/out/<stem>.<ext>.
fn out_name(input: &Path, ext: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    Path::new(OUT_DIR).join(format!("{stem}.{ext}"))
}

/// Loads a CSV whose first column holds category labels and every other column one
/// line series; the header row names the series. ISO dates are shortened to "Mon DD".
fn load_csv_chart(path: &Path) -> Result<ChartOption> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    if headers.len() < 2 {
        anyhow::bail!("expected a category column and at least one value column, got {:?}", headers);
    }

    let mut categories = Vec::new();
    let mut columns = vec![Vec::new(); headers.len() - 1];
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let Some(label) = rec.get(0) else {
            continue;
        };
        categories.push(category_label(label));
        for (column, values) in columns.iter_mut().enumerate() {
            let value = rec.get(column + 1).and_then(|s| s.trim().parse::<f64>().ok());
            if value.is_none() {
                warn!(row, column = column + 1, "unparsable value, using 0");
            }
            values.push(value.unwrap_or(0.0));
        }
    }
    if categories.is_empty() {
        anyhow::bail!("no rows loaded, check headers/delimiter");
    }
    info!(rows = categories.len(), series = columns.len(), "loaded csv");

    let series = headers[1..].iter().zip(&columns).map(|(name, values)| Series::line(values).with_name(name.as_str())).collect::<Vec<_>>();
    let title = path.file_stem().and_then(|s| s.to_str()).unwrap_or("data").to_string();
    Ok(ChartOption::new(series).with_title(title).with_x_axis_data(categories))
}

fn category_label(raw: &str) -> String {
    let raw = raw.trim();
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| chrono::DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()));
    match date {
        Some(d) => d.format("%b %d").to_string(),
        None => raw.to_string(),
    }
}
