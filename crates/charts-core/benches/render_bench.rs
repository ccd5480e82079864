// File: crates/charts-core/benches/render_bench.rs
// Summary: Criterion benchmarks for SVG and PNG rendering of a dense line chart, and for
// nice axis range computation.

use charts_core::range::{AxisRange, AxisRangeOption};
use charts_core::{render_to_png, render_to_svg, ChartOption, Registry, Result, Series};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn build_chart(n: usize) -> ChartOption {
    let values: Vec<f64> = (0..n).map(|i| (i as f64 * 0.05).sin() * 10.0 + (i as f64 * 0.01)).collect();
    let labels: Vec<String> = (0..n).map(|i| i.to_string()).collect();
    ChartOption::new(vec![Series::line(&values).with_name("signal")])
        .with_title("Signal")
        .with_x_axis_data(labels)
        .with_size(800, 500)
}

fn bench_render(c: &mut Criterion) {
    let registry = Registry::new();
    let mut group = c.benchmark_group("render_line");
    for &n in &[100usize, 1_000usize] {
        group.bench_function(format!("svg_{n}"), |b| {
            let opt = build_chart(n);
            b.iter(|| -> Result<()> {
                black_box(render_to_svg(opt.clone(), &registry)?);
                Ok(())
            });
        });
        group.bench_function(format!("png_{n}"), |b| {
            let opt = build_chart(n);
            b.iter(|| -> Result<()> {
                black_box(render_to_png(opt.clone(), &registry)?);
                Ok(())
            });
        });
    }
    group.finish();
}

fn bench_range(c: &mut Criterion) {
    c.bench_function("axis_range_new", |b| {
        b.iter(|| {
            for i in 0..100 {
                let max = black_box(i as f64 * 13.7 + 1.0);
                let range = AxisRange::new(AxisRangeOption { min: -max / 3.0, max, size: 400, divide_count: 6, boundary: false });
                black_box(range.values(None));
            }
        });
    });
}

criterion_group!(benches, bench_render, bench_range);
criterion_main!(benches);
