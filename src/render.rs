//! Chart rendering.
//!
//! Turns an [`Aggregate`] into a rasterized PNG: line charts for time
//! series, bars for categorical distributions, a pie for the message-type
//! share. An empty aggregate still produces a captioned, axis-less image.
//!
//! Rendering failures are soft: [`render_all`] collects them instead of
//! propagating, so one bad chart (or a host with no usable fonts) never
//! stops the remaining charts or the CSV export.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::aggregate::{Aggregate, ChartKind};
use crate::error::{ReportError, Result};

const CHART_SIZE: (u32, u32) = (1024, 768);

/// Series palette, cycled for pie slices.
const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

const SERIES_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Output path of one chart: `<dir>/<name>.png`.
pub fn chart_path(dir: &Path, aggregate: &Aggregate) -> PathBuf {
    dir.join(format!("{}.png", aggregate.name))
}

/// Renders every aggregate into `dir` (created, with parents, if absent).
///
/// Returns the per-chart failures; an empty vector means all charts were
/// written. Failures never abort the remaining renders.
pub fn render_all(aggregates: &[Aggregate], dir: &Path) -> Result<Vec<ReportError>> {
    fs::create_dir_all(dir)?;

    let mut failures = Vec::new();
    for aggregate in aggregates {
        if let Err(e) = render_chart(aggregate, &chart_path(dir, aggregate)) {
            failures.push(e);
        }
    }
    Ok(failures)
}

/// Renders one aggregate to `path` as a PNG.
pub fn render_chart(aggregate: &Aggregate, path: &Path) -> Result<()> {
    draw(aggregate, path).map_err(|e| ReportError::chart(aggregate.name, e.to_string()))
}

fn draw(aggregate: &Aggregate, path: &Path) -> std::result::Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    if aggregate.is_empty() {
        // Degenerate image: caption only, no axes.
        root.titled(aggregate.title, ("sans-serif", 28))?;
    } else {
        match aggregate.kind {
            ChartKind::Line => draw_line(aggregate, &root)?,
            ChartKind::Bar => draw_bar(aggregate, &root)?,
            ChartKind::Pie => draw_pie(aggregate, &root)?,
        }
    }

    root.present()?;
    Ok(())
}

fn draw_line(
    aggregate: &Aggregate,
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
) -> std::result::Result<(), Box<dyn Error>> {
    let n = aggregate.rows.len() as i32;
    let labels = key_labels(aggregate);

    let mut chart = ChartBuilder::on(root)
        .caption(aggregate.title, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(56)
        .build_cartesian_2d(0..(n - 1).max(1), 0f64..y_max(aggregate))?;

    chart
        .configure_mesh()
        .x_labels(aggregate.rows.len().min(12))
        .x_label_formatter(&|x: &i32| labels.get(*x as usize).cloned().unwrap_or_default())
        .x_desc(aggregate.key_label)
        .y_desc(aggregate.value_label)
        .draw()?;

    chart.draw_series(LineSeries::new(
        aggregate
            .rows
            .iter()
            .enumerate()
            .map(|(i, (_, v))| (i as i32, *v)),
        &SERIES_COLOR,
    ))?;

    chart.draw_series(
        aggregate
            .rows
            .iter()
            .enumerate()
            .map(|(i, (_, v))| Circle::new((i as i32, *v), 3, SERIES_COLOR.filled())),
    )?;

    Ok(())
}

fn draw_bar(
    aggregate: &Aggregate,
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
) -> std::result::Result<(), Box<dyn Error>> {
    let n = aggregate.rows.len() as i32;
    let labels = key_labels(aggregate);

    let mut chart = ChartBuilder::on(root)
        .caption(aggregate.title, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(64)
        .y_label_area_size(56)
        .build_cartesian_2d((0..n).into_segmented(), 0f64..y_max(aggregate))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(aggregate.rows.len().min(12))
        .x_label_formatter(&|seg: &SegmentValue<i32>| match seg {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                labels.get(*i as usize).cloned().unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        })
        .x_desc(aggregate.key_label)
        .y_desc(aggregate.value_label)
        .draw()?;

    chart.draw_series(aggregate.rows.iter().enumerate().map(|(i, (_, v))| {
        Rectangle::new(
            [
                (SegmentValue::Exact(i as i32), 0.0),
                (SegmentValue::Exact(i as i32 + 1), *v),
            ],
            SERIES_COLOR.filled(),
        )
    }))?;

    Ok(())
}

fn draw_pie(
    aggregate: &Aggregate,
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
) -> std::result::Result<(), Box<dyn Error>> {
    let area = root.titled(aggregate.title, ("sans-serif", 28))?;

    let dims = area.dim_in_pixel();
    let center = (dims.0 as i32 / 2, dims.1 as i32 / 2);
    let radius = f64::from(dims.0.min(dims.1)) * 0.35;

    let sizes: Vec<f64> = aggregate.rows.iter().map(|(_, v)| *v).collect();
    let labels: Vec<String> = aggregate
        .rows
        .iter()
        .map(|(k, v)| format!("{k} ({v:.0})"))
        .collect();
    let colors: Vec<RGBColor> = (0..aggregate.rows.len())
        .map(|i| PALETTE[i % PALETTE.len()])
        .collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(-90.0);
    pie.label_style(("sans-serif", 18).into_font().color(&BLACK));
    area.draw(&pie)?;

    Ok(())
}

fn key_labels(aggregate: &Aggregate) -> Vec<String> {
    aggregate
        .rows
        .iter()
        .map(|(k, _)| {
            let mut label: String = k.chars().take(14).collect();
            if k.chars().count() > 14 {
                label.push('…');
            }
            label
        })
        .collect()
}

fn y_max(aggregate: &Aggregate) -> f64 {
    let max = aggregate.rows.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    if max > 0.0 { max * 1.1 } else { 1.0 }
}
