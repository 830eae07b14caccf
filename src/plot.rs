//! Diagnostic plots, rendered to PNG files with the plotters bitmap backend.
//!
//! Text is drawn with a font bundled into the binary, so no system fonts are needed.

use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};

use std::fmt::Display;
use std::path::Path;

use crate::error::{GyralError, Result};
use crate::zones::Percentiles;

pub const PLOT_SIZE: (u32, u32) = (1600, 1200);
pub const HISTOGRAM_BINS: usize = 1000;

const FONT_FAMILY: &str = "sans-serif";
const FONT_DATA: &[u8] = include_bytes!("../resources/fonts/DejaVuSans.ttf");


fn plot_err<E: Display>(err: E) -> GyralError {
    GyralError::Plot(err.to_string())
}


/// Make the bundled font available to plotters under the family name used for all plot text.
fn register_plot_font() -> Result<()> {
    register_font(FONT_FAMILY, FontStyle::Normal, FONT_DATA).map_err(|_| plot_err("invalid font data"))
}


/// Value range of the finite values, widened if all values are equal so that it is never empty.
fn value_range<'a, I: Iterator<Item = &'a f32>>(values: I) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v as f64), hi.max(*v as f64)));
    if lo > hi {
        return None;
    }
    if lo == hi {
        return Some((lo - 0.5, hi + 0.5));
    }
    Some((lo, hi))
}


/// Count the values falling into `bins` equally wide bins spanning their range. The largest value
/// is counted in the last bin. Returns the range and the counts.
pub fn histogram_counts(values: &[f32], bins: usize) -> Option<(f64, f64, Vec<usize>)> {
    let (lo, hi) = value_range(values.iter())?;
    let bins = bins.max(1);
    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in values.iter().filter(|v| v.is_finite()) {
        let bin = (((*v as f64) - lo) / width) as usize;
        counts[bin.min(bins - 1)] += 1;
    }
    Some((lo, hi, counts))
}


/// Plot a histogram of the curvature values with red markers at the two zone thresholds.
pub fn plot_curvature_histogram(path: &Path, curv: &[f32], pct: &Percentiles) -> Result<()> {
    let (lo, hi, counts) = histogram_counts(curv, HISTOGRAM_BINS)
        .ok_or_else(|| GyralError::Plot(String::from("no finite curvature values to plot")))?;
    let width = (hi - lo) / counts.len() as f64;
    let ymax = counts.iter().copied().max().unwrap_or(0).max(1) as f64 * 1.05;

    register_plot_font()?;
    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Curvature with 33rd and 66th Percentiles", (FONT_FAMILY, 40))
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(100)
        .build_cartesian_2d(lo.min(pct.p33)..hi.max(pct.p66), 0f64..ymax)
        .map_err(plot_err)?;

    chart.configure_mesh()
        .disable_mesh()
        .x_desc("Curvature")
        .y_desc("Num Vertices")
        .label_style((FONT_FAMILY, 20))
        .axis_desc_style((FONT_FAMILY, 28))
        .draw()
        .map_err(plot_err)?;

    chart.draw_series(
        counts.iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(idx, c)| {
                let x0 = lo + idx as f64 * width;
                Rectangle::new([(x0, 0.0), (x0 + width, *c as f64)], BLUE.filled())
            }),
    ).map_err(plot_err)?;

    for threshold in [pct.p33, pct.p66].iter() {
        chart.draw_series(std::iter::once(
            PathElement::new(vec![(*threshold, 0.0), (*threshold, ymax)], RED.stroke_width(2)),
        )).map_err(plot_err)?;
    }

    root.present().map_err(plot_err)?;
    Ok(())
}


/// Scatter plot of the metric (y axis) against the curvature (x axis). Pairs with a non-finite value are skipped.
pub fn plot_metric_vs_curvature(path: &Path, curv: &[f32], metric: &[f32]) -> Result<()> {
    let (x0, x1) = value_range(curv.iter())
        .ok_or_else(|| GyralError::Plot(String::from("no finite curvature values to plot")))?;
    let (y0, y1) = value_range(metric.iter())
        .ok_or_else(|| GyralError::Plot(String::from("no finite metric values to plot")))?;

    register_plot_font()?;
    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Metric vs. Curvature", (FONT_FAMILY, 40))
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(100)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(plot_err)?;

    chart.configure_mesh()
        .disable_mesh()
        .x_desc("Curvature")
        .y_desc("Metric")
        .label_style((FONT_FAMILY, 20))
        .axis_desc_style((FONT_FAMILY, 28))
        .draw()
        .map_err(plot_err)?;

    chart.draw_series(
        curv.iter()
            .zip(metric.iter())
            .filter(|(c, m)| c.is_finite() && m.is_finite())
            .map(|(c, m)| Circle::new((*c as f64, *m as f64), 2, BLUE.filled())),
    ).map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}
