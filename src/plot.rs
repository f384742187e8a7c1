//! Linearized kinetics charts.
//!
//! One SVG chart is drawn per order: the transformed absorbance against time as
//! points, with the fitted line on top. The best order gets a highlighted line.

use crate::analysis::KineticsReport;
use crate::config::OutputConfig;
use crate::data::Table;
use crate::model::OrderFit;
use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Chart appearance.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
    pub point_color: RGBColor,
    pub line_color: RGBColor,
    /// Line color used for the best order.
    pub best_line_color: RGBColor,
    pub point_size: u32,
    pub line_width: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            point_color: BLUE,
            line_color: RGBColor(128, 128, 128),
            best_line_color: RED,
            point_size: 4,
            line_width: 2,
        }
    }
}

impl From<&OutputConfig> for PlotConfig {
    fn from(cfg: &OutputConfig) -> Self {
        Self {
            width: cfg.width,
            height: cfg.height,
            ..Self::default()
        }
    }
}

/// File name of the chart for the order with the given index.
pub fn plot_file_name(order_index: usize) -> String {
    format!("order-{order_index}.svg")
}

/// Draw one chart per order into `dir` and return the written files.
pub fn plot_all<P: AsRef<Path>>(
    dir: P,
    table: &Table,
    report: &KineticsReport,
    cfg: &PlotConfig,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut files = Vec::with_capacity(report.fits().len());
    for order_fit in report.fits() {
        let file = dir.join(plot_file_name(order_fit.order.index()));
        let is_best = order_fit.order == report.best();
        plot_order(&file, table, order_fit, is_best, cfg)
            .with_context(|| format!("failed to plot {}", order_fit.order))?;
        files.push(file);
    }
    Ok(files)
}

/// Draw the chart of a single order fit as an SVG file.
pub fn plot_order<P: AsRef<Path>>(
    file: P,
    table: &Table,
    order_fit: &OrderFit,
    is_best: bool,
    cfg: &PlotConfig,
) -> Result<()> {
    let file = file.as_ref();
    let points: Vec<(f64, f64)> = table
        .time()
        .iter()
        .zip(table.absorbance())
        .map(|(&t, &a)| (t, order_fit.order.transform(a)))
        .collect();

    let root = SVGBackend::new(file, (cfg.width, cfg.height)).into_drawing_area();
    draw_on_area(&root, &points, order_fit, is_best, cfg)
        .with_context(|| format!("failed to draw {file:?}"))?;
    Ok(())
}

fn draw_on_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    points: &[(f64, f64)],
    order_fit: &OrderFit,
    is_best: bool,
    cfg: &PlotConfig,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let fit = order_fit.fit;

    let (t_min, t_max) = bounds(points.iter().map(|&(t, _)| t));
    let line = [(t_min, fit.predict(t_min)), (t_max, fit.predict(t_max))];
    let (y_min, y_max) = bounds(points.iter().chain(&line).map(|&(_, y)| y));

    root.fill(&WHITE)?;

    let caption = format!("{} (R² = {:.4})", order_fit.order, fit.r_squared);
    let mut chart = ChartBuilder::on(root)
        .caption(caption, ("sans-serif", 28.0).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(padded(t_min, t_max), padded(y_min, y_max))?;

    chart
        .configure_mesh()
        .x_desc("t")
        .y_desc(order_fit.order.y_label())
        .draw()?;

    let point_style = cfg.point_color.filled();
    chart
        .draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, cfg.point_size, point_style)),
        )?
        .label("data")
        .legend(move |(x, y)| Circle::new((x + 10, y), 4, point_style));

    let line_color = if is_best {
        cfg.best_line_color
    } else {
        cfg.line_color
    };
    chart
        .draw_series(LineSeries::new(
            line,
            line_color.stroke_width(cfg.line_width),
        ))?
        .label(format!("fit (k = {:.4e})", order_fit.rate_constant()))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_color));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn bounds<I: Iterator<Item = f64>>(vals: I) -> (f64, f64) {
    vals.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), val| {
        (lo.min(val), hi.max(val))
    })
}

/// Axis range with a 10% margin on each side.
fn padded(lo: f64, hi: f64) -> std::ops::Range<f64> {
    let span = hi - lo;
    let margin = if span > 0.0 {
        0.1 * span
    } else {
        0.1 * lo.abs().max(1.0)
    };
    (lo - margin)..(hi + margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analyzer;
    use std::fs;

    #[test]
    fn padded_ranges() {
        assert_eq!(padded(0.0, 10.0), -1.0..11.0);
        assert_eq!(padded(0.0, 0.0), -0.1..0.1);
        assert_eq!(bounds([3.0, -1.0, 2.0].into_iter()), (-1.0, 3.0));
    }

    #[test]
    fn writes_one_chart_per_order() {
        let time = vec![0.0, 5.0, 10.0, 15.0, 20.0];
        let absorbance = vec![0.90, 0.71, 0.55, 0.43, 0.33];
        let table = Table::new(time, absorbance).unwrap();
        let report = Analyzer::new(&table).analyze().unwrap();

        let dir = std::env::temp_dir().join(format!("kinorder-plot-all-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let files = plot_all(&dir, &table, &report, &PlotConfig::default()).unwrap();

        assert_eq!(files.len(), 3);
        for (i_file, file) in files.iter().enumerate() {
            assert!(file.ends_with(plot_file_name(i_file)));
            let svg = fs::read_to_string(file).unwrap();
            assert!(svg.contains("<svg"));
        }
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn highlights_only_the_best_order() {
        let table = Table::new(vec![0.0, 1.0, 2.0, 3.0], vec![1.0, 0.8, 0.6, 0.4]).unwrap();
        let report = Analyzer::new(&table).analyze().unwrap();
        let cfg = PlotConfig::default();

        let dir = std::env::temp_dir().join(format!("kinorder-plot-best-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let best_file = dir.join("best.svg");
        let other_file = dir.join("other.svg");
        plot_order(&best_file, &table, report.best_fit(), true, &cfg).unwrap();
        plot_order(&other_file, &table, report.best_fit(), false, &cfg).unwrap();

        let best_svg = fs::read_to_string(&best_file).unwrap().to_uppercase();
        let other_svg = fs::read_to_string(&other_file).unwrap().to_uppercase();
        assert!(best_svg.contains("#FF0000"));
        assert!(!other_svg.contains("#FF0000"));
        assert!(other_svg.contains("#808080"));
        fs::remove_dir_all(&dir).ok();
    }
}
