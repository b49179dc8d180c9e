//! BMI-over-time line chart
//!
//! Draws one point per history record, left to right in history order, with
//! the category thresholds as reference lines. The chart widens with the
//! number of records so labels stay readable.

use super::ExportError;
use crate::classifier::{NORMAL_MIN, OBESE_MIN, OVERWEIGHT_MIN};
use crate::history::ChartPoint;
use crate::models::Category;
use std::path::Path;

/// Chart height in pixels
pub const CHART_HEIGHT: u32 = 220;
/// Minimum chart width in pixels
pub const MIN_CHART_WIDTH: u32 = 400;
/// Horizontal space given to each point
pub const WIDTH_PER_POINT: u32 = 90;

/// Width needed to draw `points` entries
pub fn chart_width(points: usize) -> u32 {
    MIN_CHART_WIDTH.max(points as u32 * WIDTH_PER_POINT)
}

/// Render the series to an SVG file
pub fn render_svg<P: AsRef<Path>>(series: &[ChartPoint], output_path: P) -> Result<(), ExportError> {
    use plotters::prelude::*;

    let points: Vec<(i32, f64)> = series
        .iter()
        .enumerate()
        .filter(|(_, p)| p.bmi.is_finite())
        .map(|(i, p)| (i as i32, p.bmi))
        .collect();

    if points.is_empty() {
        return Err(ExportError::EmptyHistory);
    }

    let width = chart_width(series.len());
    let root = SVGBackend::new(output_path.as_ref(), (width, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| ExportError::ChartError(e.to_string()))?;

    let y_min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min).min(NORMAL_MIN) - 2.0;
    let y_max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max).max(OBESE_MIN) + 2.0;
    let x_max = series.len().max(2) as i32 - 1;

    let mut chart = ChartBuilder::on(&root)
        .margin(16)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(0..x_max, y_min..y_max)
        .map_err(|e| ExportError::ChartError(e.to_string()))?;

    chart
        .configure_mesh()
        .x_labels(series.len().min(12))
        .x_label_formatter(&|x| {
            series
                .get(*x as usize)
                .map(|p| p.label.clone())
                .unwrap_or_default()
        })
        .y_desc("BMI")
        .y_label_formatter(&|y| format!("{:.2}", y))
        .draw()
        .map_err(|e| ExportError::ChartError(e.to_string()))?;

    for (threshold, category) in [
        (NORMAL_MIN, Category::Normal),
        (OVERWEIGHT_MIN, Category::Overweight),
        (OBESE_MIN, Category::Obese),
    ] {
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(0, threshold), (x_max, threshold)],
                ShapeStyle::from(&rgb(category).mix(0.6)).stroke_width(1),
            )))
            .map_err(|e| ExportError::ChartError(e.to_string()))?;
    }

    chart
        .draw_series(LineSeries::new(points.clone(), ShapeStyle::from(&RGBColor(0x25, 0x63, 0xeb)).stroke_width(2)))
        .map_err(|e| ExportError::ChartError(e.to_string()))?;

    chart
        .draw_series(series.iter().enumerate().filter(|(_, p)| p.bmi.is_finite()).map(|(i, p)| {
            Circle::new((i as i32, p.bmi), 5, ShapeStyle::from(&rgb(p.category)).filled())
        }))
        .map_err(|e| ExportError::ChartError(e.to_string()))?;

    root.present().map_err(|e| ExportError::ChartError(e.to_string()))?;

    tracing::info!(points = points.len(), width, path = %output_path.as_ref().display(), "chart written");
    Ok(())
}

fn rgb(category: Category) -> plotters::style::RGBColor {
    let (r, g, b) = category.color_rgb();
    plotters::style::RGBColor(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::evaluate;
    use crate::history::History;
    use crate::models::SexAdjustment;
    use tempfile::tempdir;

    #[test]
    fn test_chart_width_grows_with_points() {
        assert_eq!(chart_width(1), MIN_CHART_WIDTH);
        assert_eq!(chart_width(10), 900);
    }

    #[test]
    fn test_render_svg() {
        let mut history = History::new();
        for weight in ["60", "70", "80"] {
            let outcome = evaluate(weight, "175", SexAdjustment::None).unwrap();
            history.record(weight, "175", SexAdjustment::None, &outcome);
        }

        let dir = tempdir().unwrap();
        let path = dir.path().join("bmi.svg");
        render_svg(&history.chart_series("%d/%m"), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
    }

    #[test]
    fn test_render_empty_series_fails() {
        let dir = tempdir().unwrap();
        let result = render_svg(&[], dir.path().join("empty.svg"));
        assert!(matches!(result, Err(ExportError::EmptyHistory)));
    }
}
