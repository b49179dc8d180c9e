//! Gauge position mapping and marker animation
//!
//! The gauge is a fixed 0-40 BMI bar split into the four category bands.
//! Everything here is a pure function of the BMI value or of elapsed time.

use crate::classifier::{NORMAL_MIN, OBESE_MIN, OVERWEIGHT_MIN};
use crate::models::Category;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper end of the gauge scale
pub const GAUGE_MAX_BMI: f64 = 40.0;
/// Lower end of the gauge scale
pub const GAUGE_MIN_BMI: f64 = 0.0;

/// Default marker animation length
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(700);

/// Scale legend printed under the bar
pub const SCALE_LEGEND: &str = "0 18.5 25 30 40+";

/// A colored band of the gauge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaugeSegment {
    pub category: Category,
    /// Width of the band in BMI units
    pub span: f64,
}

/// The four bands, left to right, spanning 0-40
pub const GAUGE_SEGMENTS: [GaugeSegment; 4] = [
    GaugeSegment { category: Category::Underweight, span: NORMAL_MIN },
    GaugeSegment { category: Category::Normal, span: OVERWEIGHT_MIN - NORMAL_MIN },
    GaugeSegment { category: Category::Overweight, span: OBESE_MIN - OVERWEIGHT_MIN },
    GaugeSegment { category: Category::Obese, span: GAUGE_MAX_BMI - OBESE_MIN },
];

/// Map a BMI to a 0-100 marker position
///
/// Values are clamped to the 0-40 scale first. NaN maps to 0.
pub fn gauge_position(bmi: f64) -> f64 {
    if bmi.is_nan() {
        return 0.0;
    }
    let clamped = bmi.clamp(GAUGE_MIN_BMI, GAUGE_MAX_BMI);
    (clamped - GAUGE_MIN_BMI) / (GAUGE_MAX_BMI - GAUGE_MIN_BMI) * 100.0
}

/// One character cell of a rendered gauge bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeCell {
    Band(Category),
    Marker,
}

/// Lay out a bar of `width` cells with the marker at `position` (0-100)
pub fn bar_cells(position: f64, width: usize) -> Vec<GaugeCell> {
    if width == 0 {
        return Vec::new();
    }

    let position = if position.is_nan() { 0.0 } else { position.clamp(0.0, 100.0) };
    let marker = ((position / 100.0) * (width - 1) as f64).round() as usize;

    (0..width)
        .map(|i| {
            if i == marker {
                return GaugeCell::Marker;
            }
            // Centre of the cell on the BMI scale
            let bmi = (i as f64 + 0.5) / width as f64 * GAUGE_MAX_BMI;
            GaugeCell::Band(band_at(bmi))
        })
        .collect()
}

/// Plain-text bar: band letters with a `|` marker
pub fn render_plain(position: f64, width: usize) -> String {
    bar_cells(position, width)
        .into_iter()
        .map(|cell| match cell {
            GaugeCell::Marker => '|',
            GaugeCell::Band(Category::Underweight) => 'u',
            GaugeCell::Band(Category::Normal) => 'n',
            GaugeCell::Band(Category::Overweight) => 'o',
            GaugeCell::Band(Category::Obese) => 'O',
        })
        .collect()
}

fn band_at(bmi: f64) -> Category {
    let mut start = GAUGE_MIN_BMI;
    for segment in GAUGE_SEGMENTS {
        if bmi < start + segment.span {
            return segment.category;
        }
        start += segment.span;
    }
    Category::Obese
}

/// Marker movement between two gauge positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeTransition {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
}

impl GaugeTransition {
    pub fn new(from: f64, to: f64) -> Self {
        Self::with_duration(from, to, DEFAULT_TRANSITION)
    }

    pub fn with_duration(from: f64, to: f64, duration: Duration) -> Self {
        GaugeTransition { from, to, duration }
    }

    /// Marker position after `elapsed`, eased in and out
    pub fn position_at(&self, elapsed: Duration) -> f64 {
        let progress = self.progress(elapsed);
        self.from + (self.to - self.from) * ease_in_out(progress)
    }

    /// Linear progress in [0, 1]
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    /// Evenly spaced frames, first at `from` and last at `to`
    pub fn frames(&self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![self.to],
            _ => (0..count)
                .map(|i| {
                    let elapsed = self.duration.mul_f64(i as f64 / (count - 1) as f64);
                    self.position_at(elapsed)
                })
                .collect(),
        }
    }
}

/// Cubic ease-in-out
fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
