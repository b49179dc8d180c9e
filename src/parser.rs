//! Raw text input to validated measurements
//!
//! Heights above [`CENTIMETER_THRESHOLD`] are taken to be centimeters and
//! converted to meters. There is no unit selector; the threshold is the only
//! unit detection.

use crate::error::ParseError;
use crate::models::Measurement;
use tracing::debug;

/// Heights strictly greater than this are read as centimeters
pub const CENTIMETER_THRESHOLD: f64 = 3.0;

/// Parse weight and height text into a [`Measurement`]
///
/// Both fields are checked for blanks before either is parsed, so a blank
/// field always wins over an unparseable one. Zero and negative values are
/// accepted.
pub fn parse_measurement(weight_text: &str, height_text: &str) -> Result<Measurement, ParseError> {
    let weight_text = weight_text.trim();
    let height_text = height_text.trim();

    if weight_text.is_empty() || height_text.is_empty() {
        return Err(ParseError::MissingInput);
    }

    let weight_kg = parse_number("weight", weight_text)?;
    let height = parse_number("height", height_text)?;

    let height_m = normalize_height(height);
    if height_m != height {
        debug!(raw = height, meters = height_m, "height read as centimeters");
    }

    Ok(Measurement::new(weight_kg, height_m))
}

/// Convert a height to meters using the centimeter heuristic
pub fn normalize_height(height: f64) -> f64 {
    if height > CENTIMETER_THRESHOLD {
        height / 100.0
    } else {
        height
    }
}

fn parse_number(field: &str, text: &str) -> Result<f64, ParseError> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ParseError::InvalidNumber {
            field: field.to_string(),
            value: text.to_string(),
        }),
    }
}
