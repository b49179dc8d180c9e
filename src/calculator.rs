//! BMI computation
//!
//! `compute_bmi` is the whole formula: weight over height squared, shifted by
//! the sex adjustment. The ±0.5 offset is cosmetic and applied as-is.
//! [`evaluate`] chains parsing, computation, classification and gauge mapping
//! for one button press.

use crate::classifier::classify;
use crate::error::ParseError;
use crate::gauge::gauge_position;
use crate::models::{BmiOutcome, Measurement, SexAdjustment};
use crate::parser::parse_measurement;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

/// Number of decimal places used for display and storage
pub const DISPLAY_DECIMALS: u32 = 2;

/// Compute BMI for a measurement
///
/// A zero height divides by zero and yields infinity (or NaN for a zero
/// weight); no error is raised.
pub fn compute_bmi(measurement: &Measurement, sex: SexAdjustment) -> f64 {
    let raw = measurement.weight_kg / (measurement.height_m * measurement.height_m);
    raw + sex.offset()
}

/// Format a BMI to two decimal places, rounding half away from zero
pub fn format_bmi(bmi: f64) -> String {
    if bmi.is_nan() {
        return "NaN".to_string();
    }
    if bmi.is_infinite() {
        return if bmi > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    match round_bmi(bmi) {
        Some(rounded) => format!("{:.2}", rounded),
        // Outside Decimal's range; fall back to float formatting
        None => format!("{:.2}", bmi),
    }
}

/// BMI rounded to the display precision, `None` for non-finite or huge values
///
/// Rounds the exact binary value, so a float stored just below a `.xx5` tie
/// rounds down.
pub fn round_bmi(bmi: f64) -> Option<Decimal> {
    Decimal::from_f64_retain(bmi)
        .map(|value| value.round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero))
}

/// Run the full chain for one computation request
pub fn evaluate(
    weight_text: &str,
    height_text: &str,
    sex: SexAdjustment,
) -> Result<BmiOutcome, ParseError> {
    let measurement = parse_measurement(weight_text, height_text)?;
    Ok(outcome_for(&measurement, sex))
}

/// Compute, classify and place a measurement on the gauge
pub fn outcome_for(measurement: &Measurement, sex: SexAdjustment) -> BmiOutcome {
    let bmi = compute_bmi(measurement, sex);
    let category = classify(bmi);
    let position = gauge_position(bmi);

    debug!(
        weight_kg = measurement.weight_kg,
        height_m = measurement.height_m,
        sex = %sex,
        bmi,
        category = %category,
        "computed BMI"
    );

    BmiOutcome {
        bmi,
        bmi_display: format_bmi(bmi),
        category,
        gauge_position: position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::parser::normalize_height;
    use rust_decimal_macros::dec;

    #[test]
    fn test_height_unit_invariance() {
        let from_cm = Measurement::new(70.0, normalize_height(175.0));
        let from_m = Measurement::new(70.0, 1.75);

        let a = compute_bmi(&from_cm, SexAdjustment::None);
        let b = compute_bmi(&from_m, SexAdjustment::None);

        assert!((a - b).abs() < 1e-9);
        assert!((a - 22.86).abs() < 0.01);
    }

    #[test]
    fn test_sex_adjustment_shift() {
        let m = Measurement::new(82.0, 1.81);
        let none = compute_bmi(&m, SexAdjustment::None);
        let male = compute_bmi(&m, SexAdjustment::Male);
        let female = compute_bmi(&m, SexAdjustment::Female);

        assert!((male - none - 0.5).abs() < 1e-9);
        assert!((none - female - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_height_is_infinite() {
        let bmi = compute_bmi(&Measurement::new(70.0, 0.0), SexAdjustment::None);
        assert!(bmi.is_infinite());

        let bmi = compute_bmi(&Measurement::new(0.0, 0.0), SexAdjustment::Male);
        assert!(bmi.is_nan());
    }

    #[test]
    fn test_format_bmi() {
        assert_eq!(format_bmi(22.857142857), "22.86");
        assert_eq!(format_bmi(19.03125), "19.03");
        assert_eq!(format_bmi(25.0), "25.00");
        assert_eq!(format_bmi(-0.5), "-0.50");
        assert_eq!(format_bmi(f64::INFINITY), "Infinity");
        assert_eq!(format_bmi(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_bmi(f64::NAN), "NaN");
    }

    #[test]
    fn test_format_bmi_uses_exact_binary_value() {
        // 80.1 / 4 is stored as 20.02499999999999857...
        let outcome = evaluate("80.1", "2", SexAdjustment::None).unwrap();
        assert_eq!(outcome.bmi_display, "20.02");
        assert_eq!(format_bmi(80.1 / 4.0), "20.02");
        assert_eq!(format_bmi(-80.1 / 4.0), "-20.02");
    }

    #[test]
    fn test_round_bmi() {
        assert_eq!(round_bmi(22.857142857), Some(dec!(22.86)));
        assert_eq!(round_bmi(19.03125), Some(dec!(19.03)));
        assert_eq!(round_bmi(30.0), Some(dec!(30)));
        assert_eq!(round_bmi(f64::NAN), None);
        assert_eq!(round_bmi(f64::INFINITY), None);
    }

    #[test]
    fn test_evaluate_end_to_end() {
        let outcome = evaluate("70", "175", SexAdjustment::None).unwrap();
        assert_eq!(outcome.bmi_display, "22.86");
        assert_eq!(outcome.category, Category::Normal);
        assert!((outcome.gauge_position - 57.14).abs() < 0.01);

        let outcome = evaluate("50", "1.60", SexAdjustment::Female).unwrap();
        assert_eq!(outcome.bmi_display, "19.03");
        assert_eq!(outcome.category, Category::Normal);
    }

    #[test]
    fn test_evaluate_zero_height_classifies_obese() {
        let outcome = evaluate("70", "0", SexAdjustment::None).unwrap();
        assert_eq!(outcome.bmi_display, "Infinity");
        assert_eq!(outcome.category, Category::Obese);
        assert_eq!(outcome.gauge_position, 100.0);
    }

    #[test]
    fn test_evaluate_propagates_parse_errors() {
        assert_eq!(
            evaluate("", "170", SexAdjustment::Male),
            Err(ParseError::MissingInput)
        );
    }
}
