//! Property-based tests for the BMI engine

use bmirs::gauge::GaugeTransition;
use bmirs::{classify, compute_bmi, format_bmi, gauge_position, parse_measurement, Category, Measurement, SexAdjustment};
use proptest::prelude::*;
use std::time::Duration;

proptest! {
    #[test]
    fn test_gauge_position_is_monotonic_and_bounded(a in -100.0f64..200.0, b in -100.0f64..200.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let p_lo = gauge_position(lo);
        let p_hi = gauge_position(hi);

        prop_assert!(p_lo <= p_hi);
        prop_assert!((0.0..=100.0).contains(&p_lo));
        prop_assert!((0.0..=100.0).contains(&p_hi));
    }

    #[test]
    fn test_sex_adjustment_shift_holds(weight in 20.0f64..250.0, height in 1.0f64..2.5) {
        let m = Measurement::new(weight, height);
        let none = compute_bmi(&m, SexAdjustment::None);

        prop_assert!((compute_bmi(&m, SexAdjustment::Male) - none - 0.5).abs() < 1e-9);
        prop_assert!((none - compute_bmi(&m, SexAdjustment::Female) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_centimeter_entry_matches_meters(weight in 20u32..250, height_cm in 100u32..250) {
        let from_cm = parse_measurement(&weight.to_string(), &height_cm.to_string()).unwrap();
        let from_m = Measurement::new(weight as f64, height_cm as f64 / 100.0);

        let a = compute_bmi(&from_cm, SexAdjustment::None);
        let b = compute_bmi(&from_m, SexAdjustment::None);
        prop_assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_classification_is_ordered(a in 0.0f64..80.0, b in 0.0f64..80.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(classify(lo) <= classify(hi));
    }

    #[test]
    fn test_formatted_bmi_has_two_decimals(bmi in 0.0f64..100.0) {
        let text = format_bmi(bmi);
        let decimals = text.split('.').nth(1).map(str::len);

        prop_assert_eq!(decimals, Some(2));
        prop_assert!((text.parse::<f64>().unwrap() - bmi).abs() <= 0.005 + 1e-9);
    }

    #[test]
    fn test_transition_stays_between_endpoints(from in 0.0f64..100.0, to in 0.0f64..100.0, ms in 0u64..2000) {
        let transition = GaugeTransition::new(from, to);
        let position = transition.position_at(Duration::from_millis(ms));
        let (lo, hi) = if from <= to { (from, to) } else { (to, from) };

        prop_assert!(position >= lo - 1e-9 && position <= hi + 1e-9);
    }
}

#[test]
fn test_non_finite_bmi_is_obese() {
    assert_eq!(classify(f64::NAN), Category::Obese);
    assert_eq!(classify(f64::INFINITY), Category::Obese);
}
