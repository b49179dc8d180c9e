use bmirs::export::{DateRange, ExportFormat, ExportManager};
use bmirs::{
    classify, compute_bmi, evaluate, gauge_position, parse_measurement, Category, Measurement,
    ParseError, ResultView, Session, SexAdjustment,
};
use tempfile::tempdir;

/// Integration tests that run the full chain the way the shell does

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_centimeter_and_meter_entry_agree() {
        let from_cm = parse_measurement("70", "175").unwrap();
        let from_m = Measurement::new(70.0, 1.75);

        let a = compute_bmi(&from_cm, SexAdjustment::None);
        let b = compute_bmi(&from_m, SexAdjustment::None);

        assert!((a - b).abs() < 1e-9);
        assert!((a - 22.86).abs() < 0.005);
    }

    #[test]
    fn test_sex_adjustment_is_half_point() {
        for (weight, height) in [("45", "150"), ("70", "1.75"), ("130", "190")] {
            let m = parse_measurement(weight, height).unwrap();
            let none = compute_bmi(&m, SexAdjustment::None);
            assert!((compute_bmi(&m, SexAdjustment::Male) - none - 0.5).abs() < 1e-9);
            assert!((none - compute_bmi(&m, SexAdjustment::Female) - 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(classify(18.5), Category::Normal);
        assert_eq!(classify(18.49), Category::Underweight);
        assert_eq!(classify(25.0), Category::Overweight);
        assert_eq!(classify(29.99), Category::Overweight);
        assert_eq!(classify(30.0), Category::Obese);
    }

    #[test]
    fn test_gauge_clamping() {
        assert_eq!(gauge_position(-5.0), 0.0);
        assert_eq!(gauge_position(0.0), 0.0);
        assert_eq!(gauge_position(40.0), 100.0);
        assert_eq!(gauge_position(100.0), 100.0);
    }

    #[test]
    fn test_parser_errors() {
        assert_eq!(parse_measurement("", "170"), Err(ParseError::MissingInput));
        assert_eq!(parse_measurement("70", ""), Err(ParseError::MissingInput));
        assert!(matches!(
            parse_measurement("abc", "170"),
            Err(ParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_scenario_centimeters_no_adjustment() {
        let outcome = evaluate("70", "175", SexAdjustment::None).unwrap();
        assert_eq!(outcome.bmi_display, "22.86");
        assert_eq!(outcome.category, Category::Normal);
        assert!((outcome.gauge_position - 57.14).abs() < 0.01);
    }

    #[test]
    fn test_scenario_meters_female() {
        let outcome = evaluate("50", "1.60", SexAdjustment::Female).unwrap();
        assert_eq!(outcome.bmi_display, "19.03");
        assert_eq!(outcome.category, Category::Normal);
    }

    #[test]
    fn test_history_is_append_only_and_ordered() {
        let mut session = Session::new();
        let inputs = [
            ("70", "175", SexAdjustment::None),
            ("", "175", SexAdjustment::None),
            ("50", "1.60", SexAdjustment::Female),
            ("abc", "1.60", SexAdjustment::Male),
            ("95", "180", SexAdjustment::Male),
        ];

        let mut expected = Vec::new();
        for (weight, height, sex) in inputs {
            if let Ok((record, _)) = session.submit(weight, height, sex) {
                expected.push(record.bmi.clone());
            }
        }

        let history = session.history();
        assert_eq!(history.len(), 3);
        let stored: Vec<String> = history.iter().map(|r| r.bmi.clone()).collect();
        assert_eq!(stored, expected);
        assert_eq!(stored, vec!["22.86", "19.03", "29.82"]);

        // The final success cleared the earlier validation message
        assert!(matches!(session.view(), ResultView::Result(_)));
    }

    #[test]
    fn test_failure_keeps_previous_result() {
        let mut session = Session::new();
        session.submit("70", "175", SexAdjustment::None).unwrap();
        assert!(session.submit("70", "", SexAdjustment::None).is_err());

        assert_eq!(session.view(), ResultView::Error("Enter both values."));
        assert_eq!(session.last_outcome().unwrap().bmi_display, "22.86");
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_zero_height_is_accepted_and_obese() {
        let mut session = Session::new();
        let (record, transition) = session.submit("70", "0", SexAdjustment::None).unwrap();
        assert_eq!(record.bmi, "Infinity");
        assert_eq!(record.category, Category::Obese);
        assert_eq!(transition.to, 100.0);
    }

    #[test]
    fn test_session_export_round_trip() {
        let mut session = Session::new();
        session.submit("70", "175", SexAdjustment::None).unwrap();
        session.submit("50", "1.60", SexAdjustment::Female).unwrap();

        let dir = tempdir().unwrap();
        let manager = ExportManager::with_date_range(DateRange::default());

        let csv_path = dir.path().join("history.csv");
        assert_eq!(manager.export(session.history(), ExportFormat::Csv, &csv_path).unwrap(), 2);
        let csv = std::fs::read_to_string(&csv_path).unwrap();
        let rows: Vec<&str> = csv.lines().skip(1).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains(",22.86,Normal"));
        assert!(rows[1].contains(",female,19.03,Normal"));

        let json_path = dir.path().join("history.json");
        manager.export(session.history(), ExportFormat::Json, &json_path).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["bmi"], "22.86");
        assert_eq!(entries[1]["sex"], "female");
    }
}
