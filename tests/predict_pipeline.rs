//! Integration tests for the full prediction pipeline
//!
//! Exercises the library surface end to end — fixtures → vector builder →
//! scaler → classifier — plus property tests for coercion totality and the
//! probability invariant.

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use prediksi::features::{build_batch, build_vector, coerce_field};
use prediksi::fixtures::sample_patients;
use prediksi::model::LogisticModel;
use prediksi::scaler::StandardScaler;
use prediksi::schema::{missing_fields, FEATURE_COUNT, FEATURE_NAMES};

fn demo_pipeline(records: &[Map<String, Value>]) -> (Vec<u8>, Vec<[f64; 2]>) {
    let scaler = StandardScaler::demo();
    let model = LogisticModel::demo();
    let rows = build_batch(records).expect("fixtures build");
    let scaled = scaler.transform(&rows).expect("transform");
    let labels = model.predict(&scaled).expect("predict");
    let proba = model.predict_proba(&scaled).expect("proba");
    (labels, proba)
}

// ============================================================================
// Full pipeline over the fixtures
// ============================================================================

#[test]
fn test_fixture_pipeline_order_preserved() {
    let patients = sample_patients();
    let records: Vec<_> = patients.iter().map(|p| p.record.clone()).collect();
    let (labels, proba) = demo_pipeline(&records);

    assert_eq!(labels.len(), 2);
    assert_eq!(proba.len(), 2);
    // Low risk first, high risk second — the demo artifacts separate them.
    assert_eq!(labels[0], 0);
    assert_eq!(labels[1], 1);
    assert!(proba[0][0] > proba[0][1]);
    assert!(proba[1][1] > proba[1][0]);
}

#[test]
fn test_fixture_pipeline_deterministic() {
    let patients = sample_patients();
    let records: Vec<_> = patients.iter().map(|p| p.record.clone()).collect();

    let (labels_a, proba_a) = demo_pipeline(&records);
    let (labels_b, proba_b) = demo_pipeline(&records);
    assert_eq!(labels_a, labels_b);
    assert_eq!(proba_a, proba_b);
}

#[test]
fn test_single_and_batch_paths_agree() {
    let record = sample_patients()[0].record.clone();

    let single_row = build_vector(&record).expect("build");
    let batch_rows = build_batch(std::slice::from_ref(&record)).expect("build");
    assert_eq!(batch_rows, vec![single_row]);
}

#[test]
fn test_fixture_records_pass_validation() {
    for patient in sample_patients() {
        assert!(missing_fields(&patient.record).is_empty());
    }
}

#[test]
fn test_scaled_fixtures_have_unit_magnitude() {
    // The demo scaler centers the two profiles at the column midpoints, so
    // every scaled entry is exactly +/-1.
    let patients = sample_patients();
    let records: Vec<_> = patients.iter().map(|p| p.record.clone()).collect();
    let rows = build_batch(&records).expect("build");
    let scaled = StandardScaler::demo().transform(&rows).expect("transform");

    for row in &scaled {
        assert_eq!(row.len(), FEATURE_COUNT);
        for x in row {
            assert!((x.abs() - 1.0).abs() < 1e-9, "scaled entry {x}");
        }
    }
}

// ============================================================================
// Property tests
// ============================================================================

/// JSON scalars of every kind the API can receive for a field
fn arb_json_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<f64>().prop_map(|f| json!(f)),
        any::<i64>().prop_map(|i| json!(i)),
        any::<bool>().prop_map(Value::Bool),
        ".*".prop_map(Value::String),
        Just(Value::Null),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_coercion_is_total(value in arb_json_scalar()) {
        // Every scalar either coerces to a finite float or errors; no
        // panic, no NaN/inf leaking through.
        if let Ok(v) = coerce_field("Age", &value) {
            prop_assert!(v.is_finite());
        }
    }

    #[test]
    fn prop_numeric_strings_coerce(x in -1.0e12_f64..1.0e12) {
        let rendered = format!("{x}");
        let coerced = coerce_field("Age", &Value::String(rendered)).unwrap();
        prop_assert!((coerced - x).abs() <= x.abs() * 1e-12);
    }

    #[test]
    fn prop_probability_pair_sums_to_one(
        row in prop::collection::vec(-100.0_f64..100.0, FEATURE_COUNT)
    ) {
        let model = LogisticModel::demo();
        let proba = model.predict_proba(&[row]).unwrap();
        let [p0, p1] = proba[0];
        prop_assert!((p0 + p1 - 1.0).abs() < 1e-9);
        prop_assert!((0.0..=1.0).contains(&p0));
        prop_assert!((0.0..=1.0).contains(&p1));
    }

    #[test]
    fn prop_label_matches_probability(
        row in prop::collection::vec(-100.0_f64..100.0, FEATURE_COUNT)
    ) {
        let model = LogisticModel::demo();
        let labels = model.predict(std::slice::from_ref(&row)).unwrap();
        let proba = model.predict_proba(&[row]).unwrap();
        prop_assert_eq!(labels[0], u8::from(proba[0][1] >= 0.5));
    }

    #[test]
    fn prop_transform_preserves_count(
        rows in prop::collection::vec(
            prop::collection::vec(-1.0e6_f64..1.0e6, FEATURE_COUNT),
            0..8,
        )
    ) {
        let scaled = StandardScaler::demo().transform(&rows).unwrap();
        prop_assert_eq!(scaled.len(), rows.len());
        for row in &scaled {
            prop_assert_eq!(row.len(), FEATURE_COUNT);
        }
    }

    #[test]
    fn prop_missing_fields_subset_of_schema(
        keep in prop::collection::vec(any::<bool>(), FEATURE_COUNT)
    ) {
        let record: Map<String, Value> = FEATURE_NAMES
            .iter()
            .zip(keep.iter())
            .filter(|(_, k)| **k)
            .map(|(n, _)| ((*n).to_string(), json!(1.0)))
            .collect();

        let missing = missing_fields(&record);
        let dropped = keep.iter().filter(|k| !**k).count();
        prop_assert_eq!(missing.len(), dropped);
        for name in &missing {
            prop_assert!(FEATURE_NAMES.contains(&name.as_str()));
            prop_assert!(!record.contains_key(name));
        }
    }
}
