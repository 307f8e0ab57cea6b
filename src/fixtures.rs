//! Canonical sample patients for the demo prediction endpoint
//!
//! Two hardcoded records covering the clinical extremes: a healthy low-risk
//! profile and a high-risk profile. These are trusted constants — they skip
//! the request validator but flow through the same build → scale → classify
//! → shape pipeline as user requests. Never mixed with user-submitted data.

use serde_json::{json, Map, Value};

/// A fixed sample patient: descriptive profile tag plus a complete record
#[derive(Debug, Clone)]
pub struct SamplePatient {
    /// Descriptive profile label, fixed per fixture (not derived from data)
    pub profile: &'static str,
    /// Complete 32-field record
    pub record: Map<String, Value>,
}

fn record(pairs: Vec<(&str, Value)>) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// The two canonical sample patients, low-risk first.
///
/// Values are the fitted-schema literals the service has always shipped;
/// order here is the order the sample endpoint reports (patient_id 1, 2).
pub fn sample_patients() -> Vec<SamplePatient> {
    vec![
        SamplePatient {
            profile: "Sehat (Risiko Rendah)",
            record: record(vec![
                ("Age", json!(65)),
                ("Gender", json!(1)),
                ("Ethnicity", json!(2)),
                ("EducationLevel", json!(3)),
                ("BMI", json!(24.5)),
                ("Smoking", json!(0)),
                ("AlcoholConsumption", json!(5.0)),
                ("PhysicalActivity", json!(8.0)),
                ("DietQuality", json!(7.5)),
                ("SleepQuality", json!(8.0)),
                ("FamilyHistoryAlzheimers", json!(0)),
                ("CardiovascularDisease", json!(0)),
                ("Diabetes", json!(0)),
                ("Depression", json!(0)),
                ("HeadInjury", json!(0)),
                ("Hypertension", json!(0)),
                ("SystolicBP", json!(120)),
                ("DiastolicBP", json!(80)),
                ("CholesterolTotal", json!(180.0)),
                ("CholesterolLDL", json!(100.0)),
                ("CholesterolHDL", json!(60.0)),
                ("CholesterolTriglycerides", json!(120.0)),
                ("MMSE", json!(28.0)),
                ("FunctionalAssessment", json!(9.0)),
                ("MemoryComplaints", json!(0)),
                ("BehavioralProblems", json!(0)),
                ("ADL", json!(1.0)),
                ("Confusion", json!(0)),
                ("Disorientation", json!(0)),
                ("PersonalityChanges", json!(0)),
                ("DifficultyCompletingTasks", json!(0)),
                ("Forgetfulness", json!(0)),
            ]),
        },
        SamplePatient {
            profile: "Berisiko Tinggi",
            record: record(vec![
                ("Age", json!(85)),
                ("Gender", json!(0)),
                ("Ethnicity", json!(1)),
                ("EducationLevel", json!(0)),
                ("BMI", json!(19.2)),
                ("Smoking", json!(1)),
                ("AlcoholConsumption", json!(18.5)),
                ("PhysicalActivity", json!(2.0)),
                ("DietQuality", json!(1.2)),
                ("SleepQuality", json!(4.5)),
                ("FamilyHistoryAlzheimers", json!(1)),
                ("CardiovascularDisease", json!(1)),
                ("Diabetes", json!(1)),
                ("Depression", json!(1)),
                ("HeadInjury", json!(1)),
                ("Hypertension", json!(1)),
                ("SystolicBP", json!(165)),
                ("DiastolicBP", json!(95)),
                ("CholesterolTotal", json!(280.0)),
                ("CholesterolLDL", json!(190.0)),
                ("CholesterolHDL", json!(30.0)),
                ("CholesterolTriglycerides", json!(340.0)),
                ("MMSE", json!(5.0)),
                ("FunctionalAssessment", json!(1.5)),
                ("MemoryComplaints", json!(1)),
                ("BehavioralProblems", json!(1)),
                ("ADL", json!(8.5)),
                ("Confusion", json!(1)),
                ("Disorientation", json!(1)),
                ("PersonalityChanges", json!(1)),
                ("DifficultyCompletingTasks", json!(1)),
                ("Forgetfulness", json!(1)),
            ]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::build_batch;
    use crate::schema::missing_fields;

    #[test]
    fn test_two_fixtures_low_risk_first() {
        let patients = sample_patients();
        assert_eq!(patients.len(), 2);
        assert_eq!(patients[0].profile, "Sehat (Risiko Rendah)");
        assert_eq!(patients[1].profile, "Berisiko Tinggi");
    }

    #[test]
    fn test_fixtures_cover_full_schema() {
        for patient in sample_patients() {
            assert!(
                missing_fields(&patient.record).is_empty(),
                "fixture '{}' is missing schema fields",
                patient.profile
            );
        }
    }

    #[test]
    fn test_fixtures_build_into_vectors() {
        let patients = sample_patients();
        let records: Vec<_> = patients.iter().map(|p| p.record.clone()).collect();
        let rows = build_batch(&records).unwrap();
        assert_eq!(rows.len(), 2);
        // Age anchors the row order.
        assert_eq!(rows[0][0], 65.0);
        assert_eq!(rows[1][0], 85.0);
        // MMSE is the strongest clinical separator between the profiles.
        assert_eq!(rows[0][22], 28.0);
        assert_eq!(rows[1][22], 5.0);
    }

    #[test]
    fn test_fixture_values_differ_per_column() {
        let patients = sample_patients();
        let records: Vec<_> = patients.iter().map(|p| p.record.clone()).collect();
        let rows = build_batch(&records).unwrap();
        for (low, high) in rows[0].iter().zip(rows[1].iter()) {
            assert_ne!(low, high);
        }
    }
}
