//! Fixed clinical feature schema
//!
//! The 32-field order below is a strict contract with the fitted artifacts:
//! the scaler's column statistics and the classifier's coefficients were
//! fitted on exactly this layout. It is a compile-time constant and is never
//! inferred from map iteration order.

use serde_json::{Map, Value};

/// Ordered feature names required for every prediction request
pub const FEATURE_NAMES: [&str; 32] = [
    "Age",
    "Gender",
    "Ethnicity",
    "EducationLevel",
    "BMI",
    "Smoking",
    "AlcoholConsumption",
    "PhysicalActivity",
    "DietQuality",
    "SleepQuality",
    "FamilyHistoryAlzheimers",
    "CardiovascularDisease",
    "Diabetes",
    "Depression",
    "HeadInjury",
    "Hypertension",
    "SystolicBP",
    "DiastolicBP",
    "CholesterolTotal",
    "CholesterolLDL",
    "CholesterolHDL",
    "CholesterolTriglycerides",
    "MMSE",
    "FunctionalAssessment",
    "MemoryComplaints",
    "BehavioralProblems",
    "ADL",
    "Confusion",
    "Disorientation",
    "PersonalityChanges",
    "DifficultyCompletingTasks",
    "Forgetfulness",
];

/// Number of features in the schema
pub const FEATURE_COUNT: usize = FEATURE_NAMES.len();

/// Schema field names absent from `record`, in schema order.
///
/// Presence check only; extra keys are ignored and value coercion happens
/// in [`crate::features::build_vector`].
#[must_use]
pub fn missing_fields(record: &Map<String, Value>) -> Vec<String> {
    FEATURE_NAMES
        .iter()
        .filter(|name| !record.contains_key(**name))
        .map(|name| (*name).to_string())
        .collect()
}

/// Full schema as owned strings, for the `required_fields` error payload
#[must_use]
pub fn required_fields() -> Vec<String> {
    FEATURE_NAMES.iter().map(|n| (*n).to_string()).collect()
}
