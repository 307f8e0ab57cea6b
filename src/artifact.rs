//! Fitted artifact loading
//!
//! The scaler and classifier arrive as JSON artifact files exported by the
//! training pipeline. Each artifact carries a `kind` tag and a format
//! `version` that are validated before the payload is trusted; an optional
//! `feature_names` list, when present, must match the schema exactly — it
//! guards against serving artifacts fitted on a different column order.
//!
//! Artifacts are read once at startup with a scoped `std::fs::read`; after
//! deserialization only immutable memory is shared with request handlers.

use std::path::Path;

use serde::Deserialize;

use crate::error::{PrediksiError, Result};
use crate::model::LogisticModel;
use crate::scaler::StandardScaler;
use crate::schema::FEATURE_NAMES;

/// Supported artifact format version
pub const ARTIFACT_VERSION: u32 = 1;

/// Kind tag for scaler artifacts
pub const SCALER_KIND: &str = "standard_scaler";

/// Kind tag for classifier artifacts
pub const MODEL_KIND: &str = "logistic_model";

#[derive(Debug, Deserialize)]
struct ScalerArtifact {
    kind: String,
    version: u32,
    mean: Vec<f64>,
    scale: Vec<f64>,
    #[serde(default)]
    feature_names: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ModelArtifact {
    kind: String,
    version: u32,
    coefficients: Vec<f64>,
    intercept: f64,
    #[serde(default)]
    feature_names: Option<Vec<String>>,
}

fn check_header(
    path: &Path,
    kind: &str,
    expected_kind: &str,
    version: u32,
    feature_names: Option<&[String]>,
) -> Result<()> {
    if kind != expected_kind {
        return Err(PrediksiError::ArtifactError {
            reason: format!(
                "{}: expected kind '{expected_kind}', got '{kind}'",
                path.display()
            ),
        });
    }
    if version != ARTIFACT_VERSION {
        return Err(PrediksiError::ArtifactError {
            reason: format!(
                "{}: unsupported artifact version {version} (expected {ARTIFACT_VERSION})",
                path.display()
            ),
        });
    }
    if let Some(names) = feature_names {
        if names.len() != FEATURE_NAMES.len()
            || names.iter().zip(FEATURE_NAMES.iter()).any(|(a, b)| a != b)
        {
            return Err(PrediksiError::ArtifactError {
                reason: format!(
                    "{}: feature_names do not match the fitted schema order",
                    path.display()
                ),
            });
        }
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path).map_err(|e| PrediksiError::ArtifactError {
        reason: format!("failed to read {}: {e}", path.display()),
    })?;
    serde_json::from_slice(&bytes).map_err(|e| PrediksiError::ArtifactError {
        reason: format!("failed to parse {}: {e}", path.display()),
    })
}

/// Load a fitted scaler from a JSON artifact file
pub fn load_scaler(path: &Path) -> Result<StandardScaler> {
    let artifact: ScalerArtifact = read_json(path)?;
    check_header(
        path,
        &artifact.kind,
        SCALER_KIND,
        artifact.version,
        artifact.feature_names.as_deref(),
    )?;
    StandardScaler::new(artifact.mean, artifact.scale)
}

/// Load a fitted classifier from a JSON artifact file
pub fn load_model(path: &Path) -> Result<LogisticModel> {
    let artifact: ModelArtifact = read_json(path)?;
    check_header(
        path,
        &artifact.kind,
        MODEL_KIND,
        artifact.version,
        artifact.feature_names.as_deref(),
    )?;
    LogisticModel::new(artifact.coefficients, artifact.intercept)
}
