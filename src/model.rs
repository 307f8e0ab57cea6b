//! Classifier adapter over a pre-fitted logistic model
//!
//! Binary classification over scaled feature rows: `predict` yields the
//! {0, 1} label and `predict_proba` the `[p0, p1]` pair with p0 + p1 == 1
//! per row. The coefficients are a fitted artifact; this module never
//! trains and only ever sees scaled input — the API layer has no path that
//! skips the scaler.

use serde::{Deserialize, Serialize};

use crate::error::{PrediksiError, Result};
use crate::schema::FEATURE_COUNT;

/// Pre-fitted binary logistic classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    /// Per-column coefficients, in schema order
    pub coefficients: Vec<f64>,
    /// Bias term
    pub intercept: f64,
}

impl LogisticModel {
    /// Construct from fitted parameters, checking cardinality once at load
    /// time.
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self> {
        if coefficients.len() != FEATURE_COUNT {
            return Err(PrediksiError::ArtifactError {
                reason: format!(
                    "model expects {} coefficients, got {}",
                    FEATURE_COUNT,
                    coefficients.len()
                ),
            });
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(PrediksiError::ArtifactError {
                reason: "model coefficients must be finite".to_string(),
            });
        }
        Ok(Self {
            coefficients,
            intercept,
        })
    }

    fn score(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.coefficients.len() {
            return Err(PrediksiError::InvalidShape {
                reason: format!(
                    "model fitted on {} columns, row has {}",
                    self.coefficients.len(),
                    row.len()
                ),
            });
        }
        Ok(self
            .coefficients
            .iter()
            .zip(row.iter())
            .map(|(c, x)| c * x)
            .sum::<f64>()
            + self.intercept)
    }

    /// Class labels for a batch of scaled rows, order-preserving.
    ///
    /// Label is 1 iff the positive-class probability is >= 0.5.
    pub fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<u8>> {
        rows.iter()
            .map(|row| Ok(u8::from(sigmoid(self.score(row)?) >= 0.5)))
            .collect()
    }

    /// `[p0, p1]` probability pairs for a batch of scaled rows
    pub fn predict_proba(&self, rows: &[Vec<f64>]) -> Result<Vec<[f64; 2]>> {
        rows.iter()
            .map(|row| {
                let p1 = sigmoid(self.score(row)?);
                Ok([1.0 - p1, p1])
            })
            .collect()
    }

    /// Built-in demo classifier for `serve --demo`.
    ///
    /// Paired with [`crate::scaler::StandardScaler::demo`]: risk-increasing
    /// columns carry positive weight, protective columns negative, so the
    /// low-risk sample patient scores -8 and the high-risk one +8.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            coefficients: vec![
                0.25, -0.25, -0.25, -0.25, -0.25, 0.25, 0.25, -0.25, -0.25, -0.25, 0.25, 0.25,
                0.25, 0.25, 0.25, 0.25, 0.25, 0.25, 0.25, 0.25, -0.25, 0.25, -0.25, -0.25,
                0.25, 0.25, 0.25, 0.25, 0.25, 0.25, 0.25, 0.25,
            ],
            intercept: 0.0,
        }
    }
}

/// Numerically stable logistic function
fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}
