//! Scaling adapter over a pre-fitted standardization transform
//!
//! The scaler is a fitted artifact: per-column means and scales learned at
//! training time. This module only applies `(x - mean) / scale` — it never
//! fits, and it treats the parameters as opaque beyond the column count.

use serde::{Deserialize, Serialize};

use crate::error::{PrediksiError, Result};
use crate::schema::FEATURE_COUNT;

/// Pre-fitted per-column standardization transform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-column means, in schema order
    pub mean: Vec<f64>,
    /// Per-column scales (standard deviations), in schema order
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Construct from fitted parameters, checking cardinality and scale
    /// validity once at load time.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        if mean.len() != FEATURE_COUNT || scale.len() != FEATURE_COUNT {
            return Err(PrediksiError::ArtifactError {
                reason: format!(
                    "scaler expects {} columns, got {} means and {} scales",
                    FEATURE_COUNT,
                    mean.len(),
                    scale.len()
                ),
            });
        }
        if let Some(idx) = scale.iter().position(|s| !s.is_finite() || *s == 0.0) {
            return Err(PrediksiError::ArtifactError {
                reason: format!("scaler scale[{idx}] is zero or non-finite"),
            });
        }
        if let Some(idx) = mean.iter().position(|m| !m.is_finite()) {
            return Err(PrediksiError::ArtifactError {
                reason: format!("scaler mean[{idx}] is non-finite"),
            });
        }
        Ok(Self { mean, scale })
    }

    /// Apply the fitted transform to a batch of rows.
    ///
    /// Row order and row count are preserved 1:1. Errors if any row's width
    /// does not match the fitted column count.
    pub fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        rows.iter()
            .map(|row| {
                if row.len() != self.mean.len() {
                    return Err(PrediksiError::InvalidShape {
                        reason: format!(
                            "scaler fitted on {} columns, row has {}",
                            self.mean.len(),
                            row.len()
                        ),
                    });
                }
                Ok(row
                    .iter()
                    .zip(self.mean.iter().zip(self.scale.iter()))
                    .map(|(x, (m, s))| (x - m) / s)
                    .collect())
            })
            .collect()
    }

    /// Built-in demo transform for `serve --demo`.
    ///
    /// Centered so the two sample patient profiles land at exactly -1 and
    /// +1 per column, which makes demo predictions easy to reason about.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            mean: vec![
                75.0, 0.5, 1.5, 1.5, 21.85, 0.5, 11.75, 5.0, 4.35, 6.25, 0.5, 0.5, 0.5, 0.5,
                0.5, 0.5, 142.5, 87.5, 230.0, 145.0, 45.0, 230.0, 16.5, 5.25, 0.5, 0.5, 4.75,
                0.5, 0.5, 0.5, 0.5, 0.5,
            ],
            scale: vec![
                10.0, 0.5, 0.5, 1.5, 2.65, 0.5, 6.75, 3.0, 3.15, 1.75, 0.5, 0.5, 0.5, 0.5,
                0.5, 0.5, 22.5, 7.5, 50.0, 45.0, 15.0, 110.0, 11.5, 3.75, 0.5, 0.5, 3.75, 0.5,
                0.5, 0.5, 0.5, 0.5,
            ],
        }
    }
}
