//! Error types for the prediction pipeline
//!
//! The taxonomy separates client-input errors (missing fields, values that
//! cannot be coerced to finite numbers) from operational faults (artifacts
//! not loaded) and internal faults (shape mismatches). The API layer maps
//! the first group to 400 and the rest to 500; see `api::error_response`.

use thiserror::Error;

/// Errors produced by the inference pipeline
#[derive(Debug, Error)]
pub enum PrediksiError {
    /// One or more schema fields are absent from the request record
    #[error("Missing required fields: {missing:?}")]
    MissingFields {
        /// Schema field names absent from the record, in schema order
        missing: Vec<String>,
    },

    /// A field value could not be coerced to a finite float
    #[error("could not convert value {value} for field '{field}' to float")]
    InvalidFieldValue {
        /// Name of the offending field
        field: String,
        /// Raw value as received, rendered for the error message
        value: String,
    },

    /// Row width does not match what the artifact was fitted on
    #[error("Invalid shape: {reason}")]
    InvalidShape {
        /// Description of the mismatch
        reason: String,
    },

    /// A required artifact failed to load at startup
    #[error("{component} not loaded")]
    ServiceUnavailable {
        /// Which capability is missing ("model" or "scaler")
        component: String,
    },

    /// Artifact file could not be read or deserialized
    #[error("Artifact error: {reason}")]
    ArtifactError {
        /// Description of the load failure
        reason: String,
    },
}

impl PrediksiError {
    /// Whether this error stems entirely from request content.
    ///
    /// Client errors map to HTTP 400; everything else is a server fault.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFields { .. } | Self::InvalidFieldValue { .. }
        )
    }
}

/// Result type alias using [`PrediksiError`]
pub type Result<T> = std::result::Result<T, PrediksiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_display() {
        let err = PrediksiError::MissingFields {
            missing: vec!["Age".to_string(), "BMI".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("Age"));
        assert!(msg.contains("BMI"));
    }

    #[test]
    fn test_invalid_field_value_display() {
        let err = PrediksiError::InvalidFieldValue {
            field: "Age".to_string(),
            value: "\"abc\"".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "could not convert value \"abc\" for field 'Age' to float"
        );
    }

    #[test]
    fn test_client_error_classification() {
        assert!(PrediksiError::MissingFields { missing: vec![] }.is_client_error());
        assert!(PrediksiError::InvalidFieldValue {
            field: "MMSE".to_string(),
            value: "null".to_string(),
        }
        .is_client_error());
        assert!(!PrediksiError::ServiceUnavailable {
            component: "model".to_string(),
        }
        .is_client_error());
        assert!(!PrediksiError::InvalidShape {
            reason: "expected 32 columns".to_string(),
        }
        .is_client_error());
        assert!(!PrediksiError::ArtifactError {
            reason: "bad kind tag".to_string(),
        }
        .is_client_error());
    }
}
