//! HTTP API for Alzheimer risk inference
//!
//! Provides the REST surface over the prediction pipeline using axum.
//!
//! ## Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Health check with artifact availability
//! - `POST /predict` - Predict from a JSON record
//! - `GET /predict-sample` - Predict the two built-in sample patients
//! - `GET /metrics` - Prometheus-formatted metrics
//!
//! Every failure is converted to a structured JSON error at the handler
//! boundary: client-input problems (missing fields, bad values, no JSON
//! body) map to 400 with self-correction detail, everything else — including
//! artifacts that failed to load at startup — maps to 500 "Prediction
//! failed". Nothing propagates to the transport as a raw fault.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PrediksiError, Result};
use crate::features::{build_batch, build_vector};
use crate::fixtures::sample_patients;
use crate::metrics::MetricsCollector;
use crate::model::LogisticModel;
use crate::scaler::StandardScaler;
use crate::schema::{missing_fields, required_fields};


/// Application state shared across handlers
///
/// Artifacts are loaded once at startup and never mutated afterwards; the
/// state is cheap to clone and requires no locking. `None` artifacts mean
/// the process started degraded — health reports it and predict endpoints
/// fail deterministically.
#[derive(Clone)]
pub struct AppState {
    /// Fitted scaler, `None` if loading failed at startup
    scaler: Option<Arc<StandardScaler>>,
    /// Fitted classifier, `None` if loading failed at startup
    model: Option<Arc<LogisticModel>>,
    /// Metrics collector for monitoring
    metrics: Arc<MetricsCollector>,
}

impl AppState {
    /// Create state from loaded artifacts
    #[must_use]
    pub fn new(scaler: StandardScaler, model: LogisticModel) -> Self {
        Self {
            scaler: Some(Arc::new(scaler)),
            model: Some(Arc::new(model)),
            metrics: Arc::new(MetricsCollector::new()),
        }
    }

    /// Create state with the built-in demo artifacts
    #[must_use]
    pub fn demo() -> Self {
        Self::new(StandardScaler::demo(), LogisticModel::demo())
    }

    /// Create state with no artifacts (startup load failed).
    ///
    /// The server still runs: health reports the gap and predictions fail
    /// with "Prediction failed" until the operator fixes provisioning.
    #[must_use]
    pub fn degraded() -> Self {
        Self {
            scaler: None,
            model: None,
            metrics: Arc::new(MetricsCollector::new()),
        }
    }

    /// Whether the classifier artifact is available
    #[must_use]
    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Whether the scaler artifact is available
    #[must_use]
    pub fn scaler_loaded(&self) -> bool {
        self.scaler.is_some()
    }
}

// ============================================================================
// Request/response types
// ============================================================================

/// API information response for `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    /// Human-readable API name
    pub message: String,
    /// Crate version
    pub version: String,
    /// Endpoint directory: path -> description
    pub endpoints: BTreeMap<String, String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process is serving
    pub status: String,
    /// Whether the classifier artifact is loaded
    pub model_loaded: bool,
    /// Whether the scaler artifact is loaded
    pub scaler_loaded: bool,
}

/// Class probabilities as percentages rounded to two decimals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbabilityPct {
    /// Negative-class probability in percent
    pub tidak_alzheimer: f64,
    /// Positive-class probability in percent
    pub alzheimer: f64,
}

/// A shaped prediction: diagnosis label plus calibrated probabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// "Alzheimer" for class 1, "Tidak Alzheimer" for class 0
    pub diagnosis: String,
    /// Integer class label (0 or 1)
    pub class: u8,
    /// Both class probabilities as percentages
    pub probability: ProbabilityPct,
}

/// Response for `POST /predict`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Always true on the success path
    pub success: bool,
    /// The shaped prediction
    pub prediction: Prediction,
    /// Echo of the submitted record for client-side traceability
    pub input_data: Map<String, Value>,
}

/// One row of the sample prediction response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplePrediction {
    /// 1-based sequential identifier
    pub patient_id: usize,
    /// Fixed descriptive profile tag from the fixture
    pub patient_profile: String,
    /// "Alzheimer" for class 1, "Tidak Alzheimer" for class 0
    pub diagnosis: String,
    /// Integer class label (0 or 1)
    pub class: u8,
    /// Both class probabilities as percentages
    pub probability: ProbabilityPct,
    /// The fixture record that produced this row
    pub input_data: Map<String, Value>,
}

/// Response for `GET /predict-sample`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplePredictResponse {
    /// Always true on the success path
    pub success: bool,
    /// Number of sample predictions returned
    pub total_samples: usize,
    /// One entry per fixture, in fixture order
    pub predictions: Vec<SamplePrediction>,
}

/// Structured error body shared by all endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable error identifier string
    pub error: String,
    /// Optional human-readable detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Schema fields absent from the request (missing-fields errors only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
    /// Full schema, so callers can self-correct (missing-fields errors only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_fields: Option<Vec<String>>,
}

impl ErrorResponse {
    fn with_message(error: &str, message: String) -> Self {
        Self {
            error: error.to_string(),
            message: Some(message),
            missing_fields: None,
            required_fields: None,
        }
    }
}

// ============================================================================
// Response shaping
// ============================================================================

/// Round a [0, 1] probability to a percentage with two decimals.
///
/// Half-away-from-zero via `f64::round`, used uniformly by the single and
/// batch paths. The two displayed percentages are rounded independently and
/// not re-normalized, so their sum may be 99.99 or 100.01.
fn round_pct(p: f64) -> f64 {
    (p * 100.0 * 100.0).round() / 100.0
}

fn diagnosis_label(class: u8) -> &'static str {
    if class == 1 {
        "Alzheimer"
    } else {
        "Tidak Alzheimer"
    }
}

fn shape_prediction(class: u8, proba: [f64; 2]) -> Prediction {
    Prediction {
        diagnosis: diagnosis_label(class).to_string(),
        class,
        probability: ProbabilityPct {
            tidak_alzheimer: round_pct(proba[0]),
            alzheimer: round_pct(proba[1]),
        },
    }
}

/// Map a pipeline error to the structured HTTP error shape
fn error_response(err: &PrediksiError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        PrediksiError::MissingFields { missing } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Missing required fields".to_string(),
                message: None,
                missing_fields: Some(missing.clone()),
                required_fields: Some(required_fields()),
            }),
        ),
        PrediksiError::InvalidFieldValue { .. } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::with_message(
                "Invalid field value",
                err.to_string(),
            )),
        ),
        PrediksiError::InvalidShape { .. }
        | PrediksiError::ServiceUnavailable { .. }
        | PrediksiError::ArtifactError { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::with_message(
                "Prediction failed",
                err.to_string(),
            )),
        ),
    }
}

fn no_json_response() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::with_message(
            "No JSON data provided",
            "Please send JSON data in request body".to_string(),
        )),
    )
}

// ============================================================================
// Pipeline
// ============================================================================

/// Scale then classify a batch of raw feature rows.
///
/// Scaling always precedes classification; there is no path that hands raw
/// rows to the model. Fails fast when either artifact is unavailable.
fn predict_rows(state: &AppState, rows: &[Vec<f64>]) -> Result<(Vec<u8>, Vec<[f64; 2]>)> {
    let scaler = state
        .scaler
        .as_ref()
        .ok_or_else(|| PrediksiError::ServiceUnavailable {
            component: "scaler".to_string(),
        })?;
    let model = state
        .model
        .as_ref()
        .ok_or_else(|| PrediksiError::ServiceUnavailable {
            component: "model".to_string(),
        })?;

    let scaled = scaler.transform(rows)?;
    let labels = model.predict(&scaled)?;
    let proba = model.predict_proba(&scaled)?;
    Ok((labels, proba))
}

// ============================================================================
// Handlers
// ============================================================================

/// API information handler
async fn info_handler() -> Json<InfoResponse> {
    let endpoints: BTreeMap<String, String> = [
        ("/", "GET - API information"),
        ("/health", "GET - Health check"),
        ("/metrics", "GET - Prometheus metrics"),
        ("/predict", "POST - Predict Alzheimer disease (with JSON body)"),
        ("/predict-sample", "GET - Get prediction using sample data"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    Json(InfoResponse {
        message: "Alzheimer Disease Prediction API".to_string(),
        version: crate::VERSION.to_string(),
        endpoints,
    })
}

/// Health check handler
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: state.model_loaded(),
        scaler_loaded: state.scaler_loaded(),
    })
}

/// Metrics handler - returns Prometheus-formatted metrics
async fn metrics_handler(State(state): State<AppState>) -> String {
    state.metrics.to_prometheus()
}

/// Prediction handler (`POST /predict`)
///
/// Pipeline: presence validation → vector build → scale → classify → shape.
/// The body is taken as a JSON rejection result so malformed or absent
/// bodies surface as the structured "No JSON data provided" 400 rather than
/// axum's default rejection.
async fn predict_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> std::result::Result<Json<PredictResponse>, (StatusCode, Json<ErrorResponse>)> {
    let start = Instant::now();

    // Absent, unparseable, non-object, and empty-object bodies are all
    // "no data" to the caller.
    let record = match body {
        Ok(Json(Value::Object(map))) if !map.is_empty() => map,
        _ => {
            state.metrics.record_failure();
            return Err(no_json_response());
        }
    };

    let result = predict_record(&state, &record);
    match result {
        Ok(prediction) => {
            state.metrics.record_success(start.elapsed());
            Ok(Json(PredictResponse {
                success: true,
                prediction,
                input_data: record,
            }))
        }
        Err(err) => {
            state.metrics.record_failure();
            Err(error_response(&err))
        }
    }
}

fn predict_record(state: &AppState, record: &Map<String, Value>) -> Result<Prediction> {
    let missing = missing_fields(record);
    if !missing.is_empty() {
        return Err(PrediksiError::MissingFields { missing });
    }

    let row = build_vector(record)?;
    let (labels, proba) = predict_rows(state, &[row])?;
    Ok(shape_prediction(labels[0], proba[0]))
}

/// Sample prediction handler (`GET /predict-sample`)
///
/// Runs the two fixture patients through the full pipeline. Fixtures are
/// trusted constants, so every failure here is an internal fault (500);
/// there is no client input to correct.
async fn predict_sample_handler(
    State(state): State<AppState>,
) -> std::result::Result<Json<SamplePredictResponse>, (StatusCode, Json<ErrorResponse>)> {
    let start = Instant::now();

    match predict_samples(&state) {
        Ok(predictions) => {
            state.metrics.record_success(start.elapsed());
            Ok(Json(SamplePredictResponse {
                success: true,
                total_samples: predictions.len(),
                predictions,
            }))
        }
        Err(err) => {
            state.metrics.record_failure();
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_message(
                    "Prediction failed",
                    err.to_string(),
                )),
            ))
        }
    }
}

fn predict_samples(state: &AppState) -> Result<Vec<SamplePrediction>> {
    let patients = sample_patients();
    let records: Vec<Map<String, Value>> = patients.iter().map(|p| p.record.clone()).collect();

    let rows = build_batch(&records)?;
    let (labels, proba) = predict_rows(state, &rows)?;

    Ok(patients
        .into_iter()
        .zip(labels.into_iter().zip(proba))
        .enumerate()
        .map(|(i, (patient, (class, p)))| {
            let shaped = shape_prediction(class, p);
            SamplePrediction {
                patient_id: i + 1,
                patient_profile: patient.profile.to_string(),
                diagnosis: shaped.diagnosis,
                class: shaped.class,
                probability: shaped.probability,
                input_data: patient.record,
            }
        })
        .collect())
}

/// Create the API router
///
/// # Arguments
///
/// * `state` - Application state with the loaded artifacts
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(info_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/predict", post(predict_handler))
        .route("/predict-sample", get(predict_sample_handler))
        .with_state(state)
}

#[cfg(test)]
mod shaping_tests {
    use super::*;

    #[test]
    fn test_round_pct_two_decimals() {
        assert_eq!(round_pct(0.5), 50.0);
        assert_eq!(round_pct(0.123_456), 12.35);
        assert_eq!(round_pct(0.999_66), 99.97);
        assert_eq!(round_pct(0.000_335), 0.03);
    }

    #[test]
    fn test_diagnosis_labels() {
        assert_eq!(diagnosis_label(1), "Alzheimer");
        assert_eq!(diagnosis_label(0), "Tidak Alzheimer");
    }

    #[test]
    fn test_shape_prediction() {
        let shaped = shape_prediction(1, [0.2501, 0.7499]);
        assert_eq!(shaped.class, 1);
        assert_eq!(shaped.diagnosis, "Alzheimer");
        assert_eq!(shaped.probability.tidak_alzheimer, 25.01);
        assert_eq!(shaped.probability.alzheimer, 74.99);
    }

    #[test]
    fn test_shaped_probabilities_sum_near_100() {
        for p1 in [0.0, 0.003, 0.2501, 0.5, 0.87654, 0.9999] {
            let shaped = shape_prediction(0, [1.0 - p1, p1]);
            let sum = shaped.probability.tidak_alzheimer + shaped.probability.alzheimer;
            assert!((sum - 100.0).abs() <= 0.01, "sum {sum} for p1 {p1}");
        }
    }

    #[test]
    fn test_error_response_missing_fields() {
        let (status, Json(body)) = error_response(&PrediksiError::MissingFields {
            missing: vec!["Age".to_string()],
        });
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Missing required fields");
        assert_eq!(body.missing_fields.unwrap(), vec!["Age".to_string()]);
        assert_eq!(body.required_fields.unwrap().len(), 32);
    }

    #[test]
    fn test_error_response_invalid_value() {
        let (status, Json(body)) = error_response(&PrediksiError::InvalidFieldValue {
            field: "BMI".to_string(),
            value: "\"x\"".to_string(),
        });
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Invalid field value");
        assert!(body.message.unwrap().contains("BMI"));
    }

    #[test]
    fn test_error_response_unavailable_is_500() {
        let (status, Json(body)) = error_response(&PrediksiError::ServiceUnavailable {
            component: "model".to_string(),
        });
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Prediction failed");
    }
}
