//! # Prediksi
//!
//! HTTP inference server for a pre-fitted Alzheimer disease risk classifier.
//!
//! Prediksi loads two fitted artifacts at startup — a standard scaler and a
//! logistic classifier — and serves a fixed 32-feature clinical schema over
//! a small REST API. The request pipeline is strictly
//! validate → build vector → scale → classify → shape response, with a
//! structured JSON error for every failure mode.
//!
//! ## Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Health check (reports artifact availability)
//! - `POST /predict` - Predict from a JSON record with all 32 features
//! - `GET /predict-sample` - Predict the two built-in sample patients
//! - `GET /metrics` - Prometheus-formatted metrics
//!
//! ## Example
//!
//! ```rust,ignore
//! use prediksi::api::{create_router, AppState};
//!
//! let state = AppState::demo();
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```
//!
//! The artifacts are read-only for the process lifetime and shared across
//! handlers via `Arc`; request handling is stateless and lock-free.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)] // usize -> f64 for rates is acceptable
#![allow(clippy::cast_possible_truncation)] // duration micros -> u64 is safe
#![allow(clippy::uninlined_format_args)]

pub mod api;
pub mod artifact;
pub mod error;
pub mod features;
pub mod fixtures;
pub mod metrics;
pub mod model;
pub mod scaler;
pub mod schema;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
