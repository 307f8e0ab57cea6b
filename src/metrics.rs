//! Metrics collection and reporting
//!
//! Tracks request counts, error counts, and cumulative prediction latency
//! with lock-free atomics; exposed in Prometheus text format at
//! `GET /metrics`.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Central metrics collector shared across request handlers
#[derive(Debug, Clone)]
pub struct MetricsCollector {
    /// Total number of prediction requests processed
    total_requests: Arc<AtomicUsize>,
    /// Total number of successful predictions
    successful_requests: Arc<AtomicUsize>,
    /// Total number of failed requests
    failed_requests: Arc<AtomicUsize>,
    /// Total prediction time in microseconds
    total_prediction_time_us: Arc<AtomicU64>,
    /// Start time for rate calculations
    start_time: Instant,
}

impl MetricsCollector {
    /// Create a new metrics collector
    #[must_use]
    pub fn new() -> Self {
        Self {
            total_requests: Arc::new(AtomicUsize::new(0)),
            successful_requests: Arc::new(AtomicUsize::new(0)),
            failed_requests: Arc::new(AtomicUsize::new(0)),
            total_prediction_time_us: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    /// Record a successful prediction
    pub fn record_success(&self, duration: Duration) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.successful_requests.fetch_add(1, Ordering::Relaxed);
        self.total_prediction_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    /// Record a failed request
    pub fn record_failure(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.failed_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a point-in-time snapshot of all counters
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        let total = self.total_requests.load(Ordering::Relaxed);
        let successful = self.successful_requests.load(Ordering::Relaxed);
        let failed = self.failed_requests.load(Ordering::Relaxed);
        let total_time_us = self.total_prediction_time_us.load(Ordering::Relaxed);
        let uptime = self.start_time.elapsed();

        MetricsSnapshot {
            total_requests: total,
            successful_requests: successful,
            failed_requests: failed,
            uptime_secs: uptime.as_secs(),
            avg_latency_ms: if successful > 0 {
                (total_time_us as f64 / 1000.0) / successful as f64
            } else {
                0.0
            },
            error_rate: if total > 0 {
                failed as f64 / total as f64
            } else {
                0.0
            },
        }
    }

    /// Render current metrics in Prometheus text exposition format
    #[must_use]
    pub fn to_prometheus(&self) -> String {
        let snap = self.snapshot();
        format!(
            "# HELP prediksi_requests_total Total prediction requests processed\n\
             # TYPE prediksi_requests_total counter\n\
             prediksi_requests_total {}\n\
             # HELP prediksi_requests_success_total Successful predictions\n\
             # TYPE prediksi_requests_success_total counter\n\
             prediksi_requests_success_total {}\n\
             # HELP prediksi_requests_failed_total Failed requests\n\
             # TYPE prediksi_requests_failed_total counter\n\
             prediksi_requests_failed_total {}\n\
             # HELP prediksi_avg_latency_ms Average prediction latency in milliseconds\n\
             # TYPE prediksi_avg_latency_ms gauge\n\
             prediksi_avg_latency_ms {:.3}\n\
             # HELP prediksi_error_rate Fraction of requests that failed\n\
             # TYPE prediksi_error_rate gauge\n\
             prediksi_error_rate {:.4}\n\
             # HELP prediksi_uptime_seconds Server uptime in seconds\n\
             # TYPE prediksi_uptime_seconds counter\n\
             prediksi_uptime_seconds {}\n",
            snap.total_requests,
            snap.successful_requests,
            snap.failed_requests,
            snap.avg_latency_ms,
            snap.error_rate,
            snap.uptime_secs,
        )
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of collected metrics
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    /// Total prediction requests
    pub total_requests: usize,
    /// Successful predictions
    pub successful_requests: usize,
    /// Failed requests
    pub failed_requests: usize,
    /// Uptime in whole seconds
    pub uptime_secs: u64,
    /// Average prediction latency in milliseconds
    pub avg_latency_ms: f64,
    /// failed / total, 0.0 when no requests yet
    pub error_rate: f64,
}
