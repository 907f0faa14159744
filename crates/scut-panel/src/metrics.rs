//! Metrics for bridge requests and cut batches.
//!
//! Emitted through the `metrics` facade; with no recorder installed the
//! calls are no-ops.

use metrics::{counter, histogram};

/// Metric names as constants for consistency.
pub mod names {
    pub const REQUESTS_TOTAL: &str = "scut_requests_total";
    pub const REQUEST_DURATION_SECONDS: &str = "scut_request_duration_seconds";
    pub const REQUEST_ERRORS_TOTAL: &str = "scut_request_errors_total";

    pub const MARKERS_DETECTED_TOTAL: &str = "scut_markers_detected_total";
    pub const CUTS_APPLIED_TOTAL: &str = "scut_cuts_applied_total";
    pub const CUTS_FAILED_TOTAL: &str = "scut_cuts_failed_total";
    pub const CUTS_SKIPPED_TOTAL: &str = "scut_cuts_skipped_total";
}

/// Record a handled bridge request.
pub fn record_request(method: &str, outcome: &'static str, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("outcome", outcome.to_string()),
    ];
    counter!(names::REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a request that ended in an error.
pub fn record_request_error(method: &str, kind: &'static str) {
    let labels = [("method", method.to_string()), ("kind", kind.to_string())];
    counter!(names::REQUEST_ERRORS_TOTAL, &labels).increment(1);
}

/// Record markers produced by an analysis.
pub fn record_markers(count: usize) {
    counter!(names::MARKERS_DETECTED_TOTAL).increment(count as u64);
}

/// Record the outcome of a cut batch.
pub fn record_cuts(applied: usize, failed: usize, skipped: usize) {
    counter!(names::CUTS_APPLIED_TOTAL).increment(applied as u64);
    counter!(names::CUTS_FAILED_TOTAL).increment(failed as u64);
    counter!(names::CUTS_SKIPPED_TOTAL).increment(skipped as u64);
}
