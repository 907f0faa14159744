//! Analysis request and result types.
//!
//! Field names match the panel's JSON payloads (`minDuration`,
//! `totalDuration`, `sequenceDuration`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::marker::{total_duration_ms, SilenceMarker};
use crate::utils::{lenient_i64, lenient_opt_f64, lenient_opt_i64};

/// Parameters of an `analyzeSilence` call.
///
/// A missing threshold or minimum duration falls back to the host's
/// detection defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct AnalyzeParams {
    /// Silence threshold in dBFS.
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    #[schemars(with = "Option<f64>")]
    #[validate(range(min = -120.0, max = 0.0, message = "threshold must be between -120 and 0 dB"))]
    pub threshold: Option<f64>,

    /// Minimum silence length in milliseconds.
    #[serde(rename = "minDuration", default, deserialize_with = "lenient_opt_i64")]
    #[schemars(with = "Option<i64>")]
    #[validate(range(min = 0, message = "minDuration must not be negative"))]
    pub min_duration_ms: Option<i64>,

    /// Padding in milliseconds. Analysis does not use it; the panel sends it
    /// along with the other controls, so it is accepted unchecked.
    #[serde(rename = "padding", default, deserialize_with = "lenient_i64")]
    #[schemars(with = "i64")]
    pub padding_ms: i64,
}

/// Result of an `analyzeSilence` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisResult {
    /// Number of markers.
    pub count: usize,
    /// Total silence in milliseconds.
    #[serde(rename = "totalDuration")]
    pub total_duration_ms: f64,
    /// Markers in ascending start order.
    pub markers: Vec<SilenceMarker>,
    /// Sequence length in seconds.
    #[serde(rename = "sequenceDuration")]
    pub sequence_duration_sec: f64,
    /// Sequence frame rate.
    pub fps: f64,
}

impl AnalysisResult {
    /// Build a result, deriving `count` and `total_duration_ms` from the markers.
    pub fn new(markers: Vec<SilenceMarker>, sequence_duration_sec: f64, fps: f64) -> Self {
        Self {
            count: markers.len(),
            total_duration_ms: total_duration_ms(&markers),
            markers,
            sequence_duration_sec,
            fps,
        }
    }

    /// Total silence in seconds.
    pub fn total_duration_secs(&self) -> f64 {
        self.total_duration_ms / 1000.0
    }
}
