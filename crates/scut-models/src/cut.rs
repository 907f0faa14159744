//! Cut request, plan range and result types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::marker::SilenceMarker;
use crate::utils::lenient_i64;

/// Parameters of a `cutSilence` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct CutRequest {
    /// Markers to remove, usually the ones from the last analysis.
    pub markers: Vec<SilenceMarker>,
    /// Padding kept on both sides of every marker, in milliseconds.
    #[serde(rename = "padding", default, deserialize_with = "lenient_i64")]
    #[schemars(with = "i64")]
    #[validate(range(min = 0, message = "padding must not be negative"))]
    pub padding_ms: i64,
}

/// A padded range scheduled for removal, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CutRange {
    pub start: f64,
    pub end: f64,
}

impl CutRange {
    /// Length of the range in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Outcome of a `cutSilence` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CutResult {
    pub success: bool,
    /// Number of cuts the host applied.
    #[serde(rename = "cutCount")]
    pub cut_count: usize,
}

impl CutResult {
    pub fn applied(cut_count: usize) -> Self {
        Self {
            success: true,
            cut_count,
        }
    }
}
