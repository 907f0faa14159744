//! Silence marker type.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a marker from raw bounds.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarkerError {
    #[error("Marker bounds must be finite (start={start}, end={end})")]
    NonFinite { start: f64, end: f64 },

    #[error("Marker start must not be negative (start={0})")]
    NegativeStart(f64),

    #[error("Marker end must be after start (start={start}, end={end})")]
    Empty { start: f64, end: f64 },
}

/// A detected interval of low-amplitude audio, in seconds.
///
/// `duration` is carried on the wire for the panel's benefit. When a marker
/// comes back in a cut request the field is optional and the planner only
/// looks at `start` and `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SilenceMarker {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Length in seconds (`end - start`).
    #[serde(default)]
    pub duration: f64,
}

impl SilenceMarker {
    /// Create a marker, checking `0 <= start < end`.
    pub fn new(start: f64, end: f64) -> Result<Self, MarkerError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(MarkerError::NonFinite { start, end });
        }
        if start < 0.0 {
            return Err(MarkerError::NegativeStart(start));
        }
        if end <= start {
            return Err(MarkerError::Empty { start, end });
        }
        Ok(Self {
            start,
            end,
            duration: end - start,
        })
    }

    /// Length in seconds computed from the bounds.
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Length in milliseconds computed from the bounds.
    pub fn span_ms(&self) -> f64 {
        self.span() * 1000.0
    }

    /// Whether two markers share any time.
    pub fn overlaps(&self, other: &SilenceMarker) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Total silence across `markers`, in milliseconds.
pub fn total_duration_ms(markers: &[SilenceMarker]) -> f64 {
    markers.iter().map(SilenceMarker::span_ms).sum()
}
