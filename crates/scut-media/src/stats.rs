//! Summary statistics over a marker set.

use scut_models::SilenceMarker;

/// Statistics about detected silence.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStats {
    /// Number of markers.
    pub count: usize,
    /// Total silence in milliseconds.
    pub total_ms: f64,
    /// Longest marker in milliseconds.
    pub longest_ms: f64,
    /// Share of the sequence that is silence (0.0 to 1.0).
    pub silence_ratio: f64,
}

/// Calculate statistics for `markers` over a sequence of `duration_sec`.
pub fn compute_marker_stats(markers: &[SilenceMarker], duration_sec: f64) -> MarkerStats {
    let mut total_ms = 0.0;
    let mut longest_ms: f64 = 0.0;

    for marker in markers {
        let span = marker.span_ms();
        total_ms += span;
        longest_ms = longest_ms.max(span);
    }

    let silence_ratio = if duration_sec > 0.0 {
        (total_ms / (duration_sec * 1000.0)).clamp(0.0, 1.0)
    } else {
        0.0
    };

    MarkerStats {
        count: markers.len(),
        total_ms,
        longest_ms,
        silence_ratio,
    }
}
