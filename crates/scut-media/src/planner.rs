//! Cut planning.
//!
//! Turns silence markers into the padded ranges the host removes. Ranges are
//! returned in descending start order: every ripple delete shortens the
//! timeline after its own position, so working from the end keeps the
//! coordinates of the remaining cuts valid.

use scut_models::{CutRange, SilenceMarker};
use tracing::{debug, warn};

use crate::error::{DetectError, DetectResult};

/// Padded, non-overlapping cuts in execution order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CutPlan {
    /// Cuts sorted by descending start.
    pub cuts: Vec<CutRange>,
    /// Markers dropped because padding consumed them or their bounds were invalid.
    pub skipped: usize,
    /// Ranges folded into a neighbour because they overlapped after padding.
    pub merged: usize,
}

impl CutPlan {
    pub fn len(&self) -> usize {
        self.cuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }

    /// Seconds the plan removes from the timeline.
    pub fn total_secs(&self) -> f64 {
        self.cuts.iter().map(CutRange::duration).sum()
    }
}

/// Plan the cuts for `markers` with `padding_ms` kept on both sides.
///
/// A marker survives only when `start + padding < end - padding`.
pub fn plan_cuts(markers: &[SilenceMarker], padding_ms: i64) -> DetectResult<CutPlan> {
    if padding_ms < 0 {
        return Err(DetectError::invalid_input(format!(
            "padding must not be negative, got {} ms",
            padding_ms
        )));
    }
    let padding = padding_ms as f64 / 1000.0;

    let mut skipped = 0;
    let mut ranges = Vec::with_capacity(markers.len());
    for (i, marker) in markers.iter().enumerate() {
        if !marker.start.is_finite() || !marker.end.is_finite() || marker.end <= marker.start {
            warn!(index = i, start = marker.start, end = marker.end, "Skipping malformed marker");
            skipped += 1;
            continue;
        }

        let start = marker.start + padding;
        let end = marker.end - padding;
        if start >= end {
            debug!(
                index = i,
                start = marker.start,
                end = marker.end,
                padding_ms,
                "Padding consumed the whole marker, skipping"
            );
            skipped += 1;
            continue;
        }

        ranges.push(CutRange { start, end });
    }

    ranges.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut merged = 0;
    let mut cuts: Vec<CutRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match cuts.last_mut() {
            Some(last) if range.start < last.end => {
                last.end = last.end.max(range.end);
                merged += 1;
            }
            _ => cuts.push(range),
        }
    }
    cuts.reverse();

    debug!(
        cuts = cuts.len(),
        skipped,
        merged,
        padding_ms,
        "Cut plan ready"
    );

    Ok(CutPlan {
        cuts,
        skipped,
        merged,
    })
}
