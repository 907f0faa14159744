//! RMS level detector.
//!
//! Measures the RMS level of fixed windows of the host's mono mixdown and
//! runs them through [`SilenceSegmenter`].

use scut_models::SilenceMarker;
use tracing::debug;

use super::{DetectRequest, SilenceDetector};
use crate::error::{DetectError, DetectResult};
use crate::segmenter::SilenceSegmenter;

pub struct LevelDetector {
    window_ms: u32,
    hysteresis_db: f64,
}

impl LevelDetector {
    pub fn new(window_ms: u32, hysteresis_db: f64) -> Self {
        Self {
            window_ms: window_ms.max(1),
            hysteresis_db: hysteresis_db.max(0.0),
        }
    }
}

impl SilenceDetector for LevelDetector {
    fn name(&self) -> &'static str {
        "level"
    }

    fn detect(&mut self, request: &DetectRequest<'_>) -> DetectResult<Vec<SilenceMarker>> {
        let audio = request
            .audio
            .filter(|a| !a.is_empty() && a.sample_rate > 0)
            .ok_or(DetectError::NoAudioData)?;

        let levels = audio.window_levels(self.window_ms);
        debug!(
            windows = levels.len(),
            window_ms = self.window_ms,
            sample_rate = audio.sample_rate,
            "Measured window levels"
        );

        let mut segmenter = SilenceSegmenter::new(
            request.threshold_db,
            self.hysteresis_db,
            request.min_duration_ms,
        );
        for (timestamp, level_db) in levels {
            if timestamp >= request.duration_sec {
                break;
            }
            segmenter.ingest_frame(level_db, timestamp);
        }

        // Audio shorter than the sequence: what is missing is silent.
        let end = request.duration_sec;
        if audio.duration_secs() < end {
            segmenter.ingest_frame(f64::NEG_INFINITY, audio.duration_secs());
        }

        Ok(segmenter.finalize(end))
    }
}
