//! Silence detectors and the analyzer that runs them.
//!
//! Any detector must produce markers that are ascending, disjoint, at least
//! `min_duration_ms` long and inside `[0, duration]`. [`Analyzer::analyze`]
//! validates the request, runs the selected detector and enforces that
//! contract on whatever comes back.

mod level;
mod random;

pub use level::LevelDetector;
pub use random::RandomDetector;

use scut_models::SilenceMarker;
use tracing::{debug, warn};

use crate::audio::AudioBuffer;
use crate::config::{DetectionConfig, DetectorMode};
use crate::error::{DetectError, DetectResult};
use crate::stats::compute_marker_stats;

/// Input of a single analysis.
#[derive(Debug, Clone)]
pub struct DetectRequest<'a> {
    /// Sequence length in seconds.
    pub duration_sec: f64,
    /// Silence threshold in dBFS.
    pub threshold_db: f64,
    /// Minimum marker length in milliseconds.
    pub min_duration_ms: i64,
    /// Sequence frame rate.
    pub fps: f64,
    /// Mono mixdown of the sequence, when the host can provide one.
    pub audio: Option<&'a AudioBuffer>,
}

impl<'a> DetectRequest<'a> {
    pub fn new(duration_sec: f64, threshold_db: f64, min_duration_ms: i64, fps: f64) -> Self {
        Self {
            duration_sec,
            threshold_db,
            min_duration_ms,
            fps,
            audio: None,
        }
    }

    pub fn with_audio(mut self, audio: &'a AudioBuffer) -> Self {
        self.audio = Some(audio);
        self
    }

    /// Reject parameters no detector can work with.
    pub fn validate(&self) -> DetectResult<()> {
        if !self.duration_sec.is_finite() || self.duration_sec <= 0.0 {
            return Err(DetectError::invalid_input(format!(
                "sequence duration must be positive, got {}",
                self.duration_sec
            )));
        }
        if self.min_duration_ms < 0 {
            return Err(DetectError::invalid_input(format!(
                "minimum duration must not be negative, got {} ms",
                self.min_duration_ms
            )));
        }
        if !self.threshold_db.is_finite() {
            return Err(DetectError::invalid_input("threshold must be a finite number"));
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(DetectError::invalid_input(format!(
                "frame rate must be positive, got {}",
                self.fps
            )));
        }
        Ok(())
    }
}

/// A source of silence markers.
pub trait SilenceDetector {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Produce markers for a validated request.
    fn detect(&mut self, request: &DetectRequest<'_>) -> DetectResult<Vec<SilenceMarker>>;
}

/// Owns both detectors and picks one per request according to the config.
pub struct Analyzer {
    config: DetectionConfig,
    random: RandomDetector,
    level: LevelDetector,
}

impl Analyzer {
    pub fn new(config: DetectionConfig) -> Self {
        let random = match config.seed {
            Some(seed) => RandomDetector::seeded(seed),
            None => RandomDetector::from_os_rng(),
        };
        let level = LevelDetector::new(config.window_ms, config.hysteresis_db);
        Self {
            config,
            random,
            level,
        }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    fn select(&mut self, has_audio: bool) -> &mut dyn SilenceDetector {
        match (self.config.mode, has_audio) {
            (DetectorMode::Level, _) | (DetectorMode::Auto, true) => {
                &mut self.level as &mut dyn SilenceDetector
            }
            (DetectorMode::Simulated, _) | (DetectorMode::Auto, false) => &mut self.random,
        }
    }

    /// Detect silence for `request`.
    ///
    /// Fails with [`DetectError::InvalidInput`] when the duration is not
    /// positive or the minimum duration is negative.
    pub fn analyze(&mut self, request: &DetectRequest<'_>) -> DetectResult<Vec<SilenceMarker>> {
        request.validate()?;

        let has_audio = request.audio.is_some_and(|a| !a.is_empty());
        let detector = self.select(has_audio);
        let detector_name = detector.name();

        debug!(
            detector = detector_name,
            duration_sec = request.duration_sec,
            threshold_db = request.threshold_db,
            min_duration_ms = request.min_duration_ms,
            "Starting silence detection"
        );

        let raw = detector.detect(request)?;
        let raw_count = raw.len();
        let markers = enforce_contract(raw, request.duration_sec, request.min_duration_ms);
        if markers.len() != raw_count {
            warn!(
                detector = detector_name,
                dropped = raw_count - markers.len(),
                "Detector produced markers outside the contract"
            );
        }

        let stats = compute_marker_stats(&markers, request.duration_sec);
        debug!(
            detector = detector_name,
            markers = stats.count,
            silence_ms = stats.total_ms,
            longest_ms = stats.longest_ms,
            silence_ratio = format!("{:.1}%", stats.silence_ratio * 100.0),
            "Silence detection complete"
        );

        Ok(markers)
    }
}

/// Clamp to `[0, duration]`, drop short or overlapping markers, keep ascending order.
fn enforce_contract(
    mut markers: Vec<SilenceMarker>,
    duration_sec: f64,
    min_duration_ms: i64,
) -> Vec<SilenceMarker> {
    markers.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut accepted: Vec<SilenceMarker> = Vec::with_capacity(markers.len());
    for marker in markers {
        let start = marker.start.max(0.0);
        let end = marker.end.min(duration_sec);
        let Ok(clamped) = SilenceMarker::new(start, end) else {
            continue;
        };
        if clamped.span_ms() < min_duration_ms as f64 {
            continue;
        }
        if accepted.last().is_some_and(|prev| prev.overlaps(&clamped)) {
            continue;
        }
        accepted.push(clamped);
    }
    accepted
}
