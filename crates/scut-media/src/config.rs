//! Configuration for silence detection.
//!
//! The request carries the threshold and minimum duration chosen on the
//! panel; everything else here (window size, hysteresis, detector choice,
//! RNG seed) is host-side tuning.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which detector the analyzer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DetectorMode {
    /// Level detection when the host supplies audio, random markers otherwise.
    #[default]
    Auto,
    /// Always the random placeholder.
    Simulated,
    /// Always level detection; fails without audio.
    Level,
}

impl DetectorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectorMode::Auto => "auto",
            DetectorMode::Simulated => "simulated",
            DetectorMode::Level => "level",
        }
    }
}

impl fmt::Display for DetectorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(DetectorMode::Auto),
            "simulated" | "random" => Ok(DetectorMode::Simulated),
            "level" | "rms" => Ok(DetectorMode::Level),
            other => Err(format!("unknown detector mode: {}", other)),
        }
    }
}

/// Configuration for silence detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Level (dBFS) below which a window counts as silent.
    ///
    /// - -50 dB and lower: only near-digital silence
    /// - Default (-40 dB): room tone and breaths count as silence
    /// - -30 dB and higher: quiet speech may be cut
    pub threshold_db: f64,

    /// Minimum silence length before it becomes a marker (milliseconds).
    pub min_silence_ms: i64,

    /// How far above the threshold the level must rise to leave silence (dB).
    ///
    /// Keeps a level hovering around the threshold from producing a burst of
    /// tiny markers.
    pub hysteresis_db: f64,

    /// Analysis window for RMS measurement (milliseconds).
    pub window_ms: u32,

    /// Detector selection.
    pub mode: DetectorMode,

    /// Seed for the random placeholder. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            threshold_db: -40.0,
            min_silence_ms: 500,
            hysteresis_db: 3.0,
            window_ms: 20,
            mode: DetectorMode::Auto,
            seed: None,
        }
    }
}

impl DetectionConfig {
    /// Create a more aggressive configuration for fast-paced content.
    pub fn aggressive() -> Self {
        Self {
            threshold_db: -35.0,
            min_silence_ms: 250,
            hysteresis_db: 2.0,
            window_ms: 10,
            ..Self::default()
        }
    }

    /// Create a conservative configuration that only cuts long, quiet gaps.
    pub fn conservative() -> Self {
        Self {
            threshold_db: -50.0,
            min_silence_ms: 1500,
            hysteresis_db: 4.0,
            window_ms: 30,
            ..Self::default()
        }
    }

    /// Builder-style setter for the threshold, clamped to [-120, 0] dB.
    pub fn with_threshold_db(mut self, threshold_db: f64) -> Self {
        self.threshold_db = threshold_db.clamp(-120.0, 0.0);
        self
    }

    /// Builder-style setter for minimum silence duration.
    pub fn with_min_silence_ms(mut self, ms: i64) -> Self {
        self.min_silence_ms = ms.max(0);
        self
    }

    /// Builder-style setter for hysteresis, never negative.
    pub fn with_hysteresis_db(mut self, db: f64) -> Self {
        self.hysteresis_db = db.max(0.0);
        self
    }

    /// Builder-style setter for the analysis window, at least 1 ms.
    pub fn with_window_ms(mut self, ms: u32) -> Self {
        self.window_ms = ms.max(1);
        self
    }

    pub fn with_mode(mut self, mode: DetectorMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
