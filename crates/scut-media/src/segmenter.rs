//! State machine for converting window levels into silence markers.
//!
//! # State Machine
//!
//! ```text
//!                level_db > threshold + hysteresis
//!     ┌─────────────────────────────────────────────────┐
//!     │                                                 │
//!     ▼                                                 │
//! ┌─────────┐                                     ┌─────────┐
//! │ InSound │─────────────────────────────────────│InSilence│
//! └─────────┘       level_db < threshold          └─────────┘
//!                                                       │
//!             silence_duration >= min_silence           │
//!                  ◄──────── emit marker ───────────────┘
//! ```

use scut_models::SilenceMarker;
use tracing::trace;

/// Internal state for the segmenter state machine.
enum State {
    /// Level is above the threshold.
    InSound,
    /// Level dropped below the threshold at `since`.
    InSilence { since: f64 },
}

/// Converts a stream of window levels into silence markers.
pub struct SilenceSegmenter {
    enter_db: f64,
    exit_db: f64,
    min_silence_ms: f64,
    state: State,
    markers: Vec<SilenceMarker>,
}

impl SilenceSegmenter {
    /// Create a segmenter.
    ///
    /// Silence starts when a window falls below `threshold_db` and ends when a
    /// window rises above `threshold_db + hysteresis_db`.
    pub fn new(threshold_db: f64, hysteresis_db: f64, min_silence_ms: i64) -> Self {
        Self {
            enter_db: threshold_db,
            exit_db: threshold_db + hysteresis_db.max(0.0),
            min_silence_ms: min_silence_ms.max(0) as f64,
            state: State::InSound,
            markers: Vec::new(),
        }
    }

    /// Process one analysis window starting at `timestamp` seconds.
    pub fn ingest_frame(&mut self, level_db: f64, timestamp: f64) {
        match self.state {
            State::InSound if level_db < self.enter_db => {
                self.state = State::InSilence { since: timestamp };
            }
            State::InSilence { since } if level_db > self.exit_db => {
                self.close(since, timestamp);
                self.state = State::InSound;
            }
            _ => {}
        }
    }

    /// Finish at `total_duration` seconds and return markers in ascending order.
    pub fn finalize(mut self, total_duration: f64) -> Vec<SilenceMarker> {
        if let State::InSilence { since } = self.state {
            self.close(since, total_duration);
        }
        self.markers
    }

    fn close(&mut self, since: f64, until: f64) {
        let Ok(marker) = SilenceMarker::new(since, until) else {
            return;
        };
        if marker.span_ms() >= self.min_silence_ms {
            self.markers.push(marker);
        } else {
            trace!(start = since, end = until, "Silence shorter than minimum, ignored");
        }
    }
}
