//! Random placeholder detector.
//!
//! Walks the timeline in random steps: a non-silent gap of 1-6 s, then a
//! silence candidate of 0-2 s. A candidate becomes a marker when it is long
//! enough and ends inside the sequence. The cursor moves past every
//! candidate, accepted or not. It does not look at audio at all.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scut_models::SilenceMarker;

use super::{DetectRequest, SilenceDetector};
use crate::error::DetectResult;

const MIN_GAP_SECS: f64 = 1.0;
const MAX_GAP_SECS: f64 = 6.0;
const MAX_SILENCE_SECS: f64 = 2.0;

pub struct RandomDetector {
    rng: StdRng,
}

impl RandomDetector {
    /// Deterministic detector for tests and reproducible sessions.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl SilenceDetector for RandomDetector {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn detect(&mut self, request: &DetectRequest<'_>) -> DetectResult<Vec<SilenceMarker>> {
        let duration = request.duration_sec;
        let min_ms = request.min_duration_ms as f64;
        let mut markers = Vec::new();
        let mut position = 0.0;

        while position < duration {
            position += self.rng.random_range(MIN_GAP_SECS..MAX_GAP_SECS);
            if position >= duration {
                break;
            }

            let candidate = self.rng.random_range(0.0..MAX_SILENCE_SECS);
            let end = position + candidate;

            // Judge the drawn length, not the span recomputed from the endpoints.
            if end <= duration && candidate * 1000.0 >= min_ms {
                if let Ok(marker) = SilenceMarker::new(position, end) {
                    markers.push(marker);
                }
            }

            position = end;
        }

        Ok(markers)
    }
}
