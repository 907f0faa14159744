//! Host editor boundary.
//!
//! The panel never touches the editor directly; it goes through this trait.
//! In/out points are in host ticks, everything else in seconds.

use scut_media::AudioBuffer;
use scut_models::{Ticks, TICKS_PER_SECOND};
use thiserror::Error;
use tracing::warn;

/// Frame rate assumed when the sequence reports no timebase.
pub const DEFAULT_FPS: f64 = 30.0;

/// Sequence length assumed when the host reports no end time.
pub const DEFAULT_DURATION_SECS: f64 = 60.0;

pub type HostResult<T> = Result<T, HostError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("Could not access the editor project")]
    ProjectUnavailable,

    #[error("Could not access audio tracks")]
    TracksUnavailable,

    #[error("{0}")]
    Operation(String),
}

impl HostError {
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }
}

/// An audio track of the active sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioTrackInfo {
    pub name: String,
    pub clip_count: usize,
}

/// What the host reports about the active sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceInfo {
    pub name: String,
    /// Sequence end in seconds, when the host exposes it.
    pub end_seconds: Option<f64>,
    /// Ticks per frame, when the host exposes it.
    pub timebase: Option<i64>,
    pub audio_tracks: Vec<AudioTrackInfo>,
}

impl SequenceInfo {
    /// Frame rate derived from the timebase, or [`DEFAULT_FPS`].
    pub fn fps(&self) -> f64 {
        match self.timebase {
            Some(ticks_per_frame) if ticks_per_frame > 0 => {
                TICKS_PER_SECOND as f64 / ticks_per_frame as f64
            }
            _ => {
                warn!(sequence = %self.name, "Timebase not available, using default 30fps");
                DEFAULT_FPS
            }
        }
    }

    /// Sequence length in seconds, or [`DEFAULT_DURATION_SECS`].
    pub fn duration_secs(&self) -> f64 {
        match self.end_seconds {
            Some(end) if end.is_finite() => end,
            _ => {
                warn!(sequence = %self.name, "End time not available, using default 60 seconds");
                DEFAULT_DURATION_SECS
            }
        }
    }

    /// Number of audio tracks holding at least one clip.
    pub fn audio_track_count(&self) -> usize {
        self.audio_tracks.iter().filter(|t| t.clip_count > 0).count()
    }
}

/// Operations the panel needs from the host editor.
#[cfg_attr(test, mockall::automock)]
pub trait HostEditor {
    /// Whether a project is open.
    fn project_available(&self) -> bool;

    /// The active sequence, or `None` when no timeline is selected.
    fn active_sequence(&self) -> HostResult<Option<SequenceInfo>>;

    /// Mono mixdown of the active sequence, when the host can render one.
    fn audio_mixdown(&self) -> HostResult<Option<AudioBuffer>> {
        Ok(None)
    }

    fn begin_undo_group(&mut self, label: &str) -> HostResult<()>;

    fn end_undo_group(&mut self) -> HostResult<()>;

    fn set_in_point(&mut self, at: Ticks) -> HostResult<()>;

    fn set_out_point(&mut self, at: Ticks) -> HostResult<()>;

    /// Remove the in/out range and close the gap.
    fn ripple_delete(&mut self) -> HostResult<()>;
}
