//! In-memory editor used by the bridge binary and tests.
//!
//! Holds one sequence with a length, a frame rate and optional audio.
//! Ripple deletes shorten the sequence and the audio so later analyses see
//! the edited timeline.

use scut_media::AudioBuffer;
use scut_models::{Ticks, TICKS_PER_SECOND};
use tracing::debug;

use crate::host::{AudioTrackInfo, HostEditor, HostError, HostResult, SequenceInfo};

/// Slack allowed when an in/out point lands a rounding error past the end.
const END_TOLERANCE_SECS: f64 = 1e-6;

/// A ripple delete the timeline performed, in seconds at the time of the edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditRecord {
    pub start: f64,
    pub end: f64,
}

impl EditRecord {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone)]
pub struct SimulatedTimeline {
    name: String,
    project_open: bool,
    has_sequence: bool,
    report_end_time: bool,
    duration: f64,
    timebase: i64,
    audio_tracks: Vec<AudioTrackInfo>,
    audio: Option<AudioBuffer>,
    in_point: Option<Ticks>,
    out_point: Option<Ticks>,
    undo_depth: usize,
    undo_groups: Vec<String>,
    ripple_calls: usize,
    fail_ripple_at: Vec<usize>,
    edits: Vec<EditRecord>,
}

impl SimulatedTimeline {
    /// A sequence of `duration_secs` at `fps` with one audio track holding one clip.
    pub fn new(duration_secs: f64, fps: f64) -> Self {
        let timebase = if fps.is_finite() && fps > 0.0 {
            (TICKS_PER_SECOND as f64 / fps).round() as i64
        } else {
            0
        };

        Self {
            name: "Sequence 01".to_string(),
            project_open: true,
            has_sequence: true,
            report_end_time: true,
            duration: duration_secs.max(0.0),
            timebase,
            audio_tracks: vec![AudioTrackInfo {
                name: "Audio 1".to_string(),
                clip_count: 1,
            }],
            audio: None,
            in_point: None,
            out_point: None,
            undo_depth: 0,
            undo_groups: Vec::new(),
            ripple_calls: 0,
            fail_ripple_at: Vec::new(),
            edits: Vec::new(),
        }
    }

    pub fn without_project(mut self) -> Self {
        self.project_open = false;
        self
    }

    pub fn without_sequence(mut self) -> Self {
        self.has_sequence = false;
        self
    }

    /// Hide the sequence end time so callers fall back to their default.
    pub fn without_end_time(mut self) -> Self {
        self.report_end_time = false;
        self
    }

    /// Replace the audio tracks with `clip_counts.len()` tracks.
    pub fn with_audio_tracks(mut self, clip_counts: &[usize]) -> Self {
        self.audio_tracks = clip_counts
            .iter()
            .enumerate()
            .map(|(i, clips)| AudioTrackInfo {
                name: format!("Audio {}", i + 1),
                clip_count: *clips,
            })
            .collect();
        self
    }

    /// Attach a mixdown. The sequence length is left as is.
    pub fn with_audio(mut self, audio: AudioBuffer) -> Self {
        self.audio = Some(audio);
        self
    }

    /// Make the ripple delete with this zero-based call index fail. Can be
    /// called more than once.
    pub fn fail_ripple_delete_at(mut self, index: usize) -> Self {
        self.fail_ripple_at.push(index);
        self
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn edits(&self) -> &[EditRecord] {
        &self.edits
    }

    /// Labels of every undo group opened so far.
    pub fn undo_groups(&self) -> &[String] {
        &self.undo_groups
    }

    /// Open undo groups. Zero once every batch has been closed.
    pub fn undo_depth(&self) -> usize {
        self.undo_depth
    }

    pub fn audio(&self) -> Option<&AudioBuffer> {
        self.audio.as_ref()
    }

    fn check_point(&self, at: Ticks) -> HostResult<()> {
        let secs = at.as_seconds();
        if secs < 0.0 || secs > self.duration + END_TOLERANCE_SECS {
            return Err(HostError::operation(format!(
                "point {:.3}s is outside the sequence (0 to {:.3}s)",
                secs, self.duration
            )));
        }
        Ok(())
    }
}

impl HostEditor for SimulatedTimeline {
    fn project_available(&self) -> bool {
        self.project_open
    }

    fn active_sequence(&self) -> HostResult<Option<SequenceInfo>> {
        if !self.project_open {
            return Err(HostError::ProjectUnavailable);
        }
        if !self.has_sequence {
            return Ok(None);
        }
        Ok(Some(SequenceInfo {
            name: self.name.clone(),
            end_seconds: self.report_end_time.then_some(self.duration),
            timebase: (self.timebase > 0).then_some(self.timebase),
            audio_tracks: self.audio_tracks.clone(),
        }))
    }

    fn audio_mixdown(&self) -> HostResult<Option<AudioBuffer>> {
        Ok(self.audio.clone())
    }

    fn begin_undo_group(&mut self, label: &str) -> HostResult<()> {
        self.undo_depth += 1;
        self.undo_groups.push(label.to_string());
        Ok(())
    }

    fn end_undo_group(&mut self) -> HostResult<()> {
        if self.undo_depth == 0 {
            return Err(HostError::operation("no undo group is open"));
        }
        self.undo_depth -= 1;
        Ok(())
    }

    fn set_in_point(&mut self, at: Ticks) -> HostResult<()> {
        self.check_point(at)?;
        self.in_point = Some(at);
        Ok(())
    }

    fn set_out_point(&mut self, at: Ticks) -> HostResult<()> {
        self.check_point(at)?;
        self.out_point = Some(at);
        Ok(())
    }

    fn ripple_delete(&mut self) -> HostResult<()> {
        let call = self.ripple_calls;
        self.ripple_calls += 1;

        let (Some(in_point), Some(out_point)) = (self.in_point.take(), self.out_point.take())
        else {
            return Err(HostError::operation("in and out points must be set"));
        };
        if self.fail_ripple_at.contains(&call) {
            return Err(HostError::operation("ripple delete rejected by the timeline"));
        }

        let start = in_point.as_seconds().max(0.0);
        let end = out_point.as_seconds().min(self.duration);
        if end <= start {
            return Err(HostError::operation("out point must follow in point"));
        }

        self.duration -= end - start;
        if let Some(audio) = self.audio.as_mut() {
            audio.remove_range(start, end);
        }
        self.edits.push(EditRecord { start, end });
        debug!(start, end, remaining = self.duration, "Ripple delete");
        Ok(())
    }
}
