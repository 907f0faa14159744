//! Panel session driving the bridge end to end.

use scut_media::{AudioBuffer, DetectionConfig};
use scut_panel::session::{STATUS_ANALYZED, STATUS_NO_ANALYSIS};
use scut_panel::{Bridge, PanelSession, SimulatedTimeline, UNDO_GROUP_LABEL};

const SAMPLE_RATE: u32 = 1000;

/// Tone and silence spans in seconds, rendered at [`SAMPLE_RATE`].
fn render(spans: &[(f64, bool)]) -> AudioBuffer {
    let mut samples = Vec::new();
    for (secs, loud) in spans {
        let n = (secs * SAMPLE_RATE as f64).round() as usize;
        let level = if *loud { 0.4f32 } else { 0.0 };
        samples.extend(std::iter::repeat(level).take(n));
    }
    AudioBuffer::new(SAMPLE_RATE, samples)
}

fn connect(timeline: SimulatedTimeline) -> Bridge<SimulatedTimeline> {
    Bridge::new(timeline, DetectionConfig::default().with_seed(7))
}

#[test]
fn test_analyze_and_cut_real_audio() {
    // 0-3 tone, 3-5 silence, 5-8 tone, 8-9 silence, 9-10 tone.
    let audio = render(&[(3.0, true), (2.0, false), (3.0, true), (1.0, false), (1.0, true)]);
    let mut bridge = connect(SimulatedTimeline::new(10.0, 30.0).with_audio(audio));
    let mut session = PanelSession::new();

    let result = session.analyze(&mut bridge).cloned().expect("analysis");
    assert_eq!(session.status(), STATUS_ANALYZED);
    assert_eq!(result.count, 2);
    assert!((result.markers[0].start - 3.0).abs() < 1e-9);
    assert!((result.markers[0].end - 5.0).abs() < 1e-9);
    assert!((result.markers[1].start - 8.0).abs() < 1e-9);
    assert!((result.markers[1].end - 9.0).abs() < 1e-9);
    assert_eq!(
        session.total_duration_text().as_deref(),
        Some("Total silence duration: 3.00 sec")
    );

    // Default padding is 100 ms on each side.
    assert_eq!(session.cut(&mut bridge), Some(2));
    assert_eq!(session.status(), "Successfully cut 2 silent sections.");

    let timeline = bridge.host();
    assert!((timeline.duration() - 7.4).abs() < 1e-6);
    assert_eq!(timeline.edits().len(), 2);
    assert!((timeline.edits()[0].start - 8.1).abs() < 1e-6);
    assert!((timeline.edits()[1].start - 3.1).abs() < 1e-6);
    assert_eq!(timeline.undo_groups(), [UNDO_GROUP_LABEL.to_string()]);
    assert_eq!(timeline.undo_depth(), 0);

    // Only the padded slivers remain, each shorter than the minimum.
    let again = session.analyze(&mut bridge).cloned().expect("analysis");
    assert_eq!(again.count, 0);
    assert!((again.sequence_duration_sec - 7.4).abs() < 1e-6);
}

#[test]
fn test_simulated_detector_markers_are_well_formed() {
    let mut bridge = connect(SimulatedTimeline::new(60.0, 30.0));
    let mut session = PanelSession::new();

    let result = session.analyze(&mut bridge).cloned().expect("analysis");
    assert_eq!(result.count, result.markers.len());
    let mut previous_end = 0.0;
    for marker in &result.markers {
        assert!(marker.start >= previous_end);
        assert!(marker.end > marker.start);
        assert!(marker.end - marker.start >= 0.5);
        assert!(marker.end <= 60.0);
        previous_end = marker.end;
    }

    let cuts = session.cut(&mut bridge).expect("cut");
    assert_eq!(cuts, bridge.host().edits().len());
    let removed: f64 = bridge.host().edits().iter().map(|e| e.duration()).sum();
    assert!((bridge.host().duration() - (60.0 - removed)).abs() < 1e-6);
}

#[test]
fn test_failed_ripple_delete_lowers_count() {
    let audio = render(&[(1.0, true), (1.0, false), (1.0, true), (1.0, false), (1.0, true)]);
    let timeline = SimulatedTimeline::new(5.0, 25.0)
        .with_audio(audio)
        .fail_ripple_delete_at(0);
    let mut bridge = connect(timeline);
    let mut session = PanelSession::new();

    assert_eq!(session.analyze(&mut bridge).map(|r| r.count), Some(2));
    assert_eq!(session.cut(&mut bridge), Some(1));
    assert_eq!(bridge.host().edits().len(), 1);
    assert!((bridge.host().edits()[0].start - 1.1).abs() < 1e-6);
    assert_eq!(bridge.host().undo_depth(), 0);
}

#[test]
fn test_host_errors_reach_the_panel() {
    let mut bridge = connect(SimulatedTimeline::new(30.0, 30.0).without_sequence());
    let mut session = PanelSession::new();

    assert!(session.analyze(&mut bridge).is_none());
    assert_eq!(
        session.status(),
        "Error: No active sequence. Please select a sequence."
    );
    assert!(!session.cut_enabled());

    assert_eq!(session.cut(&mut bridge), None);
    assert_eq!(session.status(), STATUS_NO_ANALYSIS);

    let mut bridge = connect(SimulatedTimeline::new(30.0, 30.0).with_audio_tracks(&[0]));
    session.analyze(&mut bridge);
    assert_eq!(session.status(), "Error: No audio tracks found in the sequence.");
}

#[test]
fn test_missing_end_time_uses_default_length() {
    let mut bridge = connect(SimulatedTimeline::new(30.0, 24.0).without_end_time());
    let mut session = PanelSession::new();

    let result = session.analyze(&mut bridge).cloned().expect("analysis");
    assert_eq!(result.sequence_duration_sec, 60.0);
    assert!((result.fps - 24.0).abs() < 1e-6);
}
