//! The two host entry points.
//!
//! `run_*` return typed results; `analyze_silence` and `cut_silence` wrap
//! them into the JSON string the channel carries. Errors never cross the
//! boundary as anything but `{"error": "<message>"}`.

use serde::Serialize;
use tracing::{debug, info};
use validator::Validate;

use scut_media::{plan_cuts, Analyzer, DetectRequest};
use scut_models::{AnalysisResult, AnalyzeParams, CutRequest, CutResult, ErrorResponse};

use crate::error::{PanelError, PanelResult};
use crate::executor::execute_plan;
use crate::host::HostEditor;
use crate::metrics;

/// `analyzeSilence(paramsJson) -> resultJson`.
pub fn analyze_silence<H: HostEditor + ?Sized>(
    host: &H,
    analyzer: &mut Analyzer,
    params_json: &str,
) -> String {
    respond(run_analyze(host, analyzer, params_json))
}

/// `cutSilence(paramsJson) -> resultJson`.
pub fn cut_silence<H: HostEditor + ?Sized>(host: &mut H, params_json: &str) -> String {
    respond(run_cut(host, params_json))
}

/// Inspect the active sequence and detect silence in it.
pub fn run_analyze<H: HostEditor + ?Sized>(
    host: &H,
    analyzer: &mut Analyzer,
    params_json: &str,
) -> PanelResult<AnalysisResult> {
    let params: AnalyzeParams = serde_json::from_str(params_json)?;
    params.validate()?;

    if !host.project_available() {
        return Err(PanelError::host_unavailable(
            "Could not access the editor project.",
        ));
    }
    let sequence = host.active_sequence()?.ok_or(PanelError::NoActiveSequence)?;

    let audio_tracks = sequence.audio_track_count();
    if audio_tracks == 0 {
        return Err(PanelError::NoAudioTracks);
    }

    let fps = sequence.fps();
    let duration = sequence.duration_secs();
    debug!(
        sequence = %sequence.name,
        fps,
        duration_sec = duration,
        audio_tracks,
        "Sequence details"
    );

    let defaults = analyzer.config();
    let threshold_db = params.threshold.unwrap_or(defaults.threshold_db);
    let min_duration_ms = params.min_duration_ms.unwrap_or(defaults.min_silence_ms);

    let audio = host.audio_mixdown()?;
    let mut request = DetectRequest::new(duration, threshold_db, min_duration_ms, fps);
    if let Some(buffer) = audio.as_ref() {
        request = request.with_audio(buffer);
    }

    let markers = analyzer.analyze(&request)?;
    metrics::record_markers(markers.len());

    let result = AnalysisResult::new(markers, duration, fps);
    info!(
        sequence = %sequence.name,
        markers = result.count,
        total_silence_ms = result.total_duration_ms,
        "Analysis finished"
    );
    Ok(result)
}

/// Plan and apply the cuts for the given markers.
pub fn run_cut<H: HostEditor + ?Sized>(host: &mut H, params_json: &str) -> PanelResult<CutResult> {
    let request: CutRequest = serde_json::from_str(params_json)?;
    request.validate()?;

    if !host.project_available() {
        return Err(PanelError::host_unavailable(
            "Could not access the editor project.",
        ));
    }
    host.active_sequence()?.ok_or(PanelError::NoActiveSequence)?;

    debug!(
        markers = request.markers.len(),
        padding_ms = request.padding_ms,
        "Planning cuts"
    );
    let plan = plan_cuts(&request.markers, request.padding_ms)?;
    let outcome = execute_plan(host, &plan)?;

    Ok(CutResult::applied(outcome.applied))
}

/// Serialize a handler result for the channel.
pub(crate) fn respond<T: Serialize>(result: PanelResult<T>) -> String {
    match result.and_then(|body| encode(&body)) {
        Ok(json) => json,
        Err(e) => ErrorResponse::new(e.to_string()).to_json(),
    }
}

pub(crate) fn encode<T: Serialize>(body: &T) -> PanelResult<String> {
    serde_json::to_string(body)
        .map_err(|e| PanelError::invalid_input(format!("failed to encode response: {}", e)))
}
