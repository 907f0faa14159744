//! Headless panel: three range controls, Analyze and Cut, a status line.
//!
//! The session only talks to the host through an [`EvalChannel`], sending the
//! same `name("<json>")` expressions a browser panel would.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use scut_models::{AnalysisResult, CutResult, HostReply};

use crate::bridge::EvalChannel;

pub const STATUS_READY: &str = "Ready to analyze. Select a sequence in Premiere Pro.";
pub const STATUS_ANALYZING: &str = "Analyzing audio... Please wait.";
pub const STATUS_ANALYZED: &str = "Analysis complete.";
pub const STATUS_CUTTING: &str = "Cutting silences... Please wait.";
pub const STATUS_NO_ANALYSIS: &str = "No analysis results available. Please analyze first.";

/// An integer slider with a unit suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeControl {
    pub label: &'static str,
    pub min: i64,
    pub max: i64,
    pub step: i64,
    pub unit: &'static str,
    value: i64,
}

impl RangeControl {
    pub fn new(label: &'static str, min: i64, max: i64, step: i64, value: i64, unit: &'static str) -> Self {
        let mut control = Self {
            label,
            min,
            max,
            step: step.max(1),
            unit,
            value: min,
        };
        control.set(value);
        control
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Clamp to the range and snap to the nearest step. Returns the stored value.
    pub fn set(&mut self, value: i64) -> i64 {
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) as f64 / self.step as f64).round() as i64;
        self.value = (self.min + steps * self.step).min(self.max);
        self.value
    }

    /// Text shown next to the slider, e.g. `-40 dB`.
    pub fn display(&self) -> String {
        format!("{} {}", self.value, self.unit)
    }
}

/// The panel's three sliders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelControls {
    pub threshold: RangeControl,
    pub min_duration: RangeControl,
    pub padding: RangeControl,
}

impl Default for PanelControls {
    fn default() -> Self {
        Self {
            threshold: RangeControl::new("Silence Threshold", -60, -20, 1, -40, "dB"),
            min_duration: RangeControl::new("Minimum Silence Duration", 100, 2000, 50, 500, "ms"),
            padding: RangeControl::new("Padding", 0, 500, 10, 100, "ms"),
        }
    }
}

/// The last successful analysis and when it arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSnapshot {
    pub result: AnalysisResult,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PanelSession {
    id: Uuid,
    pub controls: PanelControls,
    status: String,
    cut_enabled: bool,
    results_visible: bool,
    last_analysis: Option<AnalysisSnapshot>,
}

impl Default for PanelSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            controls: PanelControls::default(),
            status: STATUS_READY.to_string(),
            cut_enabled: false,
            results_visible: false,
            last_analysis: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn cut_enabled(&self) -> bool {
        self.cut_enabled
    }

    pub fn results_visible(&self) -> bool {
        self.results_visible
    }

    pub fn last_analysis(&self) -> Option<&AnalysisSnapshot> {
        self.last_analysis.as_ref()
    }

    /// "Silences found: N" for the stored analysis.
    pub fn silence_count_text(&self) -> Option<String> {
        self.last_analysis
            .as_ref()
            .map(|s| format!("Silences found: {}", s.result.count))
    }

    /// "Total silence duration: X.XX sec" for the stored analysis.
    pub fn total_duration_text(&self) -> Option<String> {
        self.last_analysis.as_ref().map(|s| {
            format!(
                "Total silence duration: {:.2} sec",
                s.result.total_duration_ms / 1000.0
            )
        })
    }

    fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        debug!(session_id = %self.id, status = %self.status, "Panel status");
    }

    /// Run `analyzeSilence` with the current control values.
    ///
    /// On an error reply the previous analysis stays in place.
    pub fn analyze<C: EvalChannel + ?Sized>(&mut self, channel: &mut C) -> Option<&AnalysisResult> {
        self.set_status(STATUS_ANALYZING);
        self.results_visible = false;
        self.cut_enabled = false;

        // Slider values travel as strings.
        let params = json!({
            "threshold": self.controls.threshold.value().to_string(),
            "minDuration": self.controls.min_duration.value().to_string(),
            "padding": self.controls.padding.value().to_string(),
        });
        let reply = channel.eval_script(&script_call("analyzeSilence", &params));

        match decode_reply::<AnalysisResult>(&reply) {
            Ok(Ok(result)) => {
                info!(
                    session_id = %self.id,
                    markers = result.count,
                    total_silence_ms = result.total_duration_ms,
                    "Analysis stored"
                );
                self.last_analysis = Some(AnalysisSnapshot {
                    result,
                    analyzed_at: Utc::now(),
                });
                self.set_status(STATUS_ANALYZED);
                self.results_visible = true;
                self.cut_enabled = true;
            }
            Ok(Err(message)) => {
                warn!(session_id = %self.id, error = %message, "Analysis failed");
                self.set_status(format!("Error: {}", message));
            }
            Err(e) => {
                warn!(session_id = %self.id, error = %e, "Unreadable analysis reply");
                self.set_status(format!("Error parsing results: {}", e));
            }
        }

        self.last_analysis.as_ref().map(|s| &s.result)
    }

    /// Run `cutSilence` on the stored markers with the current padding.
    ///
    /// Does nothing unless the most recent analysis succeeded. Returns the
    /// number of cuts the host applied.
    pub fn cut<C: EvalChannel + ?Sized>(&mut self, channel: &mut C) -> Option<usize> {
        let params = match self.last_analysis.as_ref() {
            Some(snapshot) if self.cut_enabled => json!({
                "markers": snapshot.result.markers,
                "padding": self.controls.padding.value(),
            }),
            _ => {
                self.set_status(STATUS_NO_ANALYSIS);
                return None;
            }
        };
        self.set_status(STATUS_CUTTING);
        let reply = channel.eval_script(&script_call("cutSilence", &params));

        match decode_reply::<CutResult>(&reply) {
            Ok(Ok(result)) => {
                info!(session_id = %self.id, cuts = result.cut_count, "Cut finished");
                self.set_status(format!(
                    "Successfully cut {} silent sections.",
                    result.cut_count
                ));
                Some(result.cut_count)
            }
            Ok(Err(message)) => {
                warn!(session_id = %self.id, error = %message, "Cut failed");
                self.set_status(format!("Error: {}", message));
                None
            }
            Err(e) => {
                warn!(session_id = %self.id, error = %e, "Unreadable cut reply");
                self.set_status(format!("Error processing results: {}", e));
                None
            }
        }
    }
}

/// `name("<payload as a JSON string literal>")`.
fn script_call(function: &str, payload: &serde_json::Value) -> String {
    let literal = serde_json::Value::String(payload.to_string());
    format!("{}({})", function, literal)
}

fn decode_reply<T: DeserializeOwned>(reply: &str) -> serde_json::Result<Result<T, String>> {
    serde_json::from_str::<HostReply<T>>(reply).map(HostReply::into_result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::parse_call;

    /// Records scripts and answers from a queue.
    struct ScriptedChannel {
        replies: Vec<String>,
        scripts: Vec<String>,
    }

    impl ScriptedChannel {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: replies.iter().rev().map(|r| r.to_string()).collect(),
                scripts: Vec::new(),
            }
        }
    }

    impl EvalChannel for ScriptedChannel {
        fn eval_script(&mut self, script: &str) -> String {
            self.scripts.push(script.to_string());
            self.replies.pop().unwrap_or_default()
        }
    }

    const ANALYSIS: &str = r#"{"count":2,"totalDuration":2350.0,"markers":[{"start":1.0,"end":2.0,"duration":1.0},{"start":5.0,"end":6.35,"duration":1.35}],"sequenceDuration":60.0,"fps":30.0}"#;

    #[test]
    fn test_range_control_clamps_and_snaps() {
        let mut controls = PanelControls::default();
        assert_eq!(controls.threshold.display(), "-40 dB");
        assert_eq!(controls.min_duration.display(), "500 ms");
        assert_eq!(controls.padding.display(), "100 ms");

        assert_eq!(controls.threshold.set(-75), -60);
        assert_eq!(controls.threshold.set(0), -20);
        assert_eq!(controls.min_duration.set(1234), 1250);
        assert_eq!(controls.min_duration.set(30), 100);
        assert_eq!(controls.padding.set(47), 50);
        assert_eq!(controls.padding.set(999), 500);
    }

    #[test]
    fn test_initial_state() {
        let session = PanelSession::new();
        assert_eq!(session.status(), STATUS_READY);
        assert!(!session.cut_enabled());
        assert!(session.last_analysis().is_none());
        assert!(session.silence_count_text().is_none());
    }

    #[test]
    fn test_analyze_sends_string_params() {
        let mut channel = ScriptedChannel::new(&[ANALYSIS]);
        let mut session = PanelSession::new();
        session.controls.threshold.set(-35);

        session.analyze(&mut channel);

        let call = parse_call(&channel.scripts[0]).unwrap();
        assert_eq!(call.function, "analyzeSilence");
        let params: serde_json::Value = serde_json::from_str(&call.argument).unwrap();
        assert_eq!(params["threshold"], "-35");
        assert_eq!(params["minDuration"], "500");
        assert_eq!(params["padding"], "100");
    }

    #[test]
    fn test_analyze_success_updates_panel() {
        let mut channel = ScriptedChannel::new(&[ANALYSIS]);
        let mut session = PanelSession::new();

        let result = session.analyze(&mut channel).cloned().unwrap();
        assert_eq!(result.count, 2);
        assert_eq!(session.status(), STATUS_ANALYZED);
        assert!(session.cut_enabled());
        assert!(session.results_visible());
        assert_eq!(session.silence_count_text().unwrap(), "Silences found: 2");
        assert_eq!(
            session.total_duration_text().unwrap(),
            "Total silence duration: 2.35 sec"
        );
    }

    #[test]
    fn test_analyze_error_keeps_previous_result() {
        let mut channel = ScriptedChannel::new(&[
            ANALYSIS,
            r#"{"error":"No active sequence. Please select a sequence."}"#,
            "garbage",
        ]);
        let mut session = PanelSession::new();
        session.analyze(&mut channel);

        assert!(session.analyze(&mut channel).is_some());
        assert_eq!(
            session.status(),
            "Error: No active sequence. Please select a sequence."
        );
        assert!(!session.cut_enabled());

        session.analyze(&mut channel);
        assert!(session.status().starts_with("Error parsing results: "));
        assert_eq!(session.last_analysis().unwrap().result.count, 2);
    }

    #[test]
    fn test_cut_without_analysis() {
        let mut channel = ScriptedChannel::new(&[]);
        let mut session = PanelSession::new();

        assert_eq!(session.cut(&mut channel), None);
        assert_eq!(session.status(), STATUS_NO_ANALYSIS);
        assert!(channel.scripts.is_empty());
    }

    #[test]
    fn test_cut_disabled_after_failed_analysis() {
        let mut channel = ScriptedChannel::new(&[
            ANALYSIS,
            r#"{"error":"No active sequence. Please select a sequence."}"#,
        ]);
        let mut session = PanelSession::new();
        session.analyze(&mut channel);
        session.analyze(&mut channel);
        assert!(!session.cut_enabled());

        assert_eq!(session.cut(&mut channel), None);
        assert_eq!(session.status(), STATUS_NO_ANALYSIS);
        assert_eq!(channel.scripts.len(), 2);
        assert!(channel.scripts.iter().all(|s| s.starts_with("analyzeSilence(")));
    }

    #[test]
    fn test_cut_sends_markers_and_numeric_padding() {
        let mut channel = ScriptedChannel::new(&[ANALYSIS, r#"{"success":true,"cutCount":2}"#]);
        let mut session = PanelSession::new();
        session.analyze(&mut channel);
        session.controls.padding.set(200);

        assert_eq!(session.cut(&mut channel), Some(2));
        assert_eq!(session.status(), "Successfully cut 2 silent sections.");

        let call = parse_call(&channel.scripts[1]).unwrap();
        assert_eq!(call.function, "cutSilence");
        let params: serde_json::Value = serde_json::from_str(&call.argument).unwrap();
        assert_eq!(params["padding"], 200);
        assert_eq!(params["markers"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_cut_error_reply() {
        let mut channel = ScriptedChannel::new(&[
            ANALYSIS,
            r#"{"error":"Host operation failed: could not open undo group: busy"}"#,
            "",
        ]);
        let mut session = PanelSession::new();
        session.analyze(&mut channel);

        assert_eq!(session.cut(&mut channel), None);
        assert_eq!(
            session.status(),
            "Error: Host operation failed: could not open undo group: busy"
        );

        assert_eq!(session.cut(&mut channel), None);
        assert!(session.status().starts_with("Error processing results: "));
    }
}
