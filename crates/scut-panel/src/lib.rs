//! Host bridge and panel session for the silence cutter.
//!
//! The editor is reached only through [`HostEditor`]. [`Bridge`] exposes the
//! two entry points (`analyzeSilence`, `cutSilence`) as a method table behind
//! a text evaluation channel, and [`PanelSession`] models the panel that
//! drives it.

pub mod bridge;
pub mod config;
pub mod error;
pub mod executor;
pub mod handlers;
pub mod host;
pub mod logging;
pub mod metrics;
pub mod session;
pub mod timeline;

pub use bridge::{parse_call, Bridge, EvalChannel, ScriptCall};
pub use config::{BridgeConfig, DemoTimelineConfig};
pub use error::{PanelError, PanelResult};
pub use executor::{execute_plan, CutFailure, CutOutcome, UNDO_GROUP_LABEL};
pub use handlers::{analyze_silence, cut_silence, run_analyze, run_cut};
pub use host::{AudioTrackInfo, HostEditor, HostError, HostResult, SequenceInfo};
pub use logging::RequestLogger;
pub use session::{AnalysisSnapshot, PanelControls, PanelSession, RangeControl};
pub use timeline::{EditRecord, SimulatedTimeline};
