//! Shared data models for the silence cutter panel.
//!
//! This crate provides Serde-serializable types for:
//! - Silence markers and analysis results
//! - Cut requests, cut ranges and cut results
//! - Host time units (ticks)
//! - The `{error}` reply envelope shared by every entry point

pub mod analysis;
pub mod cut;
pub mod marker;
pub mod response;
pub mod time;
pub mod utils;

// Re-export common types
pub use analysis::{AnalysisResult, AnalyzeParams};
pub use cut::{CutRange, CutRequest, CutResult};
pub use marker::{total_duration_ms, MarkerError, SilenceMarker};
pub use response::{ErrorResponse, HostReply};
pub use time::{Ticks, TICKS_PER_SECOND};
