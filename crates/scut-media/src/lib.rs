//! Silence detection and cut planning.
//!
//! This crate holds the panel's core logic, independent of any host editor:
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ Audio / span │───►│ Detector     │───►│ Markers      │
//! │ (duration)   │    │ (level|rand) │    │ (ascending)  │
//! └──────────────┘    └──────────────┘    └──────────────┘
//!                                                │
//!                                                ▼
//!                     ┌──────────────┐    ┌──────────────┐
//!                     │ Host ripple  │◄───│ Cut planner  │
//!                     │ deletes      │    │ (descending) │
//!                     └──────────────┘    └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use scut_media::{plan_cuts, Analyzer, DetectRequest, DetectionConfig};
//!
//! let mut analyzer = Analyzer::new(DetectionConfig::default());
//! let markers = analyzer.analyze(&DetectRequest::new(60.0, -40.0, 500, 30.0))?;
//! let plan = plan_cuts(&markers, 100)?;
//! ```

pub mod audio;
pub mod config;
pub mod detect;
pub mod error;
pub mod planner;
pub mod segmenter;
pub mod stats;

pub use audio::{AudioBuffer, SILENCE_FLOOR_DB};
pub use config::{DetectionConfig, DetectorMode};
pub use detect::{Analyzer, DetectRequest, LevelDetector, RandomDetector, SilenceDetector};
pub use error::{DetectError, DetectResult};
pub use planner::{plan_cuts, CutPlan};
pub use segmenter::SilenceSegmenter;
pub use stats::{compute_marker_stats, MarkerStats};
