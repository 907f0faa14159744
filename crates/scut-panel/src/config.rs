//! Bridge configuration.

use scut_media::{DetectionConfig, DetectorMode};

/// Shape of the in-memory sequence the bridge binary edits.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoTimelineConfig {
    /// Sequence length in seconds
    pub duration_secs: f64,
    pub fps: f64,
    /// Audio tracks, each holding one clip
    pub audio_tracks: usize,
}

impl Default for DemoTimelineConfig {
    fn default() -> Self {
        Self {
            duration_secs: 300.0, // 5 minutes
            fps: 30.0,
            audio_tracks: 1,
        }
    }
}

/// Bridge configuration.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub detection: DetectionConfig,
    /// Emit JSON log lines instead of the human-readable format
    pub log_json: bool,
    pub demo: DemoTimelineConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            detection: DetectionConfig::default(),
            log_json: false,
            demo: DemoTimelineConfig::default(),
        }
    }
}

impl BridgeConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from any key lookup. Unset or unparsable values keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|s| s.trim().parse::<f64>().ok());

        // The preset sets the base; the individual keys below refine it.
        let mut detection = match lookup("SCUT_PRESET").map(|s| s.trim().to_lowercase()).as_deref() {
            Some("aggressive") => DetectionConfig::aggressive(),
            Some("conservative") => DetectionConfig::conservative(),
            _ => defaults.detection,
        };
        if let Some(db) = parsed("SCUT_THRESHOLD_DB").filter(|v| v.is_finite()) {
            detection = detection.with_threshold_db(db);
        }
        if let Some(ms) = lookup("SCUT_MIN_SILENCE_MS").and_then(|s| s.trim().parse::<i64>().ok()) {
            detection = detection.with_min_silence_ms(ms);
        }
        if let Some(mode) = lookup("SCUT_DETECTOR").and_then(|s| s.parse::<DetectorMode>().ok()) {
            detection = detection.with_mode(mode);
        }
        if let Some(seed) = lookup("SCUT_SEED").and_then(|s| s.trim().parse::<u64>().ok()) {
            detection = detection.with_seed(seed);
        }
        if let Some(window_ms) = lookup("SCUT_WINDOW_MS").and_then(|s| s.trim().parse::<u32>().ok()) {
            detection = detection.with_window_ms(window_ms);
        }
        if let Some(db) = parsed("SCUT_HYSTERESIS_DB").filter(|v| v.is_finite() && *v >= 0.0) {
            detection = detection.with_hysteresis_db(db);
        }

        let demo = DemoTimelineConfig {
            duration_secs: parsed("SCUT_DEMO_DURATION_SECS")
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(defaults.demo.duration_secs),
            fps: parsed("SCUT_DEMO_FPS")
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(defaults.demo.fps),
            audio_tracks: lookup("SCUT_DEMO_AUDIO_TRACKS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.demo.audio_tracks),
        };

        Self {
            detection,
            log_json: lookup("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            demo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> BridgeConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BridgeConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.detection.mode, DetectorMode::Auto);
        assert_eq!(config.detection.seed, None);
        assert!(!config.log_json);
        assert_eq!(config.demo, DemoTimelineConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SCUT_DETECTOR", "random"),
            ("SCUT_SEED", "42"),
            ("SCUT_WINDOW_MS", "10"),
            ("SCUT_HYSTERESIS_DB", "1.5"),
            ("SCUT_DEMO_DURATION_SECS", "90"),
            ("SCUT_DEMO_FPS", "25"),
            ("SCUT_DEMO_AUDIO_TRACKS", "2"),
            ("LOG_FORMAT", "JSON"),
        ]);

        assert_eq!(config.detection.mode, DetectorMode::Simulated);
        assert_eq!(config.detection.seed, Some(42));
        assert_eq!(config.detection.window_ms, 10);
        assert_eq!(config.detection.hysteresis_db, 1.5);
        assert_eq!(config.demo.duration_secs, 90.0);
        assert_eq!(config.demo.fps, 25.0);
        assert_eq!(config.demo.audio_tracks, 2);
        assert!(config.log_json);
    }

    #[test]
    fn test_preset_with_detection_overrides() {
        let config = config_from(&[("SCUT_PRESET", "Conservative")]);
        assert_eq!(config.detection.threshold_db, -50.0);
        assert_eq!(config.detection.min_silence_ms, 1500);
        assert_eq!(config.detection.window_ms, 30);

        let config = config_from(&[
            ("SCUT_PRESET", "aggressive"),
            ("SCUT_THRESHOLD_DB", "-45"),
            ("SCUT_MIN_SILENCE_MS", "800"),
        ]);
        assert_eq!(config.detection.threshold_db, -45.0);
        assert_eq!(config.detection.min_silence_ms, 800);
        assert_eq!(config.detection.window_ms, 10);
        assert_eq!(config.detection.hysteresis_db, 2.0);

        let config = config_from(&[("SCUT_PRESET", "loud"), ("SCUT_THRESHOLD_DB", "-500")]);
        assert_eq!(config.detection.threshold_db, -120.0);
        assert_eq!(config.detection.min_silence_ms, 500);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = config_from(&[
            ("SCUT_DETECTOR", "neural"),
            ("SCUT_SEED", "-1"),
            ("SCUT_HYSTERESIS_DB", "-3"),
            ("SCUT_DEMO_FPS", "0"),
            ("SCUT_DEMO_DURATION_SECS", "abc"),
            ("SCUT_MIN_SILENCE_MS", "half"),
        ]);

        assert_eq!(config.detection.mode, DetectorMode::Auto);
        assert_eq!(config.detection.seed, None);
        assert_eq!(config.detection.hysteresis_db, 3.0);
        assert_eq!(config.detection.min_silence_ms, 500);
        assert_eq!(config.demo.fps, 30.0);
        assert_eq!(config.demo.duration_secs, 300.0);
    }
}
