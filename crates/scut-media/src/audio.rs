//! Mono audio buffers and level measurement.

/// Level reported for a window of pure digital silence.
pub const SILENCE_FLOOR_DB: f64 = -120.0;

/// Mono f32 samples at a fixed rate.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    pub sample_rate: u32,
    pub samples: Vec<f32>,
}

impl AudioBuffer {
    pub fn new(sample_rate: u32, samples: Vec<f32>) -> Self {
        Self {
            sample_rate,
            samples,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Length in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    fn sample_index(&self, seconds: f64) -> usize {
        let index = (seconds.max(0.0) * self.sample_rate as f64).round() as usize;
        index.min(self.samples.len())
    }

    /// Remove `[start, end)` seconds, shifting later samples earlier.
    ///
    /// Returns the number of samples removed.
    pub fn remove_range(&mut self, start_secs: f64, end_secs: f64) -> usize {
        let start = self.sample_index(start_secs);
        let end = self.sample_index(end_secs);
        if end <= start {
            return 0;
        }
        self.samples.drain(start..end);
        end - start
    }

    /// Split into windows of `window_ms` and yield `(window_start_secs, level_db)`.
    ///
    /// The trailing partial window is measured too so the end of the buffer
    /// is never ignored.
    pub fn window_levels(&self, window_ms: u32) -> Vec<(f64, f64)> {
        if self.sample_rate == 0 || self.samples.is_empty() {
            return Vec::new();
        }
        let window_len = ((self.sample_rate as u64 * window_ms.max(1) as u64) / 1000).max(1) as usize;

        self.samples
            .chunks(window_len)
            .enumerate()
            .map(|(i, chunk)| {
                let start = (i * window_len) as f64 / self.sample_rate as f64;
                (start, rms_db(chunk))
            })
            .collect()
    }
}

/// RMS level of `samples` in dBFS, floored at [`SILENCE_FLOOR_DB`].
pub fn rms_db(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return SILENCE_FLOOR_DB;
    }
    let sum_sq: f64 = samples.iter().map(|s| (*s as f64) * (*s as f64)).sum();
    let rms = (sum_sq / samples.len() as f64).sqrt();
    if rms <= 0.0 {
        return SILENCE_FLOOR_DB;
    }
    (20.0 * rms.log10()).max(SILENCE_FLOOR_DB)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rms_db_levels() {
        assert_eq!(rms_db(&[]), SILENCE_FLOOR_DB);
        assert_eq!(rms_db(&[0.0; 64]), SILENCE_FLOOR_DB);
        // Full-scale square wave sits at 0 dBFS.
        assert!(rms_db(&[1.0, -1.0, 1.0, -1.0]).abs() < 1e-9);
        // 0.01 amplitude is -40 dBFS.
        assert!((rms_db(&[0.01, -0.01]) + 40.0).abs() < 1e-6);
    }

    #[test]
    fn test_window_levels() {
        let mut samples = vec![0.5f32; 100];
        samples.extend(vec![0.0f32; 50]);
        let buffer = AudioBuffer::new(1000, samples);

        // 50 ms windows at 1 kHz = 50 samples each.
        let levels = buffer.window_levels(50);
        assert_eq!(levels.len(), 3);
        assert_eq!(levels[0].0, 0.0);
        assert!((levels[2].0 - 0.1).abs() < 1e-9);
        assert!(levels[0].1 > -7.0);
        assert_eq!(levels[2].1, SILENCE_FLOOR_DB);
    }

    #[test]
    fn test_remove_range() {
        let mut buffer = AudioBuffer::new(10, (0..100).map(|i| i as f32).collect());
        assert!((buffer.duration_secs() - 10.0).abs() < 1e-9);

        let removed = buffer.remove_range(2.0, 3.5);
        assert_eq!(removed, 15);
        assert_eq!(buffer.samples.len(), 85);
        assert_eq!(buffer.samples[20], 35.0);

        assert_eq!(buffer.remove_range(5.0, 5.0), 0);
        assert_eq!(buffer.remove_range(50.0, 60.0), 0);
    }
}
