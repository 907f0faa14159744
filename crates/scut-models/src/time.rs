//! Host time units.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Host ticks per second.
pub const TICKS_PER_SECOND: i64 = 254_016_000_000;

/// A position on the host timeline in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Ticks(pub i64);

impl Ticks {
    /// Convert seconds to the nearest tick.
    pub fn from_seconds(seconds: f64) -> Self {
        Self((seconds * TICKS_PER_SECOND as f64).round() as i64)
    }

    pub fn as_seconds(&self) -> f64 {
        self.0 as f64 / TICKS_PER_SECOND as f64
    }
}

impl fmt::Display for Ticks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_conversion() {
        assert_eq!(Ticks::from_seconds(1.0), Ticks(TICKS_PER_SECOND));
        assert_eq!(Ticks::from_seconds(0.5).0, TICKS_PER_SECOND / 2);
        assert!((Ticks::from_seconds(10.2).as_seconds() - 10.2).abs() < 1e-9);
    }

    #[test]
    fn test_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Ticks(42)).unwrap(), "42");
    }
}
