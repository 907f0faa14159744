//! Error types for detection and planning.

use thiserror::Error;

/// Result type for detection and planning.
pub type DetectResult<T> = Result<T, DetectError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DetectError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No audio data available for level analysis")]
    NoAudioData,
}

impl DetectError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
