//! Panel error types.
//!
//! Every variant renders the message shown verbatim in the panel's status
//! area, so the `Display` text is user-facing.

use scut_media::DetectError;
use thiserror::Error;
use validator::ValidationErrors;

use crate::host::HostError;

pub type PanelResult<T> = Result<T, PanelError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PanelError {
    #[error("Failed to parse parameters: {0}")]
    InputParse(String),

    #[error("{0}")]
    HostUnavailable(String),

    #[error("No active sequence. Please select a sequence.")]
    NoActiveSequence,

    #[error("No audio tracks found in the sequence.")]
    NoAudioTracks,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Host operation failed: {0}")]
    HostOperationFailed(String),
}

impl PanelError {
    pub fn input_parse(msg: impl Into<String>) -> Self {
        Self::InputParse(msg.into())
    }

    pub fn host_unavailable(msg: impl Into<String>) -> Self {
        Self::HostUnavailable(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn host_operation_failed(msg: impl Into<String>) -> Self {
        Self::HostOperationFailed(msg.into())
    }

    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            PanelError::InputParse(_) => "input_parse",
            PanelError::HostUnavailable(_) => "host_unavailable",
            PanelError::NoActiveSequence => "no_active_sequence",
            PanelError::NoAudioTracks => "no_audio_tracks",
            PanelError::InvalidInput(_) => "invalid_input",
            PanelError::HostOperationFailed(_) => "host_operation_failed",
        }
    }
}

impl From<serde_json::Error> for PanelError {
    fn from(e: serde_json::Error) -> Self {
        Self::InputParse(e.to_string())
    }
}

impl From<ValidationErrors> for PanelError {
    fn from(e: ValidationErrors) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

impl From<DetectError> for PanelError {
    fn from(e: DetectError) -> Self {
        match e {
            DetectError::InvalidInput(msg) => Self::InvalidInput(msg),
            DetectError::NoAudioData => {
                Self::HostUnavailable("No audio data available from the sequence.".to_string())
            }
        }
    }
}

impl From<HostError> for PanelError {
    fn from(e: HostError) -> Self {
        match e {
            HostError::ProjectUnavailable => {
                Self::HostUnavailable("Could not access the editor project.".to_string())
            }
            HostError::TracksUnavailable => {
                Self::HostUnavailable("Could not access audio tracks.".to_string())
            }
            HostError::Operation(msg) => Self::HostOperationFailed(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            PanelError::NoActiveSequence.to_string(),
            "No active sequence. Please select a sequence."
        );
        assert_eq!(
            PanelError::NoAudioTracks.to_string(),
            "No audio tracks found in the sequence."
        );
        assert_eq!(
            PanelError::input_parse("expected value").to_string(),
            "Failed to parse parameters: expected value"
        );
    }

    #[test]
    fn test_conversions() {
        let e: PanelError = DetectError::invalid_input("bad").into();
        assert_eq!(e, PanelError::InvalidInput("bad".to_string()));
        assert_eq!(e.kind(), "invalid_input");

        let e: PanelError = HostError::Operation("locked".to_string()).into();
        assert_eq!(e.kind(), "host_operation_failed");

        let e: PanelError = HostError::ProjectUnavailable.into();
        assert_eq!(e.kind(), "host_unavailable");

        let e: PanelError = serde_json::from_str::<u32>("{").unwrap_err().into();
        assert_eq!(e.kind(), "input_parse");
    }
}
