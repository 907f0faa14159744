//! Reply envelope shared by every host entry point.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Failure reply: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// Serialize to the JSON string returned across the host boundary.
    pub fn to_json(&self) -> String {
        serde_json::json!({ "error": self.error }).to_string()
    }
}

/// A reply as seen by the caller: either an error or the typed success body.
///
/// The error arm is tried first, so a body carrying an `error` key is always
/// treated as a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum HostReply<T> {
    Failure(ErrorResponse),
    Success(T),
}

impl<T> HostReply<T> {
    pub fn into_result(self) -> Result<T, String> {
        match self {
            HostReply::Failure(e) => Err(e.error),
            HostReply::Success(v) => Ok(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CutResult;

    #[test]
    fn test_error_json() {
        let json = ErrorResponse::new("No active sequence. Please select a sequence.").to_json();
        assert_eq!(
            json,
            r#"{"error":"No active sequence. Please select a sequence."}"#
        );
    }

    #[test]
    fn test_reply_parsing() {
        let reply: HostReply<CutResult> =
            serde_json::from_str(r#"{"success":true,"cutCount":2}"#).unwrap();
        assert_eq!(reply.into_result(), Ok(CutResult::applied(2)));

        let reply: HostReply<CutResult> =
            serde_json::from_str(r#"{"error":"boom"}"#).unwrap();
        assert_eq!(reply.into_result(), Err("boom".to_string()));
    }
}
