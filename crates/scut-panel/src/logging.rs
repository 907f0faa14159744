//! Structured request logging and subscriber setup.
//!
//! Every bridge call gets a request id so the start, completion and error
//! lines of one request can be matched up.

use tracing::{error, info, Span};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

/// Longest payload excerpt written to the log.
const PAYLOAD_PREVIEW_CHARS: usize = 100;

/// Request logger for structured logging with consistent formatting.
#[derive(Debug, Clone)]
pub struct RequestLogger {
    request_id: String,
    method: String,
}

impl RequestLogger {
    /// Create a logger for one call of `method` with a fresh request id.
    pub fn new(method: &str) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            method: method.to_string(),
        }
    }

    /// Log the start of a request with a preview of its payload.
    pub fn log_start(&self, payload: &str) {
        info!(
            request_id = %self.request_id,
            method = %self.method,
            payload_len = payload.len(),
            payload = %preview(payload),
            "Request started"
        );
    }

    /// Log a successful reply.
    pub fn log_completion(&self, reply: &str) {
        info!(
            request_id = %self.request_id,
            method = %self.method,
            reply_len = reply.len(),
            "Request completed"
        );
    }

    /// Log a failed request.
    pub fn log_error(&self, message: &str) {
        error!(
            request_id = %self.request_id,
            method = %self.method,
            "Request failed: {}", message
        );
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Create a tracing span for this request.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "request",
            request_id = %self.request_id,
            method = %self.method
        )
    }
}

/// First [`PAYLOAD_PREVIEW_CHARS`] characters of `payload`.
fn preview(payload: &str) -> String {
    let mut chars = payload.chars();
    let head: String = chars.by_ref().take(PAYLOAD_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// Install the global subscriber: JSON lines or human-readable, always on stderr.
///
/// stdout belongs to the evaluation channel, so logs must never go there.
pub fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("scut_panel=info,scut_media=info"));

    if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}
