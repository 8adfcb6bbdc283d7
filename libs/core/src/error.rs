//! Typed delivery failures surfaced by the publish fan-out.

use thiserror::Error;

/// Legacy marker some broker integrations prefix to error payload text.
/// Internally errors are typed; the marker only matters at the wire boundary.
pub const ERROR_MARKER: &str = "[Error]";

/// Failure of a publish attempt. Terminal for the request: the gateway never
/// retries, it maps the error to an HTTP 400.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The broker could not be reached at all.
    #[error("broker unreachable: {reason}")]
    Unreachable { reason: String },
    /// The broker refused the publish (unknown or malformed topic,
    /// authorization failure).
    #[error("publish rejected: {reason}")]
    Rejected { reason: String },
}

impl PublishError {
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self::Unreachable {
            reason: reason.into(),
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Text embedded in the caller-facing error body, with any legacy
    /// `[Error]` marker stripped from broker-supplied reasons.
    pub fn wire_message(&self) -> &str {
        match self {
            Self::Unreachable { reason } | Self::Rejected { reason } => strip_error_marker(reason),
        }
    }
}

/// Removes a leading `[Error]` marker and the whitespace after it.
pub fn strip_error_marker(text: &str) -> &str {
    text.strip_prefix(ERROR_MARKER)
        .map(str::trim_start)
        .unwrap_or(text)
}
