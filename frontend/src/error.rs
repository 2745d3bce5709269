//! Error taxonomy shared by the controllers and the transport layer.
//!
//! * [`ValidationError`] – input rejected before any network call.
//! * [`TransportError`] – anything that went wrong on the wire.  Always
//!   recovered at the controller boundary; never shown verbatim to the user.
//! * [`PrecondViolation`] – a broken conversation invariant.  Programming
//!   defect, logged but not surfaced.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("a submission is already in flight")]
    SubmissionPending,
    #[error("file is missing or not a PDF")]
    InvalidFileType,
}

/// Failure of one of the three transport operations.
///
/// `Clone` because a single session-creation failure is observed by every
/// caller waiting on the shared in-flight request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never produced an HTTP response (offline, CORS, DNS...).
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx status.  `body` is the raw response text, possibly empty.
    #[error("server responded with status {status}")]
    Status { status: u16, body: String },
    /// A 2xx response whose body could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),
    /// The browser APIs needed to issue the request are missing.
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

impl TransportError {
    /// Display message carried by the failure payload, if any.
    ///
    /// The payload must be a JSON object whose `error` member is a string
    /// with visible content.  Every other shape (non-JSON text, arrays,
    /// numbers, a missing, non-string or blank `error`) yields `None`.
    pub fn payload_message(&self) -> Option<String> {
        let TransportError::Status { body, .. } = self else {
            return None;
        };
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        let message = value.as_object()?.get("error")?.as_str()?.trim();
        if message.is_empty() {
            None
        } else {
            Some(message.to_string())
        }
    }

    /// User-facing text: the payload message, or `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.payload_message()
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PrecondViolation {
    #[error("conversation log is empty")]
    EmptyLog,
    #[error("last turn is not an assistant turn")]
    NotAssistantTurn,
    #[error("last assistant turn is not pending")]
    NotPending,
}
