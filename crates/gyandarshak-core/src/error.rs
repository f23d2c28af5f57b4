//! API and flow error types.
//!
//! `ApiError` is defined in `gyandarshak-core` so the test-attempt flow can
//! turn any failed call into the message shown to the student without
//! depending on the HTTP client crate.

use thiserror::Error;

/// Errors that can occur when talking to the counselling API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The credential was missing, expired, or not allowed (HTTP 401/403).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The server answered with an error status and a message.
    #[error("API error (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The message to show the user.
    ///
    /// Server-reported messages are returned verbatim; transport failures get
    /// a short readable sentence.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized(message) | ApiError::Rejected { message, .. } => {
                message.clone()
            }
            ApiError::Network(detail) => format!("Could not reach the server: {detail}"),
            ApiError::Timeout(secs) => format!("The server did not respond within {secs}s"),
            ApiError::Decode(detail) => format!("Unexpected response from the server: {detail}"),
        }
    }

    /// Returns `true` if the credential should be refreshed before retrying.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}

/// Invalid transitions of the test-attempt flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// `start` was called while an attempt or result is on screen.
    #[error("an attempt is already open")]
    AttemptOpen,

    /// An answering operation was called with no open attempt.
    #[error("no attempt is being answered")]
    NotAnswering,

    /// A submission for this attempt is still outstanding.
    #[error("a submission is already in progress")]
    SubmitInFlight,

    /// `complete_submit` was called without a matching `begin_submit`.
    #[error("no submission is in progress")]
    NotSubmitting,

    /// `exit_result` was called with no result on screen.
    #[error("no result to leave")]
    NoResult,

    /// The underlying API call failed. The message is also kept on the flow.
    #[error(transparent)]
    Api(#[from] ApiError),
}
