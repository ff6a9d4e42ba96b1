//! Error types for slot suggestion requests.

use slot_engine::SlotError;
use thiserror::Error;

/// Everything a suggestion request can fail with.
///
/// Callers show all of these as a single flat message; an empty list of
/// suggestions is a success, never an error.
#[derive(Error, Debug)]
pub enum SuggestError {
    /// No session, or the session carries no access token, or the provider
    /// rejected the token.
    #[error("Not authenticated or access token is missing")]
    NotAuthenticated,

    /// The calendar provider call failed or answered with an unexpected shape.
    #[error("Failed to fetch {context}: {message}")]
    UpstreamFailure {
        context: &'static str,
        message: String,
    },

    /// Malformed date range, non-positive duration, bad working window.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SuggestError {
    pub(crate) fn upstream(context: &'static str, message: impl Into<String>) -> Self {
        SuggestError::UpstreamFailure {
            context,
            message: message.into(),
        }
    }
}

impl From<SlotError> for SuggestError {
    fn from(err: SlotError) -> Self {
        match err {
            SlotError::InvalidArgument(msg) => SuggestError::InvalidArgument(msg),
        }
    }
}

/// Convenience alias used throughout slot-suggest.
pub type Result<T> = std::result::Result<T, SuggestError>;
