//! Error types for external availability waits.

use std::time::Duration;

use thiserror::Error;

use crate::state::CompletionState;

/// Boxed source error for cluster access failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for wait operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for wait failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The wait request was malformed. Nothing was polled.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The time budget ran out before every service became available.
    #[error("exceeded the {timeout:?} timeout waiting for external availability: {state}")]
    Timeout {
        /// The configured time budget.
        timeout: Duration,
        /// Completion state at the moment the budget ran out.
        state: CompletionState,
    },

    /// A cluster snapshot could not be obtained.
    #[error("cluster access failed: {source}")]
    Client {
        /// The underlying client failure.
        #[source]
        source: BoxError,
        /// Completion state when the failure occurred, if polling had started.
        state: Option<CompletionState>,
    },
}

impl Error {
    /// Creates an invalid argument error with the given message.
    #[must_use]
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Creates a client error from any underlying failure.
    #[must_use]
    pub fn client(source: impl Into<BoxError>) -> Self {
        Self::Client {
            source: source.into(),
            state: None,
        }
    }

    /// Attaches diagnostic state to a client error.
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn with_state(self, current: &CompletionState) -> Self {
        match self {
            Self::Client { source, .. } => Self::Client {
                source,
                state: Some(current.clone()),
            },
            other => other,
        }
    }

    /// Returns the completion state captured with this error, if any.
    #[must_use]
    pub fn state(&self) -> Option<&CompletionState> {
        match self {
            Self::Timeout { state, .. } => Some(state),
            Self::Client { state, .. } => state.as_ref(),
            Self::InvalidArgument(_) => None,
        }
    }
}

impl From<kube::Error> for Error {
    fn from(e: kube::Error) -> Self {
        Self::client(e)
    }
}
