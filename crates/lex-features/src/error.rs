//! Error types for feature facades
//!
//! Every user-visible failure originates here: either the remote service
//! rejected a call, or the current view state does not allow the action.

/// Errors reported by the remote service
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Transport failure or timeout
    #[error("network error: {0}")]
    Network(String),

    /// Request rejected by the backend
    #[error("request rejected ({status}): {message}")]
    Rejected {
        /// HTTP status
        status: u16,
        /// Backend message
        message: String,
    },

    /// Entity does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Session expired or missing permission
    #[error("unauthorized")]
    Unauthorized,
}

impl ApiError {
    /// Create rejection error
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Whether retrying the same request may succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(_) => true,
            ApiError::Rejected { status, .. } => *status >= 500,
            ApiError::NotFound(_) | ApiError::Unauthorized => false,
        }
    }
}

/// Errors from feature actions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureError {
    /// No conversation is open
    #[error("no active conversation")]
    NoActiveConversation,

    /// Draft is blank
    #[error("message is empty")]
    EmptyMessage,

    /// Some selected documents could not be deleted
    #[error("{failed} of {attempted} deletions failed: {first}")]
    PartialDelete {
        /// Deletions attempted
        attempted: usize,
        /// Deletions that failed
        failed: usize,
        /// First failure
        first: ApiError,
    },

    /// Remote call failed
    #[error("remote call failed: {0}")]
    Api(#[from] ApiError),
}

impl FeatureError {
    /// Whether the error comes from the view state rather than the backend
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(self, FeatureError::NoActiveConversation | FeatureError::EmptyMessage)
    }
}
