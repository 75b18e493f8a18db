use thiserror::Error;

/// A single completion attempt against one provider failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// Quota or rate limit hit; retrying the same provider is pointless.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The provider refused the request (unknown model, bad request...).
    #[error("Request rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// Network hiccup or server error; worth retrying.
    #[error("Transient failure: {0}")]
    Transient(String),

    #[error("Empty response")]
    EmptyResponse,
}

impl CompletionError {
    /// Whether the rotation should move on without retrying this provider.
    pub fn skips_provider(&self) -> bool {
        matches!(self, CompletionError::RateLimited | CompletionError::Rejected { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("All providers exhausted after {attempts} attempts")]
    AllProvidersExhausted { attempts: usize },
}
