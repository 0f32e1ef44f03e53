//! Error type shared by the valuation core and its collaborators.

/// Failure kinds surfaced by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Malformed or out-of-domain input to a pure function.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The price oracle result lacks a required asset.
    #[error("Missing price for '{0}'")]
    MissingPrice(String),
    /// An I/O collaborator was unreachable or returned a protocol-level failure.
    #[error("Upstream error: {0}")]
    Upstream(String),
    /// The indexer has no record for the requested identifier.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Creates an `InvalidInput` error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Creates an `Upstream` error.
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Whether retrying the same request could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }
}

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_upstream_is_retryable() {
        assert!(Error::upstream("timeout").is_retryable());
        assert!(!Error::invalid_input("ratio").is_retryable());
        assert!(!Error::MissingPrice("ethereum".into()).is_retryable());
        assert!(!Error::NotFound("42".into()).is_retryable());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::MissingPrice("usd-coin".into()).to_string(),
            "Missing price for 'usd-coin'"
        );
        assert_eq!(
            Error::NotFound("position 7".into()).to_string(),
            "Not found: position 7"
        );
    }
}
