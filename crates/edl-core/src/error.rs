use thiserror::Error;

/// Result type alias for EDL operations
pub type Result<T> = std::result::Result<T, EdlError>;

/// Errors that can occur while building or serving an EDL feed
#[derive(Error, Debug)]
pub enum EdlError {
    /// Invalid or missing configuration parameter
    #[error("configuration error: {0}")]
    Config(String),

    /// Formatting indicators into an output encoding failed
    #[error("format error: {0}")]
    Format(String),

    /// Authentication against the indicator store failed
    #[error("authentication failed: invalid store credentials")]
    Unauthorized,

    /// Store rate limit exceeded
    #[error("rate limit exceeded, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after: Option<u64>,
    },

    /// Indicator store returned an error response
    #[error("store error ({code}): {message}")]
    Store {
        /// HTTP status code
        code: u16,
        /// Error message from the store
        message: String,
    },

    /// HTTP request to the store failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Store request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl EdlError {
    /// Returns true if the error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Timeout(_) | Self::Http(_)
        )
    }

    /// Returns true if the error came from the indicator store
    #[must_use]
    pub const fn is_store_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized
                | Self::RateLimited { .. }
                | Self::Store { .. }
                | Self::Http(_)
                | Self::Timeout(_)
        )
    }

    /// Returns true for configuration-class errors that must not be retried
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Format(_))
    }

    /// Returns the HTTP status code if this is a store API error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::RateLimited { .. } => Some(429),
            Self::Store { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(EdlError::Timeout(30).is_retryable());
        assert!(EdlError::Timeout(30).is_store_error());
        assert!(!EdlError::Config("bad port".into()).is_retryable());
        assert!(EdlError::Format("csv".into()).is_config_error());
        assert!(!EdlError::Unauthorized.is_retryable());
    }

    #[test]
    fn test_status_code() {
        assert_eq!(EdlError::Unauthorized.status_code(), Some(401));
        let err = EdlError::Store {
            code: 503,
            message: "unavailable".into(),
        };
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(EdlError::Http("reset".into()).status_code(), None);
    }
}
