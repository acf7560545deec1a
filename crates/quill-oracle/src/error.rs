//! Error types for oracle configuration and generation

/// Backend cannot be constructed; fatal until an operator fixes it
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendConfigError {
    /// Provider credentials are absent
    #[error("missing oracle credentials: set {var}")]
    MissingCredentials {
        /// Environment variable that should carry the key
        var: &'static str,
    },
}

/// A generation call failed
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Transport-level failure reaching the oracle
    #[error("oracle request failed: {message}")]
    Upstream {
        /// Underlying cause, stringified
        message: String,
    },

    /// The oracle answered with a non-success status
    #[error("oracle returned http {status}: {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Error message surfaced by the provider, when parseable
        message: String,
    },

    /// The call exceeded the configured deadline
    #[error("oracle call timed out after {elapsed_ms}ms")]
    Timeout {
        /// Configured deadline in milliseconds
        elapsed_ms: u64,
    },

    /// The oracle returned a response with no usable completion
    #[error("oracle returned an empty completion")]
    EmptyCompletion,

    /// The response did not parse as JSON even after fence stripping
    #[error("malformed json from oracle: {detail}")]
    MalformedJson {
        /// Parser diagnostic
        detail: String,
        /// Leading fragment of the raw response
        snippet: String,
    },
}

impl GenerationError {
    /// Whether a single bounded retry is worth attempting
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Upstream { .. } | Self::Timeout { .. } => true,
            Self::Http { status, .. } => *status >= 500 || *status == 429,
            Self::EmptyCompletion | Self::MalformedJson { .. } => false,
        }
    }

    /// Malformed-JSON error keeping a bounded snippet of the raw response
    #[must_use]
    pub fn malformed_json(detail: impl Into<String>, raw: &str) -> Self {
        Self::MalformedJson {
            detail: detail.into(),
            snippet: raw.chars().take(120).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(GenerationError::Timeout { elapsed_ms: 1 }.is_retryable());
        assert!(GenerationError::Upstream {
            message: "reset".into()
        }
        .is_retryable());
        assert!(GenerationError::Http {
            status: 503,
            message: "overloaded".into()
        }
        .is_retryable());
        assert!(GenerationError::Http {
            status: 429,
            message: "slow down".into()
        }
        .is_retryable());

        assert!(!GenerationError::Http {
            status: 401,
            message: "bad key".into()
        }
        .is_retryable());
        assert!(!GenerationError::malformed_json("eof", "{").is_retryable());
    }

    #[test]
    fn malformed_json_bounds_the_snippet() {
        let raw = "x".repeat(500);
        match GenerationError::malformed_json("eof", &raw) {
            GenerationError::MalformedJson { snippet, .. } => assert_eq!(snippet.len(), 120),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
