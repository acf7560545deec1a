//! Pipeline-level error taxonomy

use crate::store::StoreError;
use quill_domain::{IdeaId, IdeaStatus, SettingsError};
use quill_guard::GuardViolation;
use quill_limiter::RateLimitExceeded;
use quill_oracle::{BackendConfigError, GenerationError};

/// Everything a pipeline entry point can fail with
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Missing or invalid configuration; fatal until an operator fixes it
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Input or output rejected by the policy guard; fails closed
    #[error("policy violation: {0}")]
    Guard(#[from] GuardViolation),

    /// Actor over budget; retryable after the window elapses
    #[error(transparent)]
    RateLimited(#[from] RateLimitExceeded),

    /// Oracle response did not match the expected shape; not retryable
    /// without re-invoking the whole operation
    #[error("oracle response failed validation: {0}")]
    Validation(String),

    /// Oracle call failure, timeout or unparsable payload
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// No idea with the given id
    #[error("idea not found: {0}")]
    IdeaNotFound(IdeaId),

    /// Drafting requested for an idea that was never approved
    #[error("idea {id} is {status:?}, drafting requires an approved idea")]
    IdeaNotApproved {
        /// The idea in question
        id: IdeaId,
        /// Its current status
        status: IdeaStatus,
    },

    /// Persistence collaborator failure
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<SettingsError> for PipelineError {
    fn from(err: SettingsError) -> Self {
        Self::Configuration(err.to_string())
    }
}

impl From<BackendConfigError> for PipelineError {
    fn from(err: BackendConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

impl PipelineError {
    /// Whether the caller may usefully retry the same call later
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited(_) => true,
            Self::Generation(err) => err.is_retryable(),
            Self::Store(StoreError::Unavailable(_)) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        let rate = PipelineError::RateLimited(RateLimitExceeded {
            actor: "u1".into(),
            retry_after: std::time::Duration::from_secs(30),
        });
        assert!(rate.is_retryable());

        assert!(!PipelineError::Configuration("no settings".into()).is_retryable());
        assert!(!PipelineError::Validation("missing field".into()).is_retryable());
        assert!(
            PipelineError::Store(StoreError::Unavailable("down".into())).is_retryable()
        );
    }

    #[test]
    fn settings_error_maps_to_configuration() {
        let err: PipelineError = SettingsError::MissingTargetNiches.into();
        assert!(matches!(err, PipelineError::Configuration(_)));
    }

    #[test]
    fn missing_credentials_map_to_configuration() {
        let err: PipelineError = BackendConfigError::MissingCredentials {
            var: "QUILL_ORACLE_API_KEY",
        }
        .into();
        assert!(matches!(err, PipelineError::Configuration(_)));
    }
}
