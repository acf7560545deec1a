//! Transport seam to the oracle

use crate::error::GenerationError;
use async_trait::async_trait;

/// One completion request, as the transport sees it
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Fully framed prompt
    pub prompt: String,
    /// Sampling temperature
    pub temperature: f64,
    /// Output-size ceiling in tokens
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Request with the given prompt and temperature
    #[must_use]
    pub fn new(prompt: impl Into<String>, temperature: f64, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            temperature,
            max_tokens,
        }
    }
}

/// Raw completion transport
///
/// Implementations return the completion text verbatim; normalization and
/// parsing happen in [`crate::GenerationClient`]. A scripted in-memory
/// backend stands in for the network in tests.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Stable backend name for diagnostics
    fn name(&self) -> &'static str;

    /// Run one completion
    ///
    /// # Errors
    /// `GenerationError` on transport failure or a provider-side error.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GenerationError>;
}
