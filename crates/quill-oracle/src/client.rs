//! The generation client: normalization, timeout and bounded retry

use crate::backend::{CompletionBackend, CompletionRequest};
use crate::error::GenerationError;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Instruction appended to every structured-shape prompt
const JSON_ONLY_INSTRUCTION: &str =
    "Respond with pure JSON only. No markdown fences, no commentary, no text outside the JSON.";

/// Temperature used for structured JSON completions
pub(crate) const JSON_TEMPERATURE: f64 = 0.4;

/// Client over a completion backend
///
/// Adds the behavior the raw transport does not have: a bounded deadline
/// per call, a single retry with backoff on retryable failures, strict
/// framing for JSON responses and code-fence normalization before
/// parsing.
#[derive(Clone)]
pub struct GenerationClient {
    backend: Arc<dyn CompletionBackend>,
    timeout: Duration,
    max_tokens: u32,
    retry_backoff: Duration,
}

impl GenerationClient {
    /// Per-call deadline
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    /// Output-size ceiling in tokens
    pub const DEFAULT_MAX_TOKENS: u32 = 4096;
    /// Pause before the single retry
    pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(500);

    /// Client over the given backend with default limits
    #[must_use]
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            timeout: Self::DEFAULT_TIMEOUT,
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            retry_backoff: Self::DEFAULT_RETRY_BACKOFF,
        }
    }

    /// Override the per-call deadline
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the output-size ceiling
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Free-text completion at the caller's temperature
    ///
    /// # Errors
    /// `GenerationError` on transport failure, provider error or timeout.
    pub async fn generate_text(
        &self,
        prompt: &str,
        temperature: f64,
    ) -> Result<String, GenerationError> {
        let request = CompletionRequest::new(prompt, temperature, self.max_tokens);
        self.call(&request).await
    }

    /// Structured completion, parsed after fence stripping
    ///
    /// Appends a strict pure-JSON instruction and runs at a lower
    /// temperature for structural reliability.
    ///
    /// # Errors
    /// `GenerationError::MalformedJson` when the normalized response still
    /// does not parse; transport errors as in `generate_text`.
    pub async fn generate_json(&self, prompt: &str) -> Result<Value, GenerationError> {
        let framed = format!("{prompt}\n\n{JSON_ONLY_INSTRUCTION}");
        let request = CompletionRequest::new(framed, JSON_TEMPERATURE, self.max_tokens);
        let raw = self.call(&request).await?;

        let cleaned = strip_code_fences(&raw);
        serde_json::from_str(cleaned)
            .map_err(|e| GenerationError::malformed_json(e.to_string(), cleaned))
    }

    /// One attempt under the deadline, plus a single retry with backoff
    /// when the failure is retryable.
    async fn call(&self, request: &CompletionRequest) -> Result<String, GenerationError> {
        match self.attempt(request).await {
            Ok(text) => Ok(text),
            Err(first) if first.is_retryable() => {
                tracing::warn!(backend = self.backend.name(), error = %first, "retrying oracle call");
                tokio::time::sleep(self.retry_backoff).await;
                self.attempt(request).await
            }
            Err(first) => Err(first),
        }
    }

    async fn attempt(&self, request: &CompletionRequest) -> Result<String, GenerationError> {
        match tokio::time::timeout(self.timeout, self.backend.complete(request)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout {
                elapsed_ms: self.timeout.as_millis() as u64,
            }),
        }
    }
}

impl std::fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationClient")
            .field("backend", &self.backend.name())
            .field("timeout", &self.timeout)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// Strip residual markdown code fences from a raw oracle response.
#[must_use]
pub fn strip_code_fences(raw: &str) -> &str {
    raw.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}
