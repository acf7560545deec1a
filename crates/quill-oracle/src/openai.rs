//! OpenAI-compatible chat-completions backend
//!
//! Speaks `POST {base_url}/chat/completions` so any compatible provider
//! works by pointing `base_url` elsewhere.

use crate::backend::{CompletionBackend, CompletionRequest};
use crate::error::{BackendConfigError, GenerationError};
use async_trait::async_trait;
use serde_json::{json, Value};

/// Environment variable carrying the provider API key
pub const API_KEY_ENV: &str = "QUILL_ORACLE_API_KEY";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Chat-completions transport over HTTP
#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl OpenAiBackend {
    /// Backend with an explicit key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Backend configured from the environment
    ///
    /// # Errors
    /// `BackendConfigError::MissingCredentials` when the key variable is
    /// unset or blank - surfaced before any call is attempted.
    pub fn from_env() -> Result<Self, BackendConfigError> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key)),
            _ => Err(BackendConfigError::MissingCredentials { var: API_KEY_ENV }),
        }
    }

    /// Override the provider base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn payload(&self, request: &CompletionRequest) -> Value {
        json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": request.prompt }],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
            "stream": false,
        })
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    fn name(&self) -> &'static str {
        "openai-compat"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GenerationError> {
        tracing::debug!(model = %self.model, url = %self.url(), "calling oracle");

        let response = self
            .http
            .post(self.url())
            .bearer_auth(&self.api_key)
            .json(&self.payload(request))
            .send()
            .await
            .map_err(|e| GenerationError::Upstream {
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Upstream {
                message: e.to_string(),
            })?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
                .unwrap_or(body);
            return Err(GenerationError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: Value =
            serde_json::from_str(&body).map_err(|e| GenerationError::malformed_json(e.to_string(), &body))?;

        parsed["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or(GenerationError::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_shape() {
        let backend = OpenAiBackend::new("sk-test").with_model("gpt-4o");
        let payload = backend.payload(&CompletionRequest::new("Hello", 0.7, 2048));

        assert_eq!(payload["model"], "gpt-4o");
        assert_eq!(payload["temperature"], 0.7);
        assert_eq!(payload["max_tokens"], 2048);
        assert_eq!(payload["messages"][0]["role"], "user");
        assert_eq!(payload["messages"][0]["content"], "Hello");
    }

    #[test]
    fn url_joins_without_double_slash() {
        let backend = OpenAiBackend::new("sk-test").with_base_url("https://llm.internal/v1/");
        assert_eq!(backend.url(), "https://llm.internal/v1/chat/completions");
    }

    #[test]
    fn from_env_fails_without_key() {
        std::env::remove_var(API_KEY_ENV);
        let err = OpenAiBackend::from_env().unwrap_err();
        assert_eq!(err, BackendConfigError::MissingCredentials { var: API_KEY_ENV });
    }
}
