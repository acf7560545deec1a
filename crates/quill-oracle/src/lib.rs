//! Quill Oracle Client
//!
//! Wraps the external generative oracle behind two call shapes:
//!
//! - `generate_text` - free-text completion at a caller-chosen temperature
//! - `generate_json` - structurally reliable completion: strict-JSON
//!   instruction, lower temperature, code-fence stripping, parse or fail
//!
//! The transport is a [`CompletionBackend`] trait; the shipped backend
//! speaks the OpenAI-compatible chat-completions protocol. Credentials are
//! resolved when the backend is constructed, before any call is attempted.
//!
//! The client imposes a bounded timeout and a single bounded retry with
//! backoff on retryable failures.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod backend;
pub mod client;
pub mod error;
pub mod openai;
pub mod prompt;

pub use backend::{CompletionBackend, CompletionRequest};
pub use client::{strip_code_fences, GenerationClient};
pub use error::{BackendConfigError, GenerationError};
pub use openai::OpenAiBackend;
pub use prompt::PromptComposer;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
