//! Quill Editorial Pipeline
//!
//! The orchestrator that turns oracle output into reviewed, persisted
//! content:
//!
//! - **scout_trends**: propose -> guard -> generate -> validate -> score
//! - **approve_ideas**: dedupe against persisted titles -> bulk persist
//!   (idempotent)
//! - **generate_draft**: budget -> compose -> guard both directions ->
//!   persist post -> transition the idea
//!
//! Every entry point is fail-fast: the first error aborts the remaining
//! steps and nothing partial is written. Persistence and configuration are
//! external collaborators reached through the [`store`] traits; access
//! control stays with the caller.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod pipeline;
pub mod store;

pub use error::PipelineError;
pub use pipeline::{ApproveOutcome, DraftOutcome, EditorialPipeline};
pub use store::{ContentStore, SettingsStore, StoreError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
