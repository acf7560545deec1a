//! Quill Policy Guard
//!
//! The trusted text boundary between the pipeline and the generative
//! oracle. Everything sent to the oracle passes `validate_input`;
//! everything that comes back and could reach persistence passes
//! `validate_output`. Any violation fails closed - the surrounding call
//! aborts and no partial content is surfaced.
//!
//! The policy is an ordered list of [`PolicyRule`] predicates, so term
//! lists, regex rules or future semantic checks compose without touching
//! the orchestrator.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod context;
pub mod policy;
pub mod rules;

pub use context::inject_context;
pub use policy::{GuardViolation, PolicyGuard};
pub use rules::{ForbiddenTermsRule, MinLengthRule, PolicyRule, StructureRule};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
