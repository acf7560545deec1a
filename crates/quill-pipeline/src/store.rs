//! Collaborator seams: content persistence and editorial configuration
//!
//! Each operation is individually atomic on the collaborator's side; the
//! orchestrator never wraps them in an application-level transaction.

use async_trait::async_trait;
use quill_domain::{EditorialSettings, Idea, IdeaId, IdeaStatus, NewPost, Post, PostId};
use std::collections::HashSet;

/// Failure inside a collaborator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write
    #[error("unique constraint violated on {field}")]
    UniqueViolation {
        /// Constrained field
        field: &'static str,
    },

    /// The collaborator could not serve the call
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Content persistence collaborator
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Of the given titles, the ones already taken by non-rejected ideas
    async fn find_idea_titles(&self, titles: &[String]) -> Result<HashSet<String>, StoreError>;

    /// Bulk-insert ideas; returns the number of rows written
    ///
    /// # Errors
    /// `StoreError::UniqueViolation` if any title is already taken.
    async fn insert_ideas(&self, ideas: Vec<Idea>) -> Result<usize, StoreError>;

    /// Look up an idea by id
    async fn find_idea(&self, id: IdeaId) -> Result<Option<Idea>, StoreError>;

    /// Update an idea's status, optionally linking the generated post
    async fn update_idea_status(
        &self,
        id: IdeaId,
        status: IdeaStatus,
        post_id: Option<PostId>,
    ) -> Result<(), StoreError>;

    /// Look up a post by slug
    async fn find_post_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError>;

    /// Persist a new post
    ///
    /// # Errors
    /// `StoreError::UniqueViolation` if the slug is already taken.
    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError>;
}

/// Editorial configuration collaborator (read-only)
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Current editorial settings, if configured
    async fn editorial_settings(&self) -> Result<Option<EditorialSettings>, StoreError>;
}
