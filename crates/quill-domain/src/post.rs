//! Post entity written by the draft workflow

use crate::id::{IdeaId, PostId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publication status of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    /// Generated but not published; the only status the pipeline writes
    Draft,
    /// Published by the admin surface (external to the pipeline)
    Published,
}

/// Post yet to be persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    /// Display title
    pub title: String,
    /// URL-safe identifier, unique per post
    pub slug: String,
    /// Generated long-form body
    pub body: String,
    /// Idea this post was drafted from
    pub source_idea_id: IdeaId,
}

/// Persisted post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Identifier
    pub id: PostId,
    /// Display title
    pub title: String,
    /// URL-safe identifier, unique per post
    pub slug: String,
    /// Long-form body
    pub body: String,
    /// Publication status
    pub status: PostStatus,
    /// Idea this post was drafted from
    pub source_idea_id: IdeaId,
    /// Persistence timestamp
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Persist-ready draft from a `NewPost`
    #[must_use]
    pub fn draft_from(new_post: NewPost) -> Self {
        Self {
            id: PostId::new(),
            title: new_post.title,
            slug: new_post.slug,
            body: new_post.body,
            status: PostStatus::Draft,
            source_idea_id: new_post.source_idea_id,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_from_preserves_fields() {
        let idea_id = IdeaId::new();
        let post = Post::draft_from(NewPost {
            title: "T".to_string(),
            slug: "t".to_string(),
            body: "# T".to_string(),
            source_idea_id: idea_id,
        });
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.source_idea_id, idea_id);
        assert_eq!(post.slug, "t");
    }
}
