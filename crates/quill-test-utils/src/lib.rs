//! Testing utilities for the quill workspace
//!
//! Shared fixtures: in-memory store implementations, a scripted oracle
//! backend and deterministic clocks. The in-memory stores mirror the
//! semantics the pipeline expects from real collaborators (title and slug
//! uniqueness among them), so they double as an embeddable backend for
//! database-free use.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use quill_domain::{
    EditorialSettings, Idea, IdeaCandidate, IdeaId, IdeaScore, IdeaStatus, NewPost, Post, PostId,
};
use quill_oracle::{CompletionBackend, CompletionRequest, GenerationError};
use quill_pipeline::{ContentStore, SettingsStore, StoreError};
use std::collections::{HashSet, VecDeque};

pub use quill_limiter::ManualClock;

/// In-memory content store with title/slug uniqueness enforcement
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    ideas: Mutex<Vec<Idea>>,
    posts: Mutex<Vec<Post>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an idea directly, bypassing the pipeline
    pub fn seed_idea(&self, idea: Idea) -> IdeaId {
        let id = idea.id;
        self.ideas.lock().push(idea);
        id
    }

    pub fn idea(&self, id: IdeaId) -> Option<Idea> {
        self.ideas.lock().iter().find(|i| i.id == id).cloned()
    }

    pub fn ideas(&self) -> Vec<Idea> {
        self.ideas.lock().clone()
    }

    pub fn posts(&self) -> Vec<Post> {
        self.posts.lock().clone()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn find_idea_titles(&self, titles: &[String]) -> Result<HashSet<String>, StoreError> {
        let ideas = self.ideas.lock();
        Ok(ideas
            .iter()
            .filter(|i| i.status != IdeaStatus::Rejected)
            .filter(|i| titles.contains(&i.title))
            .map(|i| i.title.clone())
            .collect())
    }

    async fn insert_ideas(&self, new_ideas: Vec<Idea>) -> Result<usize, StoreError> {
        let mut ideas = self.ideas.lock();
        let taken: HashSet<&str> = ideas
            .iter()
            .filter(|i| i.status != IdeaStatus::Rejected)
            .map(|i| i.title.as_str())
            .collect();
        if new_ideas.iter().any(|i| taken.contains(i.title.as_str())) {
            return Err(StoreError::UniqueViolation { field: "title" });
        }
        let count = new_ideas.len();
        ideas.extend(new_ideas);
        Ok(count)
    }

    async fn find_idea(&self, id: IdeaId) -> Result<Option<Idea>, StoreError> {
        Ok(self.idea(id))
    }

    async fn update_idea_status(
        &self,
        id: IdeaId,
        status: IdeaStatus,
        post_id: Option<PostId>,
    ) -> Result<(), StoreError> {
        let mut ideas = self.ideas.lock();
        let idea = ideas
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| StoreError::Unavailable(format!("idea not found: {id}")))?;
        idea.status = status;
        if post_id.is_some() {
            idea.generated_post_id = post_id;
        }
        Ok(())
    }

    async fn find_post_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.lock().iter().find(|p| p.slug == slug).cloned())
    }

    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError> {
        let mut posts = self.posts.lock();
        if posts.iter().any(|p| p.slug == post.slug) {
            return Err(StoreError::UniqueViolation { field: "slug" });
        }
        let post = Post::draft_from(post);
        posts.push(post.clone());
        Ok(post)
    }
}

/// In-memory settings store
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: Mutex<Option<EditorialSettings>>,
}

impl MemorySettingsStore {
    pub fn new(settings: EditorialSettings) -> Self {
        Self {
            settings: Mutex::new(Some(settings)),
        }
    }

    /// Store with nothing configured
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn editorial_settings(&self) -> Result<Option<EditorialSettings>, StoreError> {
        Ok(self.settings.lock().clone())
    }
}

/// Scripted oracle backend: replays canned completions in order and
/// records every request it received
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    responses: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_response(self, response: &str) -> Self {
        self.responses.lock().push_back(response.to_string());
        self
    }

    pub fn push_response(&self, response: &str) {
        self.responses.lock().push_back(response.to_string());
    }

    /// Requests seen so far, oldest first
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GenerationError> {
        self.requests.lock().push(request.clone());
        self.responses
            .lock()
            .pop_front()
            .ok_or_else(|| GenerationError::Upstream {
                message: "script exhausted".to_string(),
            })
    }
}

/// Reference editorial settings used across the test suites
pub fn sample_settings() -> EditorialSettings {
    EditorialSettings::new(
        vec![
            "Scalable Web Architecture".to_string(),
            "Cloud Migration".to_string(),
        ],
        vec!["crypto".to_string()],
        "confident, pragmatic",
    )
    .unwrap()
}

/// Unscored candidate with defaults filled in
pub fn candidate(title: &str) -> IdeaCandidate {
    IdeaCandidate {
        title: title.to_string(),
        angle: format!("Why {title} matters"),
        keywords: vec!["cloud migration guide".to_string(), "strategy".to_string()],
        reasoning: None,
        score: IdeaScore::default(),
    }
}

/// Approved idea ready for drafting
pub fn approved_idea(title: &str) -> Idea {
    Idea::approved_from(candidate(title))
}

/// A well-formed scout completion with two ideas, wrapped in the kind of
/// code fences real oracles love to add
pub fn fenced_scout_response() -> String {
    r#"```json
[
  {
    "title": "Scalable Architecture Strategy for Enterprise Systems",
    "angle": "Why modern enterprises need scalable architecture",
    "keywords": ["enterprise architecture strategy", "scalability guide", "system design"],
    "reasoning": "High search volume in the configured niches"
  },
  {
    "title": "Top 10 Frameworks",
    "angle": "A quick roundup",
    "keywords": ["frameworks"]
  }
]
```"#
        .to_string()
}

/// A draft body that satisfies the reference output policy
pub fn structured_draft_body() -> String {
    "# Overview\n\nA grounded look at the topic.\n\n## The Details\n\nSubstance here.\n\n## Takeaways\n\nDo the simple thing first.".to_string()
}
