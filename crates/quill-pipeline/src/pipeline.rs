//! The idea lifecycle orchestrator

use crate::error::PipelineError;
use crate::store::{ContentStore, SettingsStore, StoreError};
use quill_domain::{
    slugify, EditorialSettings, Idea, IdeaCandidate, IdeaId, IdeaStatus, NewPost, PostId,
};
use quill_guard::{inject_context, PolicyGuard};
use quill_limiter::{BudgetStore, InMemoryBudgetStore, RateLimiter};
use quill_oracle::{GenerationClient, PromptComposer};
use rand::Rng;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Sampling temperature for long-form drafting
pub const DRAFT_TEMPERATURE: f64 = 0.7;

/// Result of an approval call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproveOutcome {
    /// The call completed
    pub success: bool,
    /// Rows actually inserted; less than the input length when titles
    /// already existed
    pub count: usize,
}

/// Result of a draft call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftOutcome {
    /// The call completed
    pub success: bool,
    /// The persisted draft post
    pub post_id: PostId,
}

/// Idea shape expected back from a scout completion
#[derive(Debug, Deserialize)]
struct ScoutedIdea {
    title: String,
    angle: String,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    reasoning: Option<String>,
}

/// Coordinates scouting, approval and drafting over the collaborators
///
/// Entry points run concurrently with each other; the only shared mutable
/// state is the limiter's budget map, which is atomic per actor. Ideas,
/// posts and settings are read fresh from the stores on every call.
pub struct EditorialPipeline {
    content: Arc<dyn ContentStore>,
    settings: Arc<dyn SettingsStore>,
    guard: PolicyGuard,
    limiter: RateLimiter<Box<dyn BudgetStore>>,
    client: GenerationClient,
    composer: PromptComposer,
    draft_temperature: f64,
}

impl EditorialPipeline {
    /// Pipeline with the reference guard policy and rate budget
    #[must_use]
    pub fn new(
        content: Arc<dyn ContentStore>,
        settings: Arc<dyn SettingsStore>,
        client: GenerationClient,
    ) -> Self {
        Self {
            content,
            settings,
            guard: PolicyGuard::default(),
            limiter: RateLimiter::with_store(
                Box::new(InMemoryBudgetStore::new()) as Box<dyn BudgetStore>
            ),
            client,
            composer: PromptComposer::new(),
            draft_temperature: DRAFT_TEMPERATURE,
        }
    }

    /// Override the guard policy
    #[must_use]
    pub fn with_guard(mut self, guard: PolicyGuard) -> Self {
        self.guard = guard;
        self
    }

    /// Override the rate limiter
    #[must_use]
    pub fn with_limiter(mut self, limiter: RateLimiter<Box<dyn BudgetStore>>) -> Self {
        self.limiter = limiter;
        self
    }

    /// Override the drafting temperature
    #[must_use]
    pub fn with_draft_temperature(mut self, temperature: f64) -> Self {
        self.draft_temperature = temperature;
        self
    }

    /// Propose scored content ideas for the configured niches
    ///
    /// # Workflow
    /// 1. Consume one budget slot for the actor
    /// 2. Load and validate the editorial settings
    /// 3. Compose the scout prompt and guard it
    /// 4. Ask the oracle for a structured idea array
    /// 5. Validate the shape, score every candidate
    /// 6. Return candidates sorted by score, oracle order on ties
    ///
    /// # Errors
    /// Any failed step aborts the call; see [`PipelineError`].
    pub async fn scout_trends(
        &self,
        actor_id: &str,
    ) -> Result<Vec<IdeaCandidate>, PipelineError> {
        self.limiter.check_and_consume(actor_id)?;
        let settings = self.load_settings().await?;

        let prompt = self
            .composer
            .scout_prompt(&settings.target_niches, &settings.excluded_keywords);
        self.guard.validate_input(&prompt)?;

        let payload = self.client.generate_json(&prompt).await?;
        let scouted: Vec<ScoutedIdea> = serde_json::from_value(payload)
            .map_err(|e| PipelineError::Validation(e.to_string()))?;

        let mut candidates: Vec<IdeaCandidate> = scouted
            .into_iter()
            .map(|s| {
                let candidate = IdeaCandidate {
                    title: s.title,
                    angle: s.angle,
                    keywords: s.keywords,
                    reasoning: s.reasoning,
                    score: Default::default(),
                };
                let score = quill_scoring::score(&candidate, &settings);
                candidate.with_score(score)
            })
            .collect();

        // Stable sort keeps the oracle's ordering as the tie-break
        candidates.sort_by(|a, b| b.score.total.cmp(&a.score.total));

        tracing::info!(actor_id, count = candidates.len(), "scouted idea candidates");
        Ok(candidates)
    }

    /// Persist candidates as approved ideas, deduplicated by title
    ///
    /// Idempotent: resubmitting an already-approved batch inserts nothing
    /// and reports `count: 0`. A title race lost against a concurrent call
    /// is absorbed with one re-dedupe pass, never surfaced as an error.
    ///
    /// # Errors
    /// `PipelineError::Store` for collaborator failures other than title
    /// uniqueness.
    pub async fn approve_ideas(
        &self,
        candidates: Vec<IdeaCandidate>,
    ) -> Result<ApproveOutcome, PipelineError> {
        let titles: Vec<String> = candidates.iter().map(|c| c.title.clone()).collect();
        let existing = self.content.find_idea_titles(&titles).await?;

        let mut seen_in_batch = HashSet::new();
        let fresh: Vec<Idea> = candidates
            .into_iter()
            .filter(|c| !existing.contains(&c.title) && seen_in_batch.insert(c.title.clone()))
            .map(Idea::approved_from)
            .collect();

        if fresh.is_empty() {
            return Ok(ApproveOutcome {
                success: true,
                count: 0,
            });
        }

        let count = match self.content.insert_ideas(fresh.clone()).await {
            Ok(count) => count,
            Err(StoreError::UniqueViolation { .. }) => {
                // Lost a title race against a concurrent approval; keep the
                // call idempotent by re-checking and inserting the remainder
                tracing::debug!("title race on bulk insert, re-deduplicating");
                let titles: Vec<String> = fresh.iter().map(|i| i.title.clone()).collect();
                let existing = self.content.find_idea_titles(&titles).await?;
                let remainder: Vec<Idea> = fresh
                    .into_iter()
                    .filter(|i| !existing.contains(&i.title))
                    .collect();
                if remainder.is_empty() {
                    0
                } else {
                    match self.content.insert_ideas(remainder).await {
                        Ok(count) => count,
                        // Still racing; the titles exist now either way
                        Err(StoreError::UniqueViolation { .. }) => 0,
                        Err(err) => return Err(err.into()),
                    }
                }
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(count, "approved ideas persisted");
        Ok(ApproveOutcome {
            success: true,
            count,
        })
    }

    /// Generate and persist the draft post for an approved idea
    ///
    /// # Workflow
    /// 1. Consume one budget slot for the actor
    /// 2. Load the idea (must exist and be APPROVED) and the settings
    /// 3. Compose the draft prompt, frame it with niches and voice
    /// 4. Guard the input, generate, guard the output
    /// 5. Persist the post under a collision-free slug
    /// 6. Transition the idea to DRAFTED with the post linked
    ///
    /// A guard violation on the output discards the draft entirely;
    /// nothing is persisted.
    ///
    /// # Errors
    /// Any failed step aborts the call; see [`PipelineError`].
    pub async fn generate_draft(
        &self,
        idea_id: IdeaId,
        actor_id: &str,
    ) -> Result<DraftOutcome, PipelineError> {
        self.limiter.check_and_consume(actor_id)?;

        let idea = self
            .content
            .find_idea(idea_id)
            .await?
            .ok_or(PipelineError::IdeaNotFound(idea_id))?;
        if idea.status != IdeaStatus::Approved {
            return Err(PipelineError::IdeaNotApproved {
                id: idea.id,
                status: idea.status,
            });
        }
        let settings = self.load_settings().await?;

        let prompt = self.composer.draft_prompt(
            &idea.title,
            &idea.angle,
            &idea.keywords,
            &settings.brand_voice,
        );
        let framed = inject_context(&prompt, &settings.target_niches, &settings.brand_voice);
        self.guard.validate_input(&framed)?;

        let body = self
            .client
            .generate_text(&framed, self.draft_temperature)
            .await?;
        self.guard.validate_output(&body)?;

        let slug = self.resolve_slug(&idea.title).await?;
        let post = match self
            .content
            .create_post(NewPost {
                title: idea.title.clone(),
                slug,
                body: body.clone(),
                source_idea_id: idea.id,
            })
            .await
        {
            Ok(post) => post,
            Err(StoreError::UniqueViolation { .. }) => {
                // Slug race; one more randomized attempt, then give up
                let slug = suffixed_slug(&slugify(&idea.title));
                self.content
                    .create_post(NewPost {
                        title: idea.title.clone(),
                        slug,
                        body,
                        source_idea_id: idea.id,
                    })
                    .await?
            }
            Err(err) => return Err(err.into()),
        };

        self.content
            .update_idea_status(idea.id, IdeaStatus::Drafted, Some(post.id))
            .await?;

        tracing::info!(idea = %idea.id, post = %post.id, "draft generated");
        Ok(DraftOutcome {
            success: true,
            post_id: post.id,
        })
    }

    async fn load_settings(&self) -> Result<EditorialSettings, PipelineError> {
        let settings = self
            .settings
            .editorial_settings()
            .await?
            .ok_or_else(|| {
                PipelineError::Configuration("editorial settings not configured".to_string())
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Slug for the title, disambiguated if a post already claims it
    async fn resolve_slug(&self, title: &str) -> Result<String, PipelineError> {
        let base = {
            let slug = slugify(title);
            if slug.is_empty() {
                "untitled".to_string()
            } else {
                slug
            }
        };
        if self.content.find_post_by_slug(&base).await?.is_none() {
            return Ok(base);
        }

        // Best-effort disambiguation, not cryptographically unique
        let candidate = suffixed_slug(&base);
        if self.content.find_post_by_slug(&candidate).await?.is_none() {
            return Ok(candidate);
        }
        Ok(suffixed_slug(&base))
    }
}

fn suffixed_slug(base: &str) -> String {
    let suffix = rand::thread_rng().gen_range(1000..10000);
    format!("{base}-{suffix}")
}

impl std::fmt::Debug for EditorialPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorialPipeline")
            .field("guard", &self.guard)
            .field("limiter", &self.limiter)
            .field("draft_temperature", &self.draft_temperature)
            .finish()
    }
}
