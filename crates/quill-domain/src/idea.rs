//! Idea entity and its lifecycle state machine
//!
//! Candidates come back transient from a scout call; persisting them flips
//! them to `Approved`. Only the draft workflow may move an approved idea to
//! `Drafted`, linking the generated post. `Rejected` candidates are simply
//! dropped and never stored.

use crate::id::{IdeaId, PostId};
use crate::score::{IdeaScore, ScoreBreakdown};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an idea
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdeaStatus {
    /// Transient candidate returned by a scout call, not yet persisted
    Proposed,
    /// Persisted and eligible for drafting
    Approved,
    /// A post has been generated and linked
    Drafted,
    /// Discarded candidate (terminal, never persisted)
    Rejected,
}

/// Attempted transition outside the lifecycle table
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal idea transition: {from:?} -> {to:?}")]
pub struct TransitionError {
    /// Current status
    pub from: IdeaStatus,
    /// Requested status
    pub to: IdeaStatus,
}

/// Statuses reachable from `from` in a single step
#[must_use]
pub fn allowed_transitions(from: IdeaStatus) -> Vec<IdeaStatus> {
    use IdeaStatus::*;
    match from {
        Proposed => vec![Approved, Rejected],
        Approved => vec![Drafted],
        Drafted => vec![],
        Rejected => vec![],
    }
}

/// Validates a status transition against the lifecycle table.
pub fn validate_transition(from: IdeaStatus, to: IdeaStatus) -> Result<(), TransitionError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(TransitionError { from, to })
    }
}

/// Transient idea candidate produced by a scout call
///
/// Carries its score so callers can review before approving; it has no id
/// and no persisted representation until approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaCandidate {
    /// Proposed title
    pub title: String,
    /// Editorial angle
    pub angle: String,
    /// Target keywords, in oracle order
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Oracle's rationale for the proposal, when present
    #[serde(default)]
    pub reasoning: Option<String>,
    /// Weighted composite score attached after scoring
    #[serde(default)]
    pub score: IdeaScore,
}

impl IdeaCandidate {
    /// Attach a computed score
    #[inline]
    #[must_use]
    pub fn with_score(mut self, score: IdeaScore) -> Self {
        self.score = score;
        self
    }
}

/// Persisted idea
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idea {
    /// Identifier
    pub id: IdeaId,
    /// Title, unique among non-rejected ideas
    pub title: String,
    /// Editorial angle
    pub angle: String,
    /// Target keywords, in oracle order
    pub keywords: Vec<String>,
    /// Weighted composite score in `[0, 100]`
    pub score: u8,
    /// Per-factor breakdown
    pub score_breakdown: ScoreBreakdown,
    /// Lifecycle status
    pub status: IdeaStatus,
    /// Post linked once the idea is drafted
    pub generated_post_id: Option<PostId>,
    /// Persistence timestamp
    pub created_at: DateTime<Utc>,
}

impl Idea {
    /// Persist-ready idea from an approved candidate
    #[must_use]
    pub fn approved_from(candidate: IdeaCandidate) -> Self {
        Self {
            id: IdeaId::new(),
            title: candidate.title,
            angle: candidate.angle,
            keywords: candidate.keywords,
            score: candidate.score.total,
            score_breakdown: candidate.score.breakdown,
            status: IdeaStatus::Approved,
            generated_post_id: None,
            created_at: Utc::now(),
        }
    }

    /// Move this idea to a new status, enforcing the lifecycle table
    ///
    /// # Errors
    /// `TransitionError` if the transition is not in the table.
    pub fn transition(&mut self, to: IdeaStatus) -> Result<(), TransitionError> {
        validate_transition(self.status, to)?;
        self.status = to;
        Ok(())
    }
}
