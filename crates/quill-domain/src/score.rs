//! Composite idea score and its per-factor breakdown

use serde::{Deserialize, Serialize};

/// Per-factor score breakdown, each factor in `[0, 100]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Alignment with the configured niches
    pub relevance: u8,
    /// Search-intent and keyword shape
    pub seo: u8,
    /// Expert vs. beginner positioning
    pub authority: u8,
    /// Stub duplicate-pattern heuristic
    pub novelty: u8,
    /// Title length and wording
    pub clarity: u8,
}

/// Weighted composite score with its breakdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaScore {
    /// Weighted total in `[0, 100]`
    pub total: u8,
    /// Individual factor values
    pub breakdown: ScoreBreakdown,
}

impl ScoreBreakdown {
    /// Iterate the factor values in declaration order
    #[inline]
    #[must_use]
    pub fn factors(&self) -> [u8; 5] {
        [
            self.relevance,
            self.seo,
            self.authority,
            self.novelty,
            self.clarity,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors_follow_declaration_order() {
        let breakdown = ScoreBreakdown {
            relevance: 1,
            seo: 2,
            authority: 3,
            novelty: 4,
            clarity: 5,
        };
        assert_eq!(breakdown.factors(), [1, 2, 3, 4, 5]);
    }
}
