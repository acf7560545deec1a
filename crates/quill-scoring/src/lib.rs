//! Quill Scoring Engine
//!
//! Maps an idea candidate plus the editorial settings to a weighted
//! composite score in `[0, 100]` with a per-factor breakdown. Pure and
//! deterministic: same candidate and settings, same score, no side
//! effects.
//!
//! Factors and weights:
//!
//! | factor    | weight |
//! |-----------|--------|
//! | relevance | 0.35   |
//! | seo       | 0.20   |
//! | authority | 0.20   |
//! | novelty   | 0.15   |
//! | clarity   | 0.10   |

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod factors;

use quill_domain::{EditorialSettings, IdeaCandidate, IdeaScore, ScoreBreakdown};

/// Relevance weight
pub const RELEVANCE_WEIGHT: f64 = 0.35;
/// SEO weight
pub const SEO_WEIGHT: f64 = 0.20;
/// Authority weight
pub const AUTHORITY_WEIGHT: f64 = 0.20;
/// Novelty weight
pub const NOVELTY_WEIGHT: f64 = 0.15;
/// Clarity weight
pub const CLARITY_WEIGHT: f64 = 0.10;

/// Score a candidate against the current editorial settings.
#[must_use]
pub fn score(candidate: &IdeaCandidate, settings: &EditorialSettings) -> IdeaScore {
    let breakdown = ScoreBreakdown {
        relevance: factors::relevance(candidate, &settings.target_niches),
        seo: factors::seo(&candidate.keywords),
        authority: factors::authority(candidate),
        novelty: factors::novelty(&candidate.title),
        clarity: factors::clarity(&candidate.title),
    };

    let total = f64::from(breakdown.relevance) * RELEVANCE_WEIGHT
        + f64::from(breakdown.seo) * SEO_WEIGHT
        + f64::from(breakdown.authority) * AUTHORITY_WEIGHT
        + f64::from(breakdown.novelty) * NOVELTY_WEIGHT
        + f64::from(breakdown.clarity) * CLARITY_WEIGHT;

    IdeaScore {
        total: total.round() as u8,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use quill_domain::IdeaScore;

    fn candidate(title: &str, angle: &str, keywords: &[&str]) -> IdeaCandidate {
        IdeaCandidate {
            title: title.to_string(),
            angle: angle.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            reasoning: None,
            score: IdeaScore::default(),
        }
    }

    fn settings(niches: &[&str]) -> EditorialSettings {
        EditorialSettings::new(
            niches.iter().map(|n| n.to_string()).collect(),
            vec![],
            "confident",
        )
        .unwrap()
    }

    #[test]
    fn weights_sum_to_one() {
        let sum =
            RELEVANCE_WEIGHT + SEO_WEIGHT + AUTHORITY_WEIGHT + NOVELTY_WEIGHT + CLARITY_WEIGHT;
        assert!((sum - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn golden_reference_idea_scores_63() {
        let candidate = candidate(
            "Scalable Architecture Strategy for Enterprise Systems",
            "Why modern enterprises need scalable architecture",
            &[
                "enterprise architecture strategy",
                "scalability guide",
                "system design",
            ],
        );
        let settings = settings(&["Scalable Web Architecture"]);

        let result = score(&candidate, &settings);
        assert_eq!(result.breakdown.relevance, 30);
        assert_eq!(result.breakdown.seo, 65);
        assert_eq!(result.breakdown.authority, 80);
        assert_eq!(result.breakdown.novelty, 90);
        assert_eq!(result.breakdown.clarity, 100);
        assert_eq!(result.total, 63);
    }

    #[test]
    fn scoring_is_deterministic() {
        let candidate = candidate("Cloud Migration Guide", "Moving safely", &["cloud guide"]);
        let settings = settings(&["Cloud Migration"]);
        assert_eq!(score(&candidate, &settings), score(&candidate, &settings));
    }

    proptest! {
        #[test]
        fn prop_total_and_factors_stay_in_bounds(
            title in ".{0,200}",
            angle in ".{0,200}",
            keywords in proptest::collection::vec("[a-z ]{0,40}", 0..8),
            niches in proptest::collection::vec("[A-Za-z ]{1,40}", 1..4),
        ) {
            prop_assume!(niches.iter().any(|n| !n.trim().is_empty()));
            let candidate = IdeaCandidate {
                title,
                angle,
                keywords,
                reasoning: None,
                score: IdeaScore::default(),
            };
            let settings = EditorialSettings::new(niches, vec![], "").unwrap();

            let result = score(&candidate, &settings);
            prop_assert!(result.total <= 100);
            for factor in result.breakdown.factors() {
                prop_assert!(factor <= 100);
            }
        }
    }
}
