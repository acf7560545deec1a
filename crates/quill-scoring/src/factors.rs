//! Individual scoring factors, each clamped to `[0, 100]`

use quill_domain::IdeaCandidate;
use std::collections::BTreeSet;

/// Search-intent vocabulary rewarded by the SEO factor
pub const SEARCH_INTENT_TERMS: &[&str] = &[
    "guide",
    "strategy",
    "vs",
    "comparison",
    "how to",
    "checklist",
    "best practices",
];

/// Vocabulary that signals expert positioning
pub const EXPERT_TERMS: &[&str] = &[
    "scalable",
    "architecture",
    "enterprise",
    "distributed",
    "infrastructure",
    "optimization",
];

/// Vocabulary that signals beginner positioning
pub const BEGINNER_TERMS: &[&str] = &["easy", "tutorial", "basics", "beginner", "simple"];

fn clamp_100(value: u32) -> u8 {
    value.min(100) as u8
}

fn title_angle_haystack(candidate: &IdeaCandidate) -> String {
    format!("{} {}", candidate.title, candidate.angle).to_lowercase()
}

/// Alignment with the configured niches.
///
/// +15 for every distinct niche word longer than 3 characters found in
/// `title + angle`; +10 for every keyword that is a substring of any niche
/// phrase. Case-insensitive throughout.
#[must_use]
pub fn relevance(candidate: &IdeaCandidate, niches: &[String]) -> u8 {
    let haystack = title_angle_haystack(candidate);
    let lowered_niches: Vec<String> = niches.iter().map(|n| n.to_lowercase()).collect();

    let niche_words: BTreeSet<&str> = lowered_niches
        .iter()
        .flat_map(|n| n.split_whitespace())
        .filter(|w| w.len() > 3)
        .collect();

    let mut value = 0u32;
    for word in niche_words {
        if haystack.contains(word) {
            value += 15;
        }
    }
    for keyword in &candidate.keywords {
        let keyword = keyword.to_lowercase();
        if !keyword.is_empty() && lowered_niches.iter().any(|n| n.contains(&keyword)) {
            value += 10;
        }
    }
    clamp_100(value)
}

/// Search-intent and keyword shape.
///
/// +20 once if any search-intent term appears in the joined keywords,
/// +30 for three or more keywords, +20 more for five or more, +15 per
/// long-tail keyword (more than two words).
#[must_use]
pub fn seo(keywords: &[String]) -> u8 {
    let joined = keywords.join(", ").to_lowercase();
    let mut value = 0u32;

    if SEARCH_INTENT_TERMS.iter().any(|t| joined.contains(t)) {
        value += 20;
    }
    if keywords.len() >= 3 {
        value += 30;
    }
    if keywords.len() >= 5 {
        value += 20;
    }
    for keyword in keywords {
        if keyword.split_whitespace().count() > 2 {
            value += 15;
        }
    }
    clamp_100(value)
}

/// Expert vs. beginner positioning of `title + angle`.
///
/// Starts at 50; +10 per expert term found, -15 per beginner term found,
/// each vocabulary entry counted once.
#[must_use]
pub fn authority(candidate: &IdeaCandidate) -> u8 {
    let haystack = title_angle_haystack(candidate);
    let mut value = 50i32;

    for term in EXPERT_TERMS {
        if haystack.contains(term) {
            value += 10;
        }
    }
    for term in BEGINNER_TERMS {
        if haystack.contains(term) {
            value -= 15;
        }
    }
    value.clamp(0, 100) as u8
}

/// Stub duplicate-pattern heuristic.
///
/// Listicle prefixes score low, everything else a flat 90. This stands in
/// for a real similarity check against existing content, which remains an
/// open requirement.
#[must_use]
pub fn novelty(title: &str) -> u8 {
    if title.starts_with("Top 10") {
        40
    } else if title.starts_with("5 Best") {
        50
    } else {
        90
    }
}

/// Title length and wording.
#[must_use]
pub fn clarity(title: &str) -> u8 {
    let length = title.chars().count();
    if length < 20 {
        30
    } else if length > 100 {
        60
    } else if title.contains("Things") {
        40
    } else {
        100
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    #[test]
    fn relevance_counts_niche_words_and_keyword_overlap() {
        let c = candidate(
            "Kubernetes Cost Control",
            "Taming cluster spend",
            &["kubernetes cost"],
        );
        let niches = vec!["Kubernetes Cost Optimization".to_string()];
        // "kubernetes" and "cost" found (+15 each); "optimization" not.
        // Keyword "kubernetes cost" is a substring of the niche (+10).
        assert_eq!(relevance(&c, &niches), 40);
    }

    #[test]
    fn relevance_ignores_short_niche_words() {
        let c = candidate("The API Way", "On the use of the web", &[]);
        let niches = vec!["api for the web".to_string()];
        assert_eq!(relevance(&c, &niches), 0);
    }

    #[test]
    fn relevance_clamps_at_100() {
        let keywords: Vec<&str> = vec!["deep niche phrase"; 12];
        let c = candidate("deep niche phrase", "deep niche phrase", &keywords);
        let niches = vec!["deep niche phrase".to_string()];
        assert_eq!(relevance(&c, &niches), 100);
    }

    #[test]
    fn seo_rewards_intent_count_and_long_tail() {
        let kws: Vec<String> = ["cloud migration guide", "costs", "vendors"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        // intent (+20), >=3 keywords (+30), one long-tail (+15)
        assert_eq!(seo(&kws), 65);
    }

    #[test]
    fn seo_five_keywords_bonus() {
        let kws: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
        assert_eq!(seo(&kws), 50);
    }

    #[test]
    fn seo_empty_keywords_score_zero() {
        assert_eq!(seo(&[]), 0);
    }

    #[test]
    fn authority_balances_vocabularies() {
        let expert = candidate("Enterprise Architecture", "distributed systems", &[]);
        assert_eq!(authority(&expert), 80);

        let beginner = candidate("An Easy Tutorial", "basics for beginners", &[]);
        // 50 - 15*4 (easy, tutorial, basics, beginner), clamped at 0
        assert_eq!(authority(&beginner), 0);
    }

    #[test]
    fn novelty_stub_patterns() {
        assert_eq!(novelty("Top 10 Frameworks"), 40);
        assert_eq!(novelty("5 Best Databases"), 50);
        assert_eq!(novelty("Rethinking Event Sourcing"), 90);
    }

    #[test]
    fn clarity_thresholds() {
        assert_eq!(clarity("Short title"), 30);
        assert_eq!(clarity(&"x".repeat(101)), 60);
        assert_eq!(clarity("Twenty-plus Things You Should Know"), 40);
        assert_eq!(clarity("A Reasonable Title Length Overall"), 100);
    }
}
