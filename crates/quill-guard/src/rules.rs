//! Built-in policy rules

use crate::policy::GuardViolation;
use once_cell::sync::Lazy;
use regex::Regex;

/// Fixed policy list, scanned case-insensitively as substrings.
///
/// Grouped by concern: oracle/provider leakage and AI self-reference,
/// aggressive sales language, competitor names.
pub const FORBIDDEN_TERMS: &[&str] = &[
    // AI self-reference / provider leakage
    "as an ai",
    "as a language model",
    "ai language model",
    "openai",
    "chatgpt",
    "gpt-4",
    "claude",
    "anthropic",
    "gemini",
    // Aggressive sales language
    "buy now",
    "act now",
    "limited time offer",
    "don't miss out",
    "100% guaranteed",
    // Competitor names
    "accenture",
    "deloitte",
    "thoughtworks",
];

/// A single predicate over text; rules compose in ordered lists
pub trait PolicyRule: Send + Sync {
    /// Stable rule name for diagnostics
    fn name(&self) -> &'static str;

    /// Check the text, failing closed on violation
    ///
    /// # Errors
    /// A `GuardViolation` describing the first problem found.
    fn check(&self, text: &str) -> Result<(), GuardViolation>;
}

/// Case-insensitive substring scan against a term list
pub struct ForbiddenTermsRule {
    terms: Vec<String>,
}

impl ForbiddenTermsRule {
    /// Rule over a custom term list
    #[must_use]
    pub fn new(terms: &[&str]) -> Self {
        Self {
            terms: terms.iter().map(|t| t.to_lowercase()).collect(),
        }
    }
}

impl Default for ForbiddenTermsRule {
    fn default() -> Self {
        Self::new(FORBIDDEN_TERMS)
    }
}

impl PolicyRule for ForbiddenTermsRule {
    fn name(&self) -> &'static str {
        "forbidden-terms"
    }

    fn check(&self, text: &str) -> Result<(), GuardViolation> {
        let haystack = text.to_lowercase();
        for term in &self.terms {
            if haystack.contains(term.as_str()) {
                return Err(GuardViolation::ForbiddenTerm { term: term.clone() });
            }
        }
        Ok(())
    }
}

/// Rejects degenerate prompts below a minimum character count
pub struct MinLengthRule {
    minimum: usize,
}

impl MinLengthRule {
    /// Rule with the given minimum length
    #[inline]
    #[must_use]
    pub fn new(minimum: usize) -> Self {
        Self { minimum }
    }
}

impl PolicyRule for MinLengthRule {
    fn name(&self) -> &'static str {
        "min-length"
    }

    fn check(&self, text: &str) -> Result<(), GuardViolation> {
        let length = text.trim().chars().count();
        if length < self.minimum {
            return Err(GuardViolation::TooShort {
                length,
                minimum: self.minimum,
            });
        }
        Ok(())
    }
}

static HEADING_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#{1,6}\s").expect("heading marker pattern is valid"));

/// Requires at least one Markdown heading marker
///
/// Guards against unusably unstructured drafts coming back from the oracle.
#[derive(Default)]
pub struct StructureRule;

impl StructureRule {
    /// Structural-marker rule
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PolicyRule for StructureRule {
    fn name(&self) -> &'static str {
        "structure"
    }

    fn check(&self, text: &str) -> Result<(), GuardViolation> {
        if HEADING_MARKER.is_match(text) {
            Ok(())
        } else {
            Err(GuardViolation::Unstructured)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_terms_rule_reports_matched_entry() {
        let rule = ForbiddenTermsRule::default();
        let err = rule.check("Powered by ChatGPT under the hood").unwrap_err();
        assert_eq!(
            err,
            GuardViolation::ForbiddenTerm {
                term: "chatgpt".to_string()
            }
        );
    }

    #[test]
    fn custom_term_list() {
        let rule = ForbiddenTermsRule::new(&["Synergy"]);
        assert!(rule.check("pure SYNERGY play").is_err());
        assert!(rule.check("plain text").is_ok());
    }

    #[test]
    fn min_length_counts_trimmed_chars() {
        let rule = MinLengthRule::new(10);
        assert!(rule.check("   short   ").is_err());
        assert!(rule.check("exactly-10").is_ok());
    }

    #[test]
    fn structure_rule_accepts_any_heading_level() {
        let rule = StructureRule::new();
        assert!(rule.check("# Title").is_ok());
        assert!(rule.check("intro\n\n### Section\nbody").is_ok());
    }

    #[test]
    fn structure_rule_rejects_hashtag_without_space() {
        let rule = StructureRule::new();
        assert!(rule.check("#nospace is not a heading").is_err());
        assert!(rule.check("no markers at all").is_err());
    }
}
