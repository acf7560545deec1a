//! Guard violations and the ordered-rule policy engine

use crate::rules::{ForbiddenTermsRule, MinLengthRule, PolicyRule, StructureRule};

/// Text rejected by the policy
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardViolation {
    /// A forbidden term appeared (case-insensitive substring match)
    #[error("forbidden term detected: '{term}'")]
    ForbiddenTerm {
        /// The policy-list entry that matched
        term: String,
    },

    /// Input below the minimum useful length
    #[error("input too short: {length} chars (minimum: {minimum})")]
    TooShort {
        /// Observed length
        length: usize,
        /// Policy minimum
        minimum: usize,
    },

    /// Output carries no structural marker (no heading)
    #[error("output has no structural markers")]
    Unstructured,
}

/// Symmetric input/output validator over ordered rule lists
///
/// Rules run in registration order; the first violation aborts the check.
pub struct PolicyGuard {
    input_rules: Vec<Box<dyn PolicyRule>>,
    output_rules: Vec<Box<dyn PolicyRule>>,
}

impl PolicyGuard {
    /// Minimum input length enforced by the reference policy
    pub const MIN_INPUT_LENGTH: usize = 10;

    /// Guard with no rules; compose with `with_input_rule`/`with_output_rule`
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            input_rules: Vec::new(),
            output_rules: Vec::new(),
        }
    }

    /// Append an input-side rule
    #[must_use]
    pub fn with_input_rule(mut self, rule: impl PolicyRule + 'static) -> Self {
        self.input_rules.push(Box::new(rule));
        self
    }

    /// Append an output-side rule
    #[must_use]
    pub fn with_output_rule(mut self, rule: impl PolicyRule + 'static) -> Self {
        self.output_rules.push(Box::new(rule));
        self
    }

    /// Validate text about to be sent to the oracle
    ///
    /// # Errors
    /// The first `GuardViolation` any input rule reports.
    pub fn validate_input(&self, text: &str) -> Result<(), GuardViolation> {
        Self::run(&self.input_rules, text)
    }

    /// Validate text produced by the oracle
    ///
    /// # Errors
    /// The first `GuardViolation` any output rule reports.
    pub fn validate_output(&self, text: &str) -> Result<(), GuardViolation> {
        Self::run(&self.output_rules, text)
    }

    fn run(rules: &[Box<dyn PolicyRule>], text: &str) -> Result<(), GuardViolation> {
        for rule in rules {
            rule.check(text)?;
        }
        Ok(())
    }
}

impl Default for PolicyGuard {
    /// The reference policy: forbidden-term scan on both sides, minimum
    /// length on input, structural marker on output.
    fn default() -> Self {
        Self::empty()
            .with_input_rule(ForbiddenTermsRule::default())
            .with_input_rule(MinLengthRule::new(Self::MIN_INPUT_LENGTH))
            .with_output_rule(ForbiddenTermsRule::default())
            .with_output_rule(StructureRule::new())
    }
}

impl std::fmt::Debug for PolicyGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyGuard")
            .field(
                "input_rules",
                &self.input_rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field(
                "output_rules",
                &self
                    .output_rules
                    .iter()
                    .map(|r| r.name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRUCTURED: &str = "# Heading\n\nBody paragraph long enough.";

    #[test]
    fn forbidden_term_fails_both_directions() {
        let guard = PolicyGuard::default();
        let text = "A perfectly long write-up that mentions openai somewhere.";

        assert!(matches!(
            guard.validate_input(text),
            Err(GuardViolation::ForbiddenTerm { .. })
        ));
        assert!(matches!(
            guard.validate_output(text),
            Err(GuardViolation::ForbiddenTerm { .. })
        ));
    }

    #[test]
    fn forbidden_term_match_is_case_insensitive() {
        let guard = PolicyGuard::default();
        for variant in ["OpenAI", "OPENAI", "openai"] {
            let text = format!("{STRUCTURED} brought to you by {variant}");
            assert!(guard.validate_input(&text).is_err(), "{variant}");
            assert!(guard.validate_output(&text).is_err(), "{variant}");
        }
    }

    #[test]
    fn short_input_rejected() {
        let guard = PolicyGuard::default();
        assert_eq!(
            guard.validate_input("too short"),
            Err(GuardViolation::TooShort {
                length: 9,
                minimum: 10
            })
        );
    }

    #[test]
    fn unstructured_output_rejected() {
        let guard = PolicyGuard::default();
        assert_eq!(
            guard.validate_output("just a flat wall of text with no headings"),
            Err(GuardViolation::Unstructured)
        );
    }

    #[test]
    fn clean_text_passes() {
        let guard = PolicyGuard::default();
        assert!(guard.validate_input("Write about cloud migration strategy.").is_ok());
        assert!(guard.validate_output(STRUCTURED).is_ok());
    }

    #[test]
    fn rules_run_in_registration_order() {
        // Forbidden-term scan is registered before the length check, so a
        // short text containing a forbidden term reports the term.
        let guard = PolicyGuard::default();
        assert!(matches!(
            guard.validate_input("openai"),
            Err(GuardViolation::ForbiddenTerm { .. })
        ));
    }

    #[test]
    fn empty_guard_accepts_anything() {
        let guard = PolicyGuard::empty();
        assert!(guard.validate_input("").is_ok());
        assert!(guard.validate_output("").is_ok());
    }
}
