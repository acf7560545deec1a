//! Prompt templates for scouting and drafting

/// Renders the scout and draft prompt templates with editorial context
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptComposer;

impl PromptComposer {
    /// Stateless composer over the built-in templates
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Prompt asking the oracle to propose content ideas for the niches
    #[must_use]
    pub fn scout_prompt(&self, niches: &[String], excluded_keywords: &[String]) -> String {
        let mut prompt = format!(
            "Propose 5 specific blog content ideas for a software consultancy \
             working in these niches: {}.\n\
             Every idea must be concrete enough to brief a writer directly.",
            niches.join(", ")
        );
        if !excluded_keywords.is_empty() {
            prompt.push_str(&format!(
                "\nNever propose ideas built around these keywords: {}.",
                excluded_keywords.join(", ")
            ));
        }
        prompt.push_str(
            "\n\nReturn a JSON array where each element has the fields \
             \"title\" (string), \"angle\" (string), \"keywords\" (array of \
             strings) and \"reasoning\" (string).",
        );
        prompt
    }

    /// Prompt asking the oracle to draft the post for an approved idea
    #[must_use]
    pub fn draft_prompt(
        &self,
        title: &str,
        angle: &str,
        keywords: &[String],
        brand_voice: &str,
    ) -> String {
        let mut prompt = format!(
            "Write a complete long-form blog post titled \"{title}\".\n\
             Angle: {angle}\n"
        );
        if !keywords.is_empty() {
            prompt.push_str(&format!(
                "Work these keywords in naturally: {}.\n",
                keywords.join(", ")
            ));
        }
        if !brand_voice.trim().is_empty() {
            prompt.push_str(&format!("Voice: {brand_voice}.\n"));
        }
        prompt.push_str(
            "\nStructure the post in Markdown with an introduction, several \
             `##` sections and a closing section with practical takeaways.",
        );
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn scout_prompt_substitutes_niches_and_exclusions() {
        let composer = PromptComposer::new();
        let prompt = composer.scout_prompt(
            &strings(&["Platform Engineering", "FinOps"]),
            &strings(&["crypto"]),
        );

        assert!(prompt.contains("Platform Engineering, FinOps"));
        assert!(prompt.contains("Never propose ideas built around these keywords: crypto."));
        assert!(prompt.contains("JSON array"));
    }

    #[test]
    fn scout_prompt_omits_empty_exclusions() {
        let composer = PromptComposer::new();
        let prompt = composer.scout_prompt(&strings(&["FinOps"]), &[]);
        assert!(!prompt.contains("Never propose"));
    }

    #[test]
    fn draft_prompt_carries_idea_and_voice() {
        let composer = PromptComposer::new();
        let prompt = composer.draft_prompt(
            "Cloud Exit Economics",
            "When leaving the cloud pays off",
            &strings(&["cloud repatriation", "infrastructure costs"]),
            "dry, numbers-first",
        );

        assert!(prompt.contains("\"Cloud Exit Economics\""));
        assert!(prompt.contains("Angle: When leaving the cloud pays off"));
        assert!(prompt.contains("cloud repatriation, infrastructure costs"));
        assert!(prompt.contains("Voice: dry, numbers-first."));
        assert!(prompt.contains("Markdown"));
    }
}
