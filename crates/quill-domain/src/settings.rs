//! Editorial settings, validated at the configuration boundary
//!
//! The settings live in an external key-value configuration store and are
//! read-only from the pipeline's perspective. They are represented here as
//! an explicit struct rather than a free-form payload, validated once when
//! constructed or re-checked when loaded.

use serde::{Deserialize, Serialize};

/// Settings payload rejected at the configuration boundary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// Scouting cannot run without at least one niche
    #[error("editorial settings define no target niches")]
    MissingTargetNiches,
}

/// Process-wide editorial configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorialSettings {
    /// Topical domains idea generation focuses on; never empty
    pub target_niches: Vec<String>,
    /// Keywords generation must avoid
    #[serde(default)]
    pub excluded_keywords: Vec<String>,
    /// Tone/persona directive injected into prompts
    #[serde(default)]
    pub brand_voice: String,
}

impl EditorialSettings {
    /// Validated settings
    ///
    /// # Errors
    /// `SettingsError::MissingTargetNiches` if `target_niches` contains no
    /// non-blank entry.
    pub fn new(
        target_niches: Vec<String>,
        excluded_keywords: Vec<String>,
        brand_voice: impl Into<String>,
    ) -> Result<Self, SettingsError> {
        let settings = Self {
            target_niches,
            excluded_keywords,
            brand_voice: brand_voice.into(),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Re-check the invariants, e.g. after deserializing from the
    /// configuration store.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.target_niches.iter().all(|n| n.trim().is_empty()) {
            return Err(SettingsError::MissingTargetNiches);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_niches() {
        let result = EditorialSettings::new(vec![], vec![], "confident");
        assert_eq!(result, Err(SettingsError::MissingTargetNiches));
    }

    #[test]
    fn rejects_blank_niches() {
        let result = EditorialSettings::new(vec!["   ".to_string()], vec![], "");
        assert_eq!(result, Err(SettingsError::MissingTargetNiches));
    }

    #[test]
    fn accepts_single_niche() {
        let settings =
            EditorialSettings::new(vec!["Cloud Migration".to_string()], vec![], "direct").unwrap();
        assert_eq!(settings.target_niches.len(), 1);
    }

    #[test]
    fn validate_catches_deserialized_payloads() {
        let settings: EditorialSettings =
            serde_json::from_str(r#"{"target_niches": []}"#).unwrap();
        assert!(settings.validate().is_err());
    }
}
