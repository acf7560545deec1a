//! Identifier newtypes (ULID for sortability)

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique idea identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IdeaId(pub Ulid);

impl IdeaId {
    /// Generate new idea ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for IdeaId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for IdeaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique post identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PostId(pub Ulid);

impl PostId {
    /// Generate new post ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idea_ids_are_unique() {
        assert_ne!(IdeaId::new(), IdeaId::new());
    }

    #[test]
    fn post_id_display_roundtrip() {
        let id = PostId::new();
        let text = id.to_string();
        assert_eq!(text.len(), 26);
    }
}
