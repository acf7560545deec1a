//! Slug derivation from titles

/// Derive a URL-safe slug from a title.
///
/// Lowercases, collapses every run of non-alphanumeric characters to a
/// single hyphen and trims leading/trailing hyphens. Non-ASCII characters
/// count as separators.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    slug
}
