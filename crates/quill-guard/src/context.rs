//! Prompt-context injection
//!
//! Pure string composition; no validation happens here.

/// Fixed system-role preamble prepended to every generation prompt
pub const SYSTEM_PREAMBLE: &str = "You are the senior content editor of a software consultancy. \
Write with authority and precision, never reference the writing process \
or any tooling, and stay strictly within the focus areas below.";

/// Wrap a caller-supplied prompt with the system-role framing, the current
/// niches and the brand voice.
#[must_use]
pub fn inject_context(prompt: &str, niches: &[String], brand_voice: &str) -> String {
    let mut framed = String::with_capacity(
        SYSTEM_PREAMBLE.len() + prompt.len() + brand_voice.len() + 64,
    );
    framed.push_str(SYSTEM_PREAMBLE);
    framed.push_str("\n\nFocus areas: ");
    framed.push_str(&niches.join(", "));
    if !brand_voice.trim().is_empty() {
        framed.push_str("\nBrand voice: ");
        framed.push_str(brand_voice);
    }
    framed.push_str("\n\n");
    framed.push_str(prompt);
    framed
}
