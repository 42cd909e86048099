//! Centralized slug computation for pretty-link paths.
//!
//! Redirect pages live at `go/<slug>/index.html`, and the landing page links
//! to those paths. Both sides call this one function so the emitted directory
//! and the href can never drift apart.
//!
//! The transformation is deliberately narrow:
//! - lowercase
//! - spaces become dashes
//! - everything outside ASCII `[a-z0-9-]` is dropped
//!
//! Punctuation is stripped, not dashed: `"CleanMyMac (Impact)!!"` →
//! `"cleanmymac-impact"`, not `"cleanmymac--impact--"`. Names with no
//! usable characters slug to the empty string, which callers treat as
//! "no pretty link for this product".

/// Slug for a product name: `"CleanMyMac X"` → `"cleanmymac-x"`.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}
