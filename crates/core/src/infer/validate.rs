//! Shared filename validation for free-text captures.
//!
//! Applied to tokens captured out of conversational context, leading
//! comments, and markdown siblings. Names from the structural signature
//! table are trusted static data and skip this.

/// Characters never accepted in a suggested filename.
const FORBIDDEN_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// Whether `candidate` is plausible as a filename (optionally with a
/// relative directory prefix).
pub(crate) fn is_valid_filename(candidate: &str) -> bool {
    if candidate.is_empty() || candidate.len() > 255 {
        return false;
    }
    if candidate.contains(FORBIDDEN_CHARS) {
        return false;
    }
    // A dot-prefixed token with a single dot (".rs", ".gitignore") is a
    // bare extension or dotfile, not a name we can trust from prose.
    if candidate.starts_with('.') && candidate.matches('.').count() < 2 {
        return false;
    }
    if candidate.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return false;
    }
    has_extension(candidate)
}

/// True when the name ends in a dot followed by 1 to 10 alphanumerics.
fn has_extension(name: &str) -> bool {
    let Some(idx) = name.rfind('.') else {
        return false;
    };
    let ext = &name[idx + 1..];
    (1..=10).contains(&ext.len()) && ext.chars().all(|c| c.is_ascii_alphanumeric())
}
