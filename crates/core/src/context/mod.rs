//! Bounded extraction of the text surrounding a code container.
//!
//! Frontends capture the preceding-sibling text at up to three ancestor
//! levels of the container; `surrounding_text` flattens that into the one
//! bounded string the inference engine scans. Pure: no mutation, no I/O.

/// Preceding-sibling text per ancestor level, nearest sibling first at
/// every level. A level simply ends where the document ran out of
/// siblings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerContext {
    /// Siblings of the code container itself.
    pub container_siblings: Vec<String>,
    /// Siblings of the container's parent.
    pub parent_siblings: Vec<String>,
    /// Siblings of the container's grandparent.
    pub grandparent_siblings: Vec<String>,
}

/// Look-back limits per level. Text closest to the code is gathered first
/// so the cap discards the farthest content.
const CONTAINER_LOOKBACK: usize = 5;
const PARENT_LOOKBACK: usize = 3;
const GRANDPARENT_LOOKBACK: usize = 2;

/// Upper bound on the flattened window, in characters.
const MAX_CONTEXT_CHARS: usize = 2000;

/// Flatten the captured surroundings into one bounded string.
pub fn surrounding_text(ctx: &ContainerContext) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for text in ctx.container_siblings.iter().take(CONTAINER_LOOKBACK) {
        parts.push(text);
    }
    for text in ctx.parent_siblings.iter().take(PARENT_LOOKBACK) {
        parts.push(text);
    }
    for text in ctx.grandparent_siblings.iter().take(GRANDPARENT_LOOKBACK) {
        parts.push(text);
    }
    truncate_chars(parts.join(" "), MAX_CONTEXT_CHARS)
}

/// Truncate to at most `max` characters on a char boundary.
fn truncate_chars(mut text: String, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => {
            text.truncate(idx);
            text
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn joins_levels_nearest_first() {
        let ctx = ContainerContext {
            container_siblings: strings(&["a", "b"]),
            parent_siblings: strings(&["c"]),
            grandparent_siblings: strings(&["d"]),
        };
        assert_eq!(surrounding_text(&ctx), "a b c d");
    }

    #[test]
    fn applies_per_level_lookback_limits() {
        let ctx = ContainerContext {
            container_siblings: strings(&["1", "2", "3", "4", "5", "6", "7"]),
            parent_siblings: strings(&["p1", "p2", "p3", "p4"]),
            grandparent_siblings: strings(&["g1", "g2", "g3"]),
        };
        assert_eq!(surrounding_text(&ctx), "1 2 3 4 5 p1 p2 p3 g1 g2");
    }

    #[test]
    fn caps_total_length_keeping_nearest_text() {
        let near = "x".repeat(1500);
        let far = "y".repeat(1500);
        let ctx = ContainerContext {
            container_siblings: vec![near.clone(), far],
            ..ContainerContext::default()
        };
        let text = surrounding_text(&ctx);
        assert_eq!(text.len(), 2000);
        assert!(text.starts_with(&near));
        assert!(text.ends_with('y'));
    }

    #[test]
    fn empty_context_yields_empty_string() {
        assert_eq!(surrounding_text(&ContainerContext::default()), "");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let ctx = ContainerContext {
            container_siblings: vec!["é".repeat(3000)],
            ..ContainerContext::default()
        };
        let text = surrounding_text(&ctx);
        assert_eq!(text.chars().count(), 2000);
    }
}
