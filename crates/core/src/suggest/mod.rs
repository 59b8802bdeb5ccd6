//! Final default-path assembly: detection output plus the destination's
//! last-used directory.

use crate::db::Store;
use crate::model::DetectionResult;

/// Combine an inferred (or user-edited) name with a destination's
/// last-used directory prefix.
///
/// A value that already carries a path separator is assumed to encode its
/// own location and passes through unchanged.
pub fn assemble(name: &str, last_dir: &str) -> String {
    if name.contains('/') || last_dir.is_empty() {
        name.to_string()
    } else {
        format!("{last_dir}{name}")
    }
}

/// Default relative path for `detection` under `destination`.
///
/// Never fails: an unreadable history degrades to an empty directory
/// prefix, so the bare suggested name comes back.
pub fn suggest_path(store: &Store, detection: &DetectionResult, destination: &str) -> String {
    rebase_path(store, &detection.suggested_name, destination)
}

/// Re-run assembly when the selected destination changes.
///
/// `current_value` is whatever the save dialog holds (possibly edited by
/// the user); once it contains a separator it is left untouched.
pub fn rebase_path(store: &Store, current_value: &str, destination: &str) -> String {
    let last_dir = match store.last_directory(destination) {
        Ok(dir) => dir,
        Err(err) => {
            tracing::warn!("recent-path history unavailable for {destination}: {err}");
            String::new()
        }
    };
    assemble(current_value, &last_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assemble_prepends_last_directory_to_bare_names() {
        assert_eq!(assemble("main.rs", "src/"), "src/main.rs");
        assert_eq!(assemble("main.rs", ""), "main.rs");
    }

    #[test]
    fn assemble_leaves_pathful_names_alone() {
        assert_eq!(assemble("tests/it.rs", "src/"), "tests/it.rs");
    }
}
