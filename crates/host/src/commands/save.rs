use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::commands::suggest::read_input;
use crate::{join_destination_path, open_store, write_content};

/// Save content under a configured destination and remember the relative
/// path for future directory biasing.
pub fn save_command(
    store_flag: Option<&str>,
    destination: Option<&str>,
    relative_path: &str,
    file: Option<&str>,
) -> Result<()> {
    let relative_path = relative_path.trim().trim_start_matches('/');
    if relative_path.is_empty() {
        bail!("Relative path must not be empty");
    }

    let (_path, store) = open_store(store_flag)?;

    let destination_id = match destination {
        Some(id) => id.to_string(),
        None => store
            .default_destination()
            .context("Failed to read default destination")?
            .ok_or_else(|| {
                anyhow::anyhow!("No destinations configured; add one with `destinations add`")
            })?,
    };
    let Some(destination) = store
        .get_destination(&destination_id)
        .context("Failed to look up destination")?
    else {
        bail!("No destination with id {destination_id}");
    };

    let content = read_input(file)?;
    let absolute = join_destination_path(&destination.root, relative_path);
    let written = write_content(Path::new(&absolute), &content)
        .with_context(|| format!("Save failed for {absolute}"))?;

    // History is best-effort: a persistence failure must not fail the save.
    if let Err(err) = store.remember(&destination_id, relative_path) {
        tracing::warn!("failed to record recent path for {destination_id}: {err}");
    }

    println!("Saved to {}", written.display());
    Ok(())
}
