use anyhow::{Context, Result};

use crate::open_store;

/// List recent save paths for one destination, most recent first.
pub fn history_list_command(store_flag: Option<&str>, destination: &str, json: bool) -> Result<()> {
    let (_path, store) = open_store(store_flag)?;
    let paths = store.recent_paths(destination).context("Failed to read recent paths")?;

    if json {
        let serialized =
            serde_json::to_string_pretty(&paths).context("Failed to serialize paths to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("Recent paths for {destination} ({}):", paths.len());
    if paths.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for path in paths {
        println!("  - {path}");
    }

    Ok(())
}
