use anyhow::{Context, Result};

use crate::open_store;

/// Check that the store is reachable and report basic info.
pub fn ping_command(store_flag: Option<&str>) -> Result<()> {
    let (path, store) = open_store(store_flag)?;
    let destinations = store.list_destinations().context("Failed to list destinations")?;

    println!("codedrop v{}", codedrop_core::version());
    println!("  Store: {}", path.display());
    println!("  Destinations: {}", destinations.len());

    Ok(())
}
