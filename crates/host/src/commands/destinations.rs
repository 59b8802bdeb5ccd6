use std::fs;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use codedrop_core::model::Destination;

use crate::{generate_destination_id, open_store};

/// Serialized registry export, compatible with the save-dialog UI's
/// configuration format.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_destination: Option<String>,
    pub destinations: Vec<Destination>,
}

/// Register a new destination. The first one ever added becomes the
/// default automatically.
pub fn add_destination_command(store_flag: Option<&str>, name: &str, root: &str) -> Result<()> {
    let name = name.trim();
    let root = root.trim();
    if name.is_empty() {
        bail!("Destination name must not be empty");
    }
    if !root.starts_with('/') {
        bail!("Root path must be absolute (start with /): {root}");
    }

    let (_path, store) = open_store(store_flag)?;
    let id = generate_destination_id(name, Utc::now().timestamp_millis());
    let destination = Destination::new(id, name, root);
    store.add_destination(&destination).context("Failed to insert destination")?;

    let is_default = store
        .default_destination()
        .context("Failed to read default destination")?
        .as_deref()
        == Some(destination.id.as_str());

    println!("Added destination:");
    println!("  Id:   {}", destination.id);
    println!("  Name: {}", destination.name);
    println!("  Root: {}", destination.root);
    if is_default {
        println!("  (default)");
    }

    Ok(())
}

/// List all configured destinations.
pub fn list_destinations_command(store_flag: Option<&str>, json: bool) -> Result<()> {
    let (_path, store) = open_store(store_flag)?;
    let destinations = store.list_destinations().context("Failed to list destinations")?;
    let default = store.default_destination().context("Failed to read default destination")?;

    if json {
        let serialized = serde_json::to_string_pretty(&RegistryConfig {
            version: codedrop_core::version().to_string(),
            default_destination: default,
            destinations,
        })
        .context("Failed to serialize destinations to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("Destinations ({}):", destinations.len());
    if destinations.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for destination in destinations {
        let marker =
            if default.as_deref() == Some(destination.id.as_str()) { " [default]" } else { "" };
        println!("  - {}{} root={}", destination.id, marker, destination.root);
    }

    Ok(())
}

/// Remove a destination and its recent-path history.
pub fn remove_destination_command(store_flag: Option<&str>, id: &str) -> Result<()> {
    let (_path, store) = open_store(store_flag)?;
    let removed = store.remove_destination(id).context("Failed to remove destination")?;
    if !removed {
        bail!("No destination with id {id}");
    }
    println!("Removed destination {id}");
    Ok(())
}

/// Point the default at an existing destination.
pub fn set_default_command(store_flag: Option<&str>, id: &str) -> Result<()> {
    let (_path, store) = open_store(store_flag)?;
    store
        .get_destination(id)
        .context("Failed to look up destination")?
        .ok_or_else(|| anyhow!("No destination with id {id}"))?;
    store.set_default_destination(id).context("Failed to set default destination")?;
    println!("Default destination is now {id}");
    Ok(())
}

/// Export the registry as JSON (or YAML) to stdout or a file.
pub fn export_command(store_flag: Option<&str>, output: Option<&str>, yaml: bool) -> Result<()> {
    let (_path, store) = open_store(store_flag)?;
    let config = RegistryConfig {
        version: codedrop_core::version().to_string(),
        default_destination: store
            .default_destination()
            .context("Failed to read default destination")?,
        destinations: store.list_destinations().context("Failed to list destinations")?,
    };

    let body = if yaml {
        serde_yaml::to_string(&config).context("Failed to serialize registry to YAML")?
    } else {
        serde_json::to_string_pretty(&config).context("Failed to serialize registry to JSON")?
    };

    match output {
        Some(file) => {
            fs::write(file, body).with_context(|| format!("Failed to write export to {file}"))?;
            println!("Exported {} destination(s) to {file}", config.destinations.len());
        }
        None => println!("{}", body),
    }

    Ok(())
}

/// Import a registry export, replacing the current configuration.
///
/// Refuses to clobber a non-empty registry unless `--force` is passed.
pub fn import_command(store_flag: Option<&str>, file: &str, yaml: bool, force: bool) -> Result<()> {
    let body =
        fs::read_to_string(file).with_context(|| format!("Failed to read import file {file}"))?;

    let config: RegistryConfig = if yaml {
        serde_yaml::from_str(&body).context("Failed to parse registry YAML")?
    } else {
        serde_json::from_str(&body).context("Failed to parse registry JSON")?
    };

    for destination in &config.destinations {
        if destination.id.is_empty() || destination.name.is_empty() || destination.root.is_empty()
        {
            bail!("Invalid config: destination missing id, name, or root");
        }
    }

    let (_path, mut store) = open_store(store_flag)?;
    let existing = store.list_destinations().context("Failed to list destinations")?;
    if !existing.is_empty() && !force {
        bail!(
            "Store already has {} destination(s); pass --force to replace them",
            existing.len()
        );
    }

    store
        .replace_destinations(&config.destinations, config.default_destination.as_deref())
        .context("Failed to replace destination registry")?;

    println!("Imported {} destination(s)", config.destinations.len());
    Ok(())
}
