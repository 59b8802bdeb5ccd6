use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use codedrop_core::db::Store;

pub mod commands;
pub mod protocol;

/// Resolve the store database path: an explicit `--store` flag wins,
/// otherwise the platform data directory is used.
pub fn resolve_store_path(flag: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(PathBuf::from(path));
    }
    let base = dirs::data_dir().context("Failed to locate a platform data directory")?;
    Ok(base.join("codedrop").join("codedrop.db"))
}

/// Resolve the store path, create its parent directory, and open the store.
pub fn open_store(flag: Option<&str>) -> Result<(PathBuf, Store)> {
    let path = resolve_store_path(flag)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create store dir: {}", parent.display()))?;
    }
    let store = Store::open(&path)
        .with_context(|| format!("Failed to open codedrop store at {}", path.display()))?;
    Ok((path, store))
}

/// Join a destination root and a relative path, normalizing duplicate
/// separators on either side of the seam.
pub fn join_destination_path(root: &str, relative: &str) -> String {
    format!("{}/{}", root.trim_end_matches('/'), relative.trim_start_matches('/'))
}

/// Write `content` at `abs_path`, creating missing parent directories.
///
/// The path must already be absolute; relative paths are resolved by the
/// caller against a destination root, never here.
pub fn write_content(abs_path: &Path, content: &str) -> Result<PathBuf> {
    if !abs_path.is_absolute() {
        bail!("Path must be absolute: {}", abs_path.display());
    }
    if let Some(parent) = abs_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create directories: {}", parent.display())
            })?;
        }
    }
    fs::write(abs_path, content)
        .with_context(|| format!("Failed to write file: {}", abs_path.display()))?;
    Ok(abs_path.to_path_buf())
}

/// Generate a destination id from a display name: lowercase slug plus a
/// base-36 millis suffix so re-adding the same name stays unique.
pub fn generate_destination_id(name: &str, now_millis: i64) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    let slug = slug.trim_matches('-');
    let slug = if slug.is_empty() { "destination" } else { slug };
    format!("{slug}-{}", base36(now_millis))
}

/// Initialize stderr logging. Stdout stays clean: in serve mode it carries
/// the wire protocol.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Lower-case base-36 rendering of a non-negative value.
fn base36(mut value: i64) -> String {
    if value <= 0 {
        return "0".to_string();
    }
    let mut out = String::new();
    while value > 0 {
        let digit = (value % 36) as u32;
        out.insert(0, char::from_digit(digit, 36).unwrap_or('0'));
        value /= 36;
    }
    out
}
