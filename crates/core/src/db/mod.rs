//! Destination registry and recent-path history persistence.
//!
//! This module wraps a SQLite database storing:
//! - Configured save destinations (opaque id, display name, absolute root)
//!   plus the default-destination pointer.
//! - Per-destination recent save paths, most-recent-first, capped at
//!   [`crate::history::MAX_RECENT_PATHS`].
//!
//! The registry is read-only to the suggestion flow; only frontends mutate
//! it. History reads are expected to degrade to "no history" on failure at
//! the call sites that assemble suggestions.

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection};
use thiserror::Error;

use crate::history::{directory_prefix, MAX_RECENT_PATHS};
use crate::model::Destination;

/// Minimum schema version we know how to handle.
///
/// `0` means "no schema yet" (fresh DB).
const MIN_SUPPORTED_SCHEMA_VERSION: i32 = 0;

/// Latest schema version this crate knows about.
const CURRENT_SCHEMA_VERSION: i32 = 2;

/// Settings-table key holding the default destination id.
const DEFAULT_DESTINATION_KEY: &str = "default_destination";

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying SQLite error.
    #[error("SQLite error: {0}")]
    Sql(#[from] rusqlite::Error),

    /// The database was created with a newer schema version than we support.
    ///
    /// This is intentionally explicit so callers can surface a clear message
    /// instead of silently clobbering or misinterpreting data.
    #[error(
        "Unsupported schema version {found}; supported range is {min_supported}..={max_supported}"
    )]
    UnsupportedSchemaVersion { found: i32, min_supported: i32, max_supported: i32 },
}

/// Convenience result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// SQLite-backed destination/history store.
///
/// A thin wrapper around `rusqlite::Connection` responsible for:
/// - Opening/creating the DB file.
/// - Applying schema migrations.
/// - Providing small, testable helpers for querying and updating records.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) a store at the given path and ensure the schema
    /// exists.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        apply_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory store. Used by tests and by frontends that want a
    /// throwaway registry.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        apply_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Expose a reference to the underlying connection for advanced
    /// callers. For most code, prefer the higher-level helpers.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    // ---- destination registry ----

    /// Insert a destination. The first destination ever added becomes the
    /// default automatically.
    pub fn add_destination(&self, destination: &Destination) -> StoreResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO destinations (id, name, root, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                destination.id,
                destination.name,
                destination.root,
                Utc::now().to_rfc3339()
            ],
        )?;
        if self.default_destination()?.is_none() {
            self.set_default_destination(&destination.id)?;
        }
        Ok(())
    }

    /// List all destinations in insertion order.
    pub fn list_destinations(&self) -> StoreResult<Vec<Destination>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, root
            FROM destinations
            ORDER BY rowid
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Destination { id: row.get(0)?, name: row.get(1)?, root: row.get(2)? })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Look up a single destination by id.
    pub fn get_destination(&self, id: &str) -> StoreResult<Option<Destination>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, root
            FROM destinations
            WHERE id = ?1
            "#,
        )?;
        let mut rows = stmt.query_map(params![id], |row| {
            Ok(Destination { id: row.get(0)?, name: row.get(1)?, root: row.get(2)? })
        })?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// Remove a destination and its recent-path history. If it was the
    /// default, the default moves to the first remaining destination (or is
    /// cleared). Returns whether a row was actually deleted.
    pub fn remove_destination(&self, id: &str) -> StoreResult<bool> {
        let deleted = self.conn.execute("DELETE FROM destinations WHERE id = ?1", params![id])?;
        self.conn.execute("DELETE FROM recent_paths WHERE destination = ?1", params![id])?;

        if self.default_destination()?.as_deref() == Some(id) {
            match self.list_destinations()?.first() {
                Some(first) => self.set_default_destination(&first.id)?,
                None => {
                    self.conn.execute(
                        "DELETE FROM settings WHERE key = ?1",
                        params![DEFAULT_DESTINATION_KEY],
                    )?;
                }
            }
        }
        Ok(deleted > 0)
    }

    /// The configured default destination id, if any.
    pub fn default_destination(&self) -> StoreResult<Option<String>> {
        let mut stmt = self.conn.prepare("SELECT value FROM settings WHERE key = ?1")?;
        let mut rows = stmt.query_map(params![DEFAULT_DESTINATION_KEY], |row| row.get(0))?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// Point the default at `id`.
    pub fn set_default_destination(&self, id: &str) -> StoreResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO settings (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
            params![DEFAULT_DESTINATION_KEY, id],
        )?;
        Ok(())
    }

    /// Replace the whole registry (import). Runs in one transaction so a
    /// bad import cannot leave a half-replaced registry behind.
    pub fn replace_destinations(
        &mut self,
        destinations: &[Destination],
        default: Option<&str>,
    ) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM destinations", [])?;
        tx.execute("DELETE FROM settings WHERE key = ?1", params![DEFAULT_DESTINATION_KEY])?;
        let now = Utc::now().to_rfc3339();
        for destination in destinations {
            tx.execute(
                r#"
                INSERT INTO destinations (id, name, root, created_at)
                VALUES (?1, ?2, ?3, ?4)
                "#,
                params![destination.id, destination.name, destination.root, now],
            )?;
        }
        let default = default
            .map(str::to_string)
            .or_else(|| destinations.first().map(|d| d.id.clone()));
        if let Some(id) = default {
            tx.execute(
                r#"
                INSERT INTO settings (key, value) VALUES (?1, ?2)
                ON CONFLICT(key) DO UPDATE SET value = excluded.value
                "#,
                params![DEFAULT_DESTINATION_KEY, id],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    // ---- recent-path history ----

    /// Record a successful save of `path` under `destination`: insert at
    /// the front, drop any prior occurrence, truncate to the cap.
    pub fn remember(&self, destination: &str, path: &str) -> StoreResult<()> {
        self.conn.execute(
            "DELETE FROM recent_paths WHERE destination = ?1 AND path = ?2",
            params![destination, path],
        )?;
        self.conn.execute(
            r#"
            INSERT INTO recent_paths (destination, path, used_at)
            VALUES (?1, ?2, ?3)
            "#,
            params![destination, path, Utc::now().to_rfc3339()],
        )?;
        self.conn.execute(
            r#"
            DELETE FROM recent_paths
            WHERE destination = ?1
              AND id NOT IN (
                  SELECT id FROM recent_paths
                  WHERE destination = ?1
                  ORDER BY id DESC
                  LIMIT ?2
              )
            "#,
            params![destination, MAX_RECENT_PATHS as i64],
        )?;
        Ok(())
    }

    /// Recent paths for `destination`, most-recent-first, at most the cap.
    pub fn recent_paths(&self, destination: &str) -> StoreResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT path FROM recent_paths
            WHERE destination = ?1
            ORDER BY id DESC
            LIMIT ?2
            "#,
        )?;
        let rows = stmt.query_map(params![destination, MAX_RECENT_PATHS as i64], |row| {
            row.get(0)
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Directory prefix (up to and including the final separator) of the
    /// newest remembered path, or the empty string when there is none.
    pub fn last_directory(&self, destination: &str) -> StoreResult<String> {
        let paths = self.recent_paths(destination)?;
        Ok(paths.first().map(|p| directory_prefix(p).to_string()).unwrap_or_default())
    }
}

/// Apply schema migrations to bring the database to the latest version.
///
/// We use `PRAGMA user_version` as the schema version indicator.
///
/// Version map:
/// - 0: no schema
/// - 1: initial schema (destinations, settings)
/// - 2: add recent_paths table
fn apply_migrations(conn: &Connection) -> StoreResult<()> {
    let current_version = current_schema_version(conn)?;

    // Reject DBs created with a newer schema than we support.
    if current_version > CURRENT_SCHEMA_VERSION {
        return Err(StoreError::UnsupportedSchemaVersion {
            found: current_version,
            min_supported: MIN_SUPPORTED_SCHEMA_VERSION,
            max_supported: CURRENT_SCHEMA_VERSION,
        });
    }

    if current_version == 0 {
        // Initial schema.
        conn.execute_batch(
            r#"
            BEGIN;
            CREATE TABLE IF NOT EXISTS destinations (
                id         TEXT PRIMARY KEY,
                name       TEXT NOT NULL,
                root       TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS settings (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            PRAGMA user_version = 1;
            COMMIT;
            "#,
        )?;
    }

    if current_version < 2 {
        conn.execute_batch(
            r#"
            BEGIN;
            CREATE TABLE IF NOT EXISTS recent_paths (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                destination TEXT NOT NULL,
                path        TEXT NOT NULL,
                used_at     TEXT NOT NULL,
                UNIQUE(destination, path)
            );

            PRAGMA user_version = 2;
            COMMIT;
            "#,
        )?;
    }

    Ok(())
}

/// Read the SQLite schema version from `PRAGMA user_version`.
fn current_schema_version(conn: &Connection) -> StoreResult<i32> {
    let version: i32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    Ok(version)
}
