//! Storage layer for formcraft.
//!
//! A small `SQLite` key-value store. Each persisted collection (responses,
//! forms) is one JSON array under one fixed key, and every write replaces
//! the whole value:
//!
//! - [`responses::ResponseStore`] keeps submitted responses.
//! - [`forms::FormLibrary`] keeps authored forms.
//!
//! Two processes writing the same key interleave read-modify-write cycles
//! and the later write wins. A value that no longer parses is shown as empty
//! but never written over.

pub mod forms;
pub mod migrations;
pub mod responses;
pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

pub use forms::FormLibrary;
pub use responses::ResponseStore;

/// Key-value storage backed by `SQLite`.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::initialize_schema(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value: Option<Option<String>> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;
        Ok(value.flatten())
    }

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            (key, value),
        )?;
        debug!(key, bytes = value.len(), "Stored value");
        Ok(())
    }

    /// Remove `key`. Returns whether anything was stored under it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let changed = self.conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(changed > 0)
    }

    /// Load the JSON array stored under `key`. A missing key reads as empty.
    ///
    /// Read-modify-write paths use this so an unreadable value is never
    /// overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptCollection`] if the stored value is not valid
    /// JSON for `T`, or an error if the database operation fails.
    pub(crate) fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let Some(raw) = self.get(key)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|source| Error::CorruptCollection {
            key: key.to_string(),
            source,
        })
    }

    /// Like [`Self::load_collection`], but an unreadable value is logged and
    /// read as empty. For display paths only.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub(crate) fn load_collection_or_empty<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Vec<T>> {
        match self.load_collection(key) {
            Err(Error::CorruptCollection { key, source }) => {
                warn!(%key, error = %source, "Stored collection is corrupt, treating as empty");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Replace the JSON array stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database operation fails.
    pub(crate) fn store_collection<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let raw = serde_json::to_string(items)?;
        self.set(key, &raw)
    }
}
