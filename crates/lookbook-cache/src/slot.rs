use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Durable key-value slots stored in one SQLite table
///
/// Every write replaces the whole value for its key, so a slot always holds
/// exactly what was last written.
pub struct SlotStore {
    conn: Connection,
}

impl SlotStore {
    /// Open (or create) the database at `db_path`
    pub fn new(db_path: &Path) -> crate::Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)?;
        Self::init_schema(&conn)?;
        debug!("Slot store opened at {}", db_path.display());

        Ok(Self { conn })
    }

    /// Open the database at `db_path`, or fall back to an in-memory store
    ///
    /// A database that cannot be opened (unwritable dir, not a SQLite file)
    /// only costs persistence for this session.
    pub fn open_or_in_memory(db_path: &Path) -> crate::Result<Self> {
        match Self::new(db_path) {
            Ok(store) => Ok(store),
            Err(e) => {
                warn!(
                    "Could not open {} ({}), favorites will not be saved",
                    db_path.display(),
                    e
                );
                Self::in_memory()
            }
        }
    }

    /// Throwaway store that lives as long as the connection
    pub fn in_memory() -> crate::Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn init_schema(conn: &Connection) -> crate::Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Read the raw value of a slot, `None` if it was never written
    pub fn get(&self, key: &str) -> crate::Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Overwrite a slot with a new value
    pub fn set(&self, key: &str, value: &str) -> crate::Result<()> {
        let now = Utc::now().timestamp();
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        debug!("Slot {} written ({} bytes)", key, value.len());
        Ok(())
    }
}
