//! SQLite-backed key-value store
//!
//! A single `kv` table; writes are upserts inside SQLite's own transaction,
//! so readers see either the old or the new value.

use crate::errors::{from_rusqlite, lock_poisoned, Result};
use crate::kv::{validate_key, KeyValueStore};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

const CREATE_KV_TABLE: &str = "CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
)";

/// SQLite key-value store
pub struct SqliteKvStore {
    conn: Mutex<Connection>,
}

impl SqliteKvStore {
    /// Open (or create) a database file and ensure the schema
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path).map_err(from_rusqlite)?;
        // WAL so a second process can read while this one writes
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))
            .map_err(from_rusqlite)?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(from_rusqlite)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(CREATE_KV_TABLE, []).map_err(from_rusqlite)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl KeyValueStore for SqliteKvStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let conn = self.conn.lock().map_err(|_| lock_poisoned("read_kv"))?;
        conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
            row.get::<_, String>(0)
        })
        .optional()
        .map_err(from_rusqlite)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        let conn = self.conn.lock().map_err(|_| lock_poisoned("write_kv"))?;
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        let conn = self.conn.lock().map_err(|_| lock_poisoned("remove_kv"))?;
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(from_rusqlite)?;
        Ok(())
    }
}
