//! Local key-value storage for the booking engine
//!
//! Every collection (users, passengers, orders, trains) and every session field
//! is persisted as a string value under a fixed key. Collections are JSON blobs.

use crate::error::{BookingError, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Fixed storage keys
pub mod keys {
    pub const USERS: &str = "app_users";
    pub const PASSENGERS: &str = "app_passengers";
    pub const ORDERS: &str = "app_orders";
    pub const TRAINS: &str = "app_trains";
    pub const TOKEN: &str = "app_token";
    pub const CURRENT_USER_ID: &str = "app_current_user_id";
    pub const TOKEN_EXPIRES_AT: &str = "app_token_expires_at";
}

/// SQLite-backed key-value store
///
/// A single `kv_store` table holds all values. The connection sits behind a
/// mutex so services can share the store through `Arc`.
pub struct LocalStore {
    db: Mutex<Connection>,
    db_path: PathBuf,
}

impl LocalStore {
    /// Open (or create) a store at the given database path
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&db_path)
            .map_err(|e| BookingError::Storage(format!("Failed to open database: {}", e)))?;
        Self::initialize(&conn)?;

        Ok(Self {
            db: Mutex::new(conn),
            db_path,
        })
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| BookingError::Storage(format!("Failed to create in-memory DB: {}", e)))?;
        Self::initialize(&conn)?;

        Ok(Self {
            db: Mutex::new(conn),
            db_path: PathBuf::from(":memory:"),
        })
    }

    fn initialize(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.db
            .lock()
            .map_err(|_| BookingError::Storage("Failed to lock database".to_string()))
    }

    /// Read the raw value stored under `key`
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let db = self.lock()?;
        let value = db
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        log::debug!("get {} ({})", key, if value.is_some() { "hit" } else { "miss" });
        Ok(value)
    }

    /// Store a raw value under `key`, replacing any previous value
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let db = self.lock()?;
        db.execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().to_rfc3339()],
        )?;

        log::debug!("set {} ({} bytes)", key, value.len());
        Ok(())
    }

    /// Remove the value under `key`. Removing an absent key is not an error.
    pub fn remove_item(&self, key: &str) -> Result<()> {
        let db = self.lock()?;
        db.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;

        log::debug!("remove {}", key);
        Ok(())
    }

    /// Deserialize the JSON value under `key`, falling back to `T::default()` when absent
    pub fn read_json<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.get_item(key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(T::default()),
        }
    }

    /// Deserialize the JSON value under `key` if one is stored
    pub fn read_json_opt<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.get_item(key)?
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .map_err(Into::into)
    }

    /// Serialize `value` as JSON under `key`
    pub fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.set_item(key, &raw)
    }
}
