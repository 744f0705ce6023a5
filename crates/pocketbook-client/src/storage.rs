//! Durable key-value slots.
//!
//! The ledger is persisted as one text value under one key. Anything that
//! can hand back the last written value for a key can back a
//! [`TransactionStore`](crate::store::TransactionStore).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, params};

use crate::ClientResult;
use crate::state::map_sqlite_error;

pub trait KeyValueStorage {
    fn get(&self, key: &str) -> ClientResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> ClientResult<()>;
}

/// Process-local storage. Values live as long as the instance.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.values.insert(key.to_string(), value.to_string());
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> ClientResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Slots kept in the `internal_kv` table of the ledger database.
#[derive(Debug)]
pub struct SqliteStorage {
    connection: Connection,
    db_path: PathBuf,
}

impl SqliteStorage {
    /// Wraps a connection whose schema is already migrated.
    pub fn new(connection: Connection, db_path: &Path) -> Self {
        Self {
            connection,
            db_path: db_path.to_path_buf(),
        }
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        self.connection
            .query_row(
                "SELECT value FROM internal_kv WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|error| map_sqlite_error(&self.db_path, &error))
    }

    fn set(&mut self, key: &str, value: &str) -> ClientResult<()> {
        self.connection
            .execute(
                "INSERT INTO internal_kv (key, value, updated_at)
                 VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at",
                params![key, value],
            )
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;
        tracing::debug!(key, bytes = value.len(), "wrote storage slot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use rusqlite::Connection;

    use super::{KeyValueStorage, MemoryStorage, SqliteStorage};
    use crate::migrations::run_pending;

    #[test]
    fn memory_storage_returns_last_value() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("transactions").ok(), Some(None));
        assert!(storage.set("transactions", "[]").is_ok());
        assert!(storage.set("transactions", "[1]").is_ok());
        assert_eq!(
            storage.get("transactions").ok().flatten().as_deref(),
            Some("[1]")
        );
    }

    #[test]
    fn sqlite_storage_upserts_by_key() {
        let opened = Connection::open_in_memory();
        assert!(opened.is_ok());
        if let Ok(mut connection) = opened {
            assert!(run_pending(&mut connection).is_ok());
            let mut storage = SqliteStorage::new(connection, Path::new(":memory:"));

            assert_eq!(storage.get("transactions").ok(), Some(None));
            assert!(storage.set("transactions", "[]").is_ok());
            assert!(storage.set("transactions", "[{\"id\":1}]").is_ok());
            assert!(storage.set("other", "x").is_ok());
            assert_eq!(
                storage.get("transactions").ok().flatten().as_deref(),
                Some("[{\"id\":1}]")
            );
            assert_eq!(storage.get("other").ok().flatten().as_deref(), Some("x"));
        }
    }
}
