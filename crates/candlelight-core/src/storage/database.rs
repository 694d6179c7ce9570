//! SQLite-backed key-value store for the persisted record.

use std::path::Path;

use rusqlite::{params, Connection};

use super::data_dir;
use super::state::{StateKey, StateStore, StateWrite};
use crate::error::StorageError;

/// SQLite database holding the `kv` table.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/candlelight.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        Self::open_at(&data_dir()?.join("candlelight.db"))
    }

    /// Open (or create) a database file at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    ///
    /// # Errors
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Delete a key from the kv store. Missing keys are not an error.
    pub fn kv_delete(&self, key: &str) -> Result<(), rusqlite::Error> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

impl StateStore for Database {
    fn get(&self, key: StateKey) -> Result<Option<String>, StorageError> {
        Ok(self.kv_get(key.as_str())?)
    }

    fn set(&mut self, key: StateKey, value: &str) -> Result<(), StorageError> {
        Ok(self.kv_set(key.as_str(), value)?)
    }

    fn remove(&mut self, key: StateKey) -> Result<(), StorageError> {
        Ok(self.kv_delete(key.as_str())?)
    }

    /// All writes share one transaction; any failure rolls every key back.
    fn write_batch(&mut self, writes: &[StateWrite]) -> Result<(), StorageError> {
        let tx = self.conn.unchecked_transaction()?;
        for write in writes {
            match write {
                StateWrite::Set(key, value) => {
                    tx.execute(
                        "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                        params![key.as_str(), value],
                    )?;
                }
                StateWrite::Remove(key) => {
                    tx.execute("DELETE FROM kv WHERE key = ?1", params![key.as_str()])?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::PersistedState;

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        db.kv_delete("test").unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
    }

    #[test]
    fn record_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candlelight.db");

        let mut db = Database::open_at(&path).unwrap();
        let state = PersistedState {
            streak: 3,
            burn_end_at: 42,
            ..PersistedState::default()
        };
        state.save(&mut db).unwrap();
        drop(db);

        let db = Database::open_at(&path).unwrap();
        assert_eq!(PersistedState::load(&db).unwrap(), state);
    }

    #[test]
    fn failed_save_commits_nothing() {
        let mut db = Database::open_memory().unwrap();
        // Role, mode and sound go through; the last date write aborts, as a
        // full disk would.
        db.conn
            .execute_batch(
                "CREATE TRIGGER fail_last_date BEFORE INSERT ON kv
                 WHEN NEW.key = 'wp_lastDate'
                 BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
            )
            .unwrap();

        let state = PersistedState {
            role: "designer".into(),
            last_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 2),
            streak: 5,
            ..PersistedState::default()
        };
        assert!(matches!(state.save(&mut db), Err(StorageError::Sqlite(_))));

        for key in StateKey::ALL {
            assert_eq!(db.kv_get(key.as_str()).unwrap(), None, "{key:?} was written");
        }
        assert_eq!(PersistedState::load(&db).unwrap(), PersistedState::default());
    }

    #[test]
    fn batch_replaces_and_removes() {
        let mut db = Database::open_memory().unwrap();
        db.kv_set("wp_lastDate", "2024-01-01").unwrap();
        db.write_batch(&[
            StateWrite::Set(StateKey::Streak, "2".into()),
            StateWrite::Set(StateKey::Streak, "3".into()),
            StateWrite::Remove(StateKey::LastDate),
        ])
        .unwrap();
        assert_eq!(db.kv_get("wp_streak").unwrap().as_deref(), Some("3"));
        assert_eq!(db.kv_get("wp_lastDate").unwrap(), None);
    }
}
