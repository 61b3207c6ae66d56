use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use roster_models::store_schema::{TeamKey, TeamRow, TEAM_TABLE_DDL};
use roster_models::wire::WireRecord;
use rusqlite::Connection;
use tracing::debug;

use crate::error::StoreError;
use crate::store::{record_key, TeamStore};

/// SQLite-backed team record store.
///
/// Each record is one row keyed by `(session_id, team)` with the wire record
/// kept as JSON. Access is synchronized via `Mutex` since
/// `rusqlite::Connection` is not `Sync`.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a read-write connection, creating the schema if needed. Enables WAL mode.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(TEAM_TABLE_DDL)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database for testing.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(TEAM_TABLE_DDL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("SQLite mutex poisoned: {e}")))
    }

    /// Fetch the raw row for a key.
    pub fn get_row(&self, key: &TeamKey) -> Result<Option<TeamRow>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(
            "SELECT session_id, team, item_json, updated_at \
             FROM team_records WHERE session_id = ?1 AND team = ?2",
        )?;

        let result = stmt.query_row(rusqlite::params![key.session_id, key.team], |row| {
            Ok(TeamRow {
                session_id: row.get(0)?,
                team: row.get(1)?,
                item_json: row.get(2)?,
                updated_at: row.get(3)?,
            })
        });

        match result {
            Ok(row) => Ok(Some(row)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::Sqlite(e)),
        }
    }

    /// Count all records in the store.
    pub fn count(&self) -> Result<usize, StoreError> {
        let conn = self.lock()?;
        let count: usize =
            conn.query_row("SELECT COUNT(*) FROM team_records", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[async_trait]
impl TeamStore for SqliteStore {
    async fn get(&self, key: &TeamKey) -> Result<Option<WireRecord>, StoreError> {
        debug!(key = %key, "SQLite get");
        match self.get_row(key)? {
            Some(row) => Ok(Some(serde_json::from_str(&row.item_json)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, record: WireRecord) -> Result<(), StoreError> {
        let key = record_key(&record)?;
        let item_json = serde_json::to_string(&record)?;
        debug!(key = %key, "SQLite put");

        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO team_records (session_id, team, item_json, updated_at) \
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![key.session_id, key.team, item_json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    async fn delete(&self, key: &TeamKey) -> Result<(), StoreError> {
        debug!(key = %key, "SQLite delete");
        let conn = self.lock()?;
        conn.execute(
            "DELETE FROM team_records WHERE session_id = ?1 AND team = ?2",
            rusqlite::params![key.session_id, key.team],
        )?;
        Ok(())
    }
}
