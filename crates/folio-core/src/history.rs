//! Portfolio history: one record per successful parse, keyed by user.
//!
//! The store is handed to request handlers at construction time; nothing in
//! this crate opens a store on its own.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ExtractionMethod, PortfolioRecord};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("failed to (de)serialize history record: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Section counts of a saved portfolio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub skill_count: usize,
    pub experience_count: usize,
    pub project_count: usize,
    pub education_count: usize,
}

impl HistorySummary {
    pub fn of(record: &PortfolioRecord) -> Self {
        Self {
            skill_count: record.skill_count(),
            experience_count: record.experience.len(),
            project_count: record.projects.len(),
            education_count: record.education.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub user_id: String,
    pub portfolio_id: String,
    pub user_email: String,
    pub name: String,
    pub title: String,
    pub file_name: String,
    pub extraction_method: ExtractionMethod,
    pub created_at: DateTime<Utc>,
    pub summary: HistorySummary,
}

impl HistoryRecord {
    /// Build a record for a freshly extracted portfolio with a new v4 id.
    pub fn new(
        user_id: &str,
        user_email: &str,
        file_name: &str,
        method: ExtractionMethod,
        record: &PortfolioRecord,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            portfolio_id: uuid::Uuid::new_v4().to_string(),
            user_email: user_email.to_string(),
            name: record.personal.name.clone(),
            title: record.personal.title.clone(),
            file_name: file_name.to_string(),
            extraction_method: method,
            created_at: Utc::now(),
            summary: HistorySummary::of(record),
        }
    }
}

/// Persistence for [`HistoryRecord`]s.
pub trait HistoryStore: Send + Sync {
    fn save(&self, record: &HistoryRecord) -> Result<(), StoreError>;

    /// All records of `user_id`, newest first.
    fn list(&self, user_id: &str) -> Result<Vec<HistoryRecord>, StoreError>;

    /// Remove one record. Returns `false` when it did not exist.
    fn delete(&self, user_id: &str, portfolio_id: &str) -> Result<bool, StoreError>;
}

fn open_sqlite(path: &Path) -> Result<Connection, rusqlite::Error> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags)?;
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA busy_timeout = 5000;",
    )?;
    Ok(conn)
}

fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS portfolio_history (
             user_id      TEXT NOT NULL,
             portfolio_id TEXT NOT NULL,
             created_at   TEXT NOT NULL,
             record_json  TEXT NOT NULL,
             PRIMARY KEY (user_id, portfolio_id)
         );
         CREATE INDEX IF NOT EXISTS idx_history_user_created
             ON portfolio_history (user_id, created_at);",
    )
}

/// SQLite-backed history store.
pub struct SqliteHistoryStore {
    conn: Mutex<Connection>,
}

impl SqliteHistoryStore {
    /// Open (creating if needed) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = open_sqlite(path)?;
        init_schema(&conn)?;
        tracing::debug!(path = %path.display(), "opened history store");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl HistoryStore for SqliteHistoryStore {
    fn save(&self, record: &HistoryRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string(record)?;
        // Fixed-width UTC timestamps sort lexicographically.
        let created = record
            .created_at
            .to_rfc3339_opts(SecondsFormat::Micros, true);
        self.conn().execute(
            "INSERT OR REPLACE INTO portfolio_history
                 (user_id, portfolio_id, created_at, record_json)
             VALUES (?1, ?2, ?3, ?4)",
            params![record.user_id, record.portfolio_id, created, json],
        )?;
        Ok(())
    }

    fn list(&self, user_id: &str) -> Result<Vec<HistoryRecord>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT record_json FROM portfolio_history
             WHERE user_id = ?1
             ORDER BY created_at DESC, rowid DESC",
        )?;
        let rows = stmt.query_map(params![user_id], |row| row.get::<_, String>(0))?;

        let mut records = Vec::new();
        for json in rows {
            records.push(serde_json::from_str(&json?)?);
        }
        Ok(records)
    }

    fn delete(&self, user_id: &str, portfolio_id: &str) -> Result<bool, StoreError> {
        let conn = self.conn();
        let existing: Option<String> = conn
            .query_row(
                "SELECT portfolio_id FROM portfolio_history
                 WHERE user_id = ?1 AND portfolio_id = ?2",
                params![user_id, portfolio_id],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_none() {
            return Ok(false);
        }
        conn.execute(
            "DELETE FROM portfolio_history WHERE user_id = ?1 AND portfolio_id = ?2",
            params![user_id, portfolio_id],
        )?;
        Ok(true)
    }
}

/// Process-local store, used by tests and one-shot CLI runs.
#[derive(Default)]
pub struct InMemoryHistoryStore {
    records: Mutex<Vec<HistoryRecord>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn save(&self, record: &HistoryRecord) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.retain(|r| {
            !(r.user_id == record.user_id && r.portfolio_id == record.portfolio_id)
        });
        records.push(record.clone());
        Ok(())
    }

    fn list(&self, user_id: &str) -> Result<Vec<HistoryRecord>, StoreError> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        let mut out: Vec<HistoryRecord> = records
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    fn delete(&self, user_id: &str, portfolio_id: &str) -> Result<bool, StoreError> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        let before = records.len();
        records.retain(|r| !(r.user_id == user_id && r.portfolio_id == portfolio_id));
        Ok(records.len() != before)
    }
}
