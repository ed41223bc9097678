//! Browsing history for Probe Browser.
//!
//! Implements `HistoryManagerTrait` — recording visits, searching, listing,
//! and clearing history, backed by SQLite via `rusqlite`.

use rusqlite::{params, Connection};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::types::errors::HistoryError;
use crate::types::history::HistoryEntry;

/// Trait defining history operations.
pub trait HistoryManagerTrait {
    fn record_visit(&mut self, url: &str, title: &str) -> Result<String, HistoryError>;
    fn touch_title(&mut self, url: &str, title: &str) -> Result<(), HistoryError>;
    fn search_history(&self, query: &str) -> Result<Vec<HistoryEntry>, HistoryError>;
    fn list_history(&self, limit: Option<usize>) -> Result<Vec<HistoryEntry>, HistoryError>;
    fn delete_entry(&mut self, id: &str) -> Result<(), HistoryError>;
    fn clear_all(&mut self) -> Result<(), HistoryError>;
}

/// History manager backed by a SQLite connection.
pub struct HistoryManager<'a> {
    conn: &'a Connection,
}

impl<'a> HistoryManager<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<HistoryEntry> {
        Ok(HistoryEntry {
            id: row.get(0)?,
            url: row.get(1)?,
            title: row.get(2)?,
            visit_time: row.get(3)?,
            visit_count: row.get(4)?,
        })
    }
}

impl<'a> HistoryManagerTrait for HistoryManager<'a> {
    /// Records a page visit. If the URL already exists, increments
    /// visit_count and updates the visit_time and title. Returns the entry ID.
    fn record_visit(&mut self, url: &str, title: &str) -> Result<String, HistoryError> {
        let now = Self::now();

        let existing: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM history WHERE url = ?1",
                params![url],
                |row| row.get(0),
            )
            .ok();

        match existing {
            Some(id) => {
                self.conn
                    .execute(
                        "UPDATE history SET visit_count = visit_count + 1, visit_time = ?1, title = ?2 WHERE id = ?3",
                        params![now, title, id],
                    )
                    .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;
                Ok(id)
            }
            None => {
                let id = Uuid::new_v4().to_string();
                self.conn
                    .execute(
                        "INSERT INTO history (id, url, title, visit_time, visit_count) VALUES (?1, ?2, ?3, ?4, 1)",
                        params![id, url, title, now],
                    )
                    .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;
                Ok(id)
            }
        }
    }

    /// Refreshes the stored title for a URL once the page reports it.
    /// Pages commit navigation before their title arrives, so the visit row
    /// often starts with a stale or empty title. No-op for unknown URLs and
    /// never bumps the visit count.
    fn touch_title(&mut self, url: &str, title: &str) -> Result<(), HistoryError> {
        self.conn
            .execute(
                "UPDATE history SET title = ?1 WHERE url = ?2",
                params![title, url],
            )
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    /// Searches history entries by title or URL using SQL LIKE.
    fn search_history(&self, query: &str) -> Result<Vec<HistoryEntry>, HistoryError> {
        let pattern = format!("%{}%", query);
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, url, title, visit_time, visit_count \
                 FROM history WHERE title LIKE ?1 OR url LIKE ?2 \
                 ORDER BY visit_time DESC",
            )
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map(params![pattern, pattern], Self::row_to_entry)
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| HistoryError::DatabaseError(e.to_string()))?);
        }
        Ok(results)
    }

    /// Lists history entries ordered by visit_time DESC, newest first,
    /// optionally capped to `limit` entries.
    fn list_history(&self, limit: Option<usize>) -> Result<Vec<HistoryEntry>, HistoryError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, url, title, visit_time, visit_count \
                 FROM history ORDER BY visit_time DESC LIMIT ?1",
            )
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        let cap = limit.map(|n| n as i64).unwrap_or(-1);
        let rows = stmt
            .query_map(params![cap], Self::row_to_entry)
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| HistoryError::DatabaseError(e.to_string()))?);
        }
        Ok(results)
    }

    /// Deletes a single history entry by ID.
    fn delete_entry(&mut self, id: &str) -> Result<(), HistoryError> {
        let affected = self
            .conn
            .execute("DELETE FROM history WHERE id = ?1", params![id])
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(HistoryError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Clears all history entries.
    fn clear_all(&mut self) -> Result<(), HistoryError> {
        self.conn
            .execute("DELETE FROM history", [])
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}
