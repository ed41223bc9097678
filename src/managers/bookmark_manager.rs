//! Bookmark storage for Probe Browser.
//!
//! Implements `BookmarkManagerTrait` — adding, listing, searching, and
//! removing bookmarks, backed by SQLite via `rusqlite`.

use rusqlite::{params, Connection};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::types::bookmark::Bookmark;
use crate::types::errors::BookmarkError;

/// Trait defining bookmark storage operations.
pub trait BookmarkManagerTrait {
    fn add_bookmark(&mut self, url: &str, title: &str) -> Result<Bookmark, BookmarkError>;
    fn remove_bookmark(&mut self, id: &str) -> Result<(), BookmarkError>;
    fn list_bookmarks(&self) -> Result<Vec<Bookmark>, BookmarkError>;
    fn search_bookmarks(&self, query: &str) -> Result<Vec<Bookmark>, BookmarkError>;
}

/// Bookmark manager backed by a SQLite connection.
pub struct BookmarkManager<'a> {
    conn: &'a Connection,
}

impl<'a> BookmarkManager<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<Bookmark> {
        Ok(Bookmark {
            id: row.get(0)?,
            url: row.get(1)?,
            title: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}

impl<'a> BookmarkManagerTrait for BookmarkManager<'a> {
    /// Adds a bookmark and returns the stored row.
    fn add_bookmark(&mut self, url: &str, title: &str) -> Result<Bookmark, BookmarkError> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(BookmarkError::InvalidUrl(url.to_string()));
        }

        let bookmark = Bookmark {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            title: title.to_string(),
            created_at: Self::now(),
        };
        self.conn
            .execute(
                "INSERT INTO bookmarks (id, url, title, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![bookmark.id, bookmark.url, bookmark.title, bookmark.created_at],
            )
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;
        Ok(bookmark)
    }

    /// Removes a bookmark by ID.
    fn remove_bookmark(&mut self, id: &str) -> Result<(), BookmarkError> {
        let affected = self
            .conn
            .execute("DELETE FROM bookmarks WHERE id = ?1", params![id])
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(BookmarkError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Lists bookmarks, most recently created first.
    fn list_bookmarks(&self) -> Result<Vec<Bookmark>, BookmarkError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, url, title, created_at FROM bookmarks ORDER BY created_at DESC",
            )
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_bookmark)
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| BookmarkError::DatabaseError(e.to_string()))?);
        }
        Ok(results)
    }

    /// Searches bookmarks by title or URL using SQL LIKE.
    fn search_bookmarks(&self, query: &str) -> Result<Vec<Bookmark>, BookmarkError> {
        let pattern = format!("%{}%", query);
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, url, title, created_at FROM bookmarks \
                 WHERE title LIKE ?1 OR url LIKE ?2 ORDER BY created_at DESC",
            )
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map(params![pattern, pattern], Self::row_to_bookmark)
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| BookmarkError::DatabaseError(e.to_string()))?);
        }
        Ok(results)
    }
}
