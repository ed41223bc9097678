//! Persistence gateway for bookmarks and history.
//!
//! The shell must keep functioning with no backing store at all, so every
//! operation here degrades silently: reads return empty lists, writes
//! report failure, and the error itself only reaches the log. This is the
//! single place persistence failures are absorbed.

use std::sync::Arc;

use crate::database::connection::Database;
use crate::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use crate::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use crate::types::bookmark::Bookmark;
use crate::types::history::HistoryEntry;

pub struct PersistenceGateway {
    db: Option<Arc<Database>>,
}

impl PersistenceGateway {
    /// Open the store at `path`. A failure to open leaves the gateway
    /// disconnected rather than failing the shell.
    pub fn open(path: &str) -> Self {
        match Database::open(path) {
            Ok(db) => Self {
                db: Some(Arc::new(db)),
            },
            Err(err) => {
                log::warn!(
                    "could not open {}: {} — continuing without bookmarks/history",
                    path,
                    err
                );
                Self { db: None }
            }
        }
    }

    /// In-memory store, used by tests and the demo binary.
    pub fn in_memory() -> Self {
        match Database::open_in_memory() {
            Ok(db) => Self {
                db: Some(Arc::new(db)),
            },
            Err(err) => {
                log::warn!("could not open in-memory store: {}", err);
                Self { db: None }
            }
        }
    }

    /// A gateway with no backing store.
    pub fn disconnected() -> Self {
        Self { db: None }
    }

    pub fn is_connected(&self) -> bool {
        self.db.is_some()
    }

    /// Append a visit. Returns whether the record was stored.
    pub fn add_history(&self, url: &str, title: &str) -> bool {
        let Some(db) = &self.db else {
            return false;
        };
        match HistoryManager::new(db.connection()).record_visit(url, title) {
            Ok(_) => true,
            Err(err) => {
                log::warn!("history append failed for {}: {}", url, err);
                false
            }
        }
    }

    /// Refresh the stored title for a URL's visit row. Best-effort.
    pub fn update_history_title(&self, url: &str, title: &str) -> bool {
        let Some(db) = &self.db else {
            return false;
        };
        match HistoryManager::new(db.connection()).touch_title(url, title) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("history title refresh failed for {}: {}", url, err);
                false
            }
        }
    }

    pub fn add_bookmark(&self, url: &str, title: &str) -> Option<Bookmark> {
        let db = self.db.as_ref()?;
        match BookmarkManager::new(db.connection()).add_bookmark(url, title) {
            Ok(bookmark) => Some(bookmark),
            Err(err) => {
                log::warn!("adding bookmark failed for {}: {}", url, err);
                None
            }
        }
    }

    pub fn delete_bookmark(&self, id: &str) -> bool {
        let Some(db) = &self.db else {
            return false;
        };
        match BookmarkManager::new(db.connection()).remove_bookmark(id) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("deleting bookmark {} failed: {}", id, err);
                false
            }
        }
    }

    pub fn bookmarks(&self) -> Vec<Bookmark> {
        let Some(db) = &self.db else {
            return Vec::new();
        };
        BookmarkManager::new(db.connection())
            .list_bookmarks()
            .unwrap_or_else(|err| {
                log::warn!("listing bookmarks failed: {}", err);
                Vec::new()
            })
    }

    pub fn history(&self, limit: Option<usize>) -> Vec<HistoryEntry> {
        let Some(db) = &self.db else {
            return Vec::new();
        };
        HistoryManager::new(db.connection())
            .list_history(limit)
            .unwrap_or_else(|err| {
                log::warn!("listing history failed: {}", err);
                Vec::new()
            })
    }

    pub fn clear_history(&self) -> bool {
        let Some(db) = &self.db else {
            return false;
        };
        match HistoryManager::new(db.connection()).clear_all() {
            Ok(()) => true,
            Err(err) => {
                log::warn!("clearing history failed: {}", err);
                false
            }
        }
    }
}
