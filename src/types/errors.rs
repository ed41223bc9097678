use std::fmt;

// === ViewError ===

/// Errors raised by a content view's backend.
#[derive(Debug)]
pub enum ViewError {
    /// The host window backing the view no longer exists.
    HostGone,
    /// The embedding backend rejected the operation.
    Backend(String),
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewError::HostGone => write!(f, "Host window no longer exists"),
            ViewError::Backend(msg) => write!(f, "View backend error: {}", msg),
        }
    }
}

impl std::error::Error for ViewError {}

// === BookmarkError ===

/// Errors related to bookmark storage operations.
#[derive(Debug)]
pub enum BookmarkError {
    /// Bookmark with the given ID was not found.
    NotFound(String),
    /// The provided URL is not bookmarkable.
    InvalidUrl(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkError::NotFound(id) => write!(f, "Bookmark not found: {}", id),
            BookmarkError::InvalidUrl(url) => write!(f, "Invalid bookmark URL: {}", url),
            BookmarkError::DatabaseError(msg) => {
                write!(f, "Bookmark database error: {}", msg)
            }
        }
    }
}

impl std::error::Error for BookmarkError {}

// === HistoryError ===

/// Errors related to browsing history operations.
#[derive(Debug)]
pub enum HistoryError {
    /// History entry with the given ID was not found.
    NotFound(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::NotFound(id) => write!(f, "History entry not found: {}", id),
            HistoryError::DatabaseError(msg) => write!(f, "History database error: {}", msg),
        }
    }
}

impl std::error::Error for HistoryError {}

// === ShortcutError ===

/// Errors related to keyboard shortcut bindings.
#[derive(Debug)]
pub enum ShortcutError {
    /// The chord is already bound to another action.
    Conflict(String),
    /// The provided key is empty or unparseable.
    InvalidKeys(String),
}

impl fmt::Display for ShortcutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortcutError::Conflict(msg) => write!(f, "Shortcut conflict: {}", msg),
            ShortcutError::InvalidKeys(keys) => write!(f, "Invalid shortcut keys: {}", keys),
        }
    }
}

impl std::error::Error for ShortcutError {}
