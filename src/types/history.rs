use serde::{Deserialize, Serialize};

/// A browsing-history entry. Repeat visits to the same URL bump
/// `visit_count` instead of inserting a new row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub url: String,
    pub title: String,
    pub visit_time: i64,
    pub visit_count: i64,
}
