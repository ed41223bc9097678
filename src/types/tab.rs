use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for a tab.
///
/// Ids are allocated from a monotonic counter and are never reused within a
/// process lifetime, so a `TabId` uniquely determines exactly one live tab
/// or none.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TabId(pub u64);

impl TabId {
    /// Sentinel returned when a tab could not be created because the host
    /// window no longer exists.
    pub const INVALID: TabId = TabId(0);

    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a tab group.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GroupId(pub Uuid);

impl GroupId {
    pub fn new() -> Self {
        GroupId(Uuid::new_v4())
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tab group: presentational metadata only. Tabs hold a weak back-reference
/// to their group; deleting a group never destroys member tabs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabGroup {
    pub id: GroupId,
    pub name: String,
    pub color: String,
}

/// Snapshot of a tab handed to the UI layer.
///
/// Summaries never carry the content-view handle. The view is owned
/// exclusively by the registry and external components see only the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabSummary {
    pub id: TabId,
    pub url: String,
    pub title: String,
    pub is_active: bool,
    pub pinned: bool,
    pub group: Option<GroupId>,
}
