//! Tab registry for Probe Browser.
//!
//! An arena of live tabs keyed by monotonic [`TabId`]. Each tab exclusively
//! owns its content view; every other component addresses tabs by id only,
//! so no handle can dangle after a close.

use std::collections::{BTreeMap, HashMap};

use crate::engine::ContentView;
use crate::types::tab::{GroupId, TabGroup, TabId, TabSummary};

/// A live tab: the content view plus UI metadata.
///
/// `url` and `title` are the last-known snapshots maintained by the event
/// router so background tabs can be displayed without querying their views.
pub struct Tab {
    pub id: TabId,
    view: Box<dyn ContentView>,
    pub url: String,
    pub title: String,
    pub pinned: bool,
    pub muted: bool,
    pub group: Option<GroupId>,
}

impl Tab {
    pub fn view(&self) -> &dyn ContentView {
        self.view.as_ref()
    }

    pub fn view_mut(&mut self) -> &mut dyn ContentView {
        self.view.as_mut()
    }
}

/// In-memory registry of live tabs and their groups.
///
/// Iteration order of the arena is creation order because ids are monotonic.
pub struct TabManager {
    tabs: BTreeMap<TabId, Tab>,
    groups: HashMap<GroupId, TabGroup>,
    next_id: u64,
}

impl TabManager {
    pub fn new() -> Self {
        Self {
            tabs: BTreeMap::new(),
            groups: HashMap::new(),
            next_id: 1,
        }
    }

    /// Allocate the next tab id. Ids are never reused, even when the view
    /// construction that follows fails.
    pub fn allocate_id(&mut self) -> TabId {
        let id = TabId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register a freshly created view under an id from [`allocate_id`].
    pub fn insert(&mut self, id: TabId, view: Box<dyn ContentView>, url: &str) {
        self.tabs.insert(
            id,
            Tab {
                id,
                view,
                url: url.to_string(),
                title: String::new(),
                pinned: false,
                muted: false,
                group: None,
            },
        );
    }

    /// Remove a tab, dropping its view. The registry is the view's sole
    /// owner, so the underlying surface is released here and nowhere else.
    pub fn remove(&mut self, id: TabId) -> bool {
        self.tabs.remove(&id).is_some()
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.tabs.contains_key(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.get(&id)
    }

    pub fn get_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.get_mut(&id)
    }

    pub fn view_mut(&mut self, id: TabId) -> Option<&mut (dyn ContentView + '_)> {
        match self.tabs.get_mut(&id) {
            Some(t) => Some(t.view.as_mut()),
            None => None,
        }
    }

    /// Update the stored URL snapshot. Silent no-op for absent ids.
    pub fn update_url(&mut self, id: TabId, url: &str) {
        if let Some(tab) = self.tabs.get_mut(&id) {
            tab.url = url.to_string();
        }
    }

    /// Update the stored title snapshot. Silent no-op for absent ids.
    pub fn update_title(&mut self, id: TabId, title: &str) {
        if let Some(tab) = self.tabs.get_mut(&id) {
            tab.title = title.to_string();
        }
    }

    pub fn set_pinned(&mut self, id: TabId, pinned: bool) {
        if let Some(tab) = self.tabs.get_mut(&id) {
            tab.pinned = pinned;
        }
    }

    /// Toggle the muted state, returning the new value.
    pub fn toggle_muted(&mut self, id: TabId) -> Option<bool> {
        let tab = self.tabs.get_mut(&id)?;
        tab.muted = !tab.muted;
        let muted = tab.muted;
        tab.view.set_audio_muted(muted);
        Some(muted)
    }

    /// Display order: pinned tabs first, creation order within each
    /// partition. This also keeps relative creation order inside every group.
    pub fn ordered_ids(&self) -> Vec<TabId> {
        let mut order: Vec<TabId> = self
            .tabs
            .values()
            .filter(|t| t.pinned)
            .map(|t| t.id)
            .collect();
        order.extend(self.tabs.values().filter(|t| !t.pinned).map(|t| t.id));
        order
    }

    /// The nth live tab by creation order (for the numeric switch shortcut).
    pub fn nth_by_creation(&self, n: usize) -> Option<TabId> {
        self.tabs.keys().nth(n).copied()
    }

    /// Replacement tab to activate when `id` closes: the following tab in
    /// display order, or the preceding one at the end. `None` for the last
    /// remaining tab.
    pub fn next_active_after(&self, id: TabId) -> Option<TabId> {
        let order = self.ordered_ids();
        let idx = order.iter().position(|t| *t == id)?;
        if order.len() <= 1 {
            return None;
        }
        Some(if idx + 1 < order.len() {
            order[idx + 1]
        } else {
            order[idx - 1]
        })
    }

    /// Ordered summaries for the UI layer.
    pub fn list(&self, active: Option<TabId>) -> Vec<TabSummary> {
        self.ordered_ids()
            .into_iter()
            .filter_map(|id| self.tabs.get(&id))
            .map(|t| TabSummary {
                id: t.id,
                url: t.url.clone(),
                title: t.title.clone(),
                is_active: active == Some(t.id),
                pinned: t.pinned,
                group: t.group,
            })
            .collect()
    }

    // ─── Groups ───

    pub fn create_group(&mut self, name: &str, color: &str) -> GroupId {
        let id = GroupId::new();
        self.groups.insert(
            id,
            TabGroup {
                id,
                name: name.to_string(),
                color: color.to_string(),
            },
        );
        id
    }

    /// Delete a group. Member tabs only lose their back-reference; the tabs
    /// themselves are untouched.
    pub fn delete_group(&mut self, id: GroupId) {
        if self.groups.remove(&id).is_none() {
            return;
        }
        for tab in self.tabs.values_mut() {
            if tab.group == Some(id) {
                tab.group = None;
            }
        }
    }

    /// Assign a tab to a group (or clear with `None`). No-op when either the
    /// tab or the target group does not exist.
    pub fn assign_group(&mut self, id: TabId, group: Option<GroupId>) {
        if let Some(g) = group {
            if !self.groups.contains_key(&g) {
                return;
            }
        }
        if let Some(tab) = self.tabs.get_mut(&id) {
            tab.group = group;
        }
    }

    pub fn group(&self, id: GroupId) -> Option<&TabGroup> {
        self.groups.get(&id)
    }
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new()
    }
}
