use probe_browser::engine::{ContentView, FindOptions, StopFindAction};
use probe_browser::managers::tab_manager::TabManager;
use probe_browser::types::errors::ViewError;
use probe_browser::types::geometry::Rect;

/// Inert view for registry tests: only the URL snapshot matters here.
struct NullView {
    url: String,
}

impl NullView {
    fn boxed() -> Box<dyn ContentView> {
        Box::new(NullView { url: String::new() })
    }
}

impl ContentView for NullView {
    fn load_url(&mut self, url: &str) -> Result<(), ViewError> {
        self.url = url.to_string();
        Ok(())
    }
    fn url(&self) -> String {
        self.url.clone()
    }
    fn title(&self) -> String {
        String::new()
    }
    fn go_back(&mut self) {}
    fn can_go_back(&self) -> bool {
        false
    }
    fn go_forward(&mut self) {}
    fn can_go_forward(&self) -> bool {
        false
    }
    fn reload(&mut self) {}
    fn reload_ignoring_cache(&mut self) {}
    fn set_zoom_level(&mut self, _level: f64) {}
    fn zoom_level(&self) -> f64 {
        0.0
    }
    fn find_in_page(&mut self, _text: &str, _options: FindOptions) {}
    fn stop_find_in_page(&mut self, _action: StopFindAction) {}
    fn cut(&mut self) {}
    fn copy(&mut self) {}
    fn paste(&mut self) {}
    fn select_all(&mut self) {}
    fn print_page(&mut self) {}
    fn inspect_element(&mut self, _x: i32, _y: i32) {}
    fn toggle_devtools(&mut self) {}
    fn set_audio_muted(&mut self, _muted: bool) {}
    fn set_visible(&mut self, _visible: bool) {}
    fn set_bounds(&mut self, _bounds: Rect) -> Result<(), ViewError> {
        Ok(())
    }
}

fn add_tab(mgr: &mut TabManager, url: &str) -> probe_browser::types::tab::TabId {
    let id = mgr.allocate_id();
    mgr.insert(id, NullView::boxed(), url);
    id
}

#[test]
fn test_ids_are_monotonic_and_never_reused() {
    let mut mgr = TabManager::new();
    let id1 = add_tab(&mut mgr, "https://a.com");
    let id2 = add_tab(&mut mgr, "https://b.com");
    assert!(id2 > id1);

    mgr.remove(id2);
    let id3 = add_tab(&mut mgr, "https://c.com");
    assert!(id3 > id2, "removed ids must not be reallocated");
}

#[test]
fn test_allocated_id_is_burned_even_without_insert() {
    let mut mgr = TabManager::new();
    let burned = mgr.allocate_id();
    let next = add_tab(&mut mgr, "https://a.com");
    assert!(next > burned);
    assert!(!mgr.contains(burned));
}

#[test]
fn test_ids_are_valid() {
    let mut mgr = TabManager::new();
    let id = add_tab(&mut mgr, "https://a.com");
    assert!(id.is_valid());
    assert_eq!(mgr.len(), 1);
}

#[test]
fn test_remove_is_idempotent() {
    let mut mgr = TabManager::new();
    let id = add_tab(&mut mgr, "https://a.com");
    assert!(mgr.remove(id));
    assert!(!mgr.remove(id));
    assert!(mgr.is_empty());
}

#[test]
fn test_list_orders_pinned_before_unpinned() {
    let mut mgr = TabManager::new();
    let id1 = add_tab(&mut mgr, "https://a.com");
    let id2 = add_tab(&mut mgr, "https://b.com");
    let id3 = add_tab(&mut mgr, "https://c.com");

    mgr.set_pinned(id3, true);
    let order: Vec<_> = mgr.list(None).iter().map(|t| t.id).collect();
    assert_eq!(order, vec![id3, id1, id2]);

    mgr.set_pinned(id2, true);
    // Within the pinned partition, creation order is kept.
    let order: Vec<_> = mgr.list(None).iter().map(|t| t.id).collect();
    assert_eq!(order, vec![id2, id3, id1]);
}

#[test]
fn test_unpin_restores_creation_order() {
    let mut mgr = TabManager::new();
    let id1 = add_tab(&mut mgr, "https://a.com");
    let id2 = add_tab(&mut mgr, "https://b.com");

    mgr.set_pinned(id2, true);
    mgr.set_pinned(id2, false);
    let order: Vec<_> = mgr.list(None).iter().map(|t| t.id).collect();
    assert_eq!(order, vec![id1, id2]);
}

#[test]
fn test_list_marks_exactly_the_active_tab() {
    let mut mgr = TabManager::new();
    let id1 = add_tab(&mut mgr, "https://a.com");
    let id2 = add_tab(&mut mgr, "https://b.com");

    let summaries = mgr.list(Some(id2));
    assert!(!summaries.iter().find(|t| t.id == id1).unwrap().is_active);
    assert!(summaries.iter().find(|t| t.id == id2).unwrap().is_active);
}

#[test]
fn test_next_active_after_prefers_following_tab() {
    let mut mgr = TabManager::new();
    let id1 = add_tab(&mut mgr, "https://a.com");
    let id2 = add_tab(&mut mgr, "https://b.com");
    let id3 = add_tab(&mut mgr, "https://c.com");

    assert_eq!(mgr.next_active_after(id2), Some(id3));
    // At the right edge the previous neighbor is chosen.
    assert_eq!(mgr.next_active_after(id3), Some(id2));
    let _ = id1;
}

#[test]
fn test_next_active_after_last_tab_is_none() {
    let mut mgr = TabManager::new();
    let id = add_tab(&mut mgr, "https://a.com");
    assert_eq!(mgr.next_active_after(id), None);
}

#[test]
fn test_nth_by_creation_ignores_pinning() {
    let mut mgr = TabManager::new();
    let id1 = add_tab(&mut mgr, "https://a.com");
    let id2 = add_tab(&mut mgr, "https://b.com");
    mgr.set_pinned(id2, true);

    // Numeric shortcuts address tabs by creation order, not display order.
    assert_eq!(mgr.nth_by_creation(0), Some(id1));
    assert_eq!(mgr.nth_by_creation(1), Some(id2));
    assert_eq!(mgr.nth_by_creation(2), None);
}

#[test]
fn test_update_snapshots_silent_on_absent_id() {
    let mut mgr = TabManager::new();
    let id = add_tab(&mut mgr, "https://a.com");
    mgr.remove(id);

    // Neither call may panic or resurrect the tab.
    mgr.update_url(id, "https://b.com");
    mgr.update_title(id, "gone");
    assert!(mgr.is_empty());
}

#[test]
fn test_toggle_muted() {
    let mut mgr = TabManager::new();
    let id = add_tab(&mut mgr, "https://a.com");

    assert_eq!(mgr.toggle_muted(id), Some(true));
    assert_eq!(mgr.toggle_muted(id), Some(false));
    mgr.remove(id);
    assert_eq!(mgr.toggle_muted(id), None);
}

// ─── Groups ───

#[test]
fn test_group_assignment_is_weak() {
    let mut mgr = TabManager::new();
    let id1 = add_tab(&mut mgr, "https://a.com");
    let id2 = add_tab(&mut mgr, "https://b.com");

    let group = mgr.create_group("work", "blue");
    mgr.assign_group(id1, Some(group));
    mgr.assign_group(id2, Some(group));
    assert_eq!(mgr.get(id1).unwrap().group, Some(group));

    // Deleting the group clears back-references but keeps the tabs.
    mgr.delete_group(group);
    assert_eq!(mgr.len(), 2);
    assert_eq!(mgr.get(id1).unwrap().group, None);
    assert_eq!(mgr.get(id2).unwrap().group, None);
    assert!(mgr.group(group).is_none());
}

#[test]
fn test_assign_unknown_group_is_ignored() {
    let mut mgr = TabManager::new();
    let id = add_tab(&mut mgr, "https://a.com");
    let group = mgr.create_group("work", "blue");
    mgr.delete_group(group);

    mgr.assign_group(id, Some(group));
    assert_eq!(mgr.get(id).unwrap().group, None);
}

#[test]
fn test_grouped_tabs_keep_relative_creation_order() {
    let mut mgr = TabManager::new();
    let id1 = add_tab(&mut mgr, "https://a.com");
    let id2 = add_tab(&mut mgr, "https://b.com");
    let id3 = add_tab(&mut mgr, "https://c.com");

    let group = mgr.create_group("work", "blue");
    mgr.assign_group(id3, Some(group));
    mgr.assign_group(id1, Some(group));

    let order: Vec<_> = mgr
        .list(None)
        .iter()
        .filter(|t| t.group == Some(group))
        .map(|t| t.id)
        .collect();
    assert_eq!(order, vec![id1, id3]);
    let _ = id2;
}
