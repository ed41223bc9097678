//! Unit tests for the UI-request dispatcher — every method goes through the
//! same `handle_request` path the chrome page uses, against an App wired to
//! mock views and a temporary on-disk SQLite store.

use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;

use probe_browser::app::App;
use probe_browser::engine::{ContentView, FindOptions, StopFindAction, ViewFactory, WindowHost};
use probe_browser::managers::persistence::PersistenceGateway;
use probe_browser::rpc_handler::handle_request;
use probe_browser::types::errors::ViewError;
use probe_browser::types::geometry::Rect;
use probe_browser::types::tab::TabId;
use probe_browser::ui::channel::{SaveLocationPrompt, UiEvent, UiSink};

struct NullView {
    url: String,
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

struct NullFactory;

impl ViewFactory for NullFactory {
    fn create_view(&mut self, _id: TabId) -> Option<Box<dyn ContentView>> {
        Some(Box::new(NullView { url: String::new() }))
    }
}

struct NullWindow;

impl WindowHost for NullWindow {
    fn inner_bounds(&self) -> Option<Rect> {
        Some(Rect::of_size(1280, 800))
    }
}

struct NullSink;

impl UiSink for NullSink {
    fn publish(&mut self, _event: UiEvent) {}
}

struct NullPrompt;

impl SaveLocationPrompt for NullPrompt {
    fn choose_save_path(&mut self, file_name: &str) -> Option<PathBuf> {
        Some(PathBuf::from("/tmp").join(file_name))
    }
}

/// Create a fresh App backed by a temp-directory store.
fn setup() -> (App, TempDir) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let db_path = tmp.path().join("test.db");
    let app = App::new(
        PersistenceGateway::open(db_path.to_str().unwrap()),
        Box::new(NullWindow),
        Box::new(NullFactory),
        Box::new(NullSink),
        Box::new(NullPrompt),
    );
    (app, tmp)
}

// ─── Ping / unknown ───

#[test]
fn test_ping() {
    let (mut app, _tmp) = setup();
    let res = handle_request(&mut app, "ping", &json!({})).unwrap();
    assert_eq!(res, json!({"pong": true}));
}

#[test]
fn test_unknown_method_returns_error() {
    let (mut app, _tmp) = setup();
    let res = handle_request(&mut app, "nonexistent.method", &json!({}));
    assert!(res.is_err());
    assert!(res.unwrap_err().contains("unknown method"));
}

// ─── Tabs ───

#[test]
fn test_new_tab_and_get_tabs() {
    let (mut app, _tmp) = setup();

    let res = handle_request(&mut app, "new-tab", &json!({"url": "https://example.com"})).unwrap();
    let id = res["id"].as_u64().unwrap();
    assert!(id > 0);

    let tabs = handle_request(&mut app, "get-tabs", &json!({})).unwrap();
    let arr = tabs.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["url"], "https://example.com");
    assert_eq!(arr[0]["is_active"], true);
}

#[test]
fn test_switch_and_close_tab() {
    let (mut app, _tmp) = setup();
    let id1 = handle_request(&mut app, "new-tab", &json!({}))
        .unwrap()["id"]
        .as_u64()
        .unwrap();
    let id2 = handle_request(&mut app, "new-tab", &json!({}))
        .unwrap()["id"]
        .as_u64()
        .unwrap();

    handle_request(&mut app, "switch-tab", &json!({"id": id1})).unwrap();
    assert_eq!(app.active_tab(), Some(TabId(id1)));

    handle_request(&mut app, "close-tab", &json!({"id": id2})).unwrap();
    let tabs = handle_request(&mut app, "get-tabs", &json!({})).unwrap();
    assert_eq!(tabs.as_array().unwrap().len(), 1);
}

#[test]
fn test_close_tab_requires_id() {
    let (mut app, _tmp) = setup();
    assert!(handle_request(&mut app, "close-tab", &json!({})).is_err());
}

#[test]
fn test_mute_tab_reports_state() {
    let (mut app, _tmp) = setup();
    let id = handle_request(&mut app, "new-tab", &json!({}))
        .unwrap()["id"]
        .as_u64()
        .unwrap();

    let res = handle_request(&mut app, "mute-tab", &json!({"id": id})).unwrap();
    assert_eq!(res, json!({"muted": true}));
    let res = handle_request(&mut app, "mute-tab", &json!({"id": id})).unwrap();
    assert_eq!(res, json!({"muted": false}));

    assert!(handle_request(&mut app, "mute-tab", &json!({"id": 9999})).is_err());
}

#[test]
fn test_pin_tab_reorders_listing() {
    let (mut app, _tmp) = setup();
    let _id1 = handle_request(&mut app, "new-tab", &json!({})).unwrap()["id"].clone();
    let id2 = handle_request(&mut app, "new-tab", &json!({}))
        .unwrap()["id"]
        .as_u64()
        .unwrap();

    handle_request(&mut app, "pin-tab", &json!({"id": id2})).unwrap();
    let tabs = handle_request(&mut app, "get-tabs", &json!({})).unwrap();
    assert_eq!(tabs.as_array().unwrap()[0]["id"].as_u64().unwrap(), id2);
}

// ─── Navigation ───

#[test]
fn test_navigate_normalizes_and_returns_url() {
    let (mut app, _tmp) = setup();
    handle_request(&mut app, "new-tab", &json!({})).unwrap();

    let res = handle_request(&mut app, "navigate", &json!({"url": "example.com"})).unwrap();
    assert_eq!(res, json!({"url": "https://example.com"}));

    let res = handle_request(&mut app, "get-current-url", &json!({})).unwrap();
    assert_eq!(res, json!({"url": "https://example.com"}));
}

#[test]
fn test_navigate_requires_url() {
    let (mut app, _tmp) = setup();
    assert!(handle_request(&mut app, "navigate", &json!({})).is_err());
}

#[test]
fn test_nav_state_queries() {
    let (mut app, _tmp) = setup();
    handle_request(&mut app, "new-tab", &json!({})).unwrap();

    let res = handle_request(&mut app, "get-can-go-back", &json!({})).unwrap();
    assert_eq!(res, json!({"value": false}));
    let res = handle_request(&mut app, "get-can-go-forward", &json!({})).unwrap();
    assert_eq!(res, json!({"value": false}));
}

// ─── Zoom / find / overlay ───

#[test]
fn test_zoom_round_trip() {
    let (mut app, _tmp) = setup();
    handle_request(&mut app, "new-tab", &json!({})).unwrap();

    let res = handle_request(&mut app, "zoom-in", &json!({})).unwrap();
    assert_eq!(res["level"].as_f64().unwrap(), 0.5);
    let res = handle_request(&mut app, "zoom-reset", &json!({})).unwrap();
    assert_eq!(res["level"].as_f64().unwrap(), 0.0);
}

#[test]
fn test_find_in_page_requires_text() {
    let (mut app, _tmp) = setup();
    handle_request(&mut app, "new-tab", &json!({})).unwrap();
    assert!(handle_request(&mut app, "find-in-page", &json!({})).is_err());
    assert!(handle_request(&mut app, "find-in-page", &json!({"text": "hello"})).is_ok());
}

#[test]
fn test_stop_find_rejects_unknown_action() {
    let (mut app, _tmp) = setup();
    handle_request(&mut app, "new-tab", &json!({})).unwrap();
    assert!(
        handle_request(&mut app, "stop-find-in-page", &json!({"action": "explode"})).is_err()
    );
    assert!(handle_request(
        &mut app,
        "stop-find-in-page",
        &json!({"action": "keepSelection"})
    )
    .is_ok());
}

#[test]
fn test_overlay_set_validates_kind() {
    let (mut app, _tmp) = setup();
    handle_request(&mut app, "new-tab", &json!({})).unwrap();

    assert!(handle_request(
        &mut app,
        "overlay.set",
        &json!({"kind": "find-bar", "visible": true, "height": 48})
    )
    .is_ok());
    assert!(handle_request(
        &mut app,
        "overlay.set",
        &json!({"kind": "mystery", "visible": true})
    )
    .is_err());
}

// ─── Bookmarks / history ───

#[test]
fn test_bookmark_add_list_delete() {
    let (mut app, _tmp) = setup();

    let res = handle_request(
        &mut app,
        "bookmark.add",
        &json!({"url": "https://example.com", "title": "Example"}),
    )
    .unwrap();
    assert_eq!(res["ok"], true);
    let id = res["id"].as_str().unwrap().to_string();

    let list = handle_request(&mut app, "bookmark.list", &json!({})).unwrap();
    assert_eq!(list["items"].as_array().unwrap().len(), 1);

    let res = handle_request(&mut app, "bookmark.delete", &json!({"id": id})).unwrap();
    assert_eq!(res["ok"], true);
    let list = handle_request(&mut app, "bookmark.list", &json!({})).unwrap();
    assert!(list["items"].as_array().unwrap().is_empty());
}

#[test]
fn test_bookmark_add_bad_url_reports_failure() {
    let (mut app, _tmp) = setup();
    // The gateway degrades to a failure result instead of erroring.
    let res = handle_request(
        &mut app,
        "bookmark.add",
        &json!({"url": "ftp://bad", "title": "Bad"}),
    )
    .unwrap();
    assert_eq!(res["ok"], false);
}

#[test]
fn test_history_list_and_clear() {
    let (mut app, _tmp) = setup();
    app.gateway.add_history("https://a.com", "A");
    app.gateway.add_history("https://b.com", "B");

    let res = handle_request(&mut app, "history.list", &json!({"limit": 1})).unwrap();
    assert_eq!(res["items"].as_array().unwrap().len(), 1);

    let res = handle_request(&mut app, "history.clear", &json!({})).unwrap();
    assert_eq!(res["ok"], true);
    let res = handle_request(&mut app, "history.list", &json!({})).unwrap();
    assert!(res["items"].as_array().unwrap().is_empty());
}

// ─── Groups ───

#[test]
fn test_group_lifecycle() {
    let (mut app, _tmp) = setup();
    let tab = handle_request(&mut app, "new-tab", &json!({}))
        .unwrap()["id"]
        .as_u64()
        .unwrap();

    let group = handle_request(&mut app, "group.create", &json!({"name": "work"}))
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();
    handle_request(&mut app, "group.assign", &json!({"id": tab, "group": group})).unwrap();

    let tabs = handle_request(&mut app, "get-tabs", &json!({})).unwrap();
    assert!(!tabs.as_array().unwrap()[0]["group"].is_null());

    handle_request(&mut app, "group.delete", &json!({"id": group})).unwrap();
    let tabs = handle_request(&mut app, "get-tabs", &json!({})).unwrap();
    // Tabs survive their group.
    assert_eq!(tabs.as_array().unwrap().len(), 1);
    assert!(tabs.as_array().unwrap()[0]["group"].is_null());
}

// ─── Downloads ───

#[test]
fn test_download_list_and_clear() {
    use probe_browser::engine::{DownloadDoneState, DownloadSignal};

    let (mut app, _tmp) = setup();
    app.handle_download_signal(DownloadSignal::Started {
        file_name: "file.zip".to_string(),
        total_bytes: 10,
    });
    app.handle_download_signal(DownloadSignal::Done {
        file_name: "file.zip".to_string(),
        state: DownloadDoneState::Completed,
    });

    let res = handle_request(&mut app, "download.list", &json!({})).unwrap();
    assert_eq!(res["items"].as_array().unwrap().len(), 1);

    handle_request(&mut app, "download.clear", &json!({"fileName": "file.zip"})).unwrap();
    let res = handle_request(&mut app, "download.list", &json!({})).unwrap();
    assert!(res["items"].as_array().unwrap().is_empty());
}
