//! Inward UI-channel dispatch for Probe Browser.
//!
//! The presentation layer invokes the core through named methods with JSON
//! parameters; `handle_request` dispatches them to the `App` and returns a
//! JSON result. Outward traffic flows the other way through
//! [`UiSink`](crate::ui::channel::UiSink).

use serde_json::{json, Value};

use crate::app::App;
use crate::engine::{FindOptions, StopFindAction};
use crate::managers::layout_manager::OverlayKind;
use crate::types::tab::{GroupId, TabId};

fn tab_id_param(params: &Value) -> Result<TabId, String> {
    params
        .get("id")
        .and_then(|v| v.as_u64())
        .map(TabId)
        .ok_or_else(|| "missing id".to_string())
}

fn overlay_kind_param(params: &Value) -> Result<OverlayKind, String> {
    let kind = params
        .get("kind")
        .and_then(|v| v.as_str())
        .ok_or("missing kind")?;
    serde_json::from_value(Value::String(kind.to_string()))
        .map_err(|_| format!("unknown overlay kind: {}", kind))
}

/// Dispatch a UI request to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_request(app: &mut App, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Navigation ───
        "navigate" => {
            let input = params.get("url").and_then(|v| v.as_str()).ok_or("missing url")?;
            let url = app.navigate(input);
            Ok(json!({"url": url}))
        }
        "go-back" => {
            app.go_back();
            Ok(json!({"ok": true}))
        }
        "go-forward" => {
            app.go_forward();
            Ok(json!({"ok": true}))
        }
        "reload" => {
            app.reload();
            Ok(json!({"ok": true}))
        }
        "hard-reload" => {
            app.hard_reload();
            Ok(json!({"ok": true}))
        }
        "get-current-url" => Ok(json!({"url": app.current_url()})),
        "get-can-go-back" => Ok(json!({"value": app.can_go_back()})),
        "get-can-go-forward" => Ok(json!({"value": app.can_go_forward()})),

        // ─── Tabs ───
        "new-tab" => {
            let url = params.get("url").and_then(|v| v.as_str());
            let id = app.create_tab(url);
            Ok(json!({"id": id}))
        }
        "close-tab" => {
            app.close_tab(tab_id_param(params)?);
            Ok(json!({"ok": true}))
        }
        "switch-tab" => {
            app.switch_tab(tab_id_param(params)?);
            Ok(json!({"ok": true}))
        }
        "get-tabs" => {
            serde_json::to_value(app.list_tabs()).map_err(|e| e.to_string())
        }
        "mute-tab" => {
            let id = tab_id_param(params)?;
            match app.mute_tab(id) {
                Some(muted) => Ok(json!({"muted": muted})),
                None => Err(format!("unknown tab: {}", id)),
            }
        }
        "pin-tab" => {
            let id = tab_id_param(params)?;
            let pinned = params
                .get("pinned")
                .and_then(|v| v.as_bool())
                .unwrap_or(true);
            app.tabs.set_pinned(id, pinned);
            Ok(json!({"ok": true}))
        }

        // ─── Tab groups ───
        "group.create" => {
            let name = params.get("name").and_then(|v| v.as_str()).ok_or("missing name")?;
            let color = params
                .get("color")
                .and_then(|v| v.as_str())
                .unwrap_or("grey");
            let id = app.tabs.create_group(name, color);
            Ok(json!({"id": id}))
        }
        "group.delete" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            let parsed: GroupId =
                serde_json::from_value(Value::String(id.to_string())).map_err(|e| e.to_string())?;
            app.tabs.delete_group(parsed);
            Ok(json!({"ok": true}))
        }
        "group.assign" => {
            let tab = tab_id_param(params)?;
            let group = match params.get("group") {
                Some(Value::String(s)) => {
                    let parsed: GroupId = serde_json::from_value(Value::String(s.clone()))
                        .map_err(|e| e.to_string())?;
                    Some(parsed)
                }
                _ => None,
            };
            app.tabs.assign_group(tab, group);
            Ok(json!({"ok": true}))
        }

        // ─── Zoom / find / devtools / print ───
        "zoom-in" => Ok(json!({"level": app.zoom_in()})),
        "zoom-out" => Ok(json!({"level": app.zoom_out()})),
        "zoom-reset" => Ok(json!({"level": app.zoom_reset()})),
        "find-in-page" => {
            let text = params.get("text").and_then(|v| v.as_str()).ok_or("missing text")?;
            let options = FindOptions {
                forward: params
                    .get("forward")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(true),
                match_case: params
                    .get("matchCase")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false),
                find_next: params
                    .get("findNext")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false),
            };
            app.find_in_page(text, options);
            Ok(json!({"ok": true}))
        }
        "stop-find-in-page" => {
            let action = params
                .get("action")
                .and_then(|v| v.as_str())
                .unwrap_or("clearSelection");
            let parsed: StopFindAction = serde_json::from_value(Value::String(action.to_string()))
                .map_err(|_| format!("unknown stop action: {}", action))?;
            app.stop_find_in_page(parsed);
            Ok(json!({"ok": true}))
        }
        "toggle-devtools" => {
            app.toggle_devtools();
            Ok(json!({"ok": true}))
        }
        "edit.cut" => {
            app.edit_cut();
            Ok(json!({"ok": true}))
        }
        "edit.copy" => {
            app.edit_copy();
            Ok(json!({"ok": true}))
        }
        "edit.paste" => {
            app.edit_paste();
            Ok(json!({"ok": true}))
        }
        "edit.select-all" => {
            app.edit_select_all();
            Ok(json!({"ok": true}))
        }
        "print-page" => {
            app.print_page();
            Ok(json!({"ok": true}))
        }
        "view-source" => Ok(json!({"id": app.view_source()})),

        // ─── Overlays ───
        "overlay.set" => {
            let kind = overlay_kind_param(params)?;
            let visible = params
                .get("visible")
                .and_then(|v| v.as_bool())
                .ok_or("missing visible")?;
            let height = params
                .get("height")
                .and_then(|v| v.as_u64())
                .map(|h| h as u32);
            app.notify_overlay(kind, visible, height);
            Ok(json!({"ok": true}))
        }

        // ─── Bookmarks ───
        "bookmark.add" => {
            let url = params.get("url").and_then(|v| v.as_str()).ok_or("missing url")?;
            let title = params.get("title").and_then(|v| v.as_str()).ok_or("missing title")?;
            match app.gateway.add_bookmark(url, title) {
                Some(bookmark) => Ok(json!({"ok": true, "id": bookmark.id})),
                None => Ok(json!({"ok": false})),
            }
        }
        "bookmark-active" => Ok(json!({"ok": app.bookmark_active_tab()})),
        "bookmark.delete" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            Ok(json!({"ok": app.gateway.delete_bookmark(id)}))
        }
        "bookmark.list" => {
            let items = serde_json::to_value(app.gateway.bookmarks()).map_err(|e| e.to_string())?;
            Ok(json!({"items": items}))
        }

        // ─── History ───
        "history.list" => {
            let limit = params
                .get("limit")
                .and_then(|v| v.as_u64())
                .map(|n| n as usize);
            let items =
                serde_json::to_value(app.gateway.history(limit)).map_err(|e| e.to_string())?;
            Ok(json!({"items": items}))
        }
        "history.clear" => Ok(json!({"ok": app.gateway.clear_history()})),

        // ─── Downloads ───
        "download.list" => {
            let items =
                serde_json::to_value(app.downloads.list()).map_err(|e| e.to_string())?;
            Ok(json!({"items": items}))
        }
        "download.clear" => {
            let file_name = params
                .get("fileName")
                .and_then(|v| v.as_str())
                .ok_or("missing fileName")?;
            app.downloads.clear(file_name);
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
