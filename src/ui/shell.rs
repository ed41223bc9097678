//! WebView-based browser shell using `wry` + `tao`.
//!
//! Architecture:
//! - One top-level `tao` window. A chrome webview (tab strip + address bar)
//!   occupies the reserved strip at the top; every tab owns a child content
//!   webview below it, created through [`WryFactory`] and shown/hidden by
//!   the core's view switcher.
//! - The chrome page is served via the `pb://` custom protocol and talks to
//!   the core with `window.ipc.postMessage()`; requests are dispatched
//!   through [`rpc_handler::handle_request`].
//! - Engine callbacks (page load, title, downloads) are forwarded onto the
//!   event loop through a [`ShellEvent`] proxy, so the core only ever runs
//!   on the loop thread.

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use tao::dpi::LogicalSize;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use tao::window::{Window, WindowBuilder};
use wry::{PageLoadEvent, WebView, WebViewBuilder};

use crate::app::App;
use crate::engine::{
    ContentView, DownloadDoneState, DownloadSignal, FindOptions, PageEvent, StopFindAction,
    ViewFactory, WindowHost,
};
use crate::managers::context_menu::{build_context_menu, ClickContext, MenuAction, MenuEntry};
use crate::managers::layout_manager::CHROME_HEIGHT;
use crate::managers::persistence::PersistenceGateway;
use crate::managers::shortcut_manager::KeyChord;
use crate::rpc_handler;
use crate::types::errors::ViewError;
use crate::types::geometry::Rect;
use crate::types::tab::TabId;
use crate::ui::channel::{SaveLocationPrompt, UiEvent, UiSink};

/// How long the download shelf keeps a completed entry before hiding it.
/// Purely cosmetic; the core retains the record until explicitly cleared.
pub const DOWNLOAD_AUTOHIDE_MS: u64 = 5000;

#[derive(Debug)]
enum ShellEvent {
    ChromeIpc(String),
    Page { id: TabId, event: PageEvent },
    Download(DownloadSignal),
    Key { id: TabId, chord: KeyChord },
    ContextMenu { id: TabId, ctx: ClickContext },
    Ui(UiEvent),
}

// ─── Content views ───

/// Navigation state wry does not expose directly; maintained from the
/// engine callbacks and the back/forward requests we issue ourselves.
#[derive(Default)]
struct ViewState {
    url: String,
    title: String,
    back_depth: usize,
    forward_depth: usize,
}

struct WryView {
    webview: WebView,
    state: Rc<RefCell<ViewState>>,
    zoom: f64,
    devtools_open: bool,
}

impl ContentView for WryView {
    fn load_url(&mut self, url: &str) -> Result<(), ViewError> {
        self.webview
            .load_url(url)
            .map_err(|e| ViewError::Backend(e.to_string()))
    }

    fn url(&self) -> String {
        self.state.borrow().url.clone()
    }

    fn title(&self) -> String {
        self.state.borrow().title.clone()
    }

    fn go_back(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.back_depth > 1 {
            state.back_depth -= 1;
            state.forward_depth += 1;
            let _ = self.webview.evaluate_script("history.back()");
        }
    }

    fn can_go_back(&self) -> bool {
        self.state.borrow().back_depth > 1
    }

    fn go_forward(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.forward_depth > 0 {
            state.forward_depth -= 1;
            state.back_depth += 1;
            let _ = self.webview.evaluate_script("history.forward()");
        }
    }

    fn can_go_forward(&self) -> bool {
        self.state.borrow().forward_depth > 0
    }

    fn reload(&mut self) {
        let _ = self.webview.evaluate_script("location.reload()");
    }

    fn reload_ignoring_cache(&mut self) {
        let _ = self.webview.evaluate_script("location.reload(true)");
    }

    fn set_zoom_level(&mut self, level: f64) {
        self.zoom = level;
        // Chromium zoom convention: factor = 1.2^level.
        let _ = self.webview.zoom(1.2f64.powf(level));
    }

    fn zoom_level(&self) -> f64 {
        self.zoom
    }

    fn find_in_page(&mut self, text: &str, options: FindOptions) {
        // WebKit exposes window.find; WebView2 silently ignores it.
        let script = format!(
            "window.find({}, {}, {}, true)",
            serde_json::to_string(text).unwrap_or_default(),
            options.match_case,
            !options.forward,
        );
        let _ = self.webview.evaluate_script(&script);
    }

    fn stop_find_in_page(&mut self, action: StopFindAction) {
        if action == StopFindAction::ClearSelection {
            let _ = self.webview.evaluate_script("getSelection().removeAllRanges()");
        }
    }

    fn cut(&mut self) {
        let _ = self.webview.evaluate_script("document.execCommand('cut')");
    }

    fn copy(&mut self) {
        let _ = self.webview.evaluate_script("document.execCommand('copy')");
    }

    fn paste(&mut self) {
        let _ = self.webview.evaluate_script("document.execCommand('paste')");
    }

    fn select_all(&mut self) {
        let _ = self.webview.evaluate_script("document.execCommand('selectAll')");
    }

    fn print_page(&mut self) {
        let _ = self.webview.print();
    }

    fn inspect_element(&mut self, _x: i32, _y: i32) {
        self.webview.open_devtools();
        self.devtools_open = true;
    }

    fn toggle_devtools(&mut self) {
        if self.devtools_open {
            self.webview.close_devtools();
        } else {
            self.webview.open_devtools();
        }
        self.devtools_open = !self.devtools_open;
    }

    fn set_audio_muted(&mut self, muted: bool) {
        let script = format!(
            "document.querySelectorAll('audio,video').forEach(function(m){{m.muted={}}})",
            muted
        );
        let _ = self.webview.evaluate_script(&script);
    }

    fn set_visible(&mut self, visible: bool) {
        let _ = self.webview.set_visible(visible);
    }

    fn set_bounds(&mut self, bounds: Rect) -> Result<(), ViewError> {
        self.webview
            .set_bounds(wry::Rect {
                position: wry::dpi::LogicalPosition::new(bounds.x as f64, bounds.y as f64).into(),
                size: wry::dpi::LogicalSize::new(bounds.width as f64, bounds.height as f64).into(),
            })
            .map_err(|e| ViewError::Backend(e.to_string()))
    }
}

/// Injected into every content page: reports titles, primary-modifier key
/// chords, and right-click context back to the shell.
const VIEW_JS: &str = r#"
(function () {
  function send(m) { window.ipc.postMessage(JSON.stringify(m)); }
  function reportTitle() { send({ kind: 'title', title: document.title }); }
  window.addEventListener('DOMContentLoaded', function () {
    reportTitle();
    var t = document.querySelector('title');
    if (t) new MutationObserver(reportTitle).observe(t, { subtree: true, childList: true, characterData: true });
  });
  window.addEventListener('keydown', function (e) {
    if (e.ctrlKey || e.metaKey || e.key === 'F12') {
      send({ kind: 'key', key: e.key, primary: e.ctrlKey || e.metaKey, shift: e.shiftKey, alt: e.altKey });
    }
  });
  window.addEventListener('contextmenu', function (e) {
    var a = e.target.closest ? e.target.closest('a[href]') : null;
    var img = e.target.tagName === 'IMG' ? e.target.src : null;
    var sel = String(getSelection());
    var editable = e.target.isContentEditable
      || e.target.tagName === 'INPUT' || e.target.tagName === 'TEXTAREA';
    send({ kind: 'contextmenu', x: e.clientX, y: e.clientY,
           link: a ? a.href : null, image: img,
           selection: sel.length ? sel : null, editable: editable });
    e.preventDefault();
  });
})();
"#;

struct WryFactory {
    window: Rc<Window>,
    proxy: EventLoopProxy<ShellEvent>,
    downloads_dir: PathBuf,
}

impl ViewFactory for WryFactory {
    fn create_view(&mut self, id: TabId) -> Option<Box<dyn ContentView>> {
        let state = Rc::new(RefCell::new(ViewState::default()));

        let ipc_proxy = self.proxy.clone();
        let ipc_state = Rc::clone(&state);
        let load_proxy = self.proxy.clone();
        let load_state = Rc::clone(&state);
        let dl_proxy = self.proxy.clone();
        let dl_done_proxy = self.proxy.clone();
        let downloads_dir = self.downloads_dir.clone();

        let builder = WebViewBuilder::new()
            .with_bounds(wry::Rect {
                position: wry::dpi::LogicalPosition::new(0.0, CHROME_HEIGHT as f64).into(),
                size: wry::dpi::LogicalSize::new(1.0, 1.0).into(),
            })
            .with_visible(false)
            .with_initialization_script(VIEW_JS)
            .with_ipc_handler(move |req: wry::http::Request<String>| {
                if let Some(event) = parse_view_ipc(id, req.body(), &ipc_state) {
                    let _ = ipc_proxy.send_event(event);
                }
            })
            .with_on_page_load_handler(move |event, url| match event {
                PageLoadEvent::Started => {
                    {
                        let mut s = load_state.borrow_mut();
                        s.url = url.clone();
                        s.back_depth += 1;
                        s.forward_depth = 0;
                    }
                    let _ = load_proxy.send_event(ShellEvent::Page {
                        id,
                        event: PageEvent::LoadingStarted,
                    });
                    let _ = load_proxy.send_event(ShellEvent::Page {
                        id,
                        event: PageEvent::Navigated { url },
                    });
                }
                PageLoadEvent::Finished => {
                    let _ = load_proxy.send_event(ShellEvent::Page {
                        id,
                        event: PageEvent::LoadingStopped,
                    });
                }
            })
            .with_download_started_handler(move |url, destination| {
                // The engine only hands us a suggested location; the core's
                // save-location exchange decides whether the transfer runs.
                let file_name = url.rsplit('/').next().unwrap_or("download").to_string();
                *destination = downloads_dir.join(&file_name);
                let _ = dl_proxy.send_event(ShellEvent::Download(DownloadSignal::Started {
                    file_name,
                    total_bytes: 0,
                }));
                true
            })
            .with_download_completed_handler(move |_url, path, success| {
                let file_name = path
                    .as_ref()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "download".to_string());
                let state = if success {
                    DownloadDoneState::Completed
                } else {
                    DownloadDoneState::Interrupted
                };
                let _ = dl_done_proxy.send_event(ShellEvent::Download(DownloadSignal::Done {
                    file_name,
                    state,
                }));
            })
            .with_devtools(true);

        let webview = match builder.build_as_child(self.window.as_ref()) {
            Ok(webview) => webview,
            Err(err) => {
                log::warn!("creating content view for tab {} failed: {}", id, err);
                return None;
            }
        };

        Some(Box::new(WryView {
            webview,
            state,
            zoom: 0.0,
            devtools_open: false,
        }))
    }
}

fn parse_view_ipc(
    id: TabId,
    body: &str,
    state: &Rc<RefCell<ViewState>>,
) -> Option<ShellEvent> {
    let msg: serde_json::Value = serde_json::from_str(body).ok()?;
    match msg.get("kind")?.as_str()? {
        "title" => {
            let title = msg.get("title")?.as_str()?.to_string();
            state.borrow_mut().title = title.clone();
            Some(ShellEvent::Page {
                id,
                event: PageEvent::TitleUpdated { title },
            })
        }
        "key" => {
            let key = msg.get("key")?.as_str()?;
            let chord = KeyChord::new(
                msg.get("primary").and_then(|v| v.as_bool()).unwrap_or(false),
                msg.get("shift").and_then(|v| v.as_bool()).unwrap_or(false),
                msg.get("alt").and_then(|v| v.as_bool()).unwrap_or(false),
                key,
            );
            Some(ShellEvent::Key { id, chord })
        }
        "contextmenu" => {
            let ctx = ClickContext {
                x: msg.get("x").and_then(|v| v.as_i64()).unwrap_or(0) as i32,
                y: msg.get("y").and_then(|v| v.as_i64()).unwrap_or(0) as i32,
                link_url: msg.get("link").and_then(|v| v.as_str()).map(String::from),
                selection_text: msg
                    .get("selection")
                    .and_then(|v| v.as_str())
                    .map(String::from),
                image_url: msg.get("image").and_then(|v| v.as_str()).map(String::from),
                is_editable: msg.get("editable").and_then(|v| v.as_bool()).unwrap_or(false),
            };
            Some(ShellEvent::ContextMenu { id, ctx })
        }
        _ => None,
    }
}

// ─── Host window / UI channel adapters ───

struct WryHost {
    window: Rc<Window>,
    open: Rc<Cell<bool>>,
}

impl WindowHost for WryHost {
    fn inner_bounds(&self) -> Option<Rect> {
        if !self.open.get() {
            return None;
        }
        let size = self
            .window
            .inner_size()
            .to_logical::<f64>(self.window.scale_factor());
        Some(Rect::of_size(size.width as u32, size.height as u32))
    }
}

struct ProxySink {
    proxy: EventLoopProxy<ShellEvent>,
}

impl UiSink for ProxySink {
    fn publish(&mut self, event: UiEvent) {
        let _ = self.proxy.send_event(ShellEvent::Ui(event));
    }
}

/// Shell policy: transfers are accepted into the downloads directory. The
/// exchange stays a request/response so an embedder can hook a real dialog
/// in and cancel.
struct DownloadsDirPrompt {
    dir: PathBuf,
}

impl SaveLocationPrompt for DownloadsDirPrompt {
    fn choose_save_path(&mut self, file_name: &str) -> Option<PathBuf> {
        Some(self.dir.join(file_name))
    }
}

// ─── Chrome page ───

const CHROME_HTML: &str = include_str!("chrome.html");

/// Map a context-menu action onto the request the chrome page should post
/// when the item is clicked.
fn menu_action_request(action: &MenuAction) -> serde_json::Value {
    use serde_json::json;
    match action {
        MenuAction::OpenLinkInNewTab(url) | MenuAction::OpenImageInNewTab(url) => {
            json!({"method": "new-tab", "params": {"url": url}})
        }
        MenuAction::CopyLinkAddress(url) | MenuAction::CopyImageAddress(url) => {
            json!({"method": "clipboard.write", "params": {"text": url}})
        }
        MenuAction::CopySelection(text) => {
            json!({"method": "clipboard.write", "params": {"text": text}})
        }
        MenuAction::Cut => json!({"method": "edit.cut", "params": {}}),
        MenuAction::Copy => json!({"method": "edit.copy", "params": {}}),
        MenuAction::Paste => json!({"method": "edit.paste", "params": {}}),
        MenuAction::SelectAll => json!({"method": "edit.select-all", "params": {}}),
        MenuAction::Back => json!({"method": "go-back", "params": {}}),
        MenuAction::Forward => json!({"method": "go-forward", "params": {}}),
        MenuAction::Reload => json!({"method": "reload", "params": {}}),
        MenuAction::InspectElement { x, y } => {
            json!({"method": "toggle-devtools", "params": {"x": x, "y": y}})
        }
    }
}

fn menu_to_json(entries: &[MenuEntry]) -> serde_json::Value {
    use serde_json::json;
    let items: Vec<serde_json::Value> = entries
        .iter()
        .map(|entry| match entry {
            MenuEntry::Separator => json!({"separator": true}),
            MenuEntry::Item(item) => json!({
                "label": item.label,
                "enabled": item.enabled,
                "request": menu_action_request(&item.action),
            }),
        })
        .collect();
    json!(items)
}

// ─── Main entry point ───

pub fn run() {
    let event_loop: EventLoop<ShellEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = Rc::new(
        WindowBuilder::new()
            .with_title("Probe Browser")
            .with_inner_size(LogicalSize::new(1280.0, 800.0))
            .build(&event_loop)
            .expect("Failed to create window"),
    );
    let open = Rc::new(Cell::new(true));

    // Chrome strip across the top.
    let chrome_proxy = proxy.clone();
    let chrome = WebViewBuilder::new()
        .with_custom_protocol("pb".into(), move |_id, _request| {
            wry::http::Response::builder()
                .header("Content-Type", "text/html; charset=utf-8")
                .body(CHROME_HTML.as_bytes().to_vec().into())
                .unwrap()
        })
        .with_url("pb://localhost/chrome")
        .with_bounds(wry::Rect {
            position: wry::dpi::LogicalPosition::new(0.0, 0.0).into(),
            size: wry::dpi::LogicalSize::new(1280.0, CHROME_HEIGHT as f64).into(),
        })
        .with_ipc_handler(move |req: wry::http::Request<String>| {
            let _ = chrome_proxy.send_event(ShellEvent::ChromeIpc(req.body().clone()));
        })
        .build_as_child(window.as_ref())
        .expect("Failed to create chrome webview");

    let data_dir = crate::platform::get_data_dir();
    if let Err(err) = std::fs::create_dir_all(&data_dir) {
        log::warn!("could not create data dir {:?}: {}", data_dir, err);
    }
    let db_path = data_dir.join("probe.db");

    let mut app = App::new(
        PersistenceGateway::open(&db_path.to_string_lossy()),
        Box::new(WryHost {
            window: Rc::clone(&window),
            open: Rc::clone(&open),
        }),
        Box::new(WryFactory {
            window: Rc::clone(&window),
            proxy: proxy.clone(),
            downloads_dir: crate::platform::get_downloads_dir(),
        }),
        Box::new(ProxySink {
            proxy: proxy.clone(),
        }),
        Box::new(DownloadsDirPrompt {
            dir: crate::platform::get_downloads_dir(),
        }),
    );
    app.create_tab(None);

    event_loop.run(move |event, _, control_flow| {
        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                open.set(false);
                *control_flow = ControlFlow::Exit;
                return;
            }

            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => {
                let logical = size.to_logical::<f64>(window.scale_factor());
                let _ = chrome.set_bounds(wry::Rect {
                    position: wry::dpi::LogicalPosition::new(0.0, 0.0).into(),
                    size: wry::dpi::LogicalSize::new(logical.width, CHROME_HEIGHT as f64).into(),
                });
                app.handle_resize(Instant::now());
            }

            Event::UserEvent(shell_event) => match shell_event {
                ShellEvent::ChromeIpc(body) => {
                    eprintln!("[IPC] {}", &body[..body.len().min(200)]);
                    handle_chrome_ipc(&mut app, &chrome, &body);
                }
                ShellEvent::Page { id, event } => {
                    app.handle_page_event(id, event, Instant::now());
                }
                ShellEvent::Download(signal) => {
                    app.handle_download_signal(signal);
                }
                ShellEvent::Key { id: _, chord } => {
                    app.handle_key_chord(&chord);
                }
                ShellEvent::ContextMenu { id, ctx } => {
                    // Only the visible tab gets a menu; a background view's
                    // stale right-click is dropped.
                    if app.active_tab() == Some(id) {
                        let menu =
                            build_context_menu(&ctx, app.can_go_back(), app.can_go_forward());
                        let script = format!(
                            "if(window.__pb_menu)__pb_menu({},{},{})",
                            menu_to_json(&menu),
                            ctx.x,
                            ctx.y
                        );
                        let _ = chrome.evaluate_script(&script);
                    }
                }
                ShellEvent::Ui(ui_event) => {
                    if let Ok(json) = serde_json::to_string(&ui_event) {
                        let _ = chrome.evaluate_script(&format!(
                            "if(window.__pb_event)__pb_event({})",
                            json
                        ));
                    }
                }
            },

            _ => {}
        }

        *control_flow = match app.poll(Instant::now()) {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        };
    });
}

fn handle_chrome_ipc(app: &mut App, chrome: &WebView, body: &str) {
    let Ok(msg) = serde_json::from_str::<serde_json::Value>(body) else {
        return;
    };
    let Some(method) = msg.get("method").and_then(|v| v.as_str()) else {
        return;
    };
    let empty = serde_json::json!({});
    let params = msg.get("params").unwrap_or(&empty);

    // Clipboard writes come from context-menu items and run in the chrome
    // page itself; everything else goes through the core dispatch.
    if method == "clipboard.write" {
        if let Some(text) = params.get("text").and_then(|v| v.as_str()) {
            let _ = chrome.evaluate_script(&format!(
                "navigator.clipboard.writeText({})",
                serde_json::json!(text)
            ));
        }
        return;
    }

    let result = rpc_handler::handle_request(app, method, params);
    if let Some(cb) = msg.get("cb").and_then(|v| v.as_u64()) {
        let payload = match result {
            Ok(value) => serde_json::json!({"ok": true, "value": value}),
            Err(err) => serde_json::json!({"ok": false, "error": err}),
        };
        let _ = chrome.evaluate_script(&format!(
            "if(window.__pb_rpc_result)__pb_rpc_result({},{})",
            cb, payload
        ));
    } else if let Err(err) = result {
        log::warn!("chrome request {} failed: {}", method, err);
    }
}
