//! App core for Probe Browser.
//!
//! Central struct owning the tab registry, the view switcher, layout, event
//! routing, downloads, shortcuts, and the persistence gateway, plus the
//! injected seams to the host window and the presentation layer. All state
//! transitions here are synchronous; asynchrony lives entirely at the
//! engine boundary and comes back in as queued events plus `poll(now)`
//! deadlines.

use std::path::PathBuf;
use std::time::Instant;

use crate::engine::{
    ContentView, DownloadSignal, FindOptions, PageEvent, StopFindAction, ViewFactory, WindowHost,
};
use crate::managers::download_manager::DownloadManager;
use crate::managers::event_router::EventRouter;
use crate::managers::layout_manager::{LayoutManager, OverlayKind};
use crate::managers::persistence::PersistenceGateway;
use crate::managers::shortcut_manager::{KeyChord, ShortcutAction, ShortcutManager};
use crate::managers::tab_manager::TabManager;
use crate::managers::view_switcher::ViewSwitcher;
use crate::types::tab::{TabId, TabSummary};
use crate::ui::channel::{SaveLocationPrompt, UiEvent, UiSink};

/// URL loaded into tabs created without an explicit target.
pub const DEFAULT_NEW_TAB_URL: &str = "https://www.google.com";

/// Zoom level step for zoom-in/zoom-out.
const ZOOM_STEP: f64 = 0.5;

pub struct App {
    pub tabs: TabManager,
    pub switcher: ViewSwitcher,
    pub layout: LayoutManager,
    pub router: EventRouter,
    pub downloads: DownloadManager,
    pub shortcuts: ShortcutManager,
    pub gateway: PersistenceGateway,
    host: Box<dyn WindowHost>,
    factory: Box<dyn ViewFactory>,
    sink: Box<dyn UiSink>,
    prompt: Box<dyn SaveLocationPrompt>,
}

impl App {
    pub fn new(
        gateway: PersistenceGateway,
        host: Box<dyn WindowHost>,
        factory: Box<dyn ViewFactory>,
        sink: Box<dyn UiSink>,
        prompt: Box<dyn SaveLocationPrompt>,
    ) -> Self {
        Self {
            tabs: TabManager::new(),
            switcher: ViewSwitcher::new(),
            layout: LayoutManager::new(),
            router: EventRouter::new(),
            downloads: DownloadManager::new(),
            shortcuts: ShortcutManager::new(),
            gateway,
            host,
            factory,
            sink,
            prompt,
        }
    }

    // ─── Tab lifecycle ───

    /// Create a tab, load `url` into it, and make it active.
    ///
    /// Returns [`TabId::INVALID`] when the host window no longer exists;
    /// never fails otherwise.
    pub fn create_tab(&mut self, url: Option<&str>) -> TabId {
        let url = url.unwrap_or(DEFAULT_NEW_TAB_URL);
        if !self.host.is_open() {
            return TabId::INVALID;
        }
        let id = self.tabs.allocate_id();
        let Some(mut view) = self.factory.create_view(id) else {
            return TabId::INVALID;
        };
        if let Err(err) = view.load_url(url) {
            log::warn!("initial load of {} into tab {} failed: {}", url, id, err);
        }
        self.tabs.insert(id, view, url);
        self.router.install(id);
        self.sink.publish(UiEvent::TabCreated {
            id,
            url: url.to_string(),
        });
        self.switcher.switch_to(
            id,
            &mut self.tabs,
            &self.layout,
            self.host.as_ref(),
            self.sink.as_mut(),
        );
        id
    }

    /// Close a tab. No-op for unknown ids.
    ///
    /// When the active tab closes, a replacement becomes active before the
    /// view is destroyed, so there is never a moment with no attached view.
    /// Closing the last tab immediately creates a fresh one.
    pub fn close_tab(&mut self, id: TabId) {
        if !self.tabs.contains(id) {
            return;
        }
        if self.switcher.active() == Some(id) {
            match self.tabs.next_active_after(id) {
                Some(next) => {
                    self.switcher.switch_to(
                        next,
                        &mut self.tabs,
                        &self.layout,
                        self.host.as_ref(),
                        self.sink.as_mut(),
                    );
                }
                None => self.switcher.clear(&mut self.tabs),
            }
        }
        self.router.teardown(id);
        self.tabs.remove(id);
        self.sink.publish(UiEvent::TabClosed { id });

        if self.tabs.is_empty() {
            self.create_tab(None);
        }
    }

    /// Switch the visible tab. Idempotent; unknown ids are ignored.
    pub fn switch_tab(&mut self, id: TabId) {
        self.switcher.switch_to(
            id,
            &mut self.tabs,
            &self.layout,
            self.host.as_ref(),
            self.sink.as_mut(),
        );
    }

    pub fn active_tab(&self) -> Option<TabId> {
        self.switcher.active()
    }

    pub fn list_tabs(&self) -> Vec<TabSummary> {
        self.tabs.list(self.switcher.active())
    }

    fn active_view_mut(&mut self) -> Option<&mut dyn ContentView> {
        let id = self.switcher.active()?;
        self.tabs.view_mut(id)
    }

    fn active_view(&self) -> Option<&dyn ContentView> {
        let id = self.switcher.active()?;
        self.tabs.get(id).map(|t| t.view())
    }

    // ─── Navigation on the active tab ───

    /// Navigate the active tab. Address-bar input is normalized first; the
    /// effective URL is returned.
    pub fn navigate(&mut self, input: &str) -> String {
        let url = normalize_url(input);
        if let Some(view) = self.active_view_mut() {
            if let Err(err) = view.load_url(&url) {
                log::warn!("navigation to {} failed: {}", url, err);
            }
        }
        url
    }

    pub fn go_back(&mut self) {
        if let Some(view) = self.active_view_mut() {
            if view.can_go_back() {
                view.go_back();
            }
        }
    }

    pub fn go_forward(&mut self) {
        if let Some(view) = self.active_view_mut() {
            if view.can_go_forward() {
                view.go_forward();
            }
        }
    }

    pub fn reload(&mut self) {
        if let Some(view) = self.active_view_mut() {
            view.reload();
        }
    }

    pub fn hard_reload(&mut self) {
        if let Some(view) = self.active_view_mut() {
            view.reload_ignoring_cache();
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.active_view().map(|v| v.can_go_back()).unwrap_or(false)
    }

    pub fn can_go_forward(&self) -> bool {
        self.active_view()
            .map(|v| v.can_go_forward())
            .unwrap_or(false)
    }

    pub fn current_url(&self) -> String {
        self.active_view().map(|v| v.url()).unwrap_or_default()
    }

    // ─── View utilities ───

    pub fn zoom_in(&mut self) -> f64 {
        self.adjust_zoom(ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.adjust_zoom(-ZOOM_STEP)
    }

    pub fn zoom_reset(&mut self) -> f64 {
        if let Some(view) = self.active_view_mut() {
            view.set_zoom_level(0.0);
        }
        0.0
    }

    fn adjust_zoom(&mut self, delta: f64) -> f64 {
        match self.active_view_mut() {
            Some(view) => {
                let level = view.zoom_level() + delta;
                view.set_zoom_level(level);
                level
            }
            None => 0.0,
        }
    }

    pub fn find_in_page(&mut self, text: &str, options: FindOptions) {
        if let Some(view) = self.active_view_mut() {
            view.find_in_page(text, options);
        }
    }

    pub fn stop_find_in_page(&mut self, action: StopFindAction) {
        if let Some(view) = self.active_view_mut() {
            view.stop_find_in_page(action);
        }
    }

    pub fn toggle_devtools(&mut self) {
        if let Some(view) = self.active_view_mut() {
            view.toggle_devtools();
        }
    }

    pub fn print_page(&mut self) {
        if let Some(view) = self.active_view_mut() {
            view.print_page();
        }
    }

    pub fn edit_cut(&mut self) {
        if let Some(view) = self.active_view_mut() {
            view.cut();
        }
    }

    pub fn edit_copy(&mut self) {
        if let Some(view) = self.active_view_mut() {
            view.copy();
        }
    }

    pub fn edit_paste(&mut self) {
        if let Some(view) = self.active_view_mut() {
            view.paste();
        }
    }

    pub fn edit_select_all(&mut self) {
        if let Some(view) = self.active_view_mut() {
            view.select_all();
        }
    }

    /// Open the active page's source in a new tab.
    pub fn view_source(&mut self) -> TabId {
        let url = self.current_url();
        if url.is_empty() {
            return TabId::INVALID;
        }
        self.create_tab(Some(&format!("view-source:{}", url)))
    }

    /// Toggle audio mute on a tab, returning the new state.
    pub fn mute_tab(&mut self, id: TabId) -> Option<bool> {
        self.tabs.toggle_muted(id)
    }

    /// Bookmark the active tab's current page. Best-effort: reports whether
    /// the record was stored.
    pub fn bookmark_active_tab(&mut self) -> bool {
        let Some(view) = self.active_view() else {
            return false;
        };
        let (url, title) = (view.url(), view.title());
        self.gateway.add_bookmark(&url, &title).is_some()
    }

    // ─── Engine boundary ───

    /// One lifecycle event from a content view.
    pub fn handle_page_event(&mut self, id: TabId, event: PageEvent, now: Instant) {
        self.router.route(
            id,
            event,
            now,
            self.switcher.active(),
            &mut self.tabs,
            &self.gateway,
            self.sink.as_mut(),
        );
    }

    /// One signal from the engine's download sub-channel.
    ///
    /// For a start signal the save-location prompt runs first; the returned
    /// path tells the engine where to persist the file, and `None` tells it
    /// to abort the transfer (no record is retained in that case).
    pub fn handle_download_signal(&mut self, signal: DownloadSignal) -> Option<PathBuf> {
        match signal {
            DownloadSignal::Started {
                file_name,
                total_bytes,
            } => {
                let path = self.prompt.choose_save_path(&file_name)?;
                self.downloads
                    .begin(&file_name, total_bytes, path.clone(), self.sink.as_mut());
                Some(path)
            }
            DownloadSignal::Progress {
                file_name,
                received_bytes,
            } => {
                self.downloads
                    .progress(&file_name, received_bytes, self.sink.as_mut());
                None
            }
            DownloadSignal::Done { file_name, state } => {
                self.downloads.finish(&file_name, state, self.sink.as_mut());
                None
            }
        }
    }

    /// The host window resized. Actual bounds application is debounced and
    /// happens in [`poll`](Self::poll).
    pub fn handle_resize(&mut self, now: Instant) {
        self.layout.notify_resized(now);
    }

    /// An overlay appeared or disappeared; recompute bounds immediately.
    pub fn notify_overlay(&mut self, kind: OverlayKind, visible: bool, size_hint: Option<u32>) {
        self.layout.notify_overlay(
            kind,
            visible,
            size_hint,
            self.switcher.active(),
            &mut self.tabs,
            self.host.as_ref(),
        );
    }

    /// Drive pending deadlines (resize debounce, crash reloads). Returns the
    /// next instant a wake-up is needed, for the host loop's wait-until.
    pub fn poll(&mut self, now: Instant) -> Option<Instant> {
        let layout_next = self.layout.poll(
            now,
            self.switcher.active(),
            &mut self.tabs,
            self.host.as_ref(),
        );
        let router_next = self.router.poll(now, &mut self.tabs);
        match (layout_next, router_next) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // ─── Input ───

    /// Dispatch a key chord. Returns whether the chord was consumed; an
    /// unmatched chord passes through to the content view.
    pub fn handle_key_chord(&mut self, chord: &KeyChord) -> bool {
        let Some(action) = self.shortcuts.resolve(chord) else {
            return false;
        };
        match action {
            ShortcutAction::NewTab => {
                self.create_tab(None);
            }
            ShortcutAction::CloseTab => {
                if let Some(id) = self.switcher.active() {
                    self.close_tab(id);
                }
            }
            ShortcutAction::Reload => self.reload(),
            ShortcutAction::HardReload => self.hard_reload(),
            ShortcutAction::Find => self.sink.publish(UiEvent::ShowFindInPage),
            ShortcutAction::FocusAddressBar => self.sink.publish(UiEvent::FocusUrlBar),
            ShortcutAction::BookmarkPage => {
                self.bookmark_active_tab();
            }
            ShortcutAction::ZoomIn => {
                self.zoom_in();
            }
            ShortcutAction::ZoomOut => {
                self.zoom_out();
            }
            ShortcutAction::ZoomReset => {
                self.zoom_reset();
            }
            ShortcutAction::Print => self.print_page(),
            ShortcutAction::ViewSource => {
                self.view_source();
            }
            ShortcutAction::ToggleDevTools => self.toggle_devtools(),
            ShortcutAction::SelectTab(n) => {
                if let Some(id) = self.tabs.nth_by_creation((n - 1) as usize) {
                    self.switch_tab(id);
                }
            }
            ShortcutAction::ClearBrowsingData => {
                self.sink.publish(UiEvent::ShowClearDataDialog)
            }
        }
        true
    }
}

/// Turn address-bar input into a loadable URL: explicit schemes pass
/// through, things that look like hostnames get `https://`, anything else
/// becomes a search query.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return DEFAULT_NEW_TAB_URL.to_string();
    }
    if trimmed.starts_with("http://")
        || trimmed.starts_with("https://")
        || trimmed.starts_with("about:")
        || trimmed.starts_with("view-source:")
    {
        return trimmed.to_string();
    }
    if trimmed.contains('.') && !trimmed.contains(' ') {
        return format!("https://{}", trimmed);
    }
    format!("https://www.google.com/search?q={}", url_encode(trimmed))
}

fn url_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3);
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push('+'),
            _ => {
                out.push('%');
                out.push(char::from(b"0123456789ABCDEF"[(b >> 4) as usize]));
                out.push(char::from(b"0123456789ABCDEF"[(b & 0xf) as usize]));
            }
        }
    }
    out
}
