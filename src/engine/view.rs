use serde::{Deserialize, Serialize};

use crate::types::errors::ViewError;
use crate::types::geometry::Rect;
use crate::types::tab::TabId;

/// Options for a find-in-page request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FindOptions {
    pub forward: bool,
    pub match_case: bool,
    pub find_next: bool,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            forward: true,
            match_case: false,
            find_next: false,
        }
    }
}

/// What to do with the current match selection when a find session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StopFindAction {
    ClearSelection,
    KeepSelection,
    ActivateSelection,
}

/// One embedded content surface, owned exclusively by its tab.
///
/// Everything here is asynchronous on the engine side; calls return as soon
/// as the request is handed over and results come back through the
/// [`PageEvent`](crate::engine::PageEvent) stream. `url()`/`title()` return
/// the engine's current snapshot.
pub trait ContentView {
    fn load_url(&mut self, url: &str) -> Result<(), ViewError>;
    fn url(&self) -> String;
    fn title(&self) -> String;

    fn go_back(&mut self);
    fn can_go_back(&self) -> bool;
    fn go_forward(&mut self);
    fn can_go_forward(&self) -> bool;
    fn reload(&mut self);
    fn reload_ignoring_cache(&mut self);

    fn set_zoom_level(&mut self, level: f64);
    fn zoom_level(&self) -> f64;

    fn find_in_page(&mut self, text: &str, options: FindOptions);
    fn stop_find_in_page(&mut self, action: StopFindAction);

    /// Clipboard editing commands, applied to the page's current selection
    /// and focus.
    fn cut(&mut self);
    fn copy(&mut self);
    fn paste(&mut self);
    fn select_all(&mut self);

    fn print_page(&mut self);
    fn inspect_element(&mut self, x: i32, y: i32);
    fn toggle_devtools(&mut self);
    fn set_audio_muted(&mut self, muted: bool);

    /// Show or hide the surface. Only the view switcher calls this; at most
    /// one view is visible at any instant.
    fn set_visible(&mut self, visible: bool);

    /// Apply the computed content rectangle. Fails when the host window was
    /// destroyed mid-operation.
    fn set_bounds(&mut self, bounds: Rect) -> Result<(), ViewError>;
}

/// Creates content views bound to tab ids.
pub trait ViewFactory {
    /// Returns `None` when the host window no longer exists, in which case
    /// the tab is not created.
    fn create_view(&mut self, id: TabId) -> Option<Box<dyn ContentView>>;
}

/// The host window: source of truth for the outer bounds the layout
/// computation starts from.
pub trait WindowHost {
    /// Current inner bounds, or `None` once the window has been destroyed.
    fn inner_bounds(&self) -> Option<Rect>;

    fn is_open(&self) -> bool {
        self.inner_bounds().is_some()
    }
}
