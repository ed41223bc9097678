//! Bounds layout for the active content view.
//!
//! The visible rectangle is the window bounds minus a fixed chrome strip
//! (tab bar + address bar) minus whatever transient overlays currently
//! reserve. Resize bursts are debounced: applying bounds on every
//! intermediate frame destabilizes the embedded surface, so a quiet period
//! collapses them into a single recomputation.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::engine::WindowHost;
use crate::managers::tab_manager::TabManager;
use crate::types::geometry::Rect;
use crate::types::tab::TabId;

/// Vertical space reserved for the tab strip and address bar.
pub const CHROME_HEIGHT: u32 = 120;

/// Quiet period before a burst of resize notifications is applied.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(100);

/// Transient panels that reduce the content rectangle while visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayKind {
    FindBar,
    SidePanel,
    ZoomPopup,
}

impl OverlayKind {
    /// Reserved height when the overlay reports no size hint.
    fn default_height(self) -> u32 {
        match self {
            OverlayKind::FindBar => 48,
            OverlayKind::SidePanel => 0,
            OverlayKind::ZoomPopup => 40,
        }
    }
}

pub struct LayoutManager {
    overlays: HashMap<OverlayKind, u32>,
    pending_resize: Option<Instant>,
}

impl LayoutManager {
    pub fn new() -> Self {
        Self {
            overlays: HashMap::new(),
            pending_resize: None,
        }
    }

    fn reserved_height(&self) -> u32 {
        CHROME_HEIGHT + self.overlays.values().sum::<u32>()
    }

    /// The rectangle the active view should occupy inside `window`.
    pub fn content_rect(&self, window: Rect) -> Rect {
        let reserved = self.reserved_height().min(window.height);
        Rect {
            x: 0,
            y: reserved as i32,
            width: window.width,
            height: window.height - reserved,
        }
    }

    /// Overlay visibility changed. Recomputes immediately; the debounce
    /// exists for resize churn only.
    pub fn notify_overlay(
        &mut self,
        kind: OverlayKind,
        visible: bool,
        size_hint: Option<u32>,
        active: Option<TabId>,
        tabs: &mut TabManager,
        host: &dyn WindowHost,
    ) {
        if visible {
            self.overlays
                .insert(kind, size_hint.unwrap_or_else(|| kind.default_height()));
        } else {
            self.overlays.remove(&kind);
        }
        self.apply(active, tabs, host);
    }

    /// A resize notification arrived; (re)arm the debounce deadline.
    pub fn notify_resized(&mut self, now: Instant) {
        self.pending_resize = Some(now + RESIZE_DEBOUNCE);
    }

    /// Fire the pending recomputation once the quiet period has elapsed.
    /// Returns the deadline still pending, if any.
    pub fn poll(
        &mut self,
        now: Instant,
        active: Option<TabId>,
        tabs: &mut TabManager,
        host: &dyn WindowHost,
    ) -> Option<Instant> {
        match self.pending_resize {
            Some(deadline) if now >= deadline => {
                self.pending_resize = None;
                self.apply(active, tabs, host);
                None
            }
            other => other,
        }
    }

    /// Recompute and push bounds to the active view. Failures (window
    /// destroyed mid-operation) are logged and dropped, never propagated.
    pub fn apply(&self, active: Option<TabId>, tabs: &mut TabManager, host: &dyn WindowHost) {
        let Some(window) = host.inner_bounds() else {
            log::warn!("layout skipped: host window gone");
            return;
        };
        let Some(id) = active else { return };
        let Some(view) = tabs.view_mut(id) else { return };
        if let Err(err) = view.set_bounds(self.content_rect(window)) {
            log::warn!("applying bounds to tab {} failed: {}", id, err);
        }
    }
}

impl Default for LayoutManager {
    fn default() -> Self {
        Self::new()
    }
}
