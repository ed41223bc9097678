//! Active-view switcher for Probe Browser.
//!
//! The window has a single visible-surface slot. This state machine is the
//! only component allowed to mutate it, which is what keeps overlapping or
//! ghost surfaces impossible: at any instant at most one view is shown.

use crate::engine::WindowHost;
use crate::managers::layout_manager::LayoutManager;
use crate::managers::tab_manager::TabManager;
use crate::types::tab::TabId;
use crate::ui::channel::{UiEvent, UiSink};

/// One state variable, two transitions (`switch_to`, `clear`).
pub struct ViewSwitcher {
    active: Option<TabId>,
}

impl ViewSwitcher {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn active(&self) -> Option<TabId> {
        self.active
    }

    /// Make `id` the visible tab.
    ///
    /// Idempotent when `id` is already active (publishes nothing), silent
    /// no-op when `id` is not registered. Otherwise: hide the previously
    /// attached view (nothing attached is tolerated), show the requested
    /// view, reapply bounds, and publish a `tab-switched` snapshot.
    /// Returns whether a switch actually happened.
    pub fn switch_to(
        &mut self,
        id: TabId,
        tabs: &mut TabManager,
        layout: &LayoutManager,
        host: &dyn WindowHost,
        sink: &mut dyn UiSink,
    ) -> bool {
        if self.active == Some(id) {
            return false;
        }
        if !tabs.contains(id) {
            return false;
        }

        if let Some(prev) = self.active.take() {
            if let Some(view) = tabs.view_mut(prev) {
                view.set_visible(false);
            }
        }

        self.active = Some(id);
        if let Some(view) = tabs.view_mut(id) {
            view.set_visible(true);
        }
        layout.apply(self.active, tabs, host);

        let (url, title) = tabs
            .get(id)
            .map(|t| (t.view().url(), t.view().title()))
            .unwrap_or_default();
        sink.publish(UiEvent::TabSwitched { id, url, title });
        true
    }

    /// Detach the current view without attaching a replacement.
    ///
    /// Used only transiently while the last remaining tab is torn down; the
    /// registry immediately creates a fresh tab afterwards, so an empty slot
    /// is never an observable steady state.
    pub fn clear(&mut self, tabs: &mut TabManager) {
        if let Some(prev) = self.active.take() {
            if let Some(view) = tabs.view_mut(prev) {
                view.set_visible(false);
            }
        }
    }
}

impl Default for ViewSwitcher {
    fn default() -> Self {
        Self::new()
    }
}
