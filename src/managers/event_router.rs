//! Lifecycle event routing.
//!
//! Each tab gets one subscription entry installed at creation and removed
//! atomically at close, so a tab is either fully routed or not routed at
//! all. Events from non-active tabs still update the registry's stored
//! url/title snapshots but are not republished to the UI channel.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::engine::PageEvent;
use crate::managers::persistence::PersistenceGateway;
use crate::managers::tab_manager::TabManager;
use crate::types::tab::TabId;
use crate::ui::channel::{UiEvent, UiSink};

/// Delay before a crashed tab's view is reloaded.
pub const CRASH_RELOAD_DELAY: Duration = Duration::from_secs(1);

pub struct EventRouter {
    subscriptions: HashSet<TabId>,
    pending_reloads: Vec<(TabId, Instant)>,
}

impl EventRouter {
    pub fn new() -> Self {
        Self {
            subscriptions: HashSet::new(),
            pending_reloads: Vec::new(),
        }
    }

    /// Install the subscription entry for a freshly created tab.
    pub fn install(&mut self, id: TabId) {
        self.subscriptions.insert(id);
    }

    /// Tear down a closing tab's entry, including any reload still pending
    /// for it.
    pub fn teardown(&mut self, id: TabId) {
        self.subscriptions.remove(&id);
        self.pending_reloads.retain(|(tab, _)| *tab != id);
    }

    pub fn is_subscribed(&self, id: TabId) -> bool {
        self.subscriptions.contains(&id)
    }

    /// Route one lifecycle event from the engine.
    ///
    /// Events are processed synchronously in arrival order, which preserves
    /// per-tab delivery order end to end.
    pub fn route(
        &mut self,
        id: TabId,
        event: PageEvent,
        now: Instant,
        active: Option<TabId>,
        tabs: &mut TabManager,
        gateway: &PersistenceGateway,
        sink: &mut dyn UiSink,
    ) {
        if !self.subscriptions.contains(&id) {
            // Tab closed while the event was in flight.
            return;
        }
        let is_active = active == Some(id);

        match event {
            PageEvent::LoadingStarted => {
                if is_active {
                    sink.publish(UiEvent::LoadingStarted { id });
                }
            }
            PageEvent::LoadingStopped => {
                if is_active {
                    sink.publish(UiEvent::LoadingStopped { id });
                }
            }
            PageEvent::Navigated { url } => {
                tabs.update_url(id, &url);
                if is_active {
                    sink.publish(UiEvent::UrlChanged {
                        url: url.clone(),
                        id,
                    });
                }
                // Best-effort: history recording must never interrupt
                // navigation.
                let title = tabs.get(id).map(|t| t.title.clone()).unwrap_or_default();
                gateway.add_history(&url, &title);
            }
            PageEvent::NavigatedInPage { url } => {
                tabs.update_url(id, &url);
                if is_active {
                    sink.publish(UiEvent::UrlChanged { url, id });
                }
            }
            PageEvent::TitleUpdated { title } => {
                tabs.update_title(id, &title);
                // The visit row was appended before the page knew its title.
                if let Some(url) = tabs.get(id).map(|t| t.url.clone()) {
                    gateway.update_history_title(&url, &title);
                }
                if is_active {
                    let url = tabs.get(id).map(|t| t.url.clone()).unwrap_or_default();
                    sink.publish(UiEvent::TitleUpdated {
                        title: title.clone(),
                        id,
                    });
                    sink.publish(UiEvent::TabUpdated { id, title, url });
                }
            }
            PageEvent::RenderProcessGone { reason } => {
                if !reason.is_clean() {
                    log::warn!(
                        "tab {} render process gone ({:?}), scheduling reload",
                        id,
                        reason
                    );
                    self.pending_reloads.push((id, now + CRASH_RELOAD_DELAY));
                }
            }
            PageEvent::Unresponsive => {
                log::warn!("tab {} became unresponsive", id);
            }
            PageEvent::Responsive => {
                log::debug!("tab {} responsive again", id);
            }
        }
    }

    /// Fire due crash reloads. A tab closed during the delay is skipped.
    /// Returns the earliest deadline still pending.
    pub fn poll(&mut self, now: Instant, tabs: &mut TabManager) -> Option<Instant> {
        let mut next: Option<Instant> = None;
        let mut remaining = Vec::with_capacity(self.pending_reloads.len());
        for (id, deadline) in self.pending_reloads.drain(..) {
            if deadline <= now {
                if let Some(view) = tabs.view_mut(id) {
                    view.reload();
                }
            } else {
                next = Some(next.map_or(deadline, |n: Instant| n.min(deadline)));
                remaining.push((id, deadline));
            }
        }
        self.pending_reloads = remaining;
        next
    }
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new()
    }
}
