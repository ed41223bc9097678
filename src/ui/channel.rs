//! The outward half of the UI channel.
//!
//! The core publishes [`UiEvent`]s through a [`UiSink`]; the presentation
//! layer renders tab strips, address bars, and download shelves from them.
//! Only events for the currently active tab are published; background tabs
//! keep their state in the registry and surface it through `get-tabs`
//! summaries.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::download::DownloadItem;
use crate::types::tab::TabId;

/// Events published outward to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum UiEvent {
    TabCreated { id: TabId, url: String },
    TabClosed { id: TabId },
    TabSwitched { id: TabId, url: String, title: String },
    TabUpdated { id: TabId, title: String, url: String },
    LoadingStarted { id: TabId },
    LoadingStopped { id: TabId },
    UrlChanged { url: String, id: TabId },
    TitleUpdated { title: String, id: TabId },
    DownloadStarted { download: DownloadItem },
    DownloadProgress { download: DownloadItem },
    DownloadCompleted { download: DownloadItem },
    DownloadFailed { file_name: String },
    ShowFindInPage,
    FocusUrlBar,
    ShowClearDataDialog,
}

/// Receives the core's outward event stream.
pub trait UiSink {
    fn publish(&mut self, event: UiEvent);
}

/// Save-location request/response exchange for downloads.
///
/// Returning `None` is the cancelled response: the transfer is aborted and
/// no download record is retained.
pub trait SaveLocationPrompt {
    fn choose_save_path(&mut self, file_name: &str) -> Option<PathBuf>;
}
