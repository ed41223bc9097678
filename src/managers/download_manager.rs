//! Download coordination for Probe Browser.
//!
//! Each transfer is a small state machine keyed by file name:
//! `downloading -> completed` or `downloading -> failed`. Records live in
//! memory for the duration of the process and are retained until the UI
//! explicitly clears them.

use std::path::PathBuf;

use crate::engine::DownloadDoneState;
use crate::types::download::{DownloadItem, DownloadStatus};
use crate::ui::channel::{UiEvent, UiSink};

pub struct DownloadManager {
    downloads: Vec<DownloadItem>,
}

impl DownloadManager {
    pub fn new() -> Self {
        Self {
            downloads: Vec::new(),
        }
    }

    fn find_mut(&mut self, file_name: &str) -> Option<&mut DownloadItem> {
        self.downloads.iter_mut().find(|d| d.file_name == file_name)
    }

    /// Enter the `downloading` state for a transfer whose save location has
    /// been accepted. A re-download of the same file name replaces the
    /// previous (terminal) record.
    pub fn begin(
        &mut self,
        file_name: &str,
        total_bytes: u64,
        save_path: PathBuf,
        sink: &mut dyn UiSink,
    ) {
        self.downloads.retain(|d| d.file_name != file_name);
        let item = DownloadItem {
            file_name: file_name.to_string(),
            total_bytes,
            received_bytes: 0,
            percent: 0,
            status: DownloadStatus::Downloading,
            save_path: Some(save_path),
        };
        sink.publish(UiEvent::DownloadStarted {
            download: item.clone(),
        });
        self.downloads.insert(0, item);
    }

    /// Progress signal. `received_bytes` and the derived percentage are
    /// clamped so they never decrease while downloading; signals for
    /// unknown or terminal records are ignored.
    pub fn progress(&mut self, file_name: &str, received_bytes: u64, sink: &mut dyn UiSink) {
        let Some(item) = self.find_mut(file_name) else {
            return;
        };
        if item.status.is_terminal() {
            return;
        }
        if received_bytes > item.received_bytes {
            item.received_bytes = received_bytes;
        }
        if item.total_bytes > 0 {
            let pct = ((item.received_bytes.min(item.total_bytes) * 100) / item.total_bytes) as u8;
            if pct > item.percent {
                item.percent = pct;
            }
        }
        let snapshot = item.clone();
        sink.publish(UiEvent::DownloadProgress { download: snapshot });
    }

    /// Terminal signal from the engine. Once terminal, the record never
    /// mutates again except through [`clear`](Self::clear).
    pub fn finish(&mut self, file_name: &str, state: DownloadDoneState, sink: &mut dyn UiSink) {
        let Some(item) = self.find_mut(file_name) else {
            return;
        };
        if item.status.is_terminal() {
            return;
        }
        match state {
            DownloadDoneState::Completed => {
                item.status = DownloadStatus::Completed;
                item.percent = 100;
                item.received_bytes = item.received_bytes.max(item.total_bytes);
                let snapshot = item.clone();
                sink.publish(UiEvent::DownloadCompleted { download: snapshot });
            }
            DownloadDoneState::Interrupted | DownloadDoneState::Cancelled => {
                item.status = DownloadStatus::Failed;
                sink.publish(UiEvent::DownloadFailed {
                    file_name: file_name.to_string(),
                });
            }
        }
    }

    /// UI-initiated removal of a record. The only mutation allowed on a
    /// terminal download.
    pub fn clear(&mut self, file_name: &str) {
        self.downloads.retain(|d| d.file_name != file_name);
    }

    pub fn get(&self, file_name: &str) -> Option<&DownloadItem> {
        self.downloads.iter().find(|d| d.file_name == file_name)
    }

    pub fn list(&self) -> &[DownloadItem] {
        &self.downloads
    }
}

impl Default for DownloadManager {
    fn default() -> Self {
        Self::new()
    }
}
