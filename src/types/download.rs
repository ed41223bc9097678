use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Status of a file download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    Downloading,
    Completed,
    Failed,
}

impl DownloadStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, DownloadStatus::Completed | DownloadStatus::Failed)
    }
}

/// One tracked download, keyed by file name for the lifetime of a transfer.
///
/// Records are kept until the UI explicitly clears them; once a terminal
/// status is reached the record never mutates again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadItem {
    pub file_name: String,
    pub total_bytes: u64,
    pub received_bytes: u64,
    /// Derived completion percentage, non-decreasing while downloading.
    pub percent: u8,
    pub status: DownloadStatus,
    pub save_path: Option<PathBuf>,
}
