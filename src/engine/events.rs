use serde::{Deserialize, Serialize};

/// Why a tab's render process went away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderExitReason {
    CleanExit,
    Crashed,
    Killed,
    OutOfMemory,
    LaunchFailed,
}

impl RenderExitReason {
    pub fn is_clean(self) -> bool {
        matches!(self, RenderExitReason::CleanExit)
    }
}

/// Lifecycle events raised by a content view.
///
/// Events arrive tagged with the owning tab's id and are delivered in the
/// order the engine raised them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PageEvent {
    LoadingStarted,
    LoadingStopped,
    /// Top-level navigation committed.
    Navigated { url: String },
    /// Same-document navigation (fragment, pushState).
    NavigatedInPage { url: String },
    TitleUpdated { title: String },
    RenderProcessGone { reason: RenderExitReason },
    Unresponsive,
    Responsive,
}

/// Terminal state reported by the engine for a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DownloadDoneState {
    Completed,
    Interrupted,
    Cancelled,
}

/// Signals from the engine's download sub-channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DownloadSignal {
    Started { file_name: String, total_bytes: u64 },
    Progress { file_name: String, received_bytes: u64 },
    Done { file_name: String, state: DownloadDoneState },
}
