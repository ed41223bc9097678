// Content-engine interface.
//
// The embedded engine that performs navigation, rendering, and networking is
// an external collaborator. The orchestrator only ever sees these traits and
// event types; the wry-backed implementation lives in `ui::shell`.

pub mod events;
pub mod view;

pub use events::{DownloadDoneState, DownloadSignal, PageEvent, RenderExitReason};
pub use view::{ContentView, FindOptions, StopFindAction, ViewFactory, WindowHost};
