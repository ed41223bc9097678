//! Probe Browser UI layer.
//!
//! `channel` defines the event stream published to the presentation layer
//! and the request/response seams the core needs from it. The wry/tao shell
//! that renders the chrome and embeds the content views lives in `shell`,
//! behind the `gui` feature:
//! - Windows: WebView2 (Chromium-based)
//! - Linux: WebKitGTK
//! - macOS: WKWebView

pub mod channel;

#[cfg(feature = "gui")]
pub mod shell;
