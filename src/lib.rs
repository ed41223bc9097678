//! Probe Browser — a minimal desktop browsing shell.
//!
//! The core is a tab/view orchestrator: it owns the mapping from tab ids to
//! embedded content views, keeps exactly one view attached to the window,
//! recomputes layout under resize and overlay churn, routes engine lifecycle
//! events into a coherent UI stream, and drives downloads as per-transfer
//! state machines. The content engine itself and the presentation layer are
//! external collaborators reached through the traits in [`engine`] and
//! [`ui::channel`].

pub mod app;
pub mod database;
pub mod engine;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod types;
pub mod ui;
