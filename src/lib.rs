//! MTGA log watcher - draft-event extraction for an Arena overlay.

pub mod config;
pub mod watcher;
