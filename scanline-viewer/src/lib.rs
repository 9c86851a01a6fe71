//! Viewer-side building blocks: configuration, terminal key handling,
//! socket setup, and snapshot saving. The run loop lives in `main.rs`.

pub mod config;
pub mod input;
pub mod snapshot;
pub mod socket;
