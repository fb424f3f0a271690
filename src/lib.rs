//! speechnav - end-to-end harness for screen reader navigation speech
//!
//! Presses navigation keys in an editor owned by a speech host, collects the
//! speech produced after each press and compares it with expected
//! transcriptions.

pub mod cli;
pub mod commands;
pub mod common;
pub mod host;
pub mod ipc;
pub mod speech;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use speech::{NavKey, Utterance};
