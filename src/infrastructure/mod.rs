//! Infrastructure layer providing external service integrations.
//!
//! Clipboard access, settings on disk, and log output live here so the
//! domain and application layers stay free of I/O.

pub mod clipboard;
pub mod config;
pub mod logging;

pub use clipboard::*;
pub use config::*;
pub use logging::*;
