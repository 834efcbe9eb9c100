//! CLI command implementations

pub mod add;
pub mod archive;
pub mod config;
pub mod dashboard;
pub mod edit;
pub mod list;
pub mod logs;
pub mod remove;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use satchel_core::services::{LogEvent, LoggingService};
use satchel_core::SatchelContext;

use crate::output::TerminalNotifier;

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let satchel_dir = get_satchel_dir();
    std::fs::create_dir_all(&satchel_dir).ok()?;
    LoggingService::new(&satchel_dir, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the satchel directory from environment or default
pub fn get_satchel_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SATCHEL_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".satchel")
    }
}

/// Get or create satchel context
pub fn get_context() -> Result<SatchelContext> {
    let satchel_dir = get_satchel_dir();

    std::fs::create_dir_all(&satchel_dir)
        .with_context(|| format!("Failed to create satchel directory: {:?}", satchel_dir))?;

    SatchelContext::new(&satchel_dir, Arc::new(TerminalNotifier))
        .context("Failed to initialize satchel context")
}
