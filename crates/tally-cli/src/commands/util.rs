//! Shared utilities for CLI commands.

use std::io::Write;

use anyhow::{Context, Result};
use tally_core::Notification;
use tokio::runtime::Runtime;

/// Builds the single-threaded runtime the pump runs on.
pub fn runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}

/// Writes one notification as a text line or a JSON line.
pub fn write_notification<W: Write>(writer: &mut W, notification: &Notification, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *writer, notification)?;
        writeln!(writer)?;
    } else {
        writeln!(writer, "{notification}")?;
    }
    Ok(())
}
