//! Replay command for feeding a scripted session through the pump.
//!
//! Scripts are JSONL. Blank lines and lines starting with `#` are skipped.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde::Deserialize;
use tally_core::{ControlOp, DetachedHook, EventPump, InputEvent, PumpMessage, SettingsDraft};

use super::util::{runtime, write_notification};
use crate::config::Config;

/// One line of a replay script.
///
/// Settings lines use the same keys as the config file, including the
/// `input_type`/`input_code` pair and the legacy aliases.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptLine {
    Input(InputEvent),
    Settings(Config),
    Control(ControlOp),
}

impl ScriptLine {
    /// Converts the line into a pump message, resolving the tracked input of
    /// a settings line.
    pub fn into_message(self) -> Result<PumpMessage> {
        Ok(match self {
            Self::Input(event) => PumpMessage::Input(event),
            Self::Settings(config) => PumpMessage::ReplaceSettings(config.draft()?),
            Self::Control(op) => PumpMessage::Control(op),
        })
    }
}

/// Parses a whole script up front so a bad line fails before anything runs.
pub fn parse_script<R: BufRead>(reader: R) -> Result<Vec<PumpMessage>> {
    let mut messages = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.context("failed to read script")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let message = serde_json::from_str::<ScriptLine>(trimmed)
            .map_err(anyhow::Error::from)
            .and_then(ScriptLine::into_message)
            .with_context(|| format!("invalid script line {}", index + 1))?;
        messages.push(message);
    }
    Ok(messages)
}

/// Runs the replay command. Returns the final count.
pub fn run<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    draft: SettingsDraft,
    json: bool,
) -> Result<i64> {
    let script = parse_script(reader)?;
    tracing::debug!(lines = script.len(), "replaying script");

    let rt = runtime()?;
    let (final_settings, notifications) = rt.block_on(async move {
        let (handle, mut rx, task) = EventPump::spawn(draft, DetachedHook::default());
        for message in script {
            handle.send(message);
        }
        // Anything after an explicit stop in the script is dropped by the pump.
        handle.stop();
        let final_settings = task.await.context("pump task failed")?;

        let mut notifications = Vec::new();
        while let Some(n) = rx.recv().await {
            notifications.push(n);
        }
        anyhow::Ok((final_settings, notifications))
    })?;

    for n in &notifications {
        write_notification(writer, n, json)?;
    }
    if !json {
        writeln!(writer, "final count {}", final_settings.count())?;
    }

    Ok(final_settings.count())
}
