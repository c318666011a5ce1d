//! Mode command for showing how the current configuration counts.

use std::io::Write;

use anyhow::Result;
use tally_core::{Mode, Settings};

use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let settings = Settings::from_draft(config.draft()?);

    writeln!(writer, "{}", settings.describe())?;
    writeln!(writer, "Tracking {}", settings.tracked())?;
    match settings.mode() {
        Mode::Rapid => {}
        Mode::MultiClick => writeln!(writer, "Amount: {} presses", settings.amount())?,
        Mode::Burst | Mode::MultiBurst => {
            writeln!(writer, "Amount: {} bursts", settings.amount())?;
            writeln!(writer, "Idle: {} ms", settings.idle_ms())?;
        }
    }
    if settings.paused() {
        writeln!(writer, "Paused")?;
    }

    Ok(())
}
