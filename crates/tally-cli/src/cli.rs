//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Input-driven counter.
///
/// Turns a stream of key, mouse button and wheel events into a count under
/// rapid, multi-click, burst or multi-burst accumulation.
#[derive(Debug, Parser)]
#[command(name = "tally", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a JSONL script of inputs, settings swaps and control ops.
    ///
    /// Each line is one of `{"input": {...}}`, `{"settings": {...}}` or
    /// `{"control": ...}`. Settings lines replace the whole snapshot,
    /// including the count.
    Replay {
        /// Script file; reads stdin when omitted.
        file: Option<PathBuf>,

        /// Print notifications as JSON lines.
        #[arg(long)]
        json: bool,
    },

    /// Drive the counter interactively from stdin.
    ///
    /// `=` adds one, `-` subtracts one, `0` resets, `9` toggles pause and
    /// `delete` quits. `key <code>`, `mouse <button>` and `wheel up|down`
    /// inject input events stamped with the current time.
    Watch {
        /// Print notifications as JSON lines.
        #[arg(long)]
        json: bool,
    },

    /// Show the resolved counting mode.
    Mode,

    /// Print the effective configuration.
    Config,
}
