//! CLI subcommand implementations.

pub mod config;
pub mod mode;
pub mod replay;
pub mod util;
pub mod watch;
