use std::io::{self, BufReader};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tally_cli::commands::{config, mode, replay, watch};
use tally_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so notifications on stdout stay machine-readable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let cfg = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?cfg, "loaded configuration");

    let mut stdout = io::stdout().lock();
    match &cli.command {
        Some(Commands::Replay { file, json }) => {
            let draft = cfg.draft().context("invalid tracked input")?;
            match file {
                Some(path) => {
                    let file = std::fs::File::open(path)
                        .with_context(|| format!("failed to open {}", path.display()))?;
                    replay::run(BufReader::new(file), &mut stdout, draft, *json)?;
                }
                None => {
                    replay::run(io::stdin().lock(), &mut stdout, draft, *json)?;
                }
            }
        }
        Some(Commands::Watch { json }) => {
            let draft = cfg.draft().context("invalid tracked input")?;
            watch::run(BufReader::new(io::stdin()), &mut stdout, draft, *json)?;
        }
        Some(Commands::Mode) => {
            mode::run(&mut stdout, &cfg)?;
        }
        Some(Commands::Config) => {
            config::run(&mut stdout, &cfg)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
