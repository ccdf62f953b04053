mod cli;
mod config;
mod countdown;
mod logger;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use crate::cli::Cli;
use crate::config::Config;

fn main() {
    let cli = Cli::parse();

    let guard = logger::init().unwrap_or_else(|e| {
        eprintln!("{} {:#}", console::style("warning:").yellow().bold(), e);
        None
    });

    let result = run(&cli);
    if let Err(e) = &result {
        error!(error = %e, "countdown:failed");
    }
    // Flush logs before a possible process::exit
    drop(guard);

    if let Err(e) = result {
        eprintln!("{} {:#}", console::style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::from_cli(cli)?;
    info!(
        start = config.start,
        end = config.end,
        decrement = config.decrement,
        final_phase = config.final_phase,
        spinner = config.spinner.name(),
        "countdown:start"
    );

    let outcome = countdown::run(config)?;
    info!(?outcome, "countdown:exit");
    Ok(())
}
