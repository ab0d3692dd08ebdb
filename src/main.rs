//! src/main.rs

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use log::debug;
use std::path::Path;

mod cli;
mod commands;
mod config;
mod editor;
mod errors;
mod hook;
mod installer;
mod manifest;

use cli::{Cli, Command};
use commands::{print_error, Context, Report};

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    debug!("{:?}", cli);

    let Some(input) = cli.command.as_deref() else {
        println!("{} {}", "✖".red(), "Specify at least one path".red());
        std::process::exit(1);
    };

    if !cli.extra.is_empty() {
        debug!("Ignoring extra arguments: {:?}", cli.extra);
    }

    let command = match Command::from_args(input, cli.hook.as_deref()) {
        Ok(command) => command,
        Err(e) => {
            print_error(&e);
            return Ok(());
        }
    };

    let outcome = match command {
        Command::Version => Ok(commands::version::handle_version()),
        command => {
            let cwd = std::env::current_dir().context("Failed to read current directory.")?;
            run(command, &cwd, &cli).await
        }
    };

    match outcome {
        Ok(report) => report.print(),
        Err(e) => print_error(&e),
    }

    Ok(())
}

/// Config problems are reported like any other failure of the command.
async fn run(command: Command, cwd: &Path, cli: &Cli) -> errors::Result<Report> {
    let config = config::load_config().await?;
    let ctx = Context::new(config, cwd, cli.manifest.as_deref(), cli.no_install);
    commands::dispatch(command, &ctx).await
}
