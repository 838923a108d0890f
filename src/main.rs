mod cli;
mod commands;
mod config;
mod logging;
mod resolve;

use std::process;

use anyhow::Result;
use clap::Parser;
use owo_colors::OwoColorize;

use crate::cli::{Cli, Commands};
use crate::config::Config;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {e:#}", "Error:".red());
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { force } => commands::init::run(cli.config, force),
        Commands::Generate(args) => {
            let config = Config::load(cli.config.as_deref())?;
            commands::generate::run(&config, args)
        }
        Commands::Preview(args) => {
            let config = Config::load(cli.config.as_deref())?;
            commands::preview::run(&config, args)
        }
    }
}
