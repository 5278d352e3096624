use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};
use mdkit_config::Config;
use std::io;

mod cli;
mod commands;
mod storage;

use cli::{Cli, Commands};
use commands::Session;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only JSON
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .target(env_logger::Target::Stderr)
        .init();

    let config = match &cli.config_file {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            Config::load_or_default(Some(path.as_path()))
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => Config::load_or_default(None).context("Failed to load default config")?,
    };

    let session = Session::new(&config, cli.compact)?;

    match cli.command {
        Commands::Parse { file } => session.parse(&file),
        Commands::Analyze { file } => session.analyze(&file),
        Commands::Tokens { file } => session.tokens(&file),
        Commands::Transform {
            file,
            operation,
            strict,
            output,
        } => session.transform(&file, &operation, strict, output.as_deref()),
        Commands::Merge {
            inputs,
            strategy,
            output,
        } => session.merge(&inputs, strategy.as_deref(), output.as_deref()),
        Commands::Serve => {
            info!("Reading requests from stdin");
            session.serve(io::stdin().lock(), io::stdout().lock())
        }
    }
}
