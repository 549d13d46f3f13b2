//! livepad - a live code playground with just-in-time TypeScript/JSX preview.

mod actor;
mod cli;
mod config;
mod core;
mod embed;
mod live;
mod logger;
mod playground;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{PlaygroundConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = init_config(PlaygroundConfig::load(&cli)?);

    match &cli.command {
        Commands::Serve { .. } => cli::serve::run_serve(),
        Commands::Compile { file, raw } => cli::compile::run_compile(file, *raw, &config),
        Commands::List => cli::list::run_list(&config),
    }
}
