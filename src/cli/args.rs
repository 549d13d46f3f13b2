//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// livepad live code playground CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: livepad.toml)
    #[arg(short = 'C', long, global = true, default_value = "livepad.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Collection directory holding the index and documents (relative to cwd)
    #[arg(long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub collection: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the playground server with live preview
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Port of the live channel (WebSocket)
        #[arg(long)]
        ws_port: Option<u16>,

        /// Quiet period in milliseconds before an edit recompiles
        #[arg(short, long)]
        debounce: Option<u64>,

        /// Enable verbose output for debugging
        #[arg(short = 'V', long)]
        verbose: bool,
    },

    /// Compile one document and print the injectable script
    #[command(visible_alias = "c")]
    Compile {
        /// Source file; its extension selects the dialect
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Print the transformed body without the run wrapper
        #[arg(long)]
        raw: bool,
    },

    /// List the documents of the collection index
    #[command(visible_alias = "l")]
    List,
}
