//! CLI definitions for CodeHint.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CodeHint CLI.
#[derive(Parser)]
#[command(name = "codehint")]
#[command(about = "AI hints and solutions for coding problems")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.codehint/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the broker in foreground (default)
    Run {
        /// Server host
        #[arg(long)]
        host: Option<String>,

        /// Server port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Wait until a running broker reports ready
    Probe {
        /// Broker base URL (default: from [server])
        #[arg(long)]
        url: Option<String>,
    },

    /// List providers and whether they carry a credential
    Providers {
        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}
