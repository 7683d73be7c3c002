//! CodeHint - AI assistance broker for coding problems
//!
//! Main entry point for the CodeHint CLI and broker daemon.

mod cli;
mod probe;
mod register;
mod server;

use clap::Parser;

use codehint_config::{codehint_dir, ConfigLoader};

use crate::cli::{Cli, Commands};
use crate::probe::Prober;
use crate::register::print_providers;
use crate::server::{init_tracing, run_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(|| codehint_dir().join("config.toml"));
    let mut config = ConfigLoader::load_or_default(&config_path)?;

    match cli.command {
        None => {
            init_tracing()?;
            run_server(config).await
        }
        Some(Commands::Run { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            init_tracing()?;
            run_server(config).await
        }
        Some(Commands::Probe { url }) => {
            let base = url.unwrap_or_else(|| config.server.base_url());
            Prober::new(&base, &config.probe).wait_ready().await?;
            println!("Broker ready at {}", base);
            Ok(())
        }
        Some(Commands::Providers { format }) => print_providers(&config, &format),
    }
}
