//! kasa - command-line client for the kasa business-management API.
//!
//! A thin wrapper over the `kasa` controllers, useful for scripting and for
//! poking at a server without the mobile app.

mod cli;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let base_url = cli.base_url;
    match cli.command {
        Commands::List(args) => commands::list::run(args, base_url).await,
        Commands::Show(args) => commands::show::run(args, base_url).await,
        Commands::Delete(args) => commands::delete::run(args, base_url).await,
        Commands::Search(args) => commands::search::run(args, base_url).await,
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Submit(args) => commands::submit::run(args, base_url).await,
        Commands::Config(cmd) => commands::config::handle(cmd),
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
