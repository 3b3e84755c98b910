//! Config subcommand implementations.

use anyhow::Result;
use clap::{Args, Subcommand};

use kasa_core::BaseUrl;

use crate::config::storage;
use crate::output;

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Store settings; omitted keys keep their value
    Set(SetArgs),

    /// Print the stored settings
    Show,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// API base URL
    #[arg(long, value_name = "URL")]
    pub url: Option<BaseUrl>,

    /// Bearer token
    #[arg(long)]
    pub token: Option<String>,

    /// Remove the stored token
    #[arg(long, conflicts_with = "token")]
    pub clear_token: bool,

    /// Default page size for list commands
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=200))]
    pub per_page: Option<u32>,
}

pub fn handle(cmd: ConfigCommand) -> Result<()> {
    match cmd.command {
        ConfigSubcommand::Set(args) => set(args),
        ConfigSubcommand::Show => show(),
    }
}

fn set(args: SetArgs) -> Result<()> {
    let mut config = storage::load()?;

    if let Some(url) = args.url {
        config.base_url = Some(url);
    }
    if let Some(token) = args.token {
        config.token = Some(token);
    }
    if args.clear_token {
        config.token = None;
    }
    if let Some(per_page) = args.per_page {
        config.per_page = Some(per_page);
    }

    let path = storage::save(&config)?;
    output::success(&format!("Saved {}", path.display()));
    Ok(())
}

fn show() -> Result<()> {
    let config = storage::load()?;

    let unset = "(not set)".to_string();
    output::field("Config", &storage::config_path()?.display().to_string());
    output::field(
        "Base URL",
        &config.base_url.as_ref().map_or(unset.clone(), |u| u.to_string()),
    );
    output::field(
        "Token",
        if config.token.is_some() { "[REDACTED]" } else { unset.as_str() },
    );
    output::field(
        "Per page",
        &config.per_page.map_or(unset.clone(), |n| n.to_string()),
    );
    Ok(())
}
