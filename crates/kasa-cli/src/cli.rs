//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use kasa_core::BaseUrl;

use crate::commands::config::ConfigCommand;
use crate::commands::{delete, list, search, show, submit, validate};

/// Command-line client for the kasa business-management API.
#[derive(Parser, Debug)]
#[command(name = "kasa")]
#[command(author, version = env!("KASA_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// API base URL; overrides KASA_BASE_URL and the config file
    #[arg(long, global = true)]
    pub base_url: Option<BaseUrl>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List a resource page by page
    List(list::ListArgs),

    /// Show one entity
    Show(show::ShowArgs),

    /// Delete one entity
    Delete(delete::DeleteArgs),

    /// Search a select catalog
    Search(search::SearchArgs),

    /// Check a draft against the local rules without sending it
    Validate(validate::ValidateArgs),

    /// Create or update an entity from a draft
    Submit(submit::SubmitArgs),

    /// Show or change the stored configuration
    Config(ConfigCommand),
}

/// Resources the CLI can address.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Checks,
    Contacts,
    Vehicles,
    StockMovements,
}
