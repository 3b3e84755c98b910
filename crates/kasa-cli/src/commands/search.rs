//! Search command implementation.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;

use kasa::{OptionCatalog, RemoteOptions, SelectConfig, SelectController, SelectStatus};
use kasa_core::{BaseUrl, OptionValue};

use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Catalog to search (contacts, tax-offices, cities, products, warehouses, vehicles)
    pub catalog: OptionCatalog,

    /// Search text; empty lists the unfiltered catalog
    #[arg(default_value = "")]
    pub query: String,

    /// Resolve the label of a stored value instead of searching
    #[arg(long, conflicts_with = "query")]
    pub value: Option<String>,

    /// Maximum number of options
    #[arg(long)]
    pub limit: Option<u32>,
}

pub async fn run(args: SearchArgs, base_url: Option<BaseUrl>) -> Result<()> {
    let settings = Settings::resolve(base_url)?;
    let mut source = RemoteOptions::new(settings.api()?, args.catalog);
    if let Some(limit) = args.limit {
        source = source.with_limit(limit);
    }
    let select = SelectController::new(source, SelectConfig::default());

    if let Some(raw) = &args.value {
        let value = match raw.parse::<i64>() {
            Ok(id) => OptionValue::Int(id),
            Err(_) => OptionValue::Str(raw.clone()),
        };
        if let Some(handle) = select.set_value(Some(value)) {
            handle.await?;
        }

        let state = select.state();
        if state.status == SelectStatus::Failed {
            output::error("Lookup failed; showing the raw value");
        }
        if let Some(selected) = &state.selected {
            output::json(selected)?;
        }
        return Ok(());
    }

    select.search_now(args.query.as_str()).await?;

    let state = select.state();
    match state.status {
        SelectStatus::Failed => bail!("Search in {} failed", args.catalog),
        SelectStatus::Empty => eprintln!("{}", "No matches.".dimmed()),
        _ => {
            for option in &state.options {
                output::json(option)?;
            }
        }
    }

    Ok(())
}
