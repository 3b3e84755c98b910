//! List command implementation.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;

use kasa::{ListConfig, ListController, RemoteList};
use kasa_core::{BaseUrl, ListQuery, Resource};

use crate::cli::ResourceKind;
use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Resource to list
    pub resource: ResourceKind,

    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,

    /// Status or type filter ("all" for none)
    #[arg(long)]
    pub filter: Option<String>,

    /// Number of pages to fetch
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    /// Items per page (defaults to the configured page size)
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ListArgs, base_url: Option<BaseUrl>) -> Result<()> {
    let settings = Settings::resolve(base_url)?;
    let kind = args.resource;
    with_resource!(kind, list(args, settings).await)
}

async fn list<R: Resource>(args: ListArgs, settings: Settings) -> Result<()> {
    let config = ListConfig {
        per_page: args.per_page.unwrap_or(settings.per_page).max(1),
        ..ListConfig::default()
    };
    let query = ListQuery::new()
        .with_search(args.search.clone().unwrap_or_default())
        .with_filter(args.filter.as_deref());
    let source = RemoteList::<R, _>::new(settings.api()?, config.per_page);
    let controller = ListController::with_query(source, config, query);

    controller.load().await?;
    for _ in 1..args.pages {
        match controller.load_more() {
            Some(handle) => handle.await?,
            None => {
                tracing::debug!("No further pages");
                break;
            }
        }
    }

    let state = controller.state();
    if let Some(error) = &state.error {
        bail!("Failed to list {}: {}", R::PATH, error);
    }

    if state.items.is_empty() {
        eprintln!("{}", "No results found.".dimmed());
        return Ok(());
    }

    for item in &state.items {
        if args.pretty {
            output::json_pretty(item)?;
        } else {
            output::json(item)?;
        }
    }

    if let Some(pagination) = state.pagination {
        eprintln!();
        eprintln!(
            "{}: {} of {} ({} total)",
            "Page".dimmed(),
            pagination.current_page,
            pagination.last_page,
            pagination.total
        );
    }

    Ok(())
}
