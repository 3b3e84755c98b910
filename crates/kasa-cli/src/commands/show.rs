//! Show command implementation.

use anyhow::{Context, Result};
use clap::Args;

use kasa_core::{BaseUrl, Id, Resource, resource};

use crate::cli::ResourceKind;
use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Resource the entity belongs to
    pub resource: ResourceKind,

    /// Entity id
    pub id: Id,
}

pub async fn run(args: ShowArgs, base_url: Option<BaseUrl>) -> Result<()> {
    let settings = Settings::resolve(base_url)?;
    let kind = args.resource;
    with_resource!(kind, show(args.id, settings).await)
}

async fn show<R: Resource>(id: Id, settings: Settings) -> Result<()> {
    let api = settings.api()?;
    let item = resource::fetch::<R, _>(&*api, id)
        .await
        .with_context(|| format!("Failed to fetch {} {}", R::PATH, id))?;
    output::json_pretty(&item)
}
