//! Delete command implementation.

use anyhow::{Context, Result};
use clap::Args;

use kasa_core::{BaseUrl, Id, Resource, resource};

use crate::cli::ResourceKind;
use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Resource the entity belongs to
    pub resource: ResourceKind,

    /// Entity id
    pub id: Id,
}

pub async fn run(args: DeleteArgs, base_url: Option<BaseUrl>) -> Result<()> {
    let settings = Settings::resolve(base_url)?;
    let kind = args.resource;
    with_resource!(kind, delete(args.id, settings).await)
}

async fn delete<R: Resource>(id: Id, settings: Settings) -> Result<()> {
    let api = settings.api()?;
    resource::delete::<R, _>(&*api, id)
        .await
        .with_context(|| format!("Failed to delete {} {}", R::PATH, id))?;
    output::success(&format!("Deleted {} {}", R::PATH, id));
    Ok(())
}
