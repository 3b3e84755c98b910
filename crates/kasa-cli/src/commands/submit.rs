//! Submit command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use kasa::{FormController, SubmitError};
use kasa_core::{BaseUrl, Id, Resource};

use crate::cli::ResourceKind;
use crate::config::Settings;
use crate::output;

use super::read_json;

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Resource to create or update
    pub resource: ResourceKind,

    /// Draft JSON file, or `-` for stdin
    #[arg(long = "json", value_name = "FILE")]
    pub source: String,

    /// Update this entity instead of creating one
    #[arg(long)]
    pub id: Option<Id>,
}

pub async fn run(args: SubmitArgs, base_url: Option<BaseUrl>) -> Result<()> {
    let settings = Settings::resolve(base_url)?;
    let kind = args.resource;
    with_resource!(kind, submit(args, settings).await)
}

async fn submit<R: Resource>(args: SubmitArgs, settings: Settings) -> Result<()> {
    let draft: R::Draft = read_json(&args.source)?;
    let api = settings.api()?;
    let mut form = FormController::<R>::with_draft(draft, args.id);

    match form.submit(&*api).await {
        Ok(item) => {
            let verb = if args.id.is_some() { "Updated" } else { "Created" };
            output::success(&format!("{} {}", verb, R::PATH));
            output::json_pretty(&item)
        }
        Err(SubmitError::Failed(error)) => {
            Err(error).with_context(|| format!("Failed to submit {}", R::PATH))
        }
        Err(error) => {
            output::field_errors(form.errors());
            match error.section() {
                Some(section) => bail!("{}; first invalid section '{}'", error, section),
                None => bail!("{}", error),
            }
        }
    }
}
