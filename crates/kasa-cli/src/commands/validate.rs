//! Validate command implementation.

use anyhow::{Result, bail};
use clap::Args;

use kasa_core::drafts::validate;
use kasa_core::{FormDraft, Resource};

use crate::cli::ResourceKind;
use crate::output;

use super::read_json;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Resource the draft is for
    pub resource: ResourceKind,

    /// Draft JSON file, or `-` for stdin
    #[arg(long = "json", value_name = "FILE")]
    pub source: String,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let kind = args.resource;
    with_resource!(kind, check(&args.source))
}

fn check<R: Resource>(source: &str) -> Result<()> {
    let draft: R::Draft = read_json(source)?;
    let errors = validate(&draft);

    if errors.is_empty() {
        output::success("Draft is valid");
        return Ok(());
    }

    output::field_errors(&errors);
    match R::Draft::first_invalid_section(&errors) {
        Some(section) => bail!("{} invalid field(s), first in section '{}'", errors.len(), section),
        None => bail!("{} invalid field(s)", errors.len()),
    }
}
