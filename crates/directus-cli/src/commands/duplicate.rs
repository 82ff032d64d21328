//! Duplicate command implementation.

use anyhow::{Context, Result};
use clap::Args;

use directus::DirectusClient;

use crate::output;

#[derive(Args, Debug)]
pub struct DuplicateArgs {
    /// Collection to copy
    pub source: String,

    /// Name of the new collection
    pub target: String,

    /// Also recreate the source's relations on the copy
    #[arg(long)]
    pub with_relations: bool,
}

pub async fn run(args: DuplicateArgs, client: &DirectusClient) -> Result<()> {
    output::note(&format!("Duplicating {} into {}...", args.source, args.target));

    client
        .duplicate_collection(&args.source, &args.target)
        .await
        .with_context(|| format!("Failed to duplicate {}", args.source))?;

    if args.with_relations {
        let copied = client
            .copy_relations(&args.source, &args.target)
            .await
            .context("Failed to copy relations")?;
        output::field("Relations", &copied.to_string());
    }

    output::success(&format!("Created {}", args.target));
    Ok(())
}
