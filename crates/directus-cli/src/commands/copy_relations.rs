//! Copy-relations command implementation.

use anyhow::{Context, Result};
use clap::Args;

use directus::DirectusClient;

use crate::output;

#[derive(Args, Debug)]
pub struct CopyRelationsArgs {
    /// Collection whose relations are copied
    pub source: String,

    /// Collection that receives them
    pub target: String,
}

pub async fn run(args: CopyRelationsArgs, client: &DirectusClient) -> Result<()> {
    let copied = client
        .copy_relations(&args.source, &args.target)
        .await
        .with_context(|| format!("Failed to copy relations of {}", args.source))?;

    output::success(&format!("Copied {copied} relations to {}", args.target));
    Ok(())
}
