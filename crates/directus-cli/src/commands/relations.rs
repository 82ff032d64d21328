//! Relations command implementation.

use anyhow::{Context, Result};
use clap::Args;

use directus::DirectusClient;

use crate::output;

#[derive(Args, Debug)]
pub struct RelationsArgs {
    /// Collection to inspect
    pub collection: String,
}

pub async fn run(args: RelationsArgs, client: &DirectusClient) -> Result<()> {
    let relations = client
        .get_relations(&args.collection)
        .await
        .with_context(|| format!("Failed to read relations of {}", args.collection))?;

    output::json_lines(&relations)
}
