//! Collections command implementation.

use anyhow::{Context, Result};
use clap::Args;

use directus::DirectusClient;

use crate::output;

#[derive(Args, Debug)]
pub struct CollectionsArgs {
    /// Include system collections and print full descriptors
    #[arg(long)]
    pub all: bool,

    /// Only report whether this collection exists (exit code 1 if not)
    #[arg(long, value_name = "NAME", conflicts_with = "all")]
    pub exists: Option<String>,
}

pub async fn run(args: CollectionsArgs, client: &DirectusClient) -> Result<()> {
    if let Some(name) = &args.exists {
        let found = client
            .collection_exists(name)
            .await
            .context("Failed to list collections")?;
        if !found {
            anyhow::bail!("Collection {name} does not exist");
        }
        output::success(&format!("Collection {name} exists"));
        return Ok(());
    }

    if args.all {
        let collections = client
            .list_collections()
            .await
            .context("Failed to list collections")?;
        return output::json_lines(&collections);
    }

    let names = client
        .get_all_user_created_collection_names()
        .await
        .context("Failed to list collections")?;
    for name in names {
        println!("{name}");
    }
    Ok(())
}
