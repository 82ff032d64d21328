//! Delete-all command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use directus::{DirectusClient, Error};

use crate::output;

#[derive(Args, Debug)]
pub struct DeleteAllArgs {
    /// Collection to empty
    pub collection: String,

    /// Confirm the deletion
    #[arg(long)]
    pub yes: bool,
}

pub async fn run(args: DeleteAllArgs, client: &DirectusClient) -> Result<()> {
    if !args.yes {
        bail!(
            "Refusing to delete every item in {} without --yes",
            args.collection
        );
    }

    match client.delete_all_items(&args.collection).await {
        Ok(count) => {
            output::success(&format!("Deleted {count} items from {}", args.collection));
            Ok(())
        }
        Err(Error::EmptyCollection { .. }) => {
            output::note(&format!("{} is already empty", args.collection));
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to empty {}", args.collection)),
    }
}
