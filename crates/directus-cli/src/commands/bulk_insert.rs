//! Bulk insert command implementation.

use anyhow::{Context, Result};
use clap::Args;

use directus::DirectusClient;
use directus::ops::DEFAULT_CHUNK_SIZE;

use crate::input::JsonInput;
use crate::output;

#[derive(Args, Debug)]
pub struct BulkInsertArgs {
    /// Target collection
    pub collection: String,

    /// Items per request
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    #[command(flatten)]
    pub items: JsonInput,
}

pub async fn run(args: BulkInsertArgs, client: &DirectusClient) -> Result<()> {
    let items = args.items.require_array()?;

    client
        .bulk_insert_chunked(&args.collection, &items, args.chunk_size)
        .await
        .with_context(|| format!("Failed to insert into {}", args.collection))?;

    output::success(&format!(
        "Inserted {} items into {}",
        items.len(),
        args.collection
    ));
    Ok(())
}
