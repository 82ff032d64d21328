//! Patch command implementation.

use anyhow::{Context, Result};
use clap::Args;

use directus::{DirectusClient, RequestOptions};

use crate::input::JsonInput;
use crate::output;

#[derive(Args, Debug)]
pub struct PatchArgs {
    /// API path, e.g. /items/articles/1
    pub path: String,

    #[command(flatten)]
    pub body: JsonInput,
}

pub async fn run(args: PatchArgs, client: &DirectusClient) -> Result<()> {
    let body = args.body.require()?;

    let response = client
        .modify(&args.path, &RequestOptions::new().json(body))
        .await
        .with_context(|| format!("Failed to update {}", args.path))?;

    if response.is_null() {
        output::success("Updated");
    } else {
        output::json_pretty(&response)?;
    }
    Ok(())
}
