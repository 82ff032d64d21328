//! Create command implementation.

use anyhow::{Context, Result};
use clap::Args;

use directus::{DirectusClient, RequestOptions};

use crate::input::JsonInput;
use crate::output;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// API path, e.g. /items/articles
    pub path: String,

    #[command(flatten)]
    pub body: JsonInput,
}

pub async fn run(args: CreateArgs, client: &DirectusClient) -> Result<()> {
    let body = args.body.require()?;

    let response = client
        .create(&args.path, &RequestOptions::new().json(body))
        .await
        .with_context(|| format!("Failed to create at {}", args.path))?;

    output::json_pretty(&response)?;
    Ok(())
}
