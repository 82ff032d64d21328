//! Get command implementation.

use anyhow::{Context, Result};
use clap::Args;

use directus::{DirectusClient, Payload, ResponseFormat};

use crate::input;
use crate::output;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// API path, e.g. /items/articles
    pub path: String,

    /// Query parameter as key=value (repeatable)
    #[arg(short, long = "query", value_name = "KEY=VALUE")]
    pub query: Vec<String>,

    /// Print the raw response body instead of the data payload
    #[arg(long)]
    pub raw: bool,
}

pub async fn run(args: GetArgs, client: &DirectusClient) -> Result<()> {
    let opts = input::query_options(&args.query)?;
    let format = if args.raw {
        ResponseFormat::Text
    } else {
        ResponseFormat::Json
    };

    let payload = client
        .fetch_as(&args.path, format, &opts)
        .await
        .with_context(|| format!("Failed to fetch {}", args.path))?;

    match payload {
        Payload::Json(value) => output::json_pretty(&value)?,
        Payload::Text(text) => print!("{text}"),
    }

    Ok(())
}
