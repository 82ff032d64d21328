//! Delete command implementation.

use anyhow::{Context, Result};
use clap::Args;

use directus::{DirectusClient, RequestOptions};

use crate::input::JsonInput;
use crate::output;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// API path, e.g. /items/articles/1
    pub path: String,

    #[command(flatten)]
    pub body: JsonInput,
}

pub async fn run(args: DeleteArgs, client: &DirectusClient) -> Result<()> {
    let mut opts = RequestOptions::new();
    if let Some(body) = args.body.read()? {
        opts = opts.json(body);
    }

    client
        .remove(&args.path, &opts)
        .await
        .with_context(|| format!("Failed to delete {}", args.path))?;

    output::success(&format!("Deleted {}", args.path));
    Ok(())
}
