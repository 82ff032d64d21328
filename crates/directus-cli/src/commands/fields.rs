//! Fields command implementation.

use anyhow::{Context, Result};
use clap::Args;

use directus::DirectusClient;

use crate::output;

#[derive(Args, Debug)]
pub struct FieldsArgs {
    /// Collection to inspect
    pub collection: String,

    /// Print only the primary key field
    #[arg(long, conflicts_with = "fk")]
    pub pk: bool,

    /// Print only foreign key fields
    #[arg(long)]
    pub fk: bool,
}

pub async fn run(args: FieldsArgs, client: &DirectusClient) -> Result<()> {
    let context = || format!("Failed to read fields of {}", args.collection);

    if args.pk {
        let pk = client.get_pk_field(&args.collection).await.with_context(context)?;
        return output::json_pretty(&pk);
    }

    let fields = if args.fk {
        client.get_all_fk_fields(&args.collection).await
    } else {
        client.get_all_fields(&args.collection).await
    }
    .with_context(context)?;

    output::json_lines(&fields)
}
