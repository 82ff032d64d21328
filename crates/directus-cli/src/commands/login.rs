//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;

use directus::DirectusClient;

use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long, env = "DIRECTUS_EMAIL")]
    pub email: String,

    /// Account password
    #[arg(long, env = "DIRECTUS_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(args: LoginArgs, client: &DirectusClient) -> Result<()> {
    output::note("Logging in...");

    client
        .login(&args.email, &args.password)
        .await
        .context("Failed to login")?;

    // Print success; the session is saved once the command returns
    output::success("Logged in successfully");
    println!();
    output::field("Email", &args.email);
    output::field("URL", client.base_url().as_str());

    Ok(())
}
