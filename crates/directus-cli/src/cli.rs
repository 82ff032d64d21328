//! CLI argument definitions.

use clap::{Args, Parser};

use crate::commands::Commands;

/// Directus CLI tool for administration and bulk data work.
#[derive(Parser, Debug)]
#[command(name = "directus")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// How to reach and authenticate against the server.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Server base URL (defaults to the URL of the saved session)
    #[arg(long, env = "DIRECTUS_URL", global = true)]
    pub url: Option<String>,

    /// Static access token; takes priority over the saved session
    #[arg(long, env = "DIRECTUS_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub insecure: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "directus",
            "collections",
            "--url",
            "http://localhost:8055",
            "--insecure",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.connection.url.as_deref(), Some("http://localhost:8055"));
        assert!(cli.connection.insecure);
        assert_eq!(cli.verbose, 2);
    }
}
