//! Subcommand implementations.

mod bulk_insert;
mod collections;
mod copy_relations;
mod create;
mod delete;
mod delete_all;
mod duplicate;
mod fields;
mod get;
mod login;
mod logout;
mod patch;
mod refresh_token;
mod relations;
mod whoami;

use anyhow::Result;
use clap::Subcommand;
use directus::DirectusClient;
use directus::error::ApiError;

use crate::cli::ConnectionArgs;
use crate::session;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in with email and password and save the session
    Login(login::LoginArgs),

    /// Invalidate the saved session
    Logout(logout::LogoutArgs),

    /// Exchange the saved refresh token for a new pair
    RefreshToken(refresh_token::RefreshTokenArgs),

    /// Display the current user
    Whoami(whoami::WhoamiArgs),

    /// GET a path and print the payload
    Get(get::GetArgs),

    /// POST a JSON body to a path
    Create(create::CreateArgs),

    /// PATCH a path with a JSON body
    Patch(patch::PatchArgs),

    /// DELETE a path
    Delete(delete::DeleteArgs),

    /// Insert a JSON array of items into a collection in chunks
    BulkInsert(bulk_insert::BulkInsertArgs),

    /// Delete every item in a collection
    DeleteAll(delete_all::DeleteAllArgs),

    /// Copy a collection's schema, fields and items into a new collection
    Duplicate(duplicate::DuplicateArgs),

    /// List collections
    Collections(collections::CollectionsArgs),

    /// List the fields of a collection
    Fields(fields::FieldsArgs),

    /// List the relations of a collection
    Relations(relations::RelationsArgs),

    /// Recreate a collection's relations on another collection
    CopyRelations(copy_relations::CopyRelationsArgs),
}

pub async fn handle(cmd: Commands, conn: &ConnectionArgs) -> Result<()> {
    let client = session::connect(conn).await?;
    let result = dispatch(cmd, &client).await;

    // The refresh token may have rotated even if the command failed.
    if let Err(e) = session::persist(&client).await {
        if result.is_ok() {
            return Err(e);
        }
        tracing::warn!(error = %e, "Failed to save session");
    }
    result.map_err(with_auth_hint)
}

/// Point at the fix when the server refused the credentials.
fn with_auth_hint(err: anyhow::Error) -> anyhow::Error {
    let rejected = err.chain().any(|cause| {
        cause
            .downcast_ref::<directus::Error>()
            .and_then(directus::Error::as_api)
            .is_some_and(ApiError::is_auth_error)
    });
    if rejected {
        err.context("Not authorized. Run 'directus login' or pass --token.")
    } else {
        err
    }
}

async fn dispatch(cmd: Commands, client: &DirectusClient) -> Result<()> {
    match cmd {
        Commands::Login(args) => login::run(args, client).await,
        Commands::Logout(args) => logout::run(args, client).await,
        Commands::RefreshToken(args) => refresh_token::run(args, client).await,
        Commands::Whoami(args) => whoami::run(args, client).await,
        Commands::Get(args) => get::run(args, client).await,
        Commands::Create(args) => create::run(args, client).await,
        Commands::Patch(args) => patch::run(args, client).await,
        Commands::Delete(args) => delete::run(args, client).await,
        Commands::BulkInsert(args) => bulk_insert::run(args, client).await,
        Commands::DeleteAll(args) => delete_all::run(args, client).await,
        Commands::Duplicate(args) => duplicate::run(args, client).await,
        Commands::Collections(args) => collections::run(args, client).await,
        Commands::Fields(args) => fields::run(args, client).await,
        Commands::Relations(args) => relations::run(args, client).await,
        Commands::CopyRelations(args) => copy_relations::run(args, client).await,
    }
}
