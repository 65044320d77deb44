//! CLI subcommand implementations.

pub mod admin;
pub mod index;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Connect to the shop database using the same env vars as the API.
///
/// # Errors
///
/// Returns `CliError::MissingEnvVar` if no database URL is configured, or
/// `CliError::Database` if the connection fails.
pub async fn connect() -> Result<PgPool, CliError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("SHOP_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CliError::MissingEnvVar("SHOP_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = sweet_dessert_api::db::create_pool(&database_url).await?;
    Ok(pool)
}
