//! Database operations for the shop's `PostgreSQL` database.
//!
//! # Tables
//!
//! - `shop_user` - customer and staff accounts
//! - `sessions` - tower-sessions storage
//! - `category` / `dessert_item` - the catalog
//! - `customer_testimonial` / `chef_recommendation` - social proof content
//! - `customer_order` / `order_item` - orders
//! - `contact_submission` - contact form
//! - `about_us_page`, `our_story_page`, `faq_page` (+ children) - CMS
//! - `product_document` - semantic search documents (pgvector)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p sweet-dessert-cli -- migrate
//! ```
//!
//! All queries here use runtime binding (`sqlx::query_as` with `FromRow`
//! row structs) so the crate builds without a live database; row structs are
//! converted into domain models, surfacing bad rows as `DataCorruption`
//! instead of panics.

pub mod catalog;
pub mod contact;
pub mod content;
pub mod orders;
pub mod search;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use catalog::CatalogRepository;
pub use contact::ContactRepository;
pub use content::ContentRepository;
pub use orders::OrderRepository;
pub use search::SearchRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique slug or email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a sqlx error, converting unique violations into `Conflict`.
    #[must_use]
    pub fn from_sqlx(err: sqlx::Error, conflict_msg: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::Conflict(conflict_msg.to_string());
            }
        }
        Self::Database(err)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
