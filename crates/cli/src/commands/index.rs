//! Semantic search index maintenance.
//!
//! # Usage
//!
//! ```bash
//! sweet-dessert-cli index
//! ```
//!
//! # Environment Variables
//!
//! - `SHOP_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)
//! - `OPENAI_API_KEY` - embeddings key; without it documents are refreshed
//!   but left unembedded (keyword search still works)

use secrecy::SecretString;

use sweet_dessert_api::config::EmbeddingProviderConfig;
use sweet_dessert_api::search::SemanticIndex;

/// Rebuild the product search index.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a write fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    let embeddings = std::env::var("OPENAI_API_KEY")
        .ok()
        .map(|key| EmbeddingProviderConfig {
            api_key: SecretString::from(key),
        });
    if embeddings.is_none() {
        tracing::warn!("OPENAI_API_KEY not set; documents will be refreshed without embeddings");
    }

    let index = SemanticIndex::new(pool, embeddings.as_ref());
    let stats = index.reindex().await?;

    tracing::info!(
        "Index rebuilt: {} documents, {} embedded",
        stats.total_documents,
        stats.embedded_documents
    );
    Ok(())
}
