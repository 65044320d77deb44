//! Semantic product search.
//!
//! Product documents are built from catalog rows and embedded via the
//! `OpenAI` embeddings API into a pgvector column. Queries embed the user's
//! message and run a cosine nearest-neighbor search; when embeddings are
//! unconfigured or the provider fails, the search degrades to a keyword
//! scan over the same documents so the chat assistant keeps working.

pub mod embeddings;

use std::sync::Arc;

use sqlx::PgPool;
use tracing::{error, info, instrument, warn};

use crate::config::EmbeddingProviderConfig;
use crate::db::search::{IndexStats, SearchHit, SearchRepository};
use crate::db::{CatalogRepository, RepositoryError};
use crate::models::catalog::DessertItem;

pub use embeddings::{EMBEDDING_DIMENSIONS, EMBEDDING_MODEL, EmbeddingClient};

/// Batch size for embedding requests during indexing.
const EMBED_BATCH_SIZE: u32 = 100;

/// Errors from the search component.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// HTTP request to the embeddings provider failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The embeddings provider rejected the request.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// The provider returned an unusable response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Database error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// The semantic search index.
///
/// Cheaply cloneable; holds the pool and the optional embedding client.
#[derive(Clone)]
pub struct SemanticIndex {
    inner: Arc<SemanticIndexInner>,
}

struct SemanticIndexInner {
    pool: PgPool,
    embeddings: Option<EmbeddingClient>,
}

impl SemanticIndex {
    /// Create the index. Without an embeddings config, vector search is
    /// disabled and every query takes the keyword path.
    #[must_use]
    pub fn new(pool: PgPool, config: Option<&EmbeddingProviderConfig>) -> Self {
        Self {
            inner: Arc::new(SemanticIndexInner {
                pool,
                embeddings: config.map(|c| EmbeddingClient::new(&c.api_key)),
            }),
        }
    }

    /// Whether vector search is available.
    #[must_use]
    pub fn has_embeddings(&self) -> bool {
        self.inner.embeddings.is_some()
    }

    /// Search for products relevant to a query.
    ///
    /// Vector search when embeddings are configured, falling back to a
    /// keyword scan when they are not or when the provider errors.
    ///
    /// # Errors
    ///
    /// Returns an error only if the database itself fails.
    #[instrument(skip(self, query), fields(query_len = query.len(), n = n))]
    pub async fn search(&self, query: &str, n: u32) -> Result<Vec<SearchHit>, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let repo = SearchRepository::new(&self.inner.pool);

        if let Some(client) = &self.inner.embeddings {
            match client.embed(query).await {
                Ok(embedding) => {
                    let hits = repo.similar(&embedding, n).await?;
                    if !hits.is_empty() {
                        return Ok(hits);
                    }
                    // Empty index (e.g. before first reindex) - fall through.
                }
                Err(e) => {
                    warn!(error = %e, "Embedding failed, falling back to keyword search");
                }
            }
        }

        Ok(repo.keyword(query, n).await?)
    }

    /// Rebuild documents from the catalog and embed the new ones.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails; embedding failures
    /// leave documents unembedded and are reported but not fatal.
    #[instrument(skip(self))]
    pub async fn reindex(&self) -> Result<IndexStats, SearchError> {
        let catalog = CatalogRepository::new(&self.inner.pool);
        let repo = SearchRepository::new(&self.inner.pool);

        let desserts = catalog
            .list_available(None, u32::MAX)
            .await?;

        for dessert in &desserts {
            repo.upsert_document(
                dessert.id,
                &dessert.name,
                &dessert.category_name,
                dessert.price,
                &build_document(dessert),
            )
            .await?;
        }
        let pruned = repo.prune().await?;
        info!(documents = desserts.len(), pruned, "Product documents refreshed");

        if let Some(client) = &self.inner.embeddings {
            loop {
                let pending = repo.unembedded(EMBED_BATCH_SIZE).await?;
                if pending.is_empty() {
                    break;
                }

                let bodies: Vec<&str> = pending.iter().map(|(_, body)| body.as_str()).collect();
                match client.embed_batch(&bodies).await {
                    Ok(vectors) => {
                        for ((id, _), vector) in pending.iter().zip(vectors.iter()) {
                            repo.set_embedding(*id, vector).await?;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Embedding batch failed, leaving documents unembedded");
                        break;
                    }
                }
            }
        }

        Ok(repo.stats().await?)
    }

    /// Current document/embedding counts.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn stats(&self) -> Result<IndexStats, SearchError> {
        Ok(SearchRepository::new(&self.inner.pool).stats().await?)
    }

    /// Spawn a background task that refreshes the index once.
    ///
    /// Called at startup so the server never blocks on the embeddings
    /// provider; until the task finishes, searches hit whatever documents
    /// already exist.
    pub fn spawn_reindex(&self) {
        let index = self.clone();
        info!("Spawning background index refresh task");
        tokio::spawn(async move {
            match index.reindex().await {
                Ok(stats) => {
                    info!(
                        documents = stats.total_documents,
                        embedded = stats.embedded_documents,
                        "Search index refresh complete"
                    );
                }
                Err(e) => {
                    error!(error = %e, "Search index refresh failed");
                }
            }
        });
    }
}

/// Build the searchable document body for a dessert.
fn build_document(dessert: &DessertItem) -> String {
    let mut body = format!(
        "{}\nCategory: {}\nPrice: Rs. {}\n{}",
        dessert.name, dessert.category_name, dessert.price, dessert.description
    );

    if !dessert.dietary_info.is_empty() {
        body.push_str("\nDietary: ");
        body.push_str(&dessert.dietary_info.join(", "));
    }
    if !dessert.ingredients.is_empty() {
        body.push_str("\nIngredients: ");
        body.push_str(&dessert.ingredients.join(", "));
    }
    if !dessert.allergens.is_empty() {
        body.push_str("\nAllergens: ");
        body.push_str(&dessert.allergens.join(", "));
    }

    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sweet_dessert_core::{CategoryId, DessertItemId, Money};

    fn dessert() -> DessertItem {
        DessertItem {
            id: DessertItemId::new(1),
            name: "Pistachio Kulfi".to_string(),
            slug: "pistachio-kulfi".to_string(),
            description: "Traditional frozen dessert.".to_string(),
            price: Money::from_minor_units(35000),
            category_id: CategoryId::new(2),
            category_name: "Ice Cream".to_string(),
            image: String::new(),
            rating: rust_decimal::Decimal::ZERO,
            reviews_count: 0,
            dietary_info: vec!["vegetarian".to_string()],
            ingredients: vec!["milk".to_string(), "pistachio".to_string()],
            allergens: vec!["nuts".to_string(), "dairy".to_string()],
            preparation_minutes: 10,
            featured: false,
            seasonal: true,
            best_seller: false,
            available: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_document_includes_all_sections() {
        let body = build_document(&dessert());
        assert!(body.contains("Pistachio Kulfi"));
        assert!(body.contains("Category: Ice Cream"));
        assert!(body.contains("Dietary: vegetarian"));
        assert!(body.contains("Ingredients: milk, pistachio"));
        assert!(body.contains("Allergens: nuts, dairy"));
    }

    #[test]
    fn test_build_document_skips_empty_sections() {
        let mut d = dessert();
        d.dietary_info.clear();
        d.ingredients.clear();
        d.allergens.clear();
        let body = build_document(&d);
        assert!(!body.contains("Dietary:"));
        assert!(!body.contains("Ingredients:"));
        assert!(!body.contains("Allergens:"));
    }
}
