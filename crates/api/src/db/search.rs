//! Product document storage for semantic search.
//!
//! Embeddings live in a pgvector column. `SQLx` has no native vector type,
//! so embeddings are bound as formatted strings and cast with `::vector`
//! inside the queries.

use sqlx::PgPool;

use sweet_dessert_core::{DessertItemId, Money};

use super::RepositoryError;

/// A search document with its similarity distance (when from a vector query).
#[derive(Debug, Clone, serde::Serialize)]
pub struct SearchHit {
    pub product_name: String,
    pub category: String,
    pub price: Money,
    pub body: String,
    /// Cosine distance; 0.0 for keyword-fallback hits.
    pub distance: f64,
}

#[derive(Debug, sqlx::FromRow)]
struct HitRow {
    product_name: String,
    category: String,
    price: Money,
    body: String,
    distance: Option<f64>,
}

impl From<HitRow> for SearchHit {
    fn from(row: HitRow) -> Self {
        Self {
            product_name: row.product_name,
            category: row.category,
            price: row.price,
            body: row.body,
            distance: row.distance.unwrap_or(0.0),
        }
    }
}

/// Counts for the chat stats endpoint.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct IndexStats {
    pub total_documents: i64,
    pub embedded_documents: i64,
}

/// Repository for product search documents.
pub struct SearchRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SearchRepository<'a> {
    /// Create a new search repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Upsert the document for a dessert, clearing any stale embedding.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert_document(
        &self,
        dessert_item_id: DessertItemId,
        product_name: &str,
        category: &str,
        price: Money,
        body: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO product_document (dessert_item_id, product_name, category, price, body)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (dessert_item_id) DO UPDATE
            SET product_name = EXCLUDED.product_name,
                category = EXCLUDED.category,
                price = EXCLUDED.price,
                body = EXCLUDED.body,
                embedding = NULL,
                updated_at = NOW()
            ",
        )
        .bind(dessert_item_id.as_i32())
        .bind(product_name)
        .bind(category)
        .bind(price)
        .bind(body)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Remove documents whose dessert no longer exists or is unavailable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn prune(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM product_document p
            WHERE NOT EXISTS (
                SELECT 1 FROM dessert_item d
                WHERE d.id = p.dessert_item_id AND d.available
            )
            ",
        )
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Documents that still need an embedding, as `(id, body)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn unembedded(&self, limit: u32) -> Result<Vec<(i32, String)>, RepositoryError> {
        let rows = sqlx::query_as::<_, (i32, String)>(
            r"
            SELECT id, body FROM product_document
            WHERE embedding IS NULL
            ORDER BY id
            LIMIT $1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Store an embedding for a document.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_embedding(&self, id: i32, embedding: &[f32]) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE product_document SET embedding = $2::vector WHERE id = $1")
            .bind(id)
            .bind(format_embedding(embedding))
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Nearest-neighbor search over embedded documents using cosine distance.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn similar(
        &self,
        embedding: &[f32],
        limit: u32,
    ) -> Result<Vec<SearchHit>, RepositoryError> {
        let rows = sqlx::query_as::<_, HitRow>(
            r"
            SELECT product_name, category, price, body,
                   (embedding <=> $1::vector)::FLOAT8 AS distance
            FROM product_document
            WHERE embedding IS NOT NULL
            ORDER BY embedding <=> $1::vector
            LIMIT $2
            ",
        )
        .bind(format_embedding(embedding))
        .bind(i64::from(limit))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Case-insensitive keyword scan, used when embeddings are unavailable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn keyword(&self, query: &str, limit: u32) -> Result<Vec<SearchHit>, RepositoryError> {
        let pattern = format!("%{query}%");
        let rows = sqlx::query_as::<_, HitRow>(
            r"
            SELECT product_name, category, price, body, NULL::FLOAT8 AS distance
            FROM product_document
            WHERE product_name ILIKE $1 OR category ILIKE $1 OR body ILIKE $1
            ORDER BY product_name
            LIMIT $2
            ",
        )
        .bind(&pattern)
        .bind(i64::from(limit))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Document counts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn stats(&self) -> Result<IndexStats, RepositoryError> {
        let row = sqlx::query_as::<_, (i64, i64)>(
            r"
            SELECT COUNT(*), COUNT(embedding)
            FROM product_document
            ",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(IndexStats {
            total_documents: row.0,
            embedded_documents: row.1,
        })
    }
}

/// Format an embedding vector for pgvector.
fn format_embedding(embedding: &[f32]) -> String {
    let values: Vec<String> = embedding.iter().map(ToString::to_string).collect();
    format!("[{}]", values.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_embedding() {
        let embedding = vec![0.1, 0.2, 0.3];
        assert_eq!(format_embedding(&embedding), "[0.1,0.2,0.3]");
    }

    #[test]
    fn test_format_embedding_empty() {
        let embedding: Vec<f32> = vec![];
        assert_eq!(format_embedding(&embedding), "[]");
    }
}
