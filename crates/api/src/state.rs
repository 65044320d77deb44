//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use crate::chat::ChatClient;
use crate::config::ApiConfig;
use crate::db::{CatalogRepository, ContentRepository, RepositoryError};
use crate::models::content::{AboutUsPage, FaqPage, OurStoryPage};
use crate::search::SemanticIndex;
use crate::services::StripeClient;

/// TTL for the cached product-name list fed to intent classification.
const PRODUCT_NAMES_TTL_SECS: u64 = 60;

/// Cap on product names fetched for classification context.
const PRODUCT_NAMES_LIMIT: u32 = 50;

/// TTL for cached CMS pages; admin saves invalidate eagerly, the TTL only
/// bounds staleness across multiple server instances.
const CMS_PAGE_TTL_SECS: u64 = 60;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and external clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: PgPool,
    stripe: StripeClient,
    chat: ChatClient,
    search: SemanticIndex,
    /// Single-key cache for the available-product name list.
    product_names: Cache<(), Arc<Vec<String>>>,
    /// Single-key caches for the active CMS pages.
    cms_about: Cache<(), Arc<Option<AboutUsPage>>>,
    cms_story: Cache<(), Arc<Option<OurStoryPage>>>,
    cms_faq: Cache<(), Arc<Option<FaqPage>>>,
}

fn single_entry_cache<V: Clone + Send + Sync + 'static>(ttl_secs: u64) -> Cache<(), V> {
    Cache::builder()
        .max_capacity(1)
        .time_to_live(Duration::from_secs(ttl_secs))
        .build()
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ApiConfig, pool: PgPool) -> Self {
        let stripe = StripeClient::new(&config.stripe);
        let chat = ChatClient::new(config.chat.as_ref(), &config.base_url);
        let search = SemanticIndex::new(pool.clone(), config.embeddings.as_ref());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                stripe,
                chat,
                search,
                product_names: single_entry_cache(PRODUCT_NAMES_TTL_SECS),
                cms_about: single_entry_cache(CMS_PAGE_TTL_SECS),
                cms_story: single_entry_cache(CMS_PAGE_TTL_SECS),
                cms_faq: single_entry_cache(CMS_PAGE_TTL_SECS),
            }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the Stripe client.
    #[must_use]
    pub fn stripe(&self) -> &StripeClient {
        &self.inner.stripe
    }

    /// Get a reference to the chat provider client.
    #[must_use]
    pub fn chat(&self) -> &ChatClient {
        &self.inner.chat
    }

    /// Get a reference to the semantic search index.
    #[must_use]
    pub fn search(&self) -> &SemanticIndex {
        &self.inner.search
    }

    /// Start the background search-index refresh.
    pub fn start_search_indexing(&self) {
        self.inner.search.spawn_reindex();
    }

    /// The active About Us page, cached briefly.
    ///
    /// # Errors
    ///
    /// Returns a repository error on a cache miss that hits the database.
    pub async fn about_page(&self) -> Result<Arc<Option<AboutUsPage>>, RepositoryError> {
        if let Some(cached) = self.inner.cms_about.get(&()).await {
            return Ok(cached);
        }
        let page = Arc::new(ContentRepository::new(&self.inner.pool).about_page().await?);
        self.inner.cms_about.insert((), page.clone()).await;
        Ok(page)
    }

    /// The active Our Story page, cached briefly.
    ///
    /// # Errors
    ///
    /// Returns a repository error on a cache miss that hits the database.
    pub async fn story_page(&self) -> Result<Arc<Option<OurStoryPage>>, RepositoryError> {
        if let Some(cached) = self.inner.cms_story.get(&()).await {
            return Ok(cached);
        }
        let page = Arc::new(ContentRepository::new(&self.inner.pool).story_page().await?);
        self.inner.cms_story.insert((), page.clone()).await;
        Ok(page)
    }

    /// The FAQ page, cached briefly.
    ///
    /// # Errors
    ///
    /// Returns a repository error on a cache miss that hits the database.
    pub async fn faq_page(&self) -> Result<Arc<Option<FaqPage>>, RepositoryError> {
        if let Some(cached) = self.inner.cms_faq.get(&()).await {
            return Ok(cached);
        }
        let page = Arc::new(ContentRepository::new(&self.inner.pool).faq_page().await?);
        self.inner.cms_faq.insert((), page.clone()).await;
        Ok(page)
    }

    /// Drop the cached CMS pages after an admin edit.
    pub async fn invalidate_cms_cache(&self) {
        self.inner.cms_about.invalidate(&()).await;
        self.inner.cms_story.invalidate(&()).await;
        self.inner.cms_faq.invalidate(&()).await;
    }

    /// Available product names for intent-classification context, cached
    /// briefly so every chat turn doesn't hit the catalog.
    pub async fn product_names(&self) -> Arc<Vec<String>> {
        let pool = self.inner.pool.clone();
        self.inner
            .product_names
            .get_with((), async move {
                match CatalogRepository::new(&pool)
                    .available_product_names(PRODUCT_NAMES_LIMIT)
                    .await
                {
                    Ok(names) => Arc::new(names),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to load product names for chat context");
                        Arc::new(Vec::new())
                    }
                }
            })
            .await
    }
}
