//! Integration tests for the Sweet Dessert backend.
//!
//! # Test Categories
//!
//! - `chat_intent` - intent classification fallback tables
//! - `product_matching` - product mention matching and FAQ scoring
//! - `order_pipeline` - pricing arithmetic and order numbering
//! - `api_smoke` - HTTP checks against a running server (opt-in)
//!
//! # Running Tests
//!
//! ```bash
//! # Pure-logic tests (no server needed)
//! cargo test -p sweet-dessert-integration-tests
//!
//! # Include the HTTP smoke tests against a running API
//! SHOP_API_BASE_URL=http://localhost:8000 cargo test -p sweet-dessert-integration-tests
//! ```

/// A client for HTTP tests against a running API instance.
///
/// Built from `SHOP_API_BASE_URL`; tests that need it skip themselves when
/// the variable is unset so the suite passes without a server.
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: String,
}

impl TestContext {
    /// Build a context from the environment, or `None` when no server is
    /// configured.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("SHOP_API_BASE_URL").ok()?;
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .ok()?;

        Some(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET a path relative to the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(&self, path: &str) -> Result<reqwest::Response, reqwest::Error> {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
    }
}
