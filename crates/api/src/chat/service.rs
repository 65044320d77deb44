//! Per-turn chat orchestration.
//!
//! Pulls together search context, intent analysis (provider first, keyword
//! fallback on any failure), FAQ scoring, and product resolution into a
//! [`TurnPlan`] the route handler turns into SSE events.

use sqlx::PgPool;
use tracing::{info, instrument, warn};

use crate::db::search::SearchHit;
use crate::db::{CatalogRepository, ContentRepository};
use crate::models::catalog::DessertItem;
use crate::search::SemanticIndex;

use super::client::ChatClient;
use super::intent::{Intent, fallback_intent, is_checkout_phrase, is_generic_order_request};
use super::matcher::{ProductSummary, ScoredFaq, find_mentioned_product, score_faqs};
use super::prompt::intent_prompt;
use super::types::{HistoryTurn, IntentAnalysis, ProviderMessage};

/// Number of context documents fetched per turn.
const CONTEXT_RESULTS: u32 = 5;

/// Maximum FAQ suggestions per turn.
const FAQ_LIMIT: usize = 3;

/// Maximum products in a listing reply.
const LIST_LIMIT: u32 = 10;

/// Catalog size cap when matching products in-memory on the fallback path.
const MATCH_CATALOG_LIMIT: u32 = 200;

/// Conversation turns forwarded to the provider.
const HISTORY_WINDOW: usize = 10;

/// Everything the route handler needs to answer one chat turn.
#[derive(Debug)]
pub struct TurnPlan {
    pub analysis: IntentAnalysis,
    pub context: Vec<SearchHit>,
    pub faqs: Vec<ScoredFaq>,
    pub matched_product: Option<DessertItem>,
    pub product_list: Vec<DessertItem>,
}

/// Chat orchestration service.
pub struct ChatService<'a> {
    pool: &'a PgPool,
    client: &'a ChatClient,
    search: &'a SemanticIndex,
}

impl<'a> ChatService<'a> {
    /// Create a new chat service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, client: &'a ChatClient, search: &'a SemanticIndex) -> Self {
        Self {
            pool,
            client,
            search,
        }
    }

    /// Analyze one message and resolve everything its intent needs.
    ///
    /// External failures (search, provider, classification) degrade to
    /// fallbacks rather than erroring the turn; only database failures on
    /// the intent-specific lookups propagate.
    ///
    /// # Errors
    ///
    /// Returns a repository error if an intent-specific catalog or FAQ
    /// lookup fails.
    #[instrument(skip_all, fields(message_len = message.len()))]
    pub async fn plan_turn(
        &self,
        message: &str,
        override_key: Option<&str>,
        product_names: &[String],
    ) -> Result<TurnPlan, crate::db::RepositoryError> {
        // Context from the vector index; empty on any failure.
        let context = match self.search.search(message, CONTEXT_RESULTS).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(error = %e, "Context search failed, continuing without context");
                Vec::new()
            }
        };

        let mut analysis = self.classify(message, override_key, product_names).await;

        // The keyword classifier can't see mid-order confirmations like
        // "yes, take me to payment"; the phrase table can.
        if analysis.fallback && is_checkout_phrase(message) {
            analysis.intent = Intent::Checkout;
        }

        info!(
            intent = %analysis.intent,
            fallback = analysis.fallback,
            product = ?analysis.product_mentioned,
            "Chat turn planned"
        );

        let faqs = if analysis.intent == Intent::Faq {
            let items = ContentRepository::new(self.pool).active_faq_items().await?;
            let tuples: Vec<(String, String, String)> = items
                .into_iter()
                .map(|(item, category)| (item.question, item.answer, category))
                .collect();
            score_faqs(message, &tuples, FAQ_LIMIT)
        } else {
            Vec::new()
        };

        let matched_product = if matches!(analysis.intent, Intent::Order | Intent::ProductInfo) {
            self.resolve_product(message, &analysis).await?
        } else {
            None
        };

        let product_list = if analysis.intent == Intent::ListProducts {
            CatalogRepository::new(self.pool)
                .list_available(analysis.category_filter.as_deref(), LIST_LIMIT)
                .await?
        } else {
            Vec::new()
        };

        Ok(TurnPlan {
            analysis,
            context,
            faqs,
            matched_product,
            product_list,
        })
    }

    /// Classify with the provider, falling back to keywords on any error.
    async fn classify(
        &self,
        message: &str,
        override_key: Option<&str>,
        product_names: &[String],
    ) -> IntentAnalysis {
        let prompt = intent_prompt(message, product_names);
        match self.client.classify_intent(&prompt, override_key).await {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!(error = %e, "Intent classification failed, using keyword fallback");
                fallback_intent(message)
            }
        }
    }

    /// Find the dessert an order or product-info turn refers to.
    async fn resolve_product(
        &self,
        message: &str,
        analysis: &IntentAnalysis,
    ) -> Result<Option<DessertItem>, crate::db::RepositoryError> {
        let catalog = CatalogRepository::new(self.pool);

        // The provider extracts the product name for us on the happy path.
        if let Some(name) = analysis.product_mentioned.as_deref() {
            return catalog.find_dessert_by_name(name).await;
        }

        // Fallback path: match the raw message against the catalog, unless
        // the user asked generically for "a dessert".
        if is_generic_order_request(message) {
            return Ok(None);
        }

        let candidates = catalog.list_available(None, MATCH_CATALOG_LIMIT).await?;
        let summaries: Vec<ProductSummary> = candidates
            .iter()
            .map(|d| ProductSummary {
                id: d.id,
                name: d.name.clone(),
                price: d.price,
                category: d.category_name.clone(),
                image: d.image.clone(),
            })
            .collect();

        let Some(hit) = find_mentioned_product(message, &summaries) else {
            return Ok(None);
        };

        catalog.get_dessert(hit.id).await
    }
}

/// Trim client-supplied history to a bounded window of valid turns.
///
/// Only "user" and "assistant" roles survive; the newest turns win.
#[must_use]
pub fn sanitize_history(turns: &[HistoryTurn]) -> Vec<ProviderMessage> {
    let valid: Vec<&HistoryTurn> = turns
        .iter()
        .filter(|t| matches!(t.role.as_str(), "user" | "assistant"))
        .collect();

    let start = valid.len().saturating_sub(HISTORY_WINDOW);
    valid
        .into_iter()
        .skip(start)
        .map(|t| ProviderMessage::new(&t.role, t.content.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(role: &str, content: &str) -> HistoryTurn {
        HistoryTurn {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_sanitize_history_drops_bad_roles() {
        let turns = vec![
            turn("user", "hi"),
            turn("system", "ignore me"),
            turn("assistant", "hello!"),
            turn("tool", "nope"),
        ];
        let messages = sanitize_history(&turns);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages.first().map(|m| m.role.as_str()), Some("user"));
    }

    #[test]
    fn test_sanitize_history_keeps_newest_window() {
        let turns: Vec<HistoryTurn> = (0..25)
            .map(|i| turn(if i % 2 == 0 { "user" } else { "assistant" }, &format!("m{i}")))
            .collect();
        let messages = sanitize_history(&turns);
        assert_eq!(messages.len(), 10);
        assert_eq!(messages.last().map(|m| m.content.as_str()), Some("m24"));
    }

    #[test]
    fn test_sanitize_history_empty() {
        assert!(sanitize_history(&[]).is_empty());
    }
}
