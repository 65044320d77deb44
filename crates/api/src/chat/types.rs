//! Wire types for the OpenAI-compatible chat API and the SSE event protocol.

use serde::{Deserialize, Serialize};

use sweet_dessert_core::{DessertItemId, Money};

use super::intent::Intent;
use super::matcher::ScoredFaq;
use crate::models::catalog::DessertItem;
use crate::models::orders::CartItem;

// =============================================================================
// Provider request/response types
// =============================================================================

/// A message in the provider conversation.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderMessage {
    /// "system", "user", or "assistant".
    pub role: String,
    /// Plain text content.
    pub content: String,
}

impl ProviderMessage {
    /// Build a message with the given role.
    #[must_use]
    pub fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

/// Request body for the chat-completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ProviderMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// Structured-output constraint for intent classification.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
    pub json_schema: JsonSchemaFormat,
}

/// Named JSON schema wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSchemaFormat {
    pub name: String,
    pub strict: bool,
    pub schema: serde_json::Value,
}

/// Non-streaming completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<CompletionChoice>,
}

/// One choice in a completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    pub message: CompletionMessage,
}

/// The message of a completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// A streamed completion chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamChunk {
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
}

/// One choice in a streamed chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamChoice {
    #[serde(default)]
    pub delta: StreamDelta,
}

/// Delta content of a streamed choice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamDelta {
    #[serde(default)]
    pub content: Option<String>,
}

/// Provider error response body.
#[derive(Debug, Deserialize)]
pub struct ProviderErrorBody {
    pub error: ProviderErrorDetail,
}

/// Nested provider error details.
#[derive(Debug, Deserialize)]
pub struct ProviderErrorDetail {
    #[serde(default)]
    pub message: String,
}

// =============================================================================
// Intent analysis
// =============================================================================

/// Classifier confidence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// The structured result of intent classification, whether from the
/// provider's schema-constrained response or the keyword fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentAnalysis {
    pub intent: Intent,
    pub confidence: Confidence,
    pub product_mentioned: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub category_filter: Option<String>,
    #[serde(default)]
    pub reason: String,
    /// True when the keyword fallback produced this analysis.
    #[serde(default)]
    pub fallback: bool,
}

const fn default_quantity() -> u32 {
    1
}

/// The JSON schema the provider must follow when classifying intent.
#[must_use]
pub fn intent_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "intent": {
                "type": "string",
                "enum": [
                    "order", "list_products", "checkout", "faq",
                    "product_info", "greeting", "general_chat"
                ],
                "description": "The classified intent category"
            },
            "confidence": {
                "type": "string",
                "enum": ["high", "medium", "low"],
                "description": "Confidence level of the classification"
            },
            "product_mentioned": {
                "type": ["string", "null"],
                "description": "Name of the product mentioned by user, or null if none"
            },
            "quantity": {
                "type": "integer",
                "description": "Quantity requested by user, default 1"
            },
            "category_filter": {
                "type": ["string", "null"],
                "description": "Product category user wants to filter by, or null"
            },
            "reason": {
                "type": "string",
                "description": "Brief explanation for the classification"
            }
        },
        "required": [
            "intent", "confidence", "product_mentioned",
            "quantity", "category_filter", "reason"
        ],
        "additionalProperties": false
    })
}

// =============================================================================
// Client-facing types
// =============================================================================

/// A prior conversation turn sent by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryTurn {
    /// "user" or "assistant"; anything else is dropped.
    pub role: String,
    pub content: String,
}

/// A product as shown inside chat events.
#[derive(Debug, Clone, Serialize)]
pub struct ProductCard {
    pub id: DessertItemId,
    pub name: String,
    pub price: Money,
    pub category: String,
    pub image: String,
    pub description: String,
}

impl From<&DessertItem> for ProductCard {
    fn from(item: &DessertItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            price: item.price,
            category: item.category_name.clone(),
            image: item.image.clone(),
            description: item.short_description(150),
        }
    }
}

/// Typed SSE events emitted before the streamed reply.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    /// Result of intent analysis, sent first on every turn.
    IntentDetected {
        intent: Intent,
        confidence: Confidence,
        product_mentioned: Option<String>,
        category_filter: Option<String>,
    },
    /// Products for a listing request.
    ProductList {
        products: Vec<ProductCard>,
        category: Option<String>,
    },
    /// Matching FAQ entries for a policy question.
    FaqSuggestions { faqs: Vec<ScoredFaq> },
    /// The user must sign in before ordering or checking out.
    AuthRequired { message: String },
    /// The client should navigate to the checkout page.
    RedirectCheckout,
    /// The session cart changed.
    CartUpdate {
        cart: Vec<CartItem>,
        added_products: Vec<ProductCard>,
        quantity_updated: bool,
    },
    /// Details for a product-info question.
    ProductInfo { product: ProductCard },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_analysis_parses_provider_response() {
        let json = r#"{
            "intent": "order",
            "confidence": "high",
            "product_mentioned": "Molten Chocolate Cake",
            "quantity": 2,
            "category_filter": null,
            "reason": "User asked to buy a specific product"
        }"#;

        let analysis: IntentAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.intent, Intent::Order);
        assert_eq!(analysis.confidence, Confidence::High);
        assert_eq!(analysis.quantity, 2);
        assert!(!analysis.fallback);
    }

    #[test]
    fn test_intent_analysis_defaults_quantity() {
        let json = r#"{
            "intent": "greeting",
            "confidence": "low",
            "product_mentioned": null,
            "category_filter": null
        }"#;

        let analysis: IntentAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.quantity, 1);
    }

    #[test]
    fn test_chat_event_serialization_tags() {
        let event = ChatEvent::RedirectCheckout;
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"redirect_checkout"}"#);

        let event = ChatEvent::AuthRequired {
            message: "Please sign in".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"auth_required""#));
    }

    #[test]
    fn test_stream_chunk_parses_delta() {
        let json = r#"{"choices":[{"delta":{"content":"Hello"}}]}"#;
        let chunk: StreamChunk = serde_json::from_str(json).unwrap();
        assert_eq!(
            chunk.choices.first().unwrap().delta.content.as_deref(),
            Some("Hello")
        );
    }

    #[test]
    fn test_intent_schema_lists_all_intents() {
        let schema = intent_schema();
        let intents = schema["properties"]["intent"]["enum"].as_array().unwrap();
        assert_eq!(intents.len(), 7);
    }
}
