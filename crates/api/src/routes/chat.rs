//! Chat assistant route handlers.
//!
//! `POST /api/chat/stream` answers one turn as an SSE stream: an
//! `intent_detected` event, any intent-specific events (product list, FAQ
//! suggestions, cart update, auth prompts), then the provider's streamed
//! reply as `{"content": ...}` frames, and finally a `[DONE]` frame.
//! Provider failures degrade to a canned reply instead of erroring the
//! stream.

use std::convert::Infallible;

use axum::{
    Json,
    extract::State,
    response::{
        Sse,
        sse::{Event, KeepAlive},
    },
};
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::chat::service::sanitize_history;
use crate::chat::types::{ChatEvent, ProductCard};
use crate::chat::{ChatService, HistoryTurn, Intent, TurnPlan, prompt};
use crate::db::CatalogRepository;
use crate::db::search::IndexStats;
use crate::error::{AppError, Result};
use crate::middleware::OptionalAuth;
use crate::models::orders::{CartItem, add_to_cart as push_cart_item};
use crate::models::user::{CurrentUser, session_keys};
use crate::state::AppState;

/// Canned reply used when the provider yields nothing usable.
const FALLBACK_REPLY: &str = "I can help you with our desserts! What would you like to know?";

/// One chat turn from the client.
#[derive(Debug, Deserialize)]
pub struct ChatStreamRequest {
    pub message: String,
    /// Optional per-request provider key; overrides the configured key for
    /// this request only.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Recent conversation turns for provider context.
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
}

/// Cart response body.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: Vec<CartItem>,
    pub count: usize,
}

/// Payload for adding a product to the cart by name.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// Chat system status.
#[derive(Debug, Serialize)]
pub struct ChatStats {
    pub index: IndexStats,
    pub embeddings_enabled: bool,
    pub embedding_model: &'static str,
    pub provider_configured: bool,
}

async fn load_cart(session: &Session) -> Result<Vec<CartItem>> {
    Ok(session
        .get::<Vec<CartItem>>(session_keys::CHAT_CART)
        .await?
        .unwrap_or_default())
}

async fn store_cart(session: &Session, cart: &Vec<CartItem>) -> Result<()> {
    session.insert(session_keys::CHAT_CART, cart).await?;
    Ok(())
}

/// Answer one chat turn as an SSE stream.
///
/// POST /api/chat/stream
#[instrument(skip_all, fields(authenticated = user.is_some()))]
pub async fn stream(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
    Json(request): Json<ChatStreamRequest>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, Infallible>>>> {
    let message = request.message.trim().to_string();
    if message.is_empty() {
        return Err(AppError::BadRequest("no message provided".to_string()));
    }

    let product_names = state.product_names().await;
    let service = ChatService::new(state.pool(), state.chat(), state.search());
    let plan = service
        .plan_turn(&message, request.api_key.as_deref(), &product_names)
        .await?;

    // Session-mutating work happens here, before the response starts
    // streaming; the resulting events ride along in order.
    let events = build_turn_events(&plan, user.as_ref(), &session).await?;

    let system_prompt = prompt::system_prompt(&plan.context, &plan.faqs, user.as_ref());
    let history = sanitize_history(&request.history);

    let chat_client = state.chat().clone();
    let api_key = request.api_key;

    let stream = async_stream::stream! {
        for event in events {
            yield Ok(Event::default().data(event.to_string()));
        }

        let mut content_received = false;

        match chat_client
            .stream_reply(&system_prompt, &history, &message, api_key.as_deref())
            .await
        {
            Ok(reply) => {
                let mut reply = std::pin::pin!(reply);
                while let Some(item) = reply.next().await {
                    match item {
                        Ok(delta) => {
                            content_received = true;
                            let frame = serde_json::json!({ "content": delta });
                            yield Ok(Event::default().data(frame.to_string()));
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Chat stream interrupted");
                            break;
                        }
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Chat reply unavailable, sending canned response");
            }
        }

        if !content_received {
            let frame = serde_json::json!({ "content": FALLBACK_REPLY });
            yield Ok(Event::default().data(frame.to_string()));
        }

        yield Ok(Event::default().data("[DONE]"));
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

/// Build the pre-reply events for a planned turn, applying cart changes.
async fn build_turn_events(
    plan: &TurnPlan,
    user: Option<&CurrentUser>,
    session: &Session,
) -> Result<Vec<serde_json::Value>> {
    let mut events = Vec::new();

    push_event(
        &mut events,
        &ChatEvent::IntentDetected {
            intent: plan.analysis.intent,
            confidence: plan.analysis.confidence,
            product_mentioned: plan.analysis.product_mentioned.clone(),
            category_filter: plan.analysis.category_filter.clone(),
        },
    );

    match plan.analysis.intent {
        Intent::ListProducts => {
            if !plan.product_list.is_empty() {
                push_event(
                    &mut events,
                    &ChatEvent::ProductList {
                        products: plan.product_list.iter().map(ProductCard::from).collect(),
                        category: plan.analysis.category_filter.clone(),
                    },
                );
            }
        }
        Intent::Faq => {
            if !plan.faqs.is_empty() {
                push_event(
                    &mut events,
                    &ChatEvent::FaqSuggestions {
                        faqs: plan.faqs.clone(),
                    },
                );
            }
        }
        Intent::Checkout => {
            if user.is_some() {
                push_event(&mut events, &ChatEvent::RedirectCheckout);
            } else {
                push_event(
                    &mut events,
                    &ChatEvent::AuthRequired {
                        message: "Please sign in to proceed to checkout".to_string(),
                    },
                );
            }
        }
        Intent::Order => {
            if let Some(product) = &plan.matched_product {
                if user.is_some() {
                    let card = ProductCard::from(product);
                    let mut cart = load_cart(session).await?;
                    let added = push_cart_item(
                        &mut cart,
                        CartItem {
                            id: product.id,
                            name: product.name.clone(),
                            price: product.price,
                            category: product.category_name.clone(),
                            image: product.image.clone(),
                            quantity: plan.analysis.quantity.max(1),
                        },
                    );
                    store_cart(session, &cart).await?;

                    tracing::info!(
                        product = %product.name,
                        quantity = plan.analysis.quantity,
                        newly_added = added,
                        "Chat cart updated"
                    );

                    push_event(
                        &mut events,
                        &ChatEvent::CartUpdate {
                            cart,
                            added_products: vec![card],
                            quantity_updated: !added,
                        },
                    );
                } else {
                    push_event(
                        &mut events,
                        &ChatEvent::AuthRequired {
                            message: "Please sign up or login to place an order".to_string(),
                        },
                    );
                }
            }
        }
        Intent::ProductInfo => {
            if let Some(product) = &plan.matched_product {
                push_event(
                    &mut events,
                    &ChatEvent::ProductInfo {
                        product: ProductCard::from(product),
                    },
                );
            }
        }
        Intent::Greeting | Intent::GeneralChat => {}
    }

    Ok(events)
}

fn push_event(events: &mut Vec<serde_json::Value>, event: &ChatEvent) {
    match serde_json::to_value(event) {
        Ok(value) => events.push(value),
        Err(e) => tracing::error!(error = %e, "Failed to serialize chat event"),
    }
}

/// Get the session cart.
///
/// GET /api/chat/cart
pub async fn get_cart(session: Session) -> Result<Json<CartResponse>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartResponse {
        count: cart.len(),
        cart,
    }))
}

/// Add a product to the cart by (fuzzy) name.
///
/// POST /api/chat/cart/add
#[instrument(skip(state, session), fields(product = %request.product))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartResponse>> {
    let query = request.product.trim();
    if query.is_empty() {
        return Err(AppError::BadRequest("no product specified".to_string()));
    }

    let product = CatalogRepository::new(state.pool())
        .find_dessert_by_name(query)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product: {query}")))?;

    let mut cart = load_cart(&session).await?;
    push_cart_item(
        &mut cart,
        CartItem {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            category: product.category_name.clone(),
            image: product.image.clone(),
            quantity: request.quantity.max(1),
        },
    );
    store_cart(&session, &cart).await?;

    Ok(Json(CartResponse {
        count: cart.len(),
        cart,
    }))
}

/// Clear the session cart.
///
/// POST /api/chat/cart/clear
pub async fn clear_cart(session: Session) -> Result<Json<CartResponse>> {
    store_cart(&session, &Vec::new()).await?;
    Ok(Json(CartResponse {
        cart: Vec::new(),
        count: 0,
    }))
}

/// Chat system status: index counts and provider availability.
///
/// GET /api/chat/stats
pub async fn stats(State(state): State<AppState>) -> Result<Json<ChatStats>> {
    let index = state.search().stats().await?;
    Ok(Json(ChatStats {
        index,
        embeddings_enabled: state.search().has_embeddings(),
        embedding_model: crate::search::EMBEDDING_MODEL,
        provider_configured: state.chat().is_configured(),
    }))
}
