//! Order and payment route handlers.
//!
//! Delivery checkout and takeaway (store pickup) share the same pipeline;
//! they differ only in the order type, which controls the delivery fee and
//! which fulfillment statuses apply.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use sweet_dessert_core::{Money, OrderId, OrderStatus, OrderType, PaymentMethod, PaymentStatus};

use crate::db::OrderRepository;
use crate::db::orders::OrderFilter;
use crate::error::{AppError, Result};
use crate::middleware::{RequireAuth, RequireStaff};
use crate::models::orders::Order;
use crate::services::checkout::{CheckoutItem, CheckoutRequest};
use crate::services::CheckoutService;
use crate::state::AppState;

/// Payload for creating a payment intent ahead of checkout.
#[derive(Debug, Deserialize)]
pub struct PaymentIntentRequest {
    pub items: Vec<CheckoutItem>,
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(default)]
    pub receipt_email: Option<String>,
}

/// Response for a created payment intent.
#[derive(Debug, Serialize)]
pub struct PaymentIntentResponse {
    pub client_secret: String,
    pub payment_intent_id: String,
    pub amount: Money,
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub tax: Money,
}

async fn quote_and_create_intent(
    state: &AppState,
    request: PaymentIntentRequest,
    order_type: OrderType,
) -> Result<Json<PaymentIntentResponse>> {
    let checkout = CheckoutService::new(state.pool(), state.config().pricing);
    let quote = checkout.quote(&request.items, order_type).await?;

    let intent = state
        .stripe()
        .create_payment_intent(quote.total, "pending", request.receipt_email.as_deref())
        .await?;

    Ok(Json(PaymentIntentResponse {
        client_secret: intent.client_secret,
        payment_intent_id: intent.id,
        amount: quote.total,
        subtotal: quote.subtotal,
        delivery_fee: quote.delivery_fee,
        tax: quote.tax,
    }))
}

/// Create a Stripe payment intent for a delivery checkout.
///
/// POST /api/payments/intent
#[instrument(skip_all)]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(request): Json<PaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>> {
    let order_type = request.order_type;
    quote_and_create_intent(&state, request, order_type).await
}

/// Create a Stripe payment intent for a takeaway order.
///
/// POST /api/takeaway/payments/intent
#[instrument(skip_all)]
pub async fn create_takeaway_payment_intent(
    State(state): State<AppState>,
    Json(request): Json<PaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>> {
    quote_and_create_intent(&state, request, OrderType::Takeaway).await
}

/// Place a delivery order.
///
/// POST /api/orders
#[instrument(skip_all)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(mut request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    request.order_type = OrderType::Delivery;
    let order = CheckoutService::new(state.pool(), state.config().pricing)
        .place_order(request)
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// Place a takeaway (store pickup) order.
///
/// POST /api/takeaway/orders
#[instrument(skip_all)]
pub async fn create_takeaway_order(
    State(state): State<AppState>,
    Json(mut request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    request.order_type = OrderType::Takeaway;
    let order = CheckoutService::new(state.pool(), state.config().pricing)
        .place_order(request)
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// List the logged-in user's orders (matched by email).
///
/// GET /api/orders
pub async fn my_orders(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_email(&user.email)
        .await?;
    Ok(Json(orders))
}

/// Query parameters for the takeaway counter listing.
#[derive(Debug, Deserialize)]
pub struct TakeawayListParams {
    #[serde(default)]
    pub status: Option<OrderStatus>,
    /// "paid" or "pending".
    #[serde(default)]
    pub payment: Option<String>,
    #[serde(default = "default_takeaway_limit")]
    pub limit: u32,
}

const fn default_takeaway_limit() -> u32 {
    50
}

/// Status transition payload for the takeaway counter.
#[derive(Debug, Deserialize)]
pub struct TakeawayStatusUpdate {
    pub status: OrderStatus,
}

/// List takeaway orders for the pickup counter (staff).
///
/// GET /api/takeaway/orders
pub async fn list_takeaway_orders(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(params): Query<TakeawayListParams>,
) -> Result<Json<Vec<Order>>> {
    let payment_status = match params.payment.as_deref() {
        Some("paid") => Some(PaymentStatus::Succeeded),
        Some("pending") => Some(PaymentStatus::Pending),
        _ => None,
    };

    let orders = OrderRepository::new(state.pool())
        .list(&OrderFilter {
            status: params.status,
            order_type: Some(OrderType::Takeaway),
            payment_status,
            limit: params.limit,
            ..Default::default()
        })
        .await?;
    Ok(Json(orders))
}

/// Update a takeaway order's status from the pickup counter (staff).
///
/// Marking a store-paid order as picked up also settles its payment.
///
/// PATCH /api/takeaway/orders/{id}/status
#[instrument(skip_all, fields(id = %id, status = %update.status))]
pub async fn update_takeaway_status(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<OrderId>,
    Json(update): Json<TakeawayStatusUpdate>,
) -> Result<Json<Order>> {
    let repo = OrderRepository::new(state.pool());

    let order = repo
        .get(id)
        .await?
        .filter(|o| o.order_type == OrderType::Takeaway)
        .ok_or_else(|| AppError::NotFound(format!("takeaway order: {id}")))?;

    let payment_status = (update.status == OrderStatus::PickedUp
        && order.payment_method == PaymentMethod::Store)
        .then_some(PaymentStatus::Succeeded);

    let updated = repo.update_status(id, update.status, payment_status).await?;

    tracing::info!(
        order_number = %updated.order_number,
        old_status = %order.status,
        new_status = %updated.status,
        "Takeaway order status updated"
    );

    Ok(Json(updated))
}

/// Query parameter guard for the order detail endpoint.
#[derive(Debug, Deserialize)]
pub struct OrderDetailParams {
    /// Unauthenticated lookups must supply the customer email.
    #[serde(default)]
    pub email: Option<String>,
}

/// Get an order by ID.
///
/// The order id is an unguessable UUID; an email cross-check keeps casual
/// enumeration of someone else's order contents out.
///
/// GET /api/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Query(params): Query<OrderDetailParams>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order: {id}")))?;

    if let Some(email) = params.email {
        if !order
            .customer_email
            .as_str()
            .eq_ignore_ascii_case(email.trim())
        {
            return Err(AppError::NotFound(format!("order: {id}")));
        }
    }

    Ok(Json(order))
}
