//! Admin order management.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use sweet_dessert_core::{OrderId, OrderItemId, OrderStatus, OrderType, PaymentStatus};

use crate::db::OrderRepository;
use crate::db::orders::OrderFilter;
use crate::error::{AppError, Result};
use crate::middleware::RequireStaff;
use crate::models::orders::{Order, OrderItem};
use crate::state::AppState;

/// Admin order listing parameters.
#[derive(Debug, Deserialize)]
pub struct OrderListParams {
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub order_type: Option<OrderType>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

const fn default_limit() -> u32 {
    100
}

/// Status transition payload.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
}

/// List orders with filters.
///
/// GET /api/admin/orders
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Query(params): Query<OrderListParams>,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .list(&OrderFilter {
            status: params.status,
            order_type: params.order_type,
            search: params.search,
            limit: params.limit,
            ..Default::default()
        })
        .await?;
    Ok(Json(orders))
}

/// Get one order with items.
///
/// GET /api/admin/orders/{id}
pub async fn detail(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order: {id}")))?;
    Ok(Json(order))
}

/// Update an order's status.
///
/// PATCH /api/admin/orders/{id}
#[instrument(skip_all, fields(id = %id, status = %update.status))]
pub async fn update_status(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Path(id): Path<OrderId>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .update_status(id, update.status, update.payment_status)
        .await?;
    Ok(Json(order))
}

/// Delete an order.
///
/// DELETE /api/admin/orders/{id}
pub async fn remove(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Path(id): Path<OrderId>,
) -> Result<StatusCode> {
    OrderRepository::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List order items across all orders.
///
/// GET /api/admin/order-items
pub async fn list_items(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
) -> Result<Json<Vec<OrderItem>>> {
    let items = OrderRepository::new(state.pool()).list_items(500).await?;
    Ok(Json(items))
}

/// Delete one order item.
///
/// DELETE /api/admin/order-items/{id}
pub async fn remove_item(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Path(id): Path<OrderItemId>,
) -> Result<StatusCode> {
    OrderRepository::new(state.pool()).delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
