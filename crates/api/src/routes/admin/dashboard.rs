//! Admin dashboard aggregates.

use axum::{Json, extract::State};
use serde::Serialize;

use sweet_dessert_core::Money;

use crate::db::orders::OrderFilter;
use crate::db::search::IndexStats;
use crate::db::{CatalogRepository, ContactRepository, OrderRepository, UserRepository};
use crate::error::Result;
use crate::middleware::RequireStaff;
use crate::models::orders::Order;
use crate::state::AppState;

/// Dashboard response body.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_orders: i64,
    pub pending_orders: i64,
    pub revenue: Money,
    pub total_users: i64,
    pub total_products: usize,
    pub unanswered_contacts: i64,
    pub recent_orders: Vec<Order>,
}

/// Aggregate counts for the admin dashboard.
///
/// GET /api/admin/dashboard
pub async fn stats(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
) -> Result<Json<DashboardStats>> {
    let order_repo = OrderRepository::new(state.pool());

    let order_stats = order_repo.stats().await?;
    let total_users = UserRepository::new(state.pool()).count().await?;
    let products = CatalogRepository::new(state.pool())
        .available_product_names(10_000)
        .await?;
    let unanswered_contacts = ContactRepository::new(state.pool()).count_unanswered().await?;
    let recent_orders = order_repo
        .list(&OrderFilter {
            limit: 5,
            ..Default::default()
        })
        .await?;

    Ok(Json(DashboardStats {
        total_orders: order_stats.total_orders,
        pending_orders: order_stats.pending_orders,
        revenue: order_stats.revenue,
        total_users,
        total_products: products.len(),
        unanswered_contacts,
        recent_orders,
    }))
}

/// Rebuild the semantic search index.
///
/// POST /api/admin/search/reindex
pub async fn reindex(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
) -> Result<Json<IndexStats>> {
    let stats = state.search().reindex().await?;
    Ok(Json(stats))
}
