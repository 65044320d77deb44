//! Public catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::db::CatalogRepository;
use crate::db::catalog::DessertFilter;
use crate::error::{AppError, Result};
use crate::models::catalog::{Category, DessertItem};
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: u32 = 24;

/// Query parameters for the dessert listing.
#[derive(Debug, Deserialize)]
pub struct DessertListParams {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

const fn default_page() -> u32 {
    1
}

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// List all categories.
///
/// GET /api/categories
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = CatalogRepository::new(state.pool()).list_categories().await?;
    Ok(Json(categories))
}

/// List desserts with optional filters.
///
/// GET /api/desserts
pub async fn list_desserts(
    State(state): State<AppState>,
    Query(params): Query<DessertListParams>,
) -> Result<Json<Vec<DessertItem>>> {
    let filter = DessertFilter {
        category_slug: params.category,
        featured: params.featured,
        // The public listing hides unavailable items unless asked otherwise.
        available: params.available.or(Some(true)),
        search: params.search,
        page: params.page,
        page_size: params.page_size,
    };

    let desserts = CatalogRepository::new(state.pool()).list_desserts(&filter).await?;
    Ok(Json(desserts))
}

/// Get a dessert by slug.
///
/// GET /api/desserts/{slug}
pub async fn get_dessert(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<DessertItem>> {
    let dessert = CatalogRepository::new(state.pool())
        .get_dessert_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("dessert: {slug}")))?;

    Ok(Json(dessert))
}

/// List featured desserts.
///
/// GET /api/featured-desserts
pub async fn featured_desserts(State(state): State<AppState>) -> Result<Json<Vec<DessertItem>>> {
    let filter = DessertFilter {
        featured: Some(true),
        available: Some(true),
        page: 1,
        page_size: 12,
        ..Default::default()
    };

    let desserts = CatalogRepository::new(state.pool()).list_desserts(&filter).await?;
    Ok(Json(desserts))
}
