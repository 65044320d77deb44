//! Admin catalog management: products and categories.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use sweet_dessert_core::{CategoryId, DessertItemId, Money};

use crate::db::CatalogRepository;
use crate::db::catalog::{CategoryInput, DessertFilter, DessertInput};
use crate::error::Result;
use crate::middleware::RequireStaff;
use crate::models::catalog::{Category, DessertItem};
use crate::state::AppState;

/// Admin listing parameters (includes unavailable products by default).
#[derive(Debug, Deserialize)]
pub struct AdminListParams {
    #[serde(default)]
    pub category: Option<String>,
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
    50
}

/// Product create/update payload.
#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Money,
    pub category_id: CategoryId,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub dietary_info: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub preparation_minutes: i32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub seasonal: bool,
    #[serde(default)]
    pub best_seller: bool,
    #[serde(default = "default_available")]
    pub available: bool,
}

const fn default_available() -> bool {
    true
}

impl From<ProductPayload> for DessertInput {
    fn from(p: ProductPayload) -> Self {
        Self {
            name: p.name,
            slug: p.slug,
            description: p.description,
            price: p.price,
            category_id: p.category_id,
            image: p.image,
            dietary_info: p.dietary_info,
            ingredients: p.ingredients,
            allergens: p.allergens,
            preparation_minutes: p.preparation_minutes,
            featured: p.featured,
            seasonal: p.seasonal,
            best_seller: p.best_seller,
            available: p.available,
        }
    }
}

/// Category create/update payload.
#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub display_order: i32,
}

impl From<CategoryPayload> for CategoryInput {
    fn from(p: CategoryPayload) -> Self {
        Self {
            name: p.name,
            slug: p.slug,
            description: p.description,
            image: p.image,
            display_order: p.display_order,
        }
    }
}

/// List products for the admin table (availability not filtered).
///
/// GET /api/admin/products
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Query(params): Query<AdminListParams>,
) -> Result<Json<Vec<DessertItem>>> {
    let filter = DessertFilter {
        category_slug: params.category,
        search: params.search,
        page: params.page,
        page_size: params.page_size,
        ..Default::default()
    };

    let products = CatalogRepository::new(state.pool()).list_desserts(&filter).await?;
    Ok(Json(products))
}

/// Create a product.
///
/// POST /api/admin/products
#[instrument(skip_all, fields(slug = %payload.slug))]
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Json(payload): Json<ProductPayload>,
) -> Result<(StatusCode, Json<DessertItem>)> {
    let product = CatalogRepository::new(state.pool())
        .create_dessert(&payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product.
///
/// PUT /api/admin/products/{id}
#[instrument(skip_all, fields(id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Path(id): Path<DessertItemId>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<DessertItem>> {
    let product = CatalogRepository::new(state.pool())
        .update_dessert(id, &payload.into())
        .await?;
    Ok(Json(product))
}

/// Delete a product.
///
/// DELETE /api/admin/products/{id}
pub async fn remove(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Path(id): Path<DessertItemId>,
) -> Result<StatusCode> {
    CatalogRepository::new(state.pool()).delete_dessert(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List all categories.
///
/// GET /api/admin/categories
pub async fn list_categories(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
) -> Result<Json<Vec<Category>>> {
    let categories = CatalogRepository::new(state.pool()).list_categories().await?;
    Ok(Json(categories))
}

/// Create a category.
///
/// POST /api/admin/categories
#[instrument(skip_all, fields(slug = %payload.slug))]
pub async fn create_category(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Json(payload): Json<CategoryPayload>,
) -> Result<(StatusCode, Json<Category>)> {
    let category = CatalogRepository::new(state.pool())
        .create_category(&payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Update a category.
///
/// PUT /api/admin/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Path(id): Path<CategoryId>,
    Json(payload): Json<CategoryPayload>,
) -> Result<Json<Category>> {
    let category = CatalogRepository::new(state.pool())
        .update_category(id, &payload.into())
        .await?;
    Ok(Json(category))
}

/// Delete a category (cascades to its desserts).
///
/// DELETE /api/admin/categories/{id}
pub async fn remove_category(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Path(id): Path<CategoryId>,
) -> Result<StatusCode> {
    CatalogRepository::new(state.pool()).delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
