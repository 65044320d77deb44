//! Admin content management: testimonials, chef recommendations, and the
//! CMS pages.
//!
//! CMS pages are saved wholesale: the editor always submits the complete
//! page, and the repository replaces the child collections in one
//! transaction.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use sweet_dessert_core::{DessertItemId, RecommendationId, TestimonialId};

use crate::db::content::{AboutPageInput, FaqPageInput, StoryPageInput};
use crate::db::{CatalogRepository, ContentRepository};
use crate::error::Result;
use crate::middleware::RequireStaff;
use crate::models::catalog::{ChefRecommendation, Testimonial};
use crate::models::content::{AboutUsPage, FaqPage, OurStoryPage};
use crate::state::AppState;

/// Listing parameters shared by testimonials and recommendations.
#[derive(Debug, Deserialize)]
pub struct ContentListParams {
    /// When true, only approved/active entries are returned.
    #[serde(default)]
    pub published: bool,
}

/// Testimonial create payload.
#[derive(Debug, Deserialize)]
pub struct TestimonialPayload {
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    pub rating: i32,
    pub text: String,
    #[serde(default)]
    pub dessert_item_id: Option<DessertItemId>,
    #[serde(default)]
    pub approved: bool,
}

/// Testimonial update payload (moderation fields only).
#[derive(Debug, Deserialize)]
pub struct TestimonialUpdatePayload {
    pub rating: i32,
    pub text: String,
    pub approved: bool,
}

/// Chef recommendation create payload.
#[derive(Debug, Deserialize)]
pub struct RecommendationPayload {
    pub chef_name: String,
    #[serde(default)]
    pub chef_title: String,
    #[serde(default)]
    pub chef_image: String,
    pub text: String,
    #[serde(default)]
    pub dessert_item_id: Option<DessertItemId>,
    #[serde(default)]
    pub is_featured: bool,
}

/// Chef recommendation update payload.
#[derive(Debug, Deserialize)]
pub struct RecommendationUpdatePayload {
    pub text: String,
    pub is_featured: bool,
    pub active: bool,
}

/// List testimonials, including unapproved ones by default.
///
/// GET /api/admin/testimonials
pub async fn list_testimonials(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Query(params): Query<ContentListParams>,
) -> Result<Json<Vec<Testimonial>>> {
    let testimonials = CatalogRepository::new(state.pool())
        .list_testimonials(params.published)
        .await?;
    Ok(Json(testimonials))
}

/// Create a testimonial.
///
/// POST /api/admin/testimonials
pub async fn create_testimonial(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Json(payload): Json<TestimonialPayload>,
) -> Result<(StatusCode, Json<Testimonial>)> {
    let testimonial = CatalogRepository::new(state.pool())
        .create_testimonial(
            &payload.name,
            &payload.avatar,
            payload.rating,
            &payload.text,
            payload.dessert_item_id,
            payload.approved,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(testimonial)))
}

/// Update a testimonial's moderation fields.
///
/// PUT /api/admin/testimonials/{id}
pub async fn update_testimonial(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Path(id): Path<TestimonialId>,
    Json(payload): Json<TestimonialUpdatePayload>,
) -> Result<Json<Testimonial>> {
    let testimonial = CatalogRepository::new(state.pool())
        .update_testimonial(id, payload.rating, &payload.text, payload.approved)
        .await?;
    Ok(Json(testimonial))
}

/// Delete a testimonial.
///
/// DELETE /api/admin/testimonials/{id}
pub async fn remove_testimonial(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Path(id): Path<TestimonialId>,
) -> Result<StatusCode> {
    CatalogRepository::new(state.pool())
        .delete_testimonial(id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List chef recommendations, including inactive ones by default.
///
/// GET /api/admin/chef-recommendations
pub async fn list_recommendations(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Query(params): Query<ContentListParams>,
) -> Result<Json<Vec<ChefRecommendation>>> {
    let recommendations = CatalogRepository::new(state.pool())
        .list_recommendations(params.published)
        .await?;
    Ok(Json(recommendations))
}

/// Create a chef recommendation.
///
/// POST /api/admin/chef-recommendations
pub async fn create_recommendation(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Json(payload): Json<RecommendationPayload>,
) -> Result<(StatusCode, Json<ChefRecommendation>)> {
    let recommendation = CatalogRepository::new(state.pool())
        .create_recommendation(
            &payload.chef_name,
            &payload.chef_title,
            &payload.chef_image,
            &payload.text,
            payload.dessert_item_id,
            payload.is_featured,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(recommendation)))
}

/// Update a chef recommendation.
///
/// PUT /api/admin/chef-recommendations/{id}
pub async fn update_recommendation(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Path(id): Path<RecommendationId>,
    Json(payload): Json<RecommendationUpdatePayload>,
) -> Result<Json<ChefRecommendation>> {
    let recommendation = CatalogRepository::new(state.pool())
        .update_recommendation(id, &payload.text, payload.is_featured, payload.active)
        .await?;
    Ok(Json(recommendation))
}

/// Delete a chef recommendation.
///
/// DELETE /api/admin/chef-recommendations/{id}
pub async fn remove_recommendation(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Path(id): Path<RecommendationId>,
) -> Result<StatusCode> {
    CatalogRepository::new(state.pool())
        .delete_recommendation(id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replace the About Us page content.
///
/// PUT /api/admin/cms/about-us
#[instrument(skip_all)]
pub async fn save_about_us(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Json(input): Json<AboutPageInput>,
) -> Result<Json<AboutUsPage>> {
    let page = ContentRepository::new(state.pool())
        .save_about_page(&input)
        .await?;
    state.invalidate_cms_cache().await;
    Ok(Json(page))
}

/// Replace the Our Story page content.
///
/// PUT /api/admin/cms/our-story
#[instrument(skip_all)]
pub async fn save_our_story(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Json(input): Json<StoryPageInput>,
) -> Result<Json<OurStoryPage>> {
    let page = ContentRepository::new(state.pool())
        .save_story_page(&input)
        .await?;
    state.invalidate_cms_cache().await;
    Ok(Json(page))
}

/// Replace the FAQ page content.
///
/// PUT /api/admin/cms/faq
#[instrument(skip_all)]
pub async fn save_faq(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Json(input): Json<FaqPageInput>,
) -> Result<Json<FaqPage>> {
    let page = ContentRepository::new(state.pool())
        .save_faq_page(&input)
        .await?;
    state.invalidate_cms_cache().await;
    Ok(Json(page))
}
