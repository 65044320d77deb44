//! Public content route handlers: testimonials, chef picks, and CMS pages.

use axum::{Json, extract::State};

use crate::db::CatalogRepository;
use crate::error::{AppError, Result};
use crate::models::catalog::{ChefRecommendation, Testimonial};
use crate::models::content::{AboutUsPage, FaqPage, OurStoryPage};
use crate::state::AppState;

/// List approved testimonials.
///
/// GET /api/testimonials
pub async fn testimonials(State(state): State<AppState>) -> Result<Json<Vec<Testimonial>>> {
    let testimonials = CatalogRepository::new(state.pool())
        .list_testimonials(true)
        .await?;
    Ok(Json(testimonials))
}

/// List active chef recommendations.
///
/// GET /api/chef-recommendations
pub async fn chef_recommendations(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChefRecommendation>>> {
    let recommendations = CatalogRepository::new(state.pool())
        .list_recommendations(true)
        .await?;
    Ok(Json(recommendations))
}

/// Get the About Us page.
///
/// Served from the state cache; admin saves invalidate it.
///
/// GET /api/cms/about-us
pub async fn about_us(State(state): State<AppState>) -> Result<Json<AboutUsPage>> {
    let page = state.about_page().await?;
    page.as_ref()
        .clone()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("about us page".to_string()))
}

/// Get the Our Story page.
///
/// GET /api/cms/our-story
pub async fn our_story(State(state): State<AppState>) -> Result<Json<OurStoryPage>> {
    let page = state.story_page().await?;
    page.as_ref()
        .clone()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("our story page".to_string()))
}

/// Get the FAQ page.
///
/// GET /api/cms/faq
pub async fn faq(State(state): State<AppState>) -> Result<Json<FaqPage>> {
    let page = state.faq_page().await?;
    page.as_ref()
        .clone()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("faq page".to_string()))
}
