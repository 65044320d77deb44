//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (DB probe)
//!
//! # Catalog
//! GET  /api/categories              - Category listing
//! GET  /api/desserts                - Dessert listing (filters + pagination)
//! GET  /api/desserts/{slug}         - Dessert detail
//! GET  /api/featured-desserts       - Featured desserts
//!
//! # Content
//! GET  /api/testimonials            - Approved testimonials
//! GET  /api/chef-recommendations    - Active chef picks
//! GET  /api/cms/about-us            - About Us page
//! GET  /api/cms/our-story           - Our Story page
//! GET  /api/cms/faq                 - FAQ page
//!
//! # Contact
//! POST /api/contact                 - Submit contact form
//! GET  /api/contact/mine            - Own submissions (auth)
//!
//! # Auth (rate limited)
//! POST /api/auth/register           - Create account
//! POST /api/auth/login              - Login
//! POST /api/auth/logout             - Logout
//! GET  /api/auth/me                 - Current user
//! GET  /api/auth/check              - Auth status
//!
//! # Orders & payments
//! POST /api/orders                  - Place a delivery order
//! GET  /api/orders                  - Own orders (auth)
//! GET  /api/orders/{id}             - Order detail
//! POST /api/payments/intent         - Create Stripe PaymentIntent
//! POST /api/takeaway/orders         - Place a pickup order
//! GET  /api/takeaway/orders         - Counter view of pickup orders (staff)
//! PATCH /api/takeaway/orders/{id}/status - Counter status update (staff)
//! POST /api/takeaway/payments/intent- PaymentIntent for pickup
//!
//! # Chat (rate limited)
//! POST /api/chat/stream             - SSE chat turn
//! GET  /api/chat/cart               - Session cart
//! POST /api/chat/cart/add           - Add product by name
//! POST /api/chat/cart/clear         - Clear cart
//! GET  /api/chat/stats              - Index/provider status
//!
//! # Admin (staff only)
//! /api/admin/...                    - Dashboard + CRUD surfaces
//! ```

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod chat;
pub mod contact;
pub mod content;
pub mod orders;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::middleware::rate_limit;
use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(catalog::list_categories))
        .route("/desserts", get(catalog::list_desserts))
        .route("/desserts/{slug}", get(catalog::get_dessert))
        .route("/featured-desserts", get(catalog::featured_desserts))
}

/// Create the content routes router.
pub fn content_routes() -> Router<AppState> {
    Router::new()
        .route("/testimonials", get(content::testimonials))
        .route("/chef-recommendations", get(content::chef_recommendations))
        .route("/cms/about-us", get(content::about_us))
        .route("/cms/our-story", get(content::our_story))
        .route("/cms/faq", get(content::faq))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/check", get(auth::check))
        .layer(rate_limit::auth_rate_limiter())
}

/// Create the order and payment routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(orders::create_order).get(orders::my_orders))
        .route("/orders/{id}", get(orders::get_order))
        .route("/payments/intent", post(orders::create_payment_intent))
        .route(
            "/takeaway/orders",
            post(orders::create_takeaway_order).get(orders::list_takeaway_orders),
        )
        .route(
            "/takeaway/orders/{id}/status",
            patch(orders::update_takeaway_status),
        )
        .route(
            "/takeaway/payments/intent",
            post(orders::create_takeaway_payment_intent),
        )
}

/// Create the chat routes router.
pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/stream", post(chat::stream))
        .route("/cart", get(chat::get_cart))
        .route("/cart/add", post(chat::add_to_cart))
        .route("/cart/clear", post(chat::clear_cart))
        .route("/stats", get(chat::stats))
        .layer(rate_limit::chat_rate_limiter())
}

/// Create the contact routes router.
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(contact::submit))
        .route("/mine", get(contact::my_submissions))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    let api = Router::new()
        .merge(catalog_routes())
        .merge(content_routes())
        .merge(order_routes())
        .nest("/auth", auth_routes())
        .nest("/chat", chat_routes())
        .nest("/contact", contact_routes())
        .nest("/admin", admin::routes());

    Router::new().nest("/api", api)
}
