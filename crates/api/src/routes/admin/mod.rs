//! Admin route handlers.
//!
//! Everything here requires a staff user (`RequireStaff`); handlers return
//! the same JSON shapes as the public API plus the admin-only fields.

pub mod contacts;
pub mod content;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::stats))
        // Catalog
        .route(
            "/products",
            get(products::list).post(products::create),
        )
        .route(
            "/products/{id}",
            put(products::update).delete(products::remove),
        )
        .route(
            "/categories",
            get(products::list_categories).post(products::create_category),
        )
        .route(
            "/categories/{id}",
            put(products::update_category).delete(products::remove_category),
        )
        // Orders
        .route("/orders", get(orders::list))
        .route(
            "/orders/{id}",
            get(orders::detail)
                .patch(orders::update_status)
                .delete(orders::remove),
        )
        .route("/order-items", get(orders::list_items))
        .route("/order-items/{id}", delete(orders::remove_item))
        // Users
        .route("/users", get(users::list).post(users::create))
        .route("/users/{id}", put(users::update).delete(users::remove))
        // Contacts
        .route("/contacts", get(contacts::list))
        .route(
            "/contacts/{id}",
            put(contacts::update).delete(contacts::remove),
        )
        // Testimonials & chef recommendations
        .route(
            "/testimonials",
            get(content::list_testimonials).post(content::create_testimonial),
        )
        .route(
            "/testimonials/{id}",
            put(content::update_testimonial).delete(content::remove_testimonial),
        )
        .route(
            "/chef-recommendations",
            get(content::list_recommendations).post(content::create_recommendation),
        )
        .route(
            "/chef-recommendations/{id}",
            put(content::update_recommendation).delete(content::remove_recommendation),
        )
        // CMS pages
        .route("/cms/about-us", put(content::save_about_us))
        .route("/cms/our-story", put(content::save_our_story))
        .route("/cms/faq", put(content::save_faq))
        // Search index maintenance
        .route("/search/reindex", post(dashboard::reindex))
}
