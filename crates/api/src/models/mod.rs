//! Domain models shared between the db layer and route handlers.

pub mod catalog;
pub mod contact;
pub mod content;
pub mod orders;
pub mod user;

pub use catalog::{Category, ChefRecommendation, DessertItem, Testimonial};
pub use contact::ContactSubmission;
pub use content::{
    AboutUsPage, AboutValue, FaqCategory, FaqItem, FaqPage, ImpactMetric, OurStoryPage, TeamMember,
    TimelineEvent,
};
pub use orders::{CartItem, Order, OrderItem};
pub use user::{CurrentUser, User, session_keys};
