//! CMS page models: About Us, Our Story, and FAQ.
//!
//! Each page is a singleton row (the most recent active one wins) with
//! ordered child collections edited through the admin API.

use chrono::{DateTime, Utc};
use serde::Serialize;

use sweet_dessert_core::{
    AboutPageId, FaqCategoryId, FaqItemId, FaqPageId, StoryPageId,
};

/// The About Us page with its nested sections.
#[derive(Debug, Clone, Serialize)]
pub struct AboutUsPage {
    pub id: AboutPageId,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_badge: String,
    pub mission_title: String,
    pub mission_text: String,
    pub values_title: String,
    pub values_subtitle: String,
    pub store_title: String,
    pub store_description: String,
    pub store_address: String,
    pub store_hours: String,
    pub cta_title: String,
    pub cta_subtitle: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub values: Vec<AboutValue>,
    pub team_members: Vec<TeamMember>,
}

/// A value card on the About Us page.
#[derive(Debug, Clone, Serialize)]
pub struct AboutValue {
    pub id: i32,
    pub page_id: AboutPageId,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub color_gradient: String,
    pub display_order: i32,
}

/// A team member card on the About Us page.
#[derive(Debug, Clone, Serialize)]
pub struct TeamMember {
    pub id: i32,
    pub page_id: AboutPageId,
    pub name: String,
    pub role: String,
    pub description: String,
    pub image_emoji: String,
    pub display_order: i32,
}

/// The Our Story page with its timeline and impact metrics.
#[derive(Debug, Clone, Serialize)]
pub struct OurStoryPage {
    pub id: StoryPageId,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_badge: String,
    pub founder_name: String,
    pub founder_title: String,
    pub founder_image: String,
    pub founder_quote: String,
    pub founder_description: String,
    pub journey_title: String,
    pub journey_subtitle: String,
    pub impact_title: String,
    pub impact_subtitle: String,
    pub vision_title: String,
    pub vision_text: String,
    pub cta_title: String,
    pub cta_subtitle: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub timeline: Vec<TimelineEvent>,
    pub impact_metrics: Vec<ImpactMetric>,
}

/// A milestone on the Our Story timeline.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineEvent {
    pub id: i32,
    pub page_id: StoryPageId,
    pub year: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub color_gradient: String,
    pub display_order: i32,
}

/// An impact figure ("50,000+ Happy Customers") on the Our Story page.
#[derive(Debug, Clone, Serialize)]
pub struct ImpactMetric {
    pub id: i32,
    pub page_id: StoryPageId,
    pub number: String,
    pub label: String,
    pub icon: String,
    pub display_order: i32,
}

/// The FAQ page with nested categories and items.
#[derive(Debug, Clone, Serialize)]
pub struct FaqPage {
    pub id: FaqPageId,
    pub title: String,
    pub subtitle: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub categories: Vec<FaqCategory>,
}

/// A group of related FAQ items.
#[derive(Debug, Clone, Serialize)]
pub struct FaqCategory {
    pub id: FaqCategoryId,
    pub page_id: FaqPageId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub display_order: i32,
    pub is_active: bool,
    pub items: Vec<FaqItem>,
}

/// A single question and answer.
#[derive(Debug, Clone, Serialize)]
pub struct FaqItem {
    pub id: FaqItemId,
    pub category_id: FaqCategoryId,
    pub question: String,
    pub answer: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
