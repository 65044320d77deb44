//! Catalog models: categories, dessert items, and social proof content.

use chrono::{DateTime, Utc};
use serde::Serialize;

use sweet_dessert_core::{
    CategoryId, DessertItemId, Money, RecommendationId, TestimonialId,
};

/// A product category (cakes, brownies, cookies, ...).
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: String,
    pub display_order: i32,
    /// Number of available desserts in this category.
    pub product_count: i64,
    pub created_at: DateTime<Utc>,
}

/// A dessert on the menu.
#[derive(Debug, Clone, Serialize)]
pub struct DessertItem {
    pub id: DessertItemId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Money,
    pub category_id: CategoryId,
    /// Denormalized category name for list responses.
    pub category_name: String,
    pub image: String,
    pub rating: rust_decimal::Decimal,
    pub reviews_count: i32,
    pub dietary_info: Vec<String>,
    pub ingredients: Vec<String>,
    pub allergens: Vec<String>,
    pub preparation_minutes: i32,
    pub featured: bool,
    pub seasonal: bool,
    pub best_seller: bool,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DessertItem {
    /// Description truncated for chat/list contexts.
    #[must_use]
    pub fn short_description(&self, max: usize) -> String {
        if self.description.len() <= max {
            return self.description.clone();
        }
        let cut = self
            .description
            .char_indices()
            .take_while(|(i, _)| *i < max)
            .last()
            .map_or(0, |(i, c)| i + c.len_utf8());
        format!("{}...", &self.description[..cut])
    }
}

/// A customer review shown on the home page once approved.
#[derive(Debug, Clone, Serialize)]
pub struct Testimonial {
    pub id: TestimonialId,
    pub name: String,
    pub avatar: String,
    pub rating: i32,
    pub text: String,
    pub dessert_item_id: Option<DessertItemId>,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

/// A chef's pick, optionally tied to a dessert.
#[derive(Debug, Clone, Serialize)]
pub struct ChefRecommendation {
    pub id: RecommendationId,
    pub chef_name: String,
    pub chef_title: String,
    pub chef_image: String,
    pub text: String,
    pub dessert_item_id: Option<DessertItemId>,
    pub is_featured: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dessert_with_description(description: &str) -> DessertItem {
        DessertItem {
            id: DessertItemId::new(1),
            name: "Molten Chocolate Cake".to_string(),
            slug: "molten-chocolate-cake".to_string(),
            description: description.to_string(),
            price: Money::from_minor_units(45000),
            category_id: CategoryId::new(1),
            category_name: "Cakes".to_string(),
            image: String::new(),
            rating: rust_decimal::Decimal::ZERO,
            reviews_count: 0,
            dietary_info: vec![],
            ingredients: vec![],
            allergens: vec![],
            preparation_minutes: 20,
            featured: false,
            seasonal: false,
            best_seller: false,
            available: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_short_description_no_truncation() {
        let item = dessert_with_description("Rich and warm.");
        assert_eq!(item.short_description(100), "Rich and warm.");
    }

    #[test]
    fn test_short_description_truncates() {
        let item = dessert_with_description(&"a".repeat(200));
        let short = item.short_description(100);
        assert!(short.ends_with("..."));
        assert!(short.len() <= 104);
    }
}
