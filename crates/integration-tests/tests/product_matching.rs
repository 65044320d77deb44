//! Integration tests for product mention matching and FAQ scoring.

use sweet_dessert_api::chat::matcher::{ProductSummary, normalize};
use sweet_dessert_api::chat::{find_mentioned_product, score_faqs};
use sweet_dessert_core::{DessertItemId, Money};

fn product(id: i32, name: &str, category: &str) -> ProductSummary {
    ProductSummary {
        id: DessertItemId::new(id),
        name: name.to_string(),
        price: Money::from_minor_units(45000),
        category: category.to_string(),
        image: String::new(),
    }
}

fn catalog() -> Vec<ProductSummary> {
    vec![
        product(1, "Chocolate Lava Cake", "Cakes"),
        product(2, "Strawberry Cheesecake", "Cakes"),
        product(3, "Macarons Assorted", "Pastries"),
        product(4, "Tiramisu", "Pastries"),
        product(5, "Choco-Fudge Brownie", "Cookies"),
    ]
}

// =============================================================================
// Product Matching
// =============================================================================

#[test]
fn test_verbatim_product_mention_is_found() {
    let products = catalog();

    let cases = [
        ("I want the Chocolate Lava Cake", 1),
        ("one strawberry cheesecake please", 2),
        ("add Tiramisu to my cart", 4),
    ];

    for (message, expected_id) in cases {
        let hit = find_mentioned_product(message, &products);
        assert_eq!(
            hit.map(|p| p.id),
            Some(DessertItemId::new(expected_id)),
            "{message:?} should match product {expected_id}"
        );
    }
}

#[test]
fn test_hyphenated_names_match_spaced_mentions() {
    let products = catalog();
    let hit = find_mentioned_product("I'd love a choco fudge brownie", &products);
    assert_eq!(hit.map(|p| p.id), Some(DessertItemId::new(5)));
}

#[test]
fn test_word_order_does_not_matter_for_significant_words() {
    let products = catalog();
    // "lava" and "chocolate" both appear, in the wrong order.
    let hit = find_mentioned_product("something with lava inside, chocolate ideally", &products);
    assert_eq!(hit.map(|p| p.id), Some(DessertItemId::new(1)));
}

#[test]
fn test_single_shared_word_is_not_enough() {
    let products = catalog();
    // "chocolate" alone is shared with two products but identifies neither.
    assert!(find_mentioned_product("do you have anything chocolate?", &products).is_none());
}

#[test]
fn test_unrelated_message_matches_nothing() {
    let products = catalog();
    assert!(find_mentioned_product("what time do you close", &products).is_none());
    assert!(find_mentioned_product("", &products).is_none());
}

#[test]
fn test_normalize_collapses_hyphens_and_whitespace() {
    assert_eq!(normalize("Choco-Fudge   Brownie"), "choco fudge brownie");
    assert_eq!(normalize("  TIRAMISU "), "tiramisu");
}

// =============================================================================
// FAQ Scoring
// =============================================================================

fn faqs() -> Vec<(String, String, String)> {
    vec![
        (
            "What is your delivery fee?".to_string(),
            "Free delivery on orders above Rs. 2500, otherwise a flat Rs. 200 fee.".to_string(),
            "Delivery & Pickup".to_string(),
        ),
        (
            "What payment methods do you accept?".to_string(),
            "All major cards through our secure checkout, or cash on pickup.".to_string(),
            "Ordering & Payment".to_string(),
        ),
        (
            "Can I order a custom cake?".to_string(),
            "Yes, custom cakes need 3-5 days advance notice.".to_string(),
            "Ordering & Payment".to_string(),
        ),
        (
            "Do you offer vegan desserts?".to_string(),
            "Yes, our Healthy Options category is fully plant-based.".to_string(),
            "Dietary Requirements".to_string(),
        ),
    ]
}

#[test]
fn test_delivery_question_ranks_delivery_faq_first() {
    let results = score_faqs("how much does delivery cost?", &faqs(), 3);
    assert!(!results.is_empty());
    assert_eq!(
        results.first().map(|f| f.category.as_str()),
        Some("Delivery & Pickup")
    );
}

#[test]
fn test_vegan_question_finds_dietary_faq() {
    let results = score_faqs("do you have vegan options?", &faqs(), 3);
    assert!(
        results
            .iter()
            .any(|f| f.category == "Dietary Requirements"),
        "vegan question should surface the dietary FAQ"
    );
}

#[test]
fn test_results_are_sorted_by_score() {
    let results = score_faqs("custom cake order with delivery", &faqs(), 4);
    for pair in results.windows(2) {
        assert!(
            pair[0].score >= pair[1].score,
            "results should be sorted best-first"
        );
    }
}

#[test]
fn test_limit_is_respected() {
    let results = score_faqs("delivery payment custom vegan order", &faqs(), 2);
    assert!(results.len() <= 2);
}

#[test]
fn test_irrelevant_question_returns_nothing() {
    assert!(score_faqs("qwerty asdf", &faqs(), 3).is_empty());
}
