//! Fuzzy product matching and FAQ relevance scoring.
//!
//! Pure string logic, separated from the db layer so it can be tested
//! without a database. The heuristics are deliberately simple: normalized
//! substring containment first, then significant-word overlap.

use serde::Serialize;

use sweet_dessert_core::{DessertItemId, Money};

/// A lightweight product summary for in-memory matching.
#[derive(Debug, Clone)]
pub struct ProductSummary {
    pub id: DessertItemId,
    pub name: String,
    pub price: Money,
    pub category: String,
    pub image: String,
}

/// Words too common in dessert names to count as distinguishing.
const COMMON_WORDS: &[&str] = &["cake", "the", "and", "with"];

/// Minimum length for a word to be considered significant.
const MIN_SIGNIFICANT_LENGTH: usize = 4;

/// Key phrases whose presence in both the question and an FAQ entry counts
/// as a strong relevance signal.
const FAQ_KEY_PHRASES: &[&str] = &[
    "delivery", "payment", "order", "cancel", "refund", "hours", "pickup", "custom", "allergy",
    "vegan",
];

/// Normalize text for matching: lowercase, hyphens to spaces, collapsed
/// whitespace.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .replace('-', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Significant words of a product name: longer than three characters and
/// not in the common-word list.
fn significant_words(normalized_name: &str) -> Vec<&str> {
    normalized_name
        .split_whitespace()
        .filter(|w| w.len() >= MIN_SIGNIFICANT_LENGTH && !COMMON_WORDS.contains(w))
        .collect()
}

/// Find the product a message mentions, if any.
///
/// Two passes over the catalog:
/// 1. The full normalized product name appears in the message.
/// 2. The product has at least two significant words and every one of them
///    appears in the message ("choco fudge cake" matches "Choco-Fudge Cake").
///
/// Returns the first match; one product per turn keeps the cart predictable.
#[must_use]
pub fn find_mentioned_product<'p>(
    message: &str,
    products: &'p [ProductSummary],
) -> Option<&'p ProductSummary> {
    let normalized_message = normalize(message);

    for product in products {
        let normalized_name = normalize(&product.name);
        if normalized_message.contains(&normalized_name) {
            return Some(product);
        }

        let words = significant_words(&normalized_name);
        if words.len() >= 2 && words.iter().all(|w| normalized_message.contains(w)) {
            return Some(product);
        }
    }

    None
}

/// A scored FAQ match returned to the client.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredFaq {
    pub question: String,
    pub answer: String,
    pub category: String,
    pub score: u32,
}

/// Score FAQ entries against a message and return the best matches.
///
/// Scoring:
/// - each word shared between the message and the question: +2
/// - a key phrase present in both the message and the question: +3
/// - a key phrase present in the message and the answer: +1
/// - any message word longer than three characters appearing in the
///   question: +2 (once)
///
/// Entries scoring zero are dropped; at most `limit` results are returned,
/// best first.
#[must_use]
pub fn score_faqs(
    message: &str,
    faqs: &[(String, String, String)],
    limit: usize,
) -> Vec<ScoredFaq> {
    let message_lower = message.to_lowercase();
    let message_words: Vec<&str> = message_lower.split_whitespace().collect();

    let mut scored: Vec<ScoredFaq> = faqs
        .iter()
        .filter_map(|(question, answer, category)| {
            let question_lower = question.to_lowercase();
            let answer_lower = answer.to_lowercase();

            let mut score = 0u32;

            let question_words: Vec<&str> = question_lower.split_whitespace().collect();
            let overlap = message_words
                .iter()
                .filter(|w| question_words.contains(w))
                .count();
            score += u32::try_from(overlap).unwrap_or(u32::MAX).saturating_mul(2);

            for phrase in FAQ_KEY_PHRASES {
                if message_lower.contains(phrase) {
                    if question_lower.contains(phrase) {
                        score += 3;
                    }
                    if answer_lower.contains(phrase) {
                        score += 1;
                    }
                }
            }

            if message_words
                .iter()
                .any(|w| w.len() > 3 && question_lower.contains(*w))
            {
                score += 2;
            }

            (score > 0).then(|| ScoredFaq {
                question: question.clone(),
                answer: answer.clone(),
                category: category.clone(),
                score,
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i32, name: &str) -> ProductSummary {
        ProductSummary {
            id: DessertItemId::new(id),
            name: name.to_string(),
            price: Money::from_minor_units(45000),
            category: "Cakes".to_string(),
            image: String::new(),
        }
    }

    fn catalog() -> Vec<ProductSummary> {
        vec![
            product(1, "All-Chocolate Dreamcake"),
            product(2, "Strawberry Shortcake"),
            product(3, "Salted Caramel Brownie"),
            product(4, "Mini Donuts"),
        ]
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("All-Chocolate  Dreamcake"), "all chocolate dreamcake");
    }

    #[test]
    fn test_verbatim_mention_is_found() {
        let products = catalog();
        let hit = find_mentioned_product("I want the Strawberry Shortcake please", &products);
        assert_eq!(hit.map(|p| p.id), Some(DessertItemId::new(2)));
    }

    #[test]
    fn test_hyphenated_name_matches_spaced_mention() {
        let products = catalog();
        let hit = find_mentioned_product("add the all chocolate dreamcake to my cart", &products);
        assert_eq!(hit.map(|p| p.id), Some(DessertItemId::new(1)));
    }

    #[test]
    fn test_significant_word_overlap_matches() {
        let products = catalog();
        // "salted" and "caramel" and "brownie" are the significant words.
        let hit = find_mentioned_product("one salted caramel brownie to go", &products);
        assert_eq!(hit.map(|p| p.id), Some(DessertItemId::new(3)));
    }

    #[test]
    fn test_partial_overlap_does_not_match() {
        let products = catalog();
        // Only one significant word ("caramel") appears.
        let hit = find_mentioned_product("do you have anything with caramel?", &products);
        assert!(hit.is_none());
    }

    #[test]
    fn test_no_mention_returns_none() {
        let products = catalog();
        assert!(find_mentioned_product("what are your opening hours", &products).is_none());
    }

    fn faqs() -> Vec<(String, String, String)> {
        vec![
            (
                "What is your delivery fee?".to_string(),
                "Free delivery on orders above Rs. 2500, otherwise Rs. 150-250.".to_string(),
                "Delivery".to_string(),
            ),
            (
                "Do you accept card payments?".to_string(),
                "We accept all major cards via Stripe, and cash for pickup orders.".to_string(),
                "Payment".to_string(),
            ),
            (
                "Can I order a custom cake?".to_string(),
                "Yes, with 24-48 hours advance notice.".to_string(),
                "Orders".to_string(),
            ),
        ]
    }

    #[test]
    fn test_faq_scoring_ranks_delivery_question_first() {
        let results = score_faqs("how much is the delivery fee?", &faqs(), 3);
        assert!(!results.is_empty());
        assert_eq!(results.first().map(|f| f.category.as_str()), Some("Delivery"));
    }

    #[test]
    fn test_faq_scoring_drops_irrelevant() {
        let results = score_faqs("zzz qqq", &faqs(), 3);
        assert!(results.is_empty());
    }

    #[test]
    fn test_faq_scoring_respects_limit() {
        let results = score_faqs("delivery payment custom order", &faqs(), 2);
        assert!(results.len() <= 2);
    }
}
