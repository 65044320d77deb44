//! Keyword-based intent detection.
//!
//! This is the fallback path used whenever the provider is unconfigured,
//! unreachable, or returns something unparseable. It is a linear scan over
//! keyword tables with a fixed priority: greeting, checkout, order, list,
//! FAQ, then general chat.

use serde::{Deserialize, Serialize};

use super::types::{Confidence, IntentAnalysis};

/// The chatbot's classification of a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Wants to order/buy a specific product.
    Order,
    /// Wants to see/list products.
    ListProducts,
    /// Wants to proceed to payment.
    Checkout,
    /// Asking about policies, delivery, payment, hours.
    Faq,
    /// Wants details about a product.
    ProductInfo,
    /// Starting the conversation.
    Greeting,
    /// Unclear or off-topic.
    GeneralChat,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Order => "order",
            Self::ListProducts => "list_products",
            Self::Checkout => "checkout",
            Self::Faq => "faq",
            Self::ProductInfo => "product_info",
            Self::Greeting => "greeting",
            Self::GeneralChat => "general_chat",
        };
        write!(f, "{s}")
    }
}

const GREETING_KEYWORDS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
];

const CHECKOUT_KEYWORDS: &[&str] = &[
    "checkout",
    "payment",
    "pay now",
    "proceed",
    "done ordering",
];

const ORDER_KEYWORDS: &[&str] = &[
    "order", "buy", "want", "add", "get", "take", "give me", "i'll have",
];

const LIST_KEYWORDS: &[&str] = &[
    "show",
    "list",
    "what do you have",
    "menu",
    "available",
    "all",
];

const FAQ_KEYWORDS: &[&str] = &[
    "delivery",
    "hours",
    "open",
    "payment method",
    "accept",
    "policy",
    "refund",
    "cancel",
];

/// Messages short enough to count as bare greetings.
const MAX_GREETING_LENGTH: usize = 20;

/// Phrases that unambiguously mean "take me to payment", checked before
/// anything else when interpreting a turn mid-order.
pub const CHECKOUT_PHRASES: &[&str] = &[
    "yes proceed",
    "yes, proceed",
    "yes please",
    "yes to payment",
    "yes to checkout",
    "proceed to checkout",
    "proceed to payment",
    "take me to checkout",
    "take me to payment",
    "take me to the payment",
    "go to checkout",
    "go to payment",
    "checkout now",
    "pay now",
    "payment now",
    "complete order",
    "finalize order",
    "yes take me",
    "payment page",
    "checkout page",
    "yes, payment",
    "yes payment",
    "yes, checkout",
    "yes checkout",
];

/// Generic order phrasings that name no product; the assistant should ask
/// which dessert instead of guessing.
const GENERIC_ORDER_PHRASES: &[&str] = &[
    "order a dessert",
    "order dessert",
    "order something",
    "order anything",
    "buy a dessert",
    "buy dessert",
    "get a dessert",
    "get dessert",
    "want a dessert",
    "want dessert",
    "want something sweet",
];

/// Classify a message with keyword heuristics only.
///
/// The result always carries `fallback: true` and low confidence; callers
/// that need product or category extraction do their own matching against
/// the catalog.
#[must_use]
pub fn fallback_intent(message: &str) -> IntentAnalysis {
    let lower = message.to_lowercase();
    let lower = lower.trim();

    let intent = if contains_any(lower, GREETING_KEYWORDS) && lower.len() < MAX_GREETING_LENGTH {
        Intent::Greeting
    } else if contains_any(lower, CHECKOUT_KEYWORDS) {
        Intent::Checkout
    } else if contains_any(lower, ORDER_KEYWORDS) {
        Intent::Order
    } else if contains_any(lower, LIST_KEYWORDS) {
        Intent::ListProducts
    } else if contains_any(lower, FAQ_KEYWORDS) {
        Intent::Faq
    } else {
        Intent::GeneralChat
    };

    tracing::debug!(%intent, "Fallback intent detection");

    IntentAnalysis {
        intent,
        confidence: Confidence::Low,
        product_mentioned: None,
        quantity: 1,
        category_filter: None,
        reason: "Fallback keyword-based detection".to_string(),
        fallback: true,
    }
}

/// Whether the message is an unambiguous "take me to payment" phrase.
#[must_use]
pub fn is_checkout_phrase(message: &str) -> bool {
    let lower = message.to_lowercase();
    contains_any(&lower, CHECKOUT_PHRASES)
}

/// Whether the message asks for "a dessert" without naming one.
#[must_use]
pub fn is_generic_order_request(message: &str) -> bool {
    let lower = message.to_lowercase();
    contains_any(&lower, GENERIC_ORDER_PHRASES)
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_products_intent() {
        assert_eq!(fallback_intent("show me all cakes").intent, Intent::ListProducts);
        assert_eq!(
            fallback_intent("what do you have today?").intent,
            Intent::ListProducts
        );
    }

    #[test]
    fn test_order_intent() {
        assert_eq!(
            fallback_intent("I want the chocolate cake").intent,
            Intent::Order
        );
        assert_eq!(fallback_intent("can I buy a brownie").intent, Intent::Order);
    }

    #[test]
    fn test_order_beats_list_when_both_match() {
        // "I want to see..." contains both "want" and "show"-adjacent words;
        // order keywords win so adding to cart isn't missed.
        assert_eq!(
            fallback_intent("I want all the brownies").intent,
            Intent::Order
        );
    }

    #[test]
    fn test_greeting_only_for_short_messages() {
        assert_eq!(fallback_intent("hi").intent, Intent::Greeting);
        assert_eq!(fallback_intent("hello there").intent, Intent::Greeting);
        // Long messages that happen to contain "hi" aren't greetings.
        assert_ne!(
            fallback_intent("hi, please tell me about your delivery policy").intent,
            Intent::Greeting
        );
    }

    #[test]
    fn test_checkout_intent() {
        assert_eq!(
            fallback_intent("proceed to payment").intent,
            Intent::Checkout
        );
    }

    #[test]
    fn test_faq_intent() {
        assert_eq!(
            fallback_intent("is there a delivery fee?").intent,
            Intent::Faq
        );
        assert_eq!(
            fallback_intent("can you cancel my booking").intent,
            Intent::Faq
        );
    }

    #[test]
    fn test_general_chat_default() {
        assert_eq!(
            fallback_intent("the weather is nice").intent,
            Intent::GeneralChat
        );
    }

    #[test]
    fn test_fallback_flag_set() {
        assert!(fallback_intent("hello").fallback);
    }

    #[test]
    fn test_checkout_phrases() {
        assert!(is_checkout_phrase("Yes, proceed"));
        assert!(is_checkout_phrase("take me to the payment"));
        assert!(!is_checkout_phrase("what is a checkout counter")); // "checkout now" etc. only
    }

    #[test]
    fn test_generic_order_request() {
        assert!(is_generic_order_request("I want to order a dessert"));
        assert!(is_generic_order_request("get me something sweet, I want something sweet"));
        assert!(!is_generic_order_request("I want the tiramisu"));
    }
}
