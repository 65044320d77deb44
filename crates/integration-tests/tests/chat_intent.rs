//! Integration tests for chat intent classification.
//!
//! These exercise the keyword fallback path, which must behave sensibly on
//! its own because it is what users get whenever the LLM provider is
//! unconfigured or down.

use sweet_dessert_api::chat::intent::{is_checkout_phrase, is_generic_order_request};
use sweet_dessert_api::chat::{Intent, fallback_intent};

// =============================================================================
// Classification Tables
// =============================================================================

#[test]
fn test_order_messages_classify_as_order() {
    let messages = [
        "I want the chocolate cake",
        "can I buy two brownies",
        "give me a tiramisu",
        "add the cheesecake please",
        "I'll have the macarons",
    ];

    for message in messages {
        assert_eq!(
            fallback_intent(message).intent,
            Intent::Order,
            "{message:?} should classify as order"
        );
    }
}

#[test]
fn test_list_messages_classify_as_list_products() {
    let messages = [
        "show me all cakes",
        "what do you have today",
        "list your pastries",
        "can I see the menu",
    ];

    for message in messages {
        assert_eq!(
            fallback_intent(message).intent,
            Intent::ListProducts,
            "{message:?} should classify as list_products"
        );
    }
}

#[test]
fn test_checkout_messages_classify_as_checkout() {
    let messages = ["checkout please", "proceed to payment", "pay now"];

    for message in messages {
        assert_eq!(
            fallback_intent(message).intent,
            Intent::Checkout,
            "{message:?} should classify as checkout"
        );
    }
}

#[test]
fn test_faq_messages_classify_as_faq() {
    let messages = [
        "is there a delivery fee",
        "what are your hours",
        "what's your refund policy",
    ];

    for message in messages {
        assert_eq!(
            fallback_intent(message).intent,
            Intent::Faq,
            "{message:?} should classify as faq"
        );
    }
}

#[test]
fn test_short_greetings_classify_as_greeting() {
    for message in ["hi", "hello", "hey there", "good morning"] {
        assert_eq!(
            fallback_intent(message).intent,
            Intent::Greeting,
            "{message:?} should classify as greeting"
        );
    }
}

#[test]
fn test_off_topic_defaults_to_general_chat() {
    for message in ["the weather is nice today", "tell me a joke"] {
        assert_eq!(
            fallback_intent(message).intent,
            Intent::GeneralChat,
            "{message:?} should classify as general_chat"
        );
    }
}

// =============================================================================
// Priority & Flags
// =============================================================================

#[test]
fn test_order_keywords_beat_list_keywords() {
    // "want" (order) and "all" (list) both appear; order wins.
    assert_eq!(
        fallback_intent("I want all the brownies").intent,
        Intent::Order
    );
}

#[test]
fn test_checkout_keywords_beat_order_keywords() {
    // "payment" (checkout) and "order" (order) both appear; checkout wins
    // so a user finishing an order is not re-prompted for products.
    assert_eq!(
        fallback_intent("payment for my order please").intent,
        Intent::Checkout
    );
}

#[test]
fn test_fallback_results_are_marked() {
    let analysis = fallback_intent("show me the menu");
    assert!(analysis.fallback);
    assert!(analysis.product_mentioned.is_none());
    assert_eq!(analysis.quantity, 1);
}

#[test]
fn test_checkout_phrase_detection() {
    assert!(is_checkout_phrase("Yes, proceed"));
    assert!(is_checkout_phrase("take me to the payment page"));
    assert!(is_checkout_phrase("CHECKOUT NOW"));
    assert!(!is_checkout_phrase("how does checking out work"));
}

#[test]
fn test_generic_order_requests_name_no_product() {
    assert!(is_generic_order_request("I'd like to order a dessert"));
    assert!(is_generic_order_request("I want something sweet"));
    assert!(!is_generic_order_request("I want the strawberry cheesecake"));
}
