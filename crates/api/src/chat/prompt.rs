//! Prompt assembly for the chat provider.

use crate::db::search::SearchHit;
use crate::models::user::CurrentUser;

use super::matcher::ScoredFaq;

/// Maximum length of a context snippet taken from a search hit.
const CONTEXT_SNIPPET_LENGTH: usize = 300;

/// Build the intent-classification prompt for a message.
#[must_use]
pub fn intent_prompt(message: &str, product_names: &[String]) -> String {
    let product_list = if product_names.is_empty() {
        "various desserts, cakes, brownies, cookies".to_string()
    } else {
        product_names
            .iter()
            .take(25)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        r#"Analyze this user message for a dessert shop chatbot and classify the intent.

**Available Products:** {product_list}

**User Message:** "{message}"

**Intent Categories:**
- order: User wants to ORDER/BUY a specific product (e.g., "I want chocolate cake", "add brownie to cart")
- list_products: User wants to SEE/LIST products (e.g., "show me cakes", "what do you have")
- checkout: User wants to PROCEED TO PAYMENT (e.g., "checkout", "proceed to payment")
- faq: Questions about POLICIES, DELIVERY, PAYMENT, HOURS (e.g., "delivery fee?", "do you accept cards")
- product_info: Wants DETAILS about a product (e.g., "what's in this cake", "is it vegan")
- greeting: Starting conversation (e.g., "hi", "hello")
- general_chat: Unclear intent or off-topic

Analyze the message and provide structured classification."#
    )
}

/// Build the system prompt for the streamed reply.
///
/// Combines the semantic-search context, any matched FAQ entries, the
/// session's auth state, and the store's standing policies.
#[must_use]
pub fn system_prompt(
    context: &[SearchHit],
    faqs: &[ScoredFaq],
    user: Option<&CurrentUser>,
) -> String {
    let context_text = if context.is_empty() {
        "No specific products found.".to_string()
    } else {
        context
            .iter()
            .map(|hit| {
                let snippet: String = hit.body.chars().take(CONTEXT_SNIPPET_LENGTH).collect();
                format!(
                    "**{}** (Category: {}, Price: Rs. {})\n{snippet}...",
                    hit.product_name, hit.category, hit.price
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    let faq_text = if faqs.is_empty() {
        String::new()
    } else {
        let entries = faqs
            .iter()
            .map(|f| format!("Q: {}\nA: {}", f.question, f.answer))
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("\n\n**Relevant FAQ Information:**\n{entries}")
    };

    let auth_status = user.map_or_else(
        || "User is NOT logged in".to_string(),
        |u| format!("User is logged in as **{}**", u.username),
    );

    format!(
        r"You are a friendly and helpful AI assistant for Sweet Dessert, a premium dessert shop.

**Your Role:**
- Help customers discover and learn about our desserts
- Provide information about products, ingredients, pricing, and ordering
- Answer general questions about our store, policies, delivery, and services
- Guide users through the ordering process
- Be warm, enthusiastic, and professional

**Current User Status:** {auth_status}

**Available Menu Items (based on current query):**

{context_text}{faq_text}

**Guidelines:**
1. Use the product information above to answer questions accurately
2. Always mention prices in PKR (Pakistani Rupees) as `Rs. [amount]`
3. If asked about products not in the context, politely mention what we do have available
4. When the user asks to list or show all products in a category, provide a formatted list
5. Be concise but informative - aim for 2-3 sentences unless more detail is requested
6. For general questions (delivery, payment, policies, store info), use the FAQ information above

**General Store Information:**
- Delivery: free on orders above Rs. 2500; standard fee Rs. 150-250 depending on location
- Delivery time: usually 45-60 minutes locally, up to 90 minutes for distant areas
- Payment: all major cards via Stripe, or pay at the store for pickup orders
- Store pickup: order online, pick up in store, pay online or at the counter
- Store hours: open daily 10 AM - 10 PM
- Custom cakes: 24-48 hours advance notice
- Allergens: every product page lists ingredients and allergens
- Cancellation: within 30 minutes of placing the order
- Refunds: contact us within 24 hours for a refund or replacement

**Ordering Process:**
- If the customer wants to order but doesn't name a product, ask which dessert they'd like
- If the customer orders a SPECIFIC product and is LOGGED IN: confirm enthusiastically that it
  was added to their cart, then ALWAYS ask whether they'd like more items or to proceed to checkout
- If the customer wants to order but is NOT logged in, politely ask them to sign up or log in first
- Always confirm the exact product name when adding to cart
- Only indicate a redirect to payment after the user explicitly confirms; never redirect on your own

Respond naturally and helpfully to the customer's query!"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweet_dessert_core::{Money, UserId};

    fn hit(name: &str) -> SearchHit {
        SearchHit {
            product_name: name.to_string(),
            category: "Cakes".to_string(),
            price: Money::from_minor_units(45000),
            body: format!("{name} is a rich dessert."),
            distance: 0.2,
        }
    }

    #[test]
    fn test_intent_prompt_includes_products_and_message() {
        let prompt = intent_prompt(
            "I want a brownie",
            &["Salted Caramel Brownie".to_string()],
        );
        assert!(prompt.contains("Salted Caramel Brownie"));
        assert!(prompt.contains("I want a brownie"));
    }

    #[test]
    fn test_intent_prompt_without_products() {
        let prompt = intent_prompt("hello", &[]);
        assert!(prompt.contains("various desserts"));
    }

    #[test]
    fn test_system_prompt_includes_context() {
        let prompt = system_prompt(&[hit("Tiramisu")], &[], None);
        assert!(prompt.contains("Tiramisu"));
        assert!(prompt.contains("NOT logged in"));
    }

    #[test]
    fn test_system_prompt_shows_username_when_logged_in() {
        let user = CurrentUser {
            id: UserId::new(1),
            username: "noor".to_string(),
            email: sweet_dessert_core::Email::parse("noor@example.com").expect("valid"),
            is_staff: false,
        };
        let prompt = system_prompt(&[], &[], Some(&user));
        assert!(prompt.contains("logged in as **noor**"));
        assert!(prompt.contains("No specific products found."));
    }

    #[test]
    fn test_system_prompt_includes_faqs() {
        let faqs = vec![ScoredFaq {
            question: "Delivery fee?".to_string(),
            answer: "Rs. 200 below Rs. 2500.".to_string(),
            category: "Delivery".to_string(),
            score: 9,
        }];
        let prompt = system_prompt(&[], &faqs, None);
        assert!(prompt.contains("Relevant FAQ Information"));
        assert!(prompt.contains("Delivery fee?"));
    }
}
