//! Order models and the session-backed chat cart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sweet_dessert_core::{
    DessertItemId, Email, Money, OrderId, OrderItemId, OrderNumber, OrderStatus, OrderType,
    PaymentMethod, PaymentStatus,
};

/// A customer order with its line items.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub order_number: OrderNumber,
    pub customer_name: String,
    pub customer_email: Email,
    pub customer_phone: String,
    pub order_type: OrderType,
    /// Structured address for delivery orders, absent for takeaway.
    pub delivery_address: Option<serde_json::Value>,
    /// Preferred pickup time for takeaway orders.
    pub pickup_time: String,
    pub special_instructions: String,
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub tax: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub stripe_payment_intent_id: Option<String>,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Whether the order was paid through Stripe and the charge succeeded.
    #[must_use]
    pub fn is_paid_online(&self) -> bool {
        self.payment_method == PaymentMethod::Online
            && self.payment_status == PaymentStatus::Succeeded
    }

    /// Whether payment is still owed at the store counter.
    #[must_use]
    pub fn is_pending_payment(&self) -> bool {
        self.payment_method == PaymentMethod::Store
            && self.payment_status == PaymentStatus::Pending
    }
}

/// A single line on an order.
///
/// Prices are snapshotted at order time; `total_price` is always
/// `unit_price * quantity` and is recomputed on the server, never trusted
/// from the client.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_name: String,
    pub product_image: String,
    pub unit_price: Money,
    pub quantity: i32,
    pub customizations: serde_json::Value,
    pub total_price: Money,
}

/// An item in the chat assistant's session cart.
///
/// Holds a catalog snapshot; prices are re-validated against the catalog at
/// checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub id: DessertItemId,
    pub name: String,
    pub price: Money,
    pub category: String,
    pub image: String,
    pub quantity: u32,
}

/// Add a product to a cart, bumping the quantity when it is already present.
pub fn add_to_cart(cart: &mut Vec<CartItem>, item: CartItem) -> bool {
    if let Some(existing) = cart.iter_mut().find(|c| c.id == item.id) {
        existing.quantity += item.quantity;
        false
    } else {
        cart.push(item);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart_item(id: i32, name: &str, quantity: u32) -> CartItem {
        CartItem {
            id: DessertItemId::new(id),
            name: name.to_string(),
            price: Money::from_minor_units(45000),
            category: "Cakes".to_string(),
            image: String::new(),
            quantity,
        }
    }

    #[test]
    fn test_add_to_cart_new_item() {
        let mut cart = Vec::new();
        let added = add_to_cart(&mut cart, cart_item(1, "Brownie", 1));
        assert!(added);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_to_cart_bumps_quantity() {
        let mut cart = vec![cart_item(1, "Brownie", 1)];
        let added = add_to_cart(&mut cart, cart_item(1, "Brownie", 2));
        assert!(!added);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.first().map(|c| c.quantity), Some(3));
    }
}
