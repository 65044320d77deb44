//! Checkout service: item validation, totals, and order creation.
//!
//! The server is the source of truth for prices. Submitted items are
//! re-priced against the catalog, the delivery fee and tax come from the
//! configured [`PricingPolicy`], and the invariant
//! `total = subtotal + delivery_fee + tax` always holds for stored orders.
//! A client-supplied expected total is checked and rejected on mismatch.

use serde::Deserialize;
use sqlx::PgPool;
use tracing::instrument;

use sweet_dessert_core::{DessertItemId, Email, EmailError, Money, OrderType, PaymentMethod};

use crate::config::PricingPolicy;
use crate::db::orders::{NewOrder, NewOrderItem};
use crate::db::{CatalogRepository, OrderRepository, RepositoryError};
use crate::models::orders::Order;

/// Errors that can occur during checkout.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// No items were submitted.
    #[error("order must contain at least one item")]
    EmptyOrder,

    /// An item's quantity is zero.
    #[error("item quantity must be at least 1")]
    ZeroQuantity,

    /// A submitted dessert doesn't exist or is unavailable.
    #[error("product {0} is not available")]
    UnavailableProduct(DessertItemId),

    /// The client's expected total disagrees with the server's computation.
    #[error("total mismatch: expected {expected}, computed {computed}")]
    TotalMismatch { expected: Money, computed: Money },

    /// Delivery orders need an address.
    #[error("delivery orders require a delivery address")]
    MissingAddress,

    /// The customer email is invalid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Database error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// A line item as submitted by the client: just the product and quantity.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutItem {
    pub dessert_item_id: DessertItemId,
    pub quantity: u32,
    #[serde(default)]
    pub customizations: serde_json::Value,
}

/// A full checkout submission.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    /// Overridden by the route (delivery vs takeaway endpoints).
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(default)]
    pub delivery_address: Option<serde_json::Value>,
    #[serde(default)]
    pub pickup_time: String,
    #[serde(default)]
    pub special_instructions: String,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub payment_intent_id: Option<String>,
    /// Client-side total for cross-checking; optional.
    #[serde(default)]
    pub expected_total: Option<Money>,
    pub items: Vec<CheckoutItem>,
}

/// Server-computed totals for a set of items.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CheckoutQuote {
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub tax: Money,
    pub total: Money,
    /// Re-priced items ready for order creation.
    #[serde(skip)]
    pub items: Vec<NewOrderItem>,
}

/// Checkout service.
pub struct CheckoutService<'a> {
    pool: &'a PgPool,
    pricing: PricingPolicy,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, pricing: PricingPolicy) -> Self {
        Self { pool, pricing }
    }

    /// Price a set of items for an order type, validating availability.
    ///
    /// # Errors
    ///
    /// Returns a `CheckoutError` for empty orders, zero quantities, or
    /// unavailable products.
    #[instrument(skip(self, items), fields(item_count = items.len()))]
    pub async fn quote(
        &self,
        items: &[CheckoutItem],
        order_type: OrderType,
    ) -> Result<CheckoutQuote, CheckoutError> {
        if items.is_empty() {
            return Err(CheckoutError::EmptyOrder);
        }

        let catalog = CatalogRepository::new(self.pool);
        let mut priced = Vec::with_capacity(items.len());

        for item in items {
            if item.quantity == 0 {
                return Err(CheckoutError::ZeroQuantity);
            }

            let dessert = catalog
                .get_dessert(item.dessert_item_id)
                .await?
                .filter(|d| d.available)
                .ok_or(CheckoutError::UnavailableProduct(item.dessert_item_id))?;

            priced.push(NewOrderItem {
                product_name: dessert.name,
                product_image: dessert.image,
                unit_price: dessert.price,
                quantity: item.quantity,
                customizations: item.customizations.clone(),
            });
        }

        let subtotal: Money = priced
            .iter()
            .map(|i| Money::line_total(i.unit_price, i.quantity))
            .sum();
        let delivery_fee = match order_type {
            OrderType::Delivery => self.pricing.delivery_fee_for(subtotal),
            OrderType::Takeaway => Money::ZERO,
        };
        let tax = self.pricing.tax_for(subtotal);
        let total = Money::order_total(subtotal, delivery_fee, tax);

        Ok(CheckoutQuote {
            subtotal,
            delivery_fee,
            tax,
            total,
            items: priced,
        })
    }

    /// Validate a checkout submission and create the order.
    ///
    /// # Errors
    ///
    /// Returns a `CheckoutError` if validation fails, including
    /// `TotalMismatch` when the client's expected total disagrees with the
    /// server's computation.
    #[instrument(skip(self, request), fields(order_type = %request.order_type))]
    pub async fn place_order(&self, request: CheckoutRequest) -> Result<Order, CheckoutError> {
        let customer_email = Email::parse(request.customer_email.trim())?;

        if request.order_type == OrderType::Delivery && request.delivery_address.is_none() {
            return Err(CheckoutError::MissingAddress);
        }

        let quote = self.quote(&request.items, request.order_type).await?;

        if let Some(expected) = request.expected_total {
            if expected != quote.total {
                return Err(CheckoutError::TotalMismatch {
                    expected,
                    computed: quote.total,
                });
            }
        }

        let repo = OrderRepository::new(self.pool);
        let order = repo
            .create(NewOrder {
                customer_name: request.customer_name.trim().to_string(),
                customer_email,
                customer_phone: request.customer_phone.trim().to_string(),
                order_type: request.order_type,
                delivery_address: request.delivery_address,
                pickup_time: request.pickup_time,
                special_instructions: request.special_instructions,
                subtotal: quote.subtotal,
                delivery_fee: quote.delivery_fee,
                tax: quote.tax,
                total: quote.total,
                payment_method: request.payment_method,
                stripe_payment_intent_id: request.payment_intent_id,
                items: quote.items,
            })
            .await?;

        tracing::info!(
            order_number = %order.order_number,
            total = %order.total,
            "Order created"
        );

        Ok(order)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        Money::new(s.parse().unwrap())
    }

    fn policy() -> PricingPolicy {
        PricingPolicy {
            delivery_fee: money("200"),
            free_delivery_threshold: money("2500"),
            tax_rate: "0.05".parse().unwrap(),
        }
    }

    // Totals math is exercised here without a database by reproducing the
    // quote arithmetic on pre-priced items.
    fn compute_quote(
        items: &[(Money, u32)],
        order_type: OrderType,
        pricing: &PricingPolicy,
    ) -> (Money, Money, Money, Money) {
        let subtotal: Money = items
            .iter()
            .map(|(price, qty)| Money::line_total(*price, *qty))
            .sum();
        let delivery_fee = match order_type {
            OrderType::Delivery => pricing.delivery_fee_for(subtotal),
            OrderType::Takeaway => Money::ZERO,
        };
        let tax = pricing.tax_for(subtotal);
        let total = Money::order_total(subtotal, delivery_fee, tax);
        (subtotal, delivery_fee, tax, total)
    }

    #[test]
    fn test_total_identity_holds() {
        let (subtotal, delivery_fee, tax, total) = compute_quote(
            &[(money("450"), 2), (money("300"), 1)],
            OrderType::Delivery,
            &policy(),
        );

        assert_eq!(subtotal, money("1200"));
        assert_eq!(delivery_fee, money("200"));
        assert_eq!(tax, money("60.00"));
        assert_eq!(total, subtotal + delivery_fee + tax);
        assert_eq!(total, money("1460.00"));
    }

    #[test]
    fn test_takeaway_has_no_delivery_fee() {
        let (_, delivery_fee, _, _) =
            compute_quote(&[(money("450"), 2)], OrderType::Takeaway, &policy());
        assert_eq!(delivery_fee, Money::ZERO);
    }

    #[test]
    fn test_large_delivery_order_gets_free_delivery() {
        let (subtotal, delivery_fee, _, _) =
            compute_quote(&[(money("1500"), 2)], OrderType::Delivery, &policy());
        assert_eq!(subtotal, money("3000"));
        assert_eq!(delivery_fee, Money::ZERO);
    }
}
