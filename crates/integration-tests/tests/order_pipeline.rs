//! Integration tests for order pricing and numbering.
//!
//! The invariant under test throughout: `total = subtotal + delivery_fee
//! + tax`, with the delivery fee waived above the free-delivery threshold
//! and takeaway orders never charged for delivery.

use sweet_dessert_api::config::PricingPolicy;
use sweet_dessert_core::{Money, OrderNumber, OrderType};

fn money(s: &str) -> Money {
    s.parse::<rust_decimal::Decimal>().map(Money::new).expect("valid decimal")
}

fn policy() -> PricingPolicy {
    PricingPolicy {
        delivery_fee: money("200"),
        free_delivery_threshold: money("2500"),
        tax_rate: "0.05".parse().expect("valid rate"),
    }
}

fn totals(items: &[(Money, u32)], order_type: OrderType) -> (Money, Money, Money, Money) {
    let pricing = policy();
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

// =============================================================================
// Totals
// =============================================================================

#[test]
fn test_total_is_subtotal_plus_fee_plus_tax() {
    let (subtotal, delivery_fee, tax, total) = totals(
        &[(money("450.00"), 2), (money("120.00"), 3)],
        OrderType::Delivery,
    );

    assert_eq!(subtotal, money("1260.00"));
    assert_eq!(delivery_fee, money("200"));
    assert_eq!(tax, money("63.00"));
    assert_eq!(total, subtotal + delivery_fee + tax);
}

#[test]
fn test_takeaway_never_pays_delivery() {
    let (_, delivery_fee, _, _) = totals(&[(money("5000"), 1)], OrderType::Takeaway);
    assert_eq!(delivery_fee, Money::ZERO);

    let (_, delivery_fee, _, _) = totals(&[(money("100"), 1)], OrderType::Takeaway);
    assert_eq!(delivery_fee, Money::ZERO);
}

#[test]
fn test_free_delivery_threshold_is_inclusive() {
    let pricing = policy();
    assert_eq!(pricing.delivery_fee_for(money("2499.99")), money("200"));
    assert_eq!(pricing.delivery_fee_for(money("2500.00")), Money::ZERO);
}

#[test]
fn test_tax_rounds_to_two_decimals() {
    let pricing = policy();
    // 333.33 * 0.05 = 16.6665
    let tax = pricing.tax_for(money("333.33"));
    assert_eq!(tax.to_string(), "16.67");
}

#[test]
fn test_line_total_is_unit_price_times_quantity() {
    assert_eq!(Money::line_total(money("49.99"), 3), money("149.97"));
    assert_eq!(Money::line_total(money("49.99"), 0), Money::ZERO);
}

#[test]
fn test_minor_units_for_stripe() {
    assert_eq!(money("1460.00").minor_units(), 146_000);
    assert_eq!(money("0.01").minor_units(), 1);
}

// =============================================================================
// Order Numbers
// =============================================================================

#[test]
fn test_order_numbers_carry_type_and_date() {
    let date = chrono::NaiveDate::from_ymd_opt(2026, 8, 1).expect("valid date");

    let takeaway = OrderNumber::first_of_day(OrderType::Takeaway, date);
    assert_eq!(takeaway.as_str(), "TA-20260801-001");

    let delivery = OrderNumber::first_of_day(OrderType::Delivery, date);
    assert_eq!(delivery.as_str(), "DL-20260801-001");
}

#[test]
fn test_same_day_sequence_never_repeats() {
    let date = chrono::NaiveDate::from_ymd_opt(2026, 8, 1).expect("valid date");

    let mut current = OrderNumber::first_of_day(OrderType::Delivery, date);
    let mut seen = std::collections::HashSet::new();
    seen.insert(current.as_str().to_string());

    for _ in 0..50 {
        current = current.next().expect("well-formed number");
        assert!(
            seen.insert(current.as_str().to_string()),
            "sequence produced a duplicate: {current}"
        );
    }
}

#[test]
fn test_order_number_roundtrips_through_storage_format() {
    let date = chrono::NaiveDate::from_ymd_opt(2026, 8, 1).expect("valid date");
    let number = OrderNumber::compose(OrderType::Takeaway, date, 42);

    let parsed = OrderNumber::parse(number.as_str()).expect("parses back");
    assert_eq!(parsed, number);

    let (order_type, parsed_date, seq) = parsed.components().expect("valid components");
    assert_eq!(order_type, OrderType::Takeaway);
    assert_eq!(parsed_date, date);
    assert_eq!(seq, 42);
}

#[test]
fn test_hand_edited_numbers_are_rejected() {
    assert!(OrderNumber::parse("ORDER-1").is_err());
    assert!(OrderNumber::parse("DL-2026-001").is_err());
    assert!(OrderNumber::parse("DL-20260801-0").is_err());
}
