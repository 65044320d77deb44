//! Decimal money type for prices and order totals.
//!
//! All monetary amounts in the system are decimals with two fractional
//! digits, matching the NUMERIC columns in the database. Floating point is
//! never used for money.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A monetary amount in the shop's display currency.
///
/// Wraps a [`Decimal`] and provides the arithmetic the order pipeline needs:
/// line totals, order totals, and conversion to minor units for Stripe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default, Hash,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a money value from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a money value from whole minor units (e.g. paisa, cents).
    #[must_use]
    pub fn from_minor_units(units: i64) -> Self {
        Self(Decimal::new(units, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Line total for an order item: `unit_price * quantity`.
    #[must_use]
    pub fn line_total(unit_price: Self, quantity: u32) -> Self {
        Self(unit_price.0 * Decimal::from(quantity))
    }

    /// Order total: `subtotal + delivery_fee + tax`.
    #[must_use]
    pub fn order_total(subtotal: Self, delivery_fee: Self, tax: Self) -> Self {
        Self(subtotal.0 + delivery_fee.0 + tax.0)
    }

    /// Convert to whole minor units, rounding half-up to two decimals first.
    ///
    /// Stripe amounts are integers in the smallest currency unit.
    #[must_use]
    pub fn minor_units(&self) -> i64 {
        (self.0 * Decimal::from(100))
            .round()
            .to_i64()
            .unwrap_or(i64::MAX)
    }

    /// Whether the amount is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|m| m.0).sum())
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Money {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Money {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(amount))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Money {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        Money::new(s.parse().unwrap())
    }

    #[test]
    fn test_line_total() {
        assert_eq!(Money::line_total(money("450.00"), 3), money("1350.00"));
    }

    #[test]
    fn test_line_total_zero_quantity() {
        assert_eq!(Money::line_total(money("450.00"), 0), Money::ZERO);
    }

    #[test]
    fn test_order_total_identity() {
        assert_eq!(
            Money::order_total(money("2200.00"), money("150.00"), money("110.00")),
            money("2460.00")
        );
    }

    #[test]
    fn test_minor_units() {
        assert_eq!(money("24.99").minor_units(), 2499);
        assert_eq!(money("0.005").minor_units(), 1);
        assert_eq!(Money::from_minor_units(2499), money("24.99"));
    }

    #[test]
    fn test_sum() {
        let items = [money("100.00"), money("250.50"), money("49.50")];
        let total: Money = items.into_iter().sum();
        assert_eq!(total, money("400.00"));
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(money("5").to_string(), "5.00");
        assert_eq!(money("5.5").to_string(), "5.50");
    }
}
