//! Human-facing order numbers.
//!
//! Order numbers have the form `<PREFIX>-<YYYYMMDD>-<NNN>`: a type prefix
//! (`DL` for delivery, `TA` for takeaway), the order date, and a per-day,
//! per-type sequence starting at 001. The database enforces uniqueness; this
//! type owns formatting, parsing, and computing the next sequence value.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::status::OrderType;

/// Errors that can occur when parsing an [`OrderNumber`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum OrderNumberError {
    /// The string does not have three dash-separated parts.
    #[error("order number must have the form PREFIX-YYYYMMDD-NNN")]
    Malformed,
    /// The prefix is not a known order type.
    #[error("unknown order number prefix: {0}")]
    UnknownPrefix(String),
    /// The date segment is not a valid calendar date.
    #[error("invalid date in order number: {0}")]
    InvalidDate(String),
    /// The sequence segment is not a positive integer.
    #[error("invalid sequence in order number: {0}")]
    InvalidSequence(String),
}

/// A validated order number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Build an order number from its components.
    ///
    /// The sequence is zero-padded to three digits but grows naturally past
    /// 999 orders in a day.
    #[must_use]
    pub fn compose(order_type: OrderType, date: NaiveDate, sequence: u32) -> Self {
        Self(format!(
            "{}-{}-{:03}",
            order_type.number_prefix(),
            date.format("%Y%m%d"),
            sequence
        ))
    }

    /// The first order number of a day for the given type.
    #[must_use]
    pub fn first_of_day(order_type: OrderType, date: NaiveDate) -> Self {
        Self::compose(order_type, date, 1)
    }

    /// The number following this one within the same day and type.
    ///
    /// # Errors
    ///
    /// Returns an error if this number does not parse (e.g. hand-edited data).
    pub fn next(&self) -> Result<Self, OrderNumberError> {
        let (order_type, date, sequence) = self.components()?;
        Ok(Self::compose(order_type, date, sequence + 1))
    }

    /// Parse an order number string, validating all three segments.
    ///
    /// # Errors
    ///
    /// Returns an error describing which segment is invalid.
    pub fn parse(s: &str) -> Result<Self, OrderNumberError> {
        let candidate = Self(s.to_owned());
        candidate.components()?;
        Ok(candidate)
    }

    /// Split into (type, date, sequence).
    ///
    /// # Errors
    ///
    /// Returns an error if any segment is invalid.
    pub fn components(&self) -> Result<(OrderType, NaiveDate, u32), OrderNumberError> {
        let mut parts = self.0.splitn(3, '-');
        let (Some(prefix), Some(date_str), Some(seq_str)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(OrderNumberError::Malformed);
        };

        let order_type = match prefix {
            "DL" => OrderType::Delivery,
            "TA" => OrderType::Takeaway,
            other => return Err(OrderNumberError::UnknownPrefix(other.to_owned())),
        };

        let date = NaiveDate::parse_from_str(date_str, "%Y%m%d")
            .map_err(|_| OrderNumberError::InvalidDate(date_str.to_owned()))?;

        let sequence: u32 = seq_str
            .parse()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| OrderNumberError::InvalidSequence(seq_str.to_owned()))?;

        Ok((order_type, date, sequence))
    }

    /// The order number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `PREFIX-YYYYMMDD` portion shared by all of a day's orders of one
    /// type, used as a `LIKE` prefix when finding the day's latest number.
    #[must_use]
    pub fn day_prefix(order_type: OrderType, date: NaiveDate) -> String {
        format!("{}-{}", order_type.number_prefix(), date.format("%Y%m%d"))
    }
}

impl std::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for OrderNumber {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for OrderNumber {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for OrderNumber {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_compose() {
        let number = OrderNumber::compose(OrderType::Takeaway, date(2026, 3, 14), 7);
        assert_eq!(number.as_str(), "TA-20260314-007");

        let number = OrderNumber::compose(OrderType::Delivery, date(2026, 3, 14), 1);
        assert_eq!(number.as_str(), "DL-20260314-001");
    }

    #[test]
    fn test_sequence_grows_past_three_digits() {
        let number = OrderNumber::compose(OrderType::Delivery, date(2026, 3, 14), 1042);
        assert_eq!(number.as_str(), "DL-20260314-1042");
        assert_eq!(number.components().unwrap().2, 1042);
    }

    #[test]
    fn test_next() {
        let first = OrderNumber::first_of_day(OrderType::Delivery, date(2026, 3, 14));
        let second = first.next().unwrap();
        assert_eq!(second.as_str(), "DL-20260314-002");
        assert_ne!(first, second);
    }

    #[test]
    fn test_parse_roundtrip() {
        let number = OrderNumber::parse("TA-20260314-012").unwrap();
        let (order_type, day, seq) = number.components().unwrap();
        assert_eq!(order_type, OrderType::Takeaway);
        assert_eq!(day, date(2026, 3, 14));
        assert_eq!(seq, 12);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            OrderNumber::parse("garbage"),
            Err(OrderNumberError::Malformed)
        ));
        assert!(matches!(
            OrderNumber::parse("XX-20260314-001"),
            Err(OrderNumberError::UnknownPrefix(_))
        ));
        assert!(matches!(
            OrderNumber::parse("DL-20261399-001"),
            Err(OrderNumberError::InvalidDate(_))
        ));
        assert!(matches!(
            OrderNumber::parse("DL-20260314-000"),
            Err(OrderNumberError::InvalidSequence(_))
        ));
    }

    #[test]
    fn test_day_prefix() {
        assert_eq!(
            OrderNumber::day_prefix(OrderType::Takeaway, date(2026, 3, 14)),
            "TA-20260314"
        );
    }
}
