//! Validated email addresses.
//!
//! Orders and contact submissions key off the customer email, so it is
//! parsed once at the boundary and carried as a type from then on. The
//! check is structural (`local@domain`, bounded length, no whitespace);
//! whether the mailbox exists is the mail server's problem.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why a string failed to parse as an [`Email`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum EmailError {
    /// The input is empty (after trimming).
    #[error("email cannot be empty")]
    Empty,
    /// The input exceeds the RFC 5321 length limit.
    #[error("email must be at most {0} characters")]
    TooLong(usize),
    /// The input is not of the form `local@domain`.
    #[error("email must look like local@domain")]
    Malformed,
    /// The input contains whitespace.
    #[error("email cannot contain whitespace")]
    Whitespace,
}

/// A structurally valid email address.
///
/// ## Examples
///
/// ```
/// use sweet_dessert_core::Email;
///
/// let email = Email::parse("noor@sweetdessert.shop").unwrap();
/// assert_eq!(email.domain(), "sweetdessert.shop");
/// assert!(Email::parse("not-an-email").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum address length per RFC 5321.
    pub const MAX_LENGTH: usize = 254;

    /// Parse and validate an email address.
    ///
    /// Leading and trailing whitespace is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns an [`EmailError`] describing the first structural problem
    /// found.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(EmailError::Empty);
        }
        if trimmed.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong(Self::MAX_LENGTH));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(EmailError::Whitespace);
        }

        match trimmed.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(trimmed.to_owned()))
            }
            _ => Err(EmailError::Malformed),
        }
    }

    /// The address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// The part before the `@`.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map_or("", |(local, _)| local)
    }

    /// The part after the `@`.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Email {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Email {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        // Rows were validated on the way in; re-validation happens in the
        // repository layer where a bad row becomes a DataCorruption error.
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Email {
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

    #[test]
    fn test_accepts_ordinary_addresses() {
        for input in [
            "noor@sweetdessert.shop",
            "customer.name+orders@example.co.uk",
            "a@b",
        ] {
            assert!(Email::parse(input).is_ok(), "{input} should parse");
        }
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let email = Email::parse("  noor@sweetdessert.shop  ").unwrap();
        assert_eq!(email.as_str(), "noor@sweetdessert.shop");
    }

    #[test]
    fn test_rejects_empty_and_blank() {
        assert!(matches!(Email::parse(""), Err(EmailError::Empty)));
        assert!(matches!(Email::parse("   "), Err(EmailError::Empty)));
    }

    #[test]
    fn test_rejects_overlong_addresses() {
        let input = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(Email::parse(&input), Err(EmailError::TooLong(_))));
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        for input in ["not-an-email", "@example.com", "noor@"] {
            assert!(
                matches!(Email::parse(input), Err(EmailError::Malformed)),
                "{input} should be malformed"
            );
        }
    }

    #[test]
    fn test_rejects_interior_whitespace() {
        assert!(matches!(
            Email::parse("noor smith@example.com"),
            Err(EmailError::Whitespace)
        ));
    }

    #[test]
    fn test_parts() {
        let email = Email::parse("orders@sweetdessert.shop").unwrap();
        assert_eq!(email.local_part(), "orders");
        assert_eq!(email.domain(), "sweetdessert.shop");
    }

    #[test]
    fn test_serde_is_transparent() {
        let email = Email::parse("noor@sweetdessert.shop").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"noor@sweetdessert.shop\"");
        let back: Email = serde_json::from_str(&json).unwrap();
        assert_eq!(back, email);
    }
}
