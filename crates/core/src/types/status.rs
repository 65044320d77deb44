//! Status enums for orders, payments, and contact submissions.
//!
//! All of these are stored as snake_case text in the database and parsed
//! back through `FromStr`, so a bad row surfaces as a data-corruption error
//! in the repository layer instead of panicking.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a customer order.
///
/// `Ready` and `PickedUp` only apply to takeaway orders; `Shipped` and
/// `Delivered` only to delivery orders. Transitions are driven by admins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Confirmed,
    Ready,
    Shipped,
    Delivered,
    PickedUp,
    Cancelled,
}

impl OrderStatus {
    /// Human-readable label, with takeaway-specific phrasing.
    #[must_use]
    pub const fn display_label(&self, order_type: OrderType) -> &'static str {
        match (self, order_type) {
            (Self::Ready, OrderType::Takeaway) => "Ready for Pickup",
            (Self::PickedUp, OrderType::Takeaway) => "Completed (Picked Up)",
            (Self::Pending, _) => "Pending",
            (Self::Processing, _) => "Processing",
            (Self::Confirmed, _) => "Confirmed",
            (Self::Ready, _) => "Ready",
            (Self::Shipped, _) => "Shipped",
            (Self::Delivered, _) => "Delivered",
            (Self::PickedUp, _) => "Picked Up",
            (Self::Cancelled, _) => "Cancelled",
        }
    }
}

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    #[default]
    Delivery,
    Takeaway,
}

impl OrderType {
    /// Order-number prefix for this type (`DL` for delivery, `TA` for takeaway).
    #[must_use]
    pub const fn number_prefix(&self) -> &'static str {
        match self {
            Self::Delivery => "DL",
            Self::Takeaway => "TA",
        }
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Card payment through Stripe at checkout.
    #[default]
    Online,
    /// Pay at the store when picking up.
    Store,
}

/// State of the payment attached to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Succeeded,
    Failed,
}

/// Topic of a contact-form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ContactTopic {
    #[default]
    General,
    CustomCake,
    Catering,
    Corporate,
    Wedding,
    Complaint,
}

/// Preferred channel for replying to a contact submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PreferredContact {
    #[default]
    Email,
    Phone,
}

macro_rules! text_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let s = match self {
                    $(Self::$variant => $text,)+
                };
                write!(f, "{s}")
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(format!(concat!("invalid ", stringify!($name), ": {}"), s)),
                }
            }
        }
    };
}

text_enum!(OrderStatus {
    Pending => "pending",
    Processing => "processing",
    Confirmed => "confirmed",
    Ready => "ready",
    Shipped => "shipped",
    Delivered => "delivered",
    PickedUp => "picked_up",
    Cancelled => "cancelled",
});

text_enum!(OrderType {
    Delivery => "delivery",
    Takeaway => "takeaway",
});

text_enum!(PaymentMethod {
    Online => "online",
    Store => "store",
});

text_enum!(PaymentStatus {
    Pending => "pending",
    Succeeded => "succeeded",
    Failed => "failed",
});

text_enum!(ContactTopic {
    General => "general",
    CustomCake => "custom-cake",
    Catering => "catering",
    Corporate => "corporate",
    Wedding => "wedding",
    Complaint => "complaint",
});

text_enum!(PreferredContact {
    Email => "email",
    Phone => "phone",
});

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_text_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Confirmed,
            OrderStatus::Ready,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::PickedUp,
            OrderStatus::Cancelled,
        ] {
            let parsed: OrderStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_invalid_status_rejected() {
        assert!("refunded".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_order_type_prefix() {
        assert_eq!(OrderType::Delivery.number_prefix(), "DL");
        assert_eq!(OrderType::Takeaway.number_prefix(), "TA");
    }

    #[test]
    fn test_takeaway_status_labels() {
        assert_eq!(
            OrderStatus::Ready.display_label(OrderType::Takeaway),
            "Ready for Pickup"
        );
        assert_eq!(
            OrderStatus::PickedUp.display_label(OrderType::Takeaway),
            "Completed (Picked Up)"
        );
        assert_eq!(
            OrderStatus::Shipped.display_label(OrderType::Delivery),
            "Shipped"
        );
    }

    #[test]
    fn test_contact_topic_kebab_case() {
        let json = serde_json::to_string(&ContactTopic::CustomCake).unwrap();
        assert_eq!(json, "\"custom-cake\"");
        assert_eq!(
            "custom-cake".parse::<ContactTopic>().unwrap(),
            ContactTopic::CustomCake
        );
    }

    #[test]
    fn test_serde_matches_text_form() {
        // The serde form and the database text form must agree.
        let json = serde_json::to_string(&OrderStatus::PickedUp).unwrap();
        assert_eq!(json, format!("\"{}\"", OrderStatus::PickedUp));
    }
}
