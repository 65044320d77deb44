//! User model and the session view of the logged-in user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sweet_dessert_core::{Email, UserId};

/// A registered shop user.
///
/// The password hash never leaves the db layer; this struct is safe to
/// serialize in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Email,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The subset of user data stored in the session cookie's server-side record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
    pub email: Email,
    pub is_staff: bool,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            is_staff: user.is_staff,
        }
    }
}

/// Session storage keys.
pub mod session_keys {
    /// The logged-in user, if any.
    pub const CURRENT_USER: &str = "current_user";
    /// The chat assistant's cart.
    pub const CHAT_CART: &str = "chat_cart";
}
