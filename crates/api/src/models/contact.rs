//! Contact form submissions.

use chrono::{DateTime, Utc};
use serde::Serialize;

use sweet_dessert_core::{ContactSubmissionId, ContactTopic, Email, PreferredContact, UserId};

/// A submission from the contact form, optionally linked to a registered user.
#[derive(Debug, Clone, Serialize)]
pub struct ContactSubmission {
    pub id: ContactSubmissionId,
    pub user_id: Option<UserId>,
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub topic: ContactTopic,
    pub preferred_contact: PreferredContact,
    pub responded: bool,
    /// Internal notes, only surfaced through the admin API.
    pub admin_notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
