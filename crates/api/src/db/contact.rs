//! Contact submission repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use sweet_dessert_core::{ContactSubmissionId, ContactTopic, Email, PreferredContact, UserId};

use super::RepositoryError;
use crate::models::contact::ContactSubmission;

#[derive(Debug, sqlx::FromRow)]
struct ContactRow {
    id: i32,
    user_id: Option<i32>,
    name: String,
    email: String,
    phone: String,
    subject: String,
    message: String,
    topic: String,
    preferred_contact: String,
    responded: bool,
    admin_notes: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ContactRow> for ContactSubmission {
    type Error = RepositoryError;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        let corrupt =
            |what: &str| RepositoryError::DataCorruption(format!("invalid {what} in contact row"));

        Ok(Self {
            id: ContactSubmissionId::new(row.id),
            user_id: row.user_id.map(UserId::new),
            name: row.name,
            email: Email::parse(&row.email).map_err(|_| corrupt("email"))?,
            phone: row.phone,
            subject: row.subject,
            message: row.message,
            topic: row.topic.parse().map_err(|_| corrupt("topic"))?,
            preferred_contact: row
                .preferred_contact
                .parse()
                .map_err(|_| corrupt("preferred contact"))?,
            responded: row.responded,
            admin_notes: row.admin_notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const CONTACT_COLUMNS: &str = r"
    id, user_id, name, email, phone, subject, message, topic,
    preferred_contact, responded, admin_notes, created_at, updated_at
";

/// A new contact submission from the public form.
#[derive(Debug, Clone)]
pub struct NewContact {
    pub user_id: Option<UserId>,
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub topic: ContactTopic,
    pub preferred_contact: PreferredContact,
}

/// Repository for contact submissions.
pub struct ContactRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new contact repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a contact submission.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, contact: &NewContact) -> Result<ContactSubmission, RepositoryError> {
        let query = format!(
            r"
            INSERT INTO contact_submission
                (user_id, name, email, phone, subject, message, topic, preferred_contact)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {CONTACT_COLUMNS}
            "
        );
        let row = sqlx::query_as::<_, ContactRow>(&query)
            .bind(contact.user_id.map(|id| id.as_i32()))
            .bind(&contact.name)
            .bind(contact.email.as_str())
            .bind(&contact.phone)
            .bind(&contact.subject)
            .bind(&contact.message)
            .bind(contact.topic.to_string())
            .bind(contact.preferred_contact.to_string())
            .fetch_one(self.pool)
            .await?;

        row.try_into()
    }

    /// List submissions from one user, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<ContactSubmission>, RepositoryError> {
        let query = format!(
            r"
            SELECT {CONTACT_COLUMNS} FROM contact_submission
            WHERE user_id = $1
            ORDER BY created_at DESC
            "
        );
        let rows = sqlx::query_as::<_, ContactRow>(&query)
            .bind(user_id.as_i32())
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List all submissions (admin), optionally only unanswered ones.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        unanswered_only: bool,
        limit: u32,
    ) -> Result<Vec<ContactSubmission>, RepositoryError> {
        let query = format!(
            r"
            SELECT {CONTACT_COLUMNS} FROM contact_submission
            WHERE NOT $1 OR NOT responded
            ORDER BY created_at DESC
            LIMIT $2
            "
        );
        let rows = sqlx::query_as::<_, ContactRow>(&query)
            .bind(unanswered_only)
            .bind(i64::from(limit.clamp(1, 500)))
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Count unanswered submissions (dashboard badge).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_unanswered(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM contact_submission WHERE NOT responded",
        )
        .fetch_one(self.pool)
        .await?;
        Ok(count)
    }

    /// Update the admin-facing fields of a submission.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the submission doesn't exist.
    pub async fn update_admin_fields(
        &self,
        id: ContactSubmissionId,
        responded: bool,
        admin_notes: &str,
    ) -> Result<ContactSubmission, RepositoryError> {
        let query = format!(
            r"
            UPDATE contact_submission
            SET responded = $2, admin_notes = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {CONTACT_COLUMNS}
            "
        );
        let row = sqlx::query_as::<_, ContactRow>(&query)
            .bind(id.as_i32())
            .bind(responded)
            .bind(admin_notes)
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into)
            .transpose()?
            .ok_or(RepositoryError::NotFound)
    }

    /// Delete a submission.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the submission doesn't exist.
    pub async fn delete(&self, id: ContactSubmissionId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM contact_submission WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
