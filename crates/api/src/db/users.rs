//! User repository for account storage.
//!
//! Password hashes stay inside this module and the auth service; they are
//! never attached to the `User` model handed to route handlers.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use sweet_dessert_core::{Email, UserId};

use super::RepositoryError;
use crate::models::user::User;

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    username: String,
    email: String,
    is_staff: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: UserId::new(row.id),
            username: row.username,
            email,
            is_staff: row.is_staff,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const USER_COLUMNS: &str = "id, username, email, is_staff, created_at, updated_at";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a user with a pre-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username or email exists.
    pub async fn create(
        &self,
        username: &str,
        email: &Email,
        password_hash: &str,
        is_staff: bool,
    ) -> Result<User, RepositoryError> {
        let query = format!(
            r"
            INSERT INTO shop_user (username, email, password_hash, is_staff)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "
        );
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(username)
            .bind(email.as_str())
            .bind(password_hash)
            .bind(is_staff)
            .fetch_one(self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(e, "username or email already exists"))?;

        row.try_into()
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let query = format!("SELECT {USER_COLUMNS} FROM shop_user WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a user and their password hash by email, for login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct WithHash {
            #[sqlx(flatten)]
            user: UserRow,
            password_hash: String,
        }

        let query = format!(
            "SELECT {USER_COLUMNS}, password_hash FROM shop_user WHERE LOWER(email) = LOWER($1)"
        );
        let row = sqlx::query_as::<_, WithHash>(&query)
            .bind(email.as_str())
            .fetch_optional(self.pool)
            .await?;

        match row {
            Some(r) => Ok(Some((r.user.try_into()?, r.password_hash))),
            None => Ok(None),
        }
    }

    /// List users, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, limit: u32) -> Result<Vec<User>, RepositoryError> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM shop_user ORDER BY created_at DESC LIMIT $1"
        );
        let rows = sqlx::query_as::<_, UserRow>(&query)
            .bind(i64::from(limit.clamp(1, 500)))
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Count all users.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM shop_user")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Update a user's profile fields (admin operation).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn update(
        &self,
        id: UserId,
        username: &str,
        email: &Email,
        is_staff: bool,
    ) -> Result<User, RepositoryError> {
        let query = format!(
            r"
            UPDATE shop_user
            SET username = $2, email = $3, is_staff = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "
        );
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id.as_i32())
            .bind(username)
            .bind(email.as_str())
            .bind(is_staff)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(e, "username or email already exists"))?;

        row.map(TryInto::try_into)
            .transpose()?
            .ok_or(RepositoryError::NotFound)
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn delete(&self, id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM shop_user WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
