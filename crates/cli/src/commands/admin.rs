//! Staff account management commands.
//!
//! # Usage
//!
//! ```bash
//! sweet-dessert-cli admin create -u noor -e noor@example.com -p <password>
//! ```
//!
//! # Environment Variables
//!
//! - `SHOP_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)

use sweet_dessert_api::services::AuthService;

/// Create a staff account.
///
/// The password is validated and hashed by the same auth service the API
/// uses for registration; the only difference is the `is_staff` flag.
///
/// # Errors
///
/// Returns an error if validation fails, the account already exists, or
/// the database is unreachable.
pub async fn create_staff(
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    tracing::info!("Creating staff account: {} ({})", username, email);

    let user = AuthService::new(&pool)
        .register_staff(username, email, password)
        .await?;

    tracing::info!(
        "Staff account created! ID: {}, Username: {}, Email: {}",
        user.id,
        user.username,
        user.email
    );

    Ok(())
}
