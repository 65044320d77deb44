//! Contact form route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use sweet_dessert_core::{ContactTopic, Email, PreferredContact};

use crate::db::ContactRepository;
use crate::db::contact::NewContact;
use crate::error::{AppError, Result};
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::contact::ContactSubmission;
use crate::state::AppState;

/// Contact form payload.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub topic: ContactTopic,
    #[serde(default)]
    pub preferred_contact: PreferredContact,
}

/// Submit a contact form, linking it to the logged-in user when present.
///
/// POST /api/contact
#[instrument(skip(state, form), fields(topic = %form.topic))]
pub async fn submit(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Json(form): Json<ContactForm>,
) -> Result<(StatusCode, Json<ContactSubmission>)> {
    if form.name.trim().is_empty() || form.subject.trim().is_empty() || form.message.trim().is_empty()
    {
        return Err(AppError::BadRequest(
            "name, subject, and message are required".to_string(),
        ));
    }

    let email = Email::parse(form.email.trim())
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let submission = ContactRepository::new(state.pool())
        .create(&NewContact {
            user_id: user.map(|u| u.id),
            name: form.name.trim().to_string(),
            email,
            phone: form.phone.trim().to_string(),
            subject: form.subject.trim().to_string(),
            message: form.message,
            topic: form.topic,
            preferred_contact: form.preferred_contact,
        })
        .await?;

    tracing::info!(id = %submission.id, "Contact submission stored");

    Ok((StatusCode::CREATED, Json(submission)))
}

/// List the logged-in user's own submissions.
///
/// GET /api/contact/mine
pub async fn my_submissions(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<ContactSubmission>>> {
    let submissions = ContactRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(submissions))
}
