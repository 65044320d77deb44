//! Admin contact-submission management.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use sweet_dessert_core::ContactSubmissionId;

use crate::db::ContactRepository;
use crate::error::Result;
use crate::middleware::RequireStaff;
use crate::models::contact::ContactSubmission;
use crate::state::AppState;

/// Listing parameters.
#[derive(Debug, Deserialize)]
pub struct ContactListParams {
    #[serde(default)]
    pub unanswered: bool,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

const fn default_limit() -> u32 {
    100
}

/// Admin-side update payload.
#[derive(Debug, Deserialize)]
pub struct ContactUpdatePayload {
    pub responded: bool,
    #[serde(default)]
    pub admin_notes: String,
}

/// List contact submissions.
///
/// GET /api/admin/contacts
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Query(params): Query<ContactListParams>,
) -> Result<Json<Vec<ContactSubmission>>> {
    let submissions = ContactRepository::new(state.pool())
        .list(params.unanswered, params.limit)
        .await?;
    Ok(Json(submissions))
}

/// Update the responded flag / internal notes.
///
/// PUT /api/admin/contacts/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Path(id): Path<ContactSubmissionId>,
    Json(payload): Json<ContactUpdatePayload>,
) -> Result<Json<ContactSubmission>> {
    let submission = ContactRepository::new(state.pool())
        .update_admin_fields(id, payload.responded, &payload.admin_notes)
        .await?;
    Ok(Json(submission))
}

/// Delete a contact submission.
///
/// DELETE /api/admin/contacts/{id}
pub async fn remove(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Path(id): Path<ContactSubmissionId>,
) -> Result<StatusCode> {
    ContactRepository::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
