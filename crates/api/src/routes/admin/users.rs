//! Admin user management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use sweet_dessert_core::{Email, UserId};

use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireStaff;
use crate::models::user::User;
use crate::services::AuthService;
use crate::state::AppState;

/// Payload for creating a user from the admin panel.
#[derive(Debug, Deserialize)]
pub struct CreateUserPayload {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_staff: bool,
}

/// Payload for updating a user's profile.
#[derive(Debug, Deserialize)]
pub struct UpdateUserPayload {
    pub username: String,
    pub email: String,
    pub is_staff: bool,
}

/// List users.
///
/// GET /api/admin/users
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
) -> Result<Json<Vec<User>>> {
    let users = UserRepository::new(state.pool()).list(200).await?;
    Ok(Json(users))
}

/// Create a user (optionally staff).
///
/// POST /api/admin/users
#[instrument(skip_all, fields(username = %payload.username, is_staff = payload.is_staff))]
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Json(payload): Json<CreateUserPayload>,
) -> Result<(StatusCode, Json<User>)> {
    let auth = AuthService::new(state.pool());
    let user = if payload.is_staff {
        auth.register_staff(&payload.username, &payload.email, &payload.password)
            .await?
    } else {
        auth.register(&payload.username, &payload.email, &payload.password)
            .await?
    };

    Ok((StatusCode::CREATED, Json(user)))
}

/// Update a user's profile and staff flag.
///
/// PUT /api/admin/users/{id}
#[instrument(skip_all, fields(id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(_admin): RequireStaff,
    Path(id): Path<UserId>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<Json<User>> {
    let email = Email::parse(payload.email.trim())
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let user = UserRepository::new(state.pool())
        .update(id, payload.username.trim(), &email, payload.is_staff)
        .await?;
    Ok(Json(user))
}

/// Delete a user.
///
/// Staff cannot delete their own account while logged into it.
///
/// DELETE /api/admin/users/{id}
pub async fn remove(
    State(state): State<AppState>,
    RequireStaff(admin): RequireStaff,
    Path(id): Path<UserId>,
) -> Result<StatusCode> {
    if admin.id == id {
        return Err(AppError::BadRequest(
            "cannot delete the account you are logged in with".to_string(),
        ));
    }

    UserRepository::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
